use serde::{Deserialize, Serialize};

use clarity_types::{GroupingSize, Layer};

use crate::context::Classification;

use super::resolver::{ActiveLayer, resolve};

/// The six preset layers plus the global kill switch.
///
/// Each layer lives in a fixed slot keyed by [`GroupingSize`]; slots never
/// swap after construction, so edits must go through the store's own layer
/// rather than a detached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStore {
    /// When false, every resolution yields the `Backup` layer.
    pub enabled: bool,
    backup: Layer,
    solo: Layer,
    light_party: Layer,
    full_party: Layer,
    alliance: Layer,
    pvp: Layer,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self {
            enabled: true,
            backup: Layer::default(),
            solo: Layer::default(),
            light_party: Layer::default(),
            full_party: Layer::default(),
            alliance: Layer::default(),
            pvp: Layer::default(),
        }
    }
}

impl LayerStore {
    pub fn layer_for(&self, size: GroupingSize) -> &Layer {
        match size {
            GroupingSize::Backup => &self.backup,
            GroupingSize::Solo => &self.solo,
            GroupingSize::LightParty => &self.light_party,
            GroupingSize::FullParty => &self.full_party,
            GroupingSize::Alliance => &self.alliance,
            GroupingSize::PvP => &self.pvp,
        }
    }

    /// Writers are the configurator and the seeder; everything else reads.
    pub(crate) fn layer_for_mut(&mut self, size: GroupingSize) -> &mut Layer {
        match size {
            GroupingSize::Backup => &mut self.backup,
            GroupingSize::Solo => &mut self.solo,
            GroupingSize::LightParty => &mut self.light_party,
            GroupingSize::FullParty => &mut self.full_party,
            GroupingSize::Alliance => &mut self.alliance,
            GroupingSize::PvP => &mut self.pvp,
        }
    }

    /// All layers in ascending grouping order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupingSize, &Layer)> + '_ {
        GroupingSize::ALL
            .into_iter()
            .map(move |size| (size, self.layer_for(size)))
    }

    /// The authoritative layer for a classification under this store's
    /// `enabled` flag.
    pub fn authoritative(&self, classification: Classification) -> ActiveLayer<'_> {
        resolve(
            self,
            classification.size,
            classification.in_duty,
            self.enabled,
        )
    }
}
