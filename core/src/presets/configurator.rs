use clarity_types::{GroupingSize, Layer};

use crate::config::{ClarityConfig, Persistence};
use crate::context::{BattleStateOracle, Classification, DebugOverrides};
use crate::live::LiveSettingsSink;

use super::resolver::ActiveLayer;
use super::store::LayerStore;

/// Owns the configuration and routes every edit to persistence and, when the
/// edited layer is in effect, to the live client.
///
/// All calls happen on the host's UI thread; nothing here blocks or spawns.
pub struct Configurator {
    config: ClarityConfig,
    oracle: Box<dyn BattleStateOracle>,
    sink: Box<dyn LiveSettingsSink>,
    persistence: Box<dyn Persistence>,
    /// Size of the layer most recently pushed to the client.
    last_pushed: Option<GroupingSize>,
}

impl Configurator {
    pub fn new(
        config: ClarityConfig,
        oracle: Box<dyn BattleStateOracle>,
        sink: Box<dyn LiveSettingsSink>,
        persistence: Box<dyn Persistence>,
    ) -> Self {
        Self {
            config,
            oracle,
            sink,
            persistence,
            last_pushed: None,
        }
    }

    pub fn config(&self) -> &ClarityConfig {
        &self.config
    }

    pub fn store(&self) -> &LayerStore {
        &self.config.presets
    }

    /// Live classification with debug overrides applied.
    pub fn classification(&self) -> Classification {
        self.config.debug.apply(self.oracle.classify())
    }

    /// The layer currently in effect.
    pub fn active(&self) -> ActiveLayer<'_> {
        self.config.presets.authoritative(self.classification())
    }

    pub fn active_size(&self) -> GroupingSize {
        self.active().size
    }

    pub fn is_active(&self, size: GroupingSize) -> bool {
        self.active_size() == size
    }

    /// Commit edited values for one layer.
    ///
    /// Returns `false` without side effects when nothing differs. Otherwise
    /// the layer is updated in place, pushed to the client if it was
    /// authoritative when the edit arrived, and the configuration is saved.
    /// Authority moved by the edit itself is picked up by the next [`sync`].
    ///
    /// [`sync`]: Configurator::sync
    pub fn apply(&mut self, size: GroupingSize, values: Layer) -> bool {
        let authoritative = self.is_active(size);

        let layer = self.config.presets.layer_for_mut(size);
        if *layer == values {
            return false;
        }
        let changed = layer.changed_fields(&values);
        *layer = values;
        tracing::debug!(?size, ?changed, "Layer updated");

        if authoritative {
            self.push(size);
        }

        self.save();
        true
    }

    /// Flip the global kill switch.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.config.presets.enabled == enabled {
            return false;
        }

        let before = self.active_size();
        self.config.presets.enabled = enabled;
        tracing::info!(enabled, "Presets toggled");

        self.push_if_moved(before);
        self.save();
        true
    }

    /// Replace the developer overrides.
    pub fn set_debug(&mut self, overrides: DebugOverrides) -> bool {
        if self.config.debug == overrides {
            return false;
        }

        let before = self.active_size();
        self.config.debug = overrides;
        tracing::debug!(?overrides, "Debug overrides updated");

        self.push_if_moved(before);
        self.save();
        true
    }

    /// Record whether the editor window is open.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.config.is_visible == visible {
            return false;
        }
        self.config.is_visible = visible;
        self.save();
        true
    }

    pub fn set_debug_messages(&mut self, enabled: bool) -> bool {
        if self.config.debug_messages == enabled {
            return false;
        }
        self.config.debug_messages = enabled;
        self.save();
        true
    }

    /// Called on every host refresh. Pushes the authoritative layer when it
    /// differs from the one last pushed and returns its size.
    pub fn sync(&mut self) -> Option<GroupingSize> {
        let active = self.active_size();
        if self.last_pushed == Some(active) {
            return None;
        }
        self.push(active);
        Some(active)
    }

    /// Request a save of the whole configuration. Failures are logged and
    /// otherwise ignored; the edit stays applied in memory.
    pub fn save(&mut self) {
        if let Err(e) = self.persistence.save_now(&self.config) {
            tracing::warn!(error = %e, "Failed to save config");
        }
    }

    /// Final save at shutdown, returning the configuration.
    pub fn shutdown(mut self) -> ClarityConfig {
        self.save();
        self.config
    }

    fn push_if_moved(&mut self, before: GroupingSize) {
        let after = self.active_size();
        if after != before {
            self.push(after);
        }
    }

    fn push(&mut self, size: GroupingSize) {
        if self.last_pushed != Some(size) {
            tracing::info!(?size, "Authoritative layer changed");
        }

        let layer = self.config.presets.layer_for(size);
        match self.sink.push_layer(size, layer) {
            Ok(()) => self.last_pushed = Some(size),
            Err(e) => tracing::warn!(?size, error = %e, "Failed to push layer to client"),
        }
    }
}
