//! Live game-context classification.
//!
//! The classifier that inspects the party list and territory is owned by the
//! host. The core only sees its answer as a [`Classification`], optionally
//! rewritten by the persisted [`DebugOverrides`].

use serde::{Deserialize, Serialize};

use clarity_types::GroupingSize;

/// The player's current situation as seen by the battle-state oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub size: GroupingSize,
    /// Inside a duty, instance, or PvP match.
    pub in_duty: bool,
}

impl Classification {
    pub fn new(size: GroupingSize, in_duty: bool) -> Self {
        Self { size, in_duty }
    }
}

/// Source of the live classification, queried once per evaluation.
pub trait BattleStateOracle {
    fn classify(&self) -> Classification;
}

/// A fixed classification is its own oracle.
impl BattleStateOracle for Classification {
    fn classify(&self) -> Classification {
        *self
    }
}

/// Developer toggles that bypass the live classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOverrides {
    pub force_party_size: bool,
    /// Member count used when `force_party_size` is set.
    pub party_size: u32,
    pub force_in_duty: bool,
    /// Implies being in a duty.
    pub force_in_pvp: bool,
}

impl DebugOverrides {
    /// Whether any override is active.
    pub fn is_active(&self) -> bool {
        self.force_party_size || self.force_in_duty || self.force_in_pvp
    }

    /// Rewrite a live classification according to the active overrides.
    pub fn apply(&self, live: Classification) -> Classification {
        let mut result = live;

        if self.force_in_pvp {
            result.size = GroupingSize::PvP;
            result.in_duty = true;
        } else if self.force_party_size {
            result.size = GroupingSize::from_party_size(self.party_size);
        }

        if self.force_in_duty {
            result.in_duty = true;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_passes_through() {
        let live = Classification::new(GroupingSize::FullParty, false);
        assert_eq!(DebugOverrides::default().apply(live), live);
        assert!(!DebugOverrides::default().is_active());
    }

    #[test]
    fn test_forced_party_size() {
        let debug = DebugOverrides {
            force_party_size: true,
            party_size: 4,
            ..Default::default()
        };
        let live = Classification::new(GroupingSize::Alliance, true);
        assert_eq!(
            debug.apply(live),
            Classification::new(GroupingSize::LightParty, true)
        );
    }

    #[test]
    fn test_party_size_ignored_unless_forced() {
        let debug = DebugOverrides {
            party_size: 8,
            ..Default::default()
        };
        let live = Classification::new(GroupingSize::Solo, false);
        assert_eq!(debug.apply(live), live);
    }

    #[test]
    fn test_forced_duty() {
        let debug = DebugOverrides {
            force_in_duty: true,
            ..Default::default()
        };
        let live = Classification::new(GroupingSize::Solo, false);
        assert_eq!(debug.apply(live), Classification::new(GroupingSize::Solo, true));
    }

    #[test]
    fn test_forced_pvp_wins_over_party_size() {
        let debug = DebugOverrides {
            force_party_size: true,
            party_size: 2,
            force_in_pvp: true,
            ..Default::default()
        };
        let live = Classification::new(GroupingSize::Solo, false);
        assert_eq!(debug.apply(live), Classification::new(GroupingSize::PvP, true));
    }
}
