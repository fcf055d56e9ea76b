//! Grouping contexts a preset layer can be bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::options::ParseNameError;

/// Classification of the player's party/raid/PvP context.
///
/// The declaration order is the fallback order: a layer that is inactive
/// outside a duty hands authority to the next lower size, ending at `Backup`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupingSize {
    /// The game's own saved settings. Terminal fallback target.
    #[default]
    Backup = 0,
    Solo = 1,
    LightParty = 2,
    FullParty = 3,
    Alliance = 4,
    #[serde(rename = "pvp")]
    PvP = 5,
}

impl GroupingSize {
    /// All sizes in ascending order.
    pub const ALL: [GroupingSize; 6] = [
        GroupingSize::Backup,
        GroupingSize::Solo,
        GroupingSize::LightParty,
        GroupingSize::FullParty,
        GroupingSize::Alliance,
        GroupingSize::PvP,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// The next size toward `Backup`, or `None` when already at `Backup`.
    pub fn next_lower(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    /// Classify a party by member count.
    ///
    /// A solo player reports either zero or one member depending on whether
    /// the party list is populated, so both map to `Solo`.
    pub fn from_party_size(members: u32) -> Self {
        match members {
            0..=1 => GroupingSize::Solo,
            2..=4 => GroupingSize::LightParty,
            5..=8 => GroupingSize::FullParty,
            _ => GroupingSize::Alliance,
        }
    }

    /// Whether the editor offers the "only in duty" toggle for this size.
    ///
    /// `Backup` can never fall back further, and alliance raids and PvP
    /// matches only exist inside a duty, so the toggle would be meaningless.
    pub fn supports_only_in_duty(self) -> bool {
        !matches!(
            self,
            GroupingSize::Backup | GroupingSize::Alliance | GroupingSize::PvP
        )
    }

    /// Machine-readable name, identical to the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            GroupingSize::Backup => "backup",
            GroupingSize::Solo => "solo",
            GroupingSize::LightParty => "light_party",
            GroupingSize::FullParty => "full_party",
            GroupingSize::Alliance => "alliance",
            GroupingSize::PvP => "pvp",
        }
    }

    /// Section header shown in the editor.
    pub fn label(self) -> &'static str {
        match self {
            GroupingSize::Backup => "Saved In-Game Settings",
            GroupingSize::Solo => "Solo",
            GroupingSize::LightParty => "Light Party (4-man)",
            GroupingSize::FullParty => "Full Party (8-man)",
            GroupingSize::Alliance => "Alliance Raids (24-man Duty)",
            GroupingSize::PvP => "PvP",
        }
    }
}

impl fmt::Display for GroupingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GroupingSize {
    type Err = ParseNameError;

    /// Accepts the snake_case key, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|size| size.key() == normalized)
            .ok_or_else(|| ParseNameError::new("grouping size", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order_steps_toward_backup() {
        for pair in GroupingSize::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[1].next_lower(), Some(pair[0]));
        }
        assert_eq!(GroupingSize::Backup.next_lower(), None);
    }

    #[test]
    fn test_ordinal_round_trip() {
        for size in GroupingSize::ALL {
            assert_eq!(GroupingSize::from_ordinal(size.ordinal()), Some(size));
        }
        assert_eq!(GroupingSize::from_ordinal(6), None);
    }

    #[test]
    fn test_from_party_size() {
        assert_eq!(GroupingSize::from_party_size(0), GroupingSize::Solo);
        assert_eq!(GroupingSize::from_party_size(1), GroupingSize::Solo);
        assert_eq!(GroupingSize::from_party_size(2), GroupingSize::LightParty);
        assert_eq!(GroupingSize::from_party_size(4), GroupingSize::LightParty);
        assert_eq!(GroupingSize::from_party_size(5), GroupingSize::FullParty);
        assert_eq!(GroupingSize::from_party_size(8), GroupingSize::FullParty);
        assert_eq!(GroupingSize::from_party_size(9), GroupingSize::Alliance);
        assert_eq!(GroupingSize::from_party_size(24), GroupingSize::Alliance);
    }

    #[test]
    fn test_only_in_duty_toggle_visibility() {
        assert!(!GroupingSize::Backup.supports_only_in_duty());
        assert!(GroupingSize::Solo.supports_only_in_duty());
        assert!(GroupingSize::LightParty.supports_only_in_duty());
        assert!(GroupingSize::FullParty.supports_only_in_duty());
        assert!(!GroupingSize::Alliance.supports_only_in_duty());
        assert!(!GroupingSize::PvP.supports_only_in_duty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("light_party".parse::<GroupingSize>(), Ok(GroupingSize::LightParty));
        assert_eq!("Full-Party".parse::<GroupingSize>(), Ok(GroupingSize::FullParty));
        assert_eq!("pvp".parse::<GroupingSize>(), Ok(GroupingSize::PvP));
        assert!("raid".parse::<GroupingSize>().is_err());
    }

    #[test]
    fn test_serialized_names_match_keys() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            size: GroupingSize,
        }

        for size in GroupingSize::ALL {
            let text = toml::to_string(&Wrapper { size }).unwrap();
            assert_eq!(text.trim(), format!("size = \"{}\"", size.key()));
            let back: Wrapper = toml::from_str(&text).unwrap();
            assert_eq!(back.size, size);
        }
    }
}
