//! Native visibility options carried by a preset layer.
//!
//! Discriminants are the raw values the game client stores for each option,
//! so a layer can be read from and pushed to the client without a lookup
//! table. Every enum defaults to its raw-0 variant, which is also what a
//! failed read from the client falls back to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A raw client value that does not correspond to any known variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownValue {
    pub kind: &'static str,
    pub raw: u32,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value {}", self.kind, self.raw)
    }
}

impl std::error::Error for UnknownValue {}

/// A name that does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.name, self.kind)
    }
}

impl std::error::Error for ParseNameError {}

/// Defines an option enum with raw-value conversion, snake_case keys, and
/// human labels. Variants must be listed in ascending raw order starting at 0.
macro_rules! game_option {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident = $raw:literal => $key:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u32)]
        pub enum $name {
            $($variant = $raw,)+
        }

        impl $name {
            /// All variants in raw-value order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn raw(self) -> u32 {
                self as u32
            }

            pub fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $($raw => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Machine-readable name, identical to the serialized form.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl TryFrom<u32> for $name {
            type Error = UnknownValue;

            fn try_from(raw: u32) -> Result<Self, Self::Error> {
                Self::from_raw(raw).ok_or(UnknownValue { kind: $kind, raw })
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.raw()
            }
        }

        impl FromStr for $name {
            type Err = ParseNameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == normalized)
                    .ok_or_else(|| ParseNameError::new($kind, s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

game_option! {
    /// Battle effect visibility for one relation (self, party, others).
    BattleEffect ("battle effect") {
        All = 0 => "all", "All";
        Limited = 1 => "limited", "Limited";
        None = 2 => "none", "None";
    }
}

game_option! {
    /// Nameplate display mode for one relation.
    NameplateVisibility ("nameplate visibility") {
        Always = 0 => "always", "Always";
        DuringBattle = 1 => "during_battle", "During Battle";
        WhenTargeted = 2 => "when_targeted", "When Targeted";
        Never = 3 => "never", "Never";
        OutOfBattle = 4 => "out_of_battle", "Out of Battle";
    }
}

game_option! {
    /// Nameplate display mode for the engaged enemy.
    EngagedEnemyNameplateVisibility ("engaged enemy nameplate visibility") {
        Always = 0 => "always", "Always";
        WhenTargeted = 1 => "when_targeted", "When Targeted";
        Never = 2 => "never", "Never";
    }
}

game_option! {
    /// Nameplate HP bar display mode for one relation.
    HpBarVisibility ("hp bar visibility") {
        Always = 0 => "always", "Always";
        DuringBattle = 1 => "during_battle", "During Battle";
        WhenHpNotFull = 2 => "when_hp_not_full", "When HP Not Full";
        Never = 3 => "never", "Never";
    }
}

game_option! {
    /// Nameplate HP bar display mode for the engaged enemy.
    EngagedEnemyHpBarVisibility ("engaged enemy hp bar visibility") {
        Always = 0 => "always", "Always";
        WhenHpNotFull = 1 => "when_hp_not_full", "When HP Not Full";
        Never = 2 => "never", "Never";
    }
}

game_option! {
    /// Object highlight color.
    HighlightColor ("highlight color") {
        None = 0 => "none", "None";
        Red = 1 => "red", "Red";
        Green = 2 => "green", "Green";
        Blue = 3 => "blue", "Blue";
        Yellow = 4 => "yellow", "Yellow";
        Orange = 5 => "orange", "Orange";
        Magenta = 6 => "magenta", "Magenta";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_raw_zero() {
        assert_eq!(BattleEffect::default(), BattleEffect::All);
        assert_eq!(NameplateVisibility::default(), NameplateVisibility::Always);
        assert_eq!(
            EngagedEnemyNameplateVisibility::default(),
            EngagedEnemyNameplateVisibility::Always
        );
        assert_eq!(HpBarVisibility::default(), HpBarVisibility::Always);
        assert_eq!(
            EngagedEnemyHpBarVisibility::default(),
            EngagedEnemyHpBarVisibility::Always
        );
        assert_eq!(HighlightColor::default(), HighlightColor::None);
    }

    #[test]
    fn test_variant_counts() {
        assert_eq!(BattleEffect::ALL.len(), 3);
        assert_eq!(NameplateVisibility::ALL.len(), 5);
        assert_eq!(EngagedEnemyNameplateVisibility::ALL.len(), 3);
        assert_eq!(HpBarVisibility::ALL.len(), 4);
        assert_eq!(EngagedEnemyHpBarVisibility::ALL.len(), 3);
        assert_eq!(HighlightColor::ALL.len(), 7);
    }

    #[test]
    fn test_raw_values_follow_client_layout() {
        // Out of Battle sits after Never in the client numbering.
        assert_eq!(NameplateVisibility::WhenTargeted.raw(), 2);
        assert_eq!(NameplateVisibility::Never.raw(), 3);
        assert_eq!(NameplateVisibility::OutOfBattle.raw(), 4);
        assert_eq!(EngagedEnemyHpBarVisibility::WhenHpNotFull.raw(), 1);
        assert_eq!(HighlightColor::Magenta.raw(), 6);
    }

    #[test]
    fn test_try_from_unknown_raw() {
        assert_eq!(BattleEffect::try_from(1), Ok(BattleEffect::Limited));
        let err = BattleEffect::try_from(3).unwrap_err();
        assert_eq!(err.raw, 3);
        assert_eq!(err.to_string(), "unknown battle effect value 3");
        assert!(HighlightColor::try_from(7).is_err());
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            "out-of-battle".parse::<NameplateVisibility>(),
            Ok(NameplateVisibility::OutOfBattle)
        );
        assert_eq!(
            "When_HP_Not_Full".parse::<HpBarVisibility>(),
            Ok(HpBarVisibility::WhenHpNotFull)
        );
        let err = "purple".parse::<HighlightColor>().unwrap_err();
        assert_eq!(err.to_string(), "'purple' is not a valid highlight color");
    }

    #[test]
    fn test_serialized_names_match_keys() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            value: NameplateVisibility,
        }

        for &value in NameplateVisibility::ALL {
            let text = toml::to_string(&Wrapper { value }).unwrap();
            assert_eq!(text.trim(), format!("value = \"{}\"", value.key()));
        }
    }
}
