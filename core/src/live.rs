//! Bridge to the game client's native visibility options.
//!
//! The client exposes one raw `u32` per option. [`LiveOption`] names each
//! option a layer carries and maps it onto the corresponding [`Layer`] field,
//! so seeding and pushing can work option-by-option without knowing the
//! layer's shape.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use clarity_types::{
    BattleEffect, EngagedEnemyHpBarVisibility, EngagedEnemyNameplateVisibility, GroupingSize,
    HighlightColor, HpBarVisibility, Layer, NameplateVisibility, ParseNameError, UnknownValue,
};

/// A native client option backed by one layer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LiveOption {
    BattleEffectSelf,
    BattleEffectParty,
    BattleEffectOther,
    NameplateSelf,
    NameplateParty,
    NameplateAlliance,
    NameplateOther,
    NameplateFriend,
    NameplateEngagedEnemy,
    HpBarSelf,
    HpBarParty,
    HpBarAlliance,
    HpBarOther,
    HpBarFriend,
    HpBarEngagedEnemy,
    HighlightSelf,
    HighlightParty,
    HighlightOther,
}

impl LiveOption {
    pub const ALL: [LiveOption; 18] = [
        LiveOption::BattleEffectSelf,
        LiveOption::BattleEffectParty,
        LiveOption::BattleEffectOther,
        LiveOption::NameplateSelf,
        LiveOption::NameplateParty,
        LiveOption::NameplateAlliance,
        LiveOption::NameplateOther,
        LiveOption::NameplateFriend,
        LiveOption::NameplateEngagedEnemy,
        LiveOption::HpBarSelf,
        LiveOption::HpBarParty,
        LiveOption::HpBarAlliance,
        LiveOption::HpBarOther,
        LiveOption::HpBarFriend,
        LiveOption::HpBarEngagedEnemy,
        LiveOption::HighlightSelf,
        LiveOption::HighlightParty,
        LiveOption::HighlightOther,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LiveOption::BattleEffectSelf => "battle_effect_self",
            LiveOption::BattleEffectParty => "battle_effect_party",
            LiveOption::BattleEffectOther => "battle_effect_other",
            LiveOption::NameplateSelf => "nameplate_self",
            LiveOption::NameplateParty => "nameplate_party",
            LiveOption::NameplateAlliance => "nameplate_alliance",
            LiveOption::NameplateOther => "nameplate_other",
            LiveOption::NameplateFriend => "nameplate_friend",
            LiveOption::NameplateEngagedEnemy => "nameplate_engaged_enemy",
            LiveOption::HpBarSelf => "hp_bar_self",
            LiveOption::HpBarParty => "hp_bar_party",
            LiveOption::HpBarAlliance => "hp_bar_alliance",
            LiveOption::HpBarOther => "hp_bar_other",
            LiveOption::HpBarFriend => "hp_bar_friend",
            LiveOption::HpBarEngagedEnemy => "hp_bar_engaged_enemy",
            LiveOption::HighlightSelf => "highlight_self",
            LiveOption::HighlightParty => "highlight_party",
            LiveOption::HighlightOther => "highlight_other",
        }
    }

    /// Raw client value of this option as stored in `layer`.
    pub fn read_raw(self, layer: &Layer) -> u32 {
        match self {
            LiveOption::BattleEffectSelf => layer.battle_effect_self.raw(),
            LiveOption::BattleEffectParty => layer.battle_effect_party.raw(),
            LiveOption::BattleEffectOther => layer.battle_effect_other.raw(),
            LiveOption::NameplateSelf => layer.own_nameplate.raw(),
            LiveOption::NameplateParty => layer.party_nameplate.raw(),
            LiveOption::NameplateAlliance => layer.alliance_nameplate.raw(),
            LiveOption::NameplateOther => layer.others_nameplate.raw(),
            LiveOption::NameplateFriend => layer.friends_nameplate.raw(),
            LiveOption::NameplateEngagedEnemy => layer.engaged_enemy_nameplate.raw(),
            LiveOption::HpBarSelf => layer.own_hp_bar.raw(),
            LiveOption::HpBarParty => layer.party_hp_bar.raw(),
            LiveOption::HpBarAlliance => layer.alliance_hp_bar.raw(),
            LiveOption::HpBarOther => layer.others_hp_bar.raw(),
            LiveOption::HpBarFriend => layer.friends_hp_bar.raw(),
            LiveOption::HpBarEngagedEnemy => layer.engaged_enemy_hp_bar.raw(),
            LiveOption::HighlightSelf => layer.own_highlight.raw(),
            LiveOption::HighlightParty => layer.party_highlight.raw(),
            LiveOption::HighlightOther => layer.others_highlight.raw(),
        }
    }

    /// Human label of this option's value in `layer`.
    pub fn describe(self, layer: &Layer) -> &'static str {
        match self {
            LiveOption::BattleEffectSelf => layer.battle_effect_self.label(),
            LiveOption::BattleEffectParty => layer.battle_effect_party.label(),
            LiveOption::BattleEffectOther => layer.battle_effect_other.label(),
            LiveOption::NameplateSelf => layer.own_nameplate.label(),
            LiveOption::NameplateParty => layer.party_nameplate.label(),
            LiveOption::NameplateAlliance => layer.alliance_nameplate.label(),
            LiveOption::NameplateOther => layer.others_nameplate.label(),
            LiveOption::NameplateFriend => layer.friends_nameplate.label(),
            LiveOption::NameplateEngagedEnemy => layer.engaged_enemy_nameplate.label(),
            LiveOption::HpBarSelf => layer.own_hp_bar.label(),
            LiveOption::HpBarParty => layer.party_hp_bar.label(),
            LiveOption::HpBarAlliance => layer.alliance_hp_bar.label(),
            LiveOption::HpBarOther => layer.others_hp_bar.label(),
            LiveOption::HpBarFriend => layer.friends_hp_bar.label(),
            LiveOption::HpBarEngagedEnemy => layer.engaged_enemy_hp_bar.label(),
            LiveOption::HighlightSelf => layer.own_highlight.label(),
            LiveOption::HighlightParty => layer.party_highlight.label(),
            LiveOption::HighlightOther => layer.others_highlight.label(),
        }
    }

    /// Store a raw client value into the matching field of `layer`.
    /// Leaves the layer untouched when the value is unknown.
    pub fn write_raw(self, layer: &mut Layer, raw: u32) -> Result<(), UnknownValue> {
        match self {
            LiveOption::BattleEffectSelf => layer.battle_effect_self = BattleEffect::try_from(raw)?,
            LiveOption::BattleEffectParty => {
                layer.battle_effect_party = BattleEffect::try_from(raw)?
            }
            LiveOption::BattleEffectOther => {
                layer.battle_effect_other = BattleEffect::try_from(raw)?
            }
            LiveOption::NameplateSelf => layer.own_nameplate = NameplateVisibility::try_from(raw)?,
            LiveOption::NameplateParty => {
                layer.party_nameplate = NameplateVisibility::try_from(raw)?
            }
            LiveOption::NameplateAlliance => {
                layer.alliance_nameplate = NameplateVisibility::try_from(raw)?
            }
            LiveOption::NameplateOther => {
                layer.others_nameplate = NameplateVisibility::try_from(raw)?
            }
            LiveOption::NameplateFriend => {
                layer.friends_nameplate = NameplateVisibility::try_from(raw)?
            }
            LiveOption::NameplateEngagedEnemy => {
                layer.engaged_enemy_nameplate = EngagedEnemyNameplateVisibility::try_from(raw)?
            }
            LiveOption::HpBarSelf => layer.own_hp_bar = HpBarVisibility::try_from(raw)?,
            LiveOption::HpBarParty => layer.party_hp_bar = HpBarVisibility::try_from(raw)?,
            LiveOption::HpBarAlliance => layer.alliance_hp_bar = HpBarVisibility::try_from(raw)?,
            LiveOption::HpBarOther => layer.others_hp_bar = HpBarVisibility::try_from(raw)?,
            LiveOption::HpBarFriend => layer.friends_hp_bar = HpBarVisibility::try_from(raw)?,
            LiveOption::HpBarEngagedEnemy => {
                layer.engaged_enemy_hp_bar = EngagedEnemyHpBarVisibility::try_from(raw)?
            }
            LiveOption::HighlightSelf => layer.own_highlight = HighlightColor::try_from(raw)?,
            LiveOption::HighlightParty => layer.party_highlight = HighlightColor::try_from(raw)?,
            LiveOption::HighlightOther => layer.others_highlight = HighlightColor::try_from(raw)?,
        }
        Ok(())
    }

    /// Parse a value name (e.g. `"when_targeted"`) into this option's raw value.
    pub fn parse_value(self, name: &str) -> Result<u32, ParseNameError> {
        let raw = match self {
            LiveOption::BattleEffectSelf
            | LiveOption::BattleEffectParty
            | LiveOption::BattleEffectOther => name.parse::<BattleEffect>()?.raw(),
            LiveOption::NameplateSelf
            | LiveOption::NameplateParty
            | LiveOption::NameplateAlliance
            | LiveOption::NameplateOther
            | LiveOption::NameplateFriend => name.parse::<NameplateVisibility>()?.raw(),
            LiveOption::NameplateEngagedEnemy => {
                name.parse::<EngagedEnemyNameplateVisibility>()?.raw()
            }
            LiveOption::HpBarSelf
            | LiveOption::HpBarParty
            | LiveOption::HpBarAlliance
            | LiveOption::HpBarOther
            | LiveOption::HpBarFriend => name.parse::<HpBarVisibility>()?.raw(),
            LiveOption::HpBarEngagedEnemy => name.parse::<EngagedEnemyHpBarVisibility>()?.raw(),
            LiveOption::HighlightSelf | LiveOption::HighlightParty | LiveOption::HighlightOther => {
                name.parse::<HighlightColor>()?.raw()
            }
        };
        Ok(raw)
    }
}

impl fmt::Display for LiveOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LiveOption {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|option| option.key() == normalized)
            .ok_or_else(|| ParseNameError::new("live option", s))
    }
}

/// Per-option read access to the client's current settings.
pub trait LiveSettingsSource {
    /// `None` when the option cannot be read.
    fn read(&self, option: LiveOption) -> Option<u32>;
}

/// Write access to the client's current settings.
pub trait LiveSettingsSink {
    /// Make `layer` the client's live configuration immediately.
    fn push_layer(&mut self, size: GroupingSize, layer: &Layer) -> Result<(), LiveSettingsError>;
}

#[derive(Debug, Error)]
pub enum LiveSettingsError {
    #[error("live settings unavailable: {0}")]
    Unavailable(String),
}

/// A captured set of raw client values, keyed by option.
///
/// Serves as a [`LiveSettingsSource`] when the client itself is not
/// reachable, e.g. to seed a configuration from an exported TOML table:
///
/// ```toml
/// battle_effect_self = 0
/// battle_effect_other = 1
/// nameplate_friend = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSnapshot {
    values: BTreeMap<LiveOption, u32>,
}

impl LiveSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every option from a layer.
    pub fn capture(layer: &Layer) -> Self {
        let values = LiveOption::ALL
            .into_iter()
            .map(|option| (option, option.read_raw(layer)))
            .collect();
        Self { values }
    }

    pub fn set(&mut self, option: LiveOption, raw: u32) {
        self.values.insert(option, raw);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a TOML table of `option = raw` pairs. Unknown option names are
    /// skipped with a warning.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let table: BTreeMap<String, u32> = toml::from_str(contents)?;
        let mut snapshot = Self::new();

        for (key, raw) in table {
            match key.parse::<LiveOption>() {
                Ok(option) => snapshot.set(option, raw),
                Err(e) => tracing::warn!(error = %e, "Skipping unknown live option"),
            }
        }

        Ok(snapshot)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let table: BTreeMap<&str, u32> = self
            .values
            .iter()
            .map(|(option, raw)| (option.key(), *raw))
            .collect();
        toml::to_string(&table)
    }
}

impl LiveSettingsSource for LiveSnapshot {
    fn read(&self, option: LiveOption) -> Option<u32> {
        self.values.get(&option).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layer() -> Layer {
        Layer {
            battle_effect_party: BattleEffect::Limited,
            battle_effect_other: BattleEffect::None,
            own_nameplate: NameplateVisibility::OutOfBattle,
            friends_nameplate: NameplateVisibility::WhenTargeted,
            engaged_enemy_nameplate: EngagedEnemyNameplateVisibility::Never,
            alliance_hp_bar: HpBarVisibility::WhenHpNotFull,
            engaged_enemy_hp_bar: EngagedEnemyHpBarVisibility::WhenHpNotFull,
            party_highlight: HighlightColor::Blue,
            ..Default::default()
        }
    }

    #[test]
    fn test_option_keys_are_unique_and_parse() {
        for option in LiveOption::ALL {
            assert_eq!(option.key().parse::<LiveOption>(), Ok(option));
        }
        let mut keys: Vec<_> = LiveOption::ALL.iter().map(|o| o.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), LiveOption::ALL.len());
    }

    #[test]
    fn test_write_raw_targets_matching_field() {
        let source = sample_layer();
        let mut copy = Layer::default();
        for option in LiveOption::ALL {
            option.write_raw(&mut copy, option.read_raw(&source)).unwrap();
        }
        // only_in_duty is not a client option
        assert_eq!(copy, source);
    }

    #[test]
    fn test_write_raw_rejects_out_of_range() {
        let mut layer = sample_layer();
        let err = LiveOption::NameplateEngagedEnemy
            .write_raw(&mut layer, 3)
            .unwrap_err();
        assert_eq!(err.raw, 3);
        assert_eq!(
            layer.engaged_enemy_nameplate,
            EngagedEnemyNameplateVisibility::Never
        );
    }

    #[test]
    fn test_parse_value_uses_option_enum() {
        assert_eq!(LiveOption::NameplateFriend.parse_value("out_of_battle"), Ok(4));
        assert_eq!(LiveOption::HpBarEngagedEnemy.parse_value("never"), Ok(2));
        assert_eq!(LiveOption::HighlightOther.parse_value("magenta"), Ok(6));
        // Restricted enums reject values only the wider enum has
        assert!(
            LiveOption::NameplateEngagedEnemy
                .parse_value("during_battle")
                .is_err()
        );
    }

    #[test]
    fn test_snapshot_from_toml() {
        let toml = r#"
battle_effect_self = 2
nameplate_friend = 4
highlight_party = 3
not_an_option = 1
"#;

        let snapshot = LiveSnapshot::from_toml_str(toml).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.read(LiveOption::BattleEffectSelf), Some(2));
        assert_eq!(snapshot.read(LiveOption::NameplateFriend), Some(4));
        assert_eq!(snapshot.read(LiveOption::HighlightParty), Some(3));
        assert_eq!(snapshot.read(LiveOption::HpBarSelf), None);
    }

    #[test]
    fn test_snapshot_capture_covers_every_option() {
        let layer = sample_layer();
        let snapshot = LiveSnapshot::capture(&layer);
        assert_eq!(snapshot.len(), LiveOption::ALL.len());
        assert_eq!(snapshot.read(LiveOption::HighlightParty), Some(3));

        let text = snapshot.to_toml_string().unwrap();
        assert_eq!(LiveSnapshot::from_toml_str(&text).unwrap(), snapshot);
    }
}
