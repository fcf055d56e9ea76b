use serde::{Deserialize, Serialize};

use crate::options::{
    BattleEffect, EngagedEnemyHpBarVisibility, EngagedEnemyNameplateVisibility, HighlightColor,
    HpBarVisibility, NameplateVisibility,
};

/// One complete set of visibility preferences for a grouping context.
///
/// A layer carries no identity of its own; the store keys it by
/// [`GroupingSize`](crate::GroupingSize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    // Battle effects
    pub battle_effect_self: BattleEffect,
    pub battle_effect_party: BattleEffect,
    /// Excludes PvP opponents.
    pub battle_effect_other: BattleEffect,

    // Nameplates
    pub own_nameplate: NameplateVisibility,
    pub party_nameplate: NameplateVisibility,
    pub alliance_nameplate: NameplateVisibility,
    pub others_nameplate: NameplateVisibility,
    pub friends_nameplate: NameplateVisibility,
    pub engaged_enemy_nameplate: EngagedEnemyNameplateVisibility,

    // Nameplate HP bars
    pub own_hp_bar: HpBarVisibility,
    pub party_hp_bar: HpBarVisibility,
    pub alliance_hp_bar: HpBarVisibility,
    pub others_hp_bar: HpBarVisibility,
    pub friends_hp_bar: HpBarVisibility,
    pub engaged_enemy_hp_bar: EngagedEnemyHpBarVisibility,

    // Highlights
    pub own_highlight: HighlightColor,
    pub party_highlight: HighlightColor,
    pub others_highlight: HighlightColor,

    /// Only authoritative while inside a duty or PvP match. Outside one,
    /// resolution falls back to the next lower grouping size.
    pub only_in_duty: bool,
}

impl Layer {
    /// Names of the fields whose values differ between `self` and `other`.
    pub fn changed_fields(&self, other: &Layer) -> Vec<&'static str> {
        let mut changed = Vec::new();

        macro_rules! compare {
            ($($field:ident),+ $(,)?) => {
                $(
                    if self.$field != other.$field {
                        changed.push(stringify!($field));
                    }
                )+
            };
        }

        compare!(
            battle_effect_self,
            battle_effect_party,
            battle_effect_other,
            own_nameplate,
            party_nameplate,
            alliance_nameplate,
            others_nameplate,
            friends_nameplate,
            engaged_enemy_nameplate,
            own_hp_bar,
            party_hp_bar,
            alliance_hp_bar,
            others_hp_bar,
            friends_hp_bar,
            engaged_enemy_hp_bar,
            own_highlight,
            party_highlight,
            others_highlight,
            only_in_duty,
        );

        changed
    }
}
