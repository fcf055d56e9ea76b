//! First-run initialization from the client's live settings.
//!
//! A fresh install copies the player's current settings into every layer, so
//! turning presets on changes nothing until a layer is customized.

use clarity_types::{GroupingSize, Layer};

use crate::live::{LiveOption, LiveSettingsSource};

use super::store::LayerStore;

/// Read every client option into a new layer.
///
/// Options that cannot be read, or that hold a value this version does not
/// know, keep their zero-value default.
pub fn seed_layer<S: LiveSettingsSource + ?Sized>(source: &S) -> Layer {
    let mut layer = Layer::default();

    for option in LiveOption::ALL {
        let Some(raw) = source.read(option) else {
            tracing::debug!(%option, "Live option unavailable, using default");
            continue;
        };

        if let Err(e) = option.write_raw(&mut layer, raw) {
            tracing::debug!(%option, error = %e, "Unrecognized live value, using default");
        }
    }

    layer
}

/// Overwrite all six layers with the client's current settings.
pub fn seed_all<S: LiveSettingsSource + ?Sized>(store: &mut LayerStore, source: &S) {
    for size in GroupingSize::ALL {
        *store.layer_for_mut(size) = seed_layer(source);
    }
    tracing::info!("Seeded all preset layers from live settings");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::LiveSnapshot;
    use clarity_types::{
        BattleEffect, EngagedEnemyHpBarVisibility, EngagedEnemyNameplateVisibility,
        HighlightColor, HpBarVisibility, NameplateVisibility,
    };

    fn live_layer() -> Layer {
        Layer {
            battle_effect_self: BattleEffect::Limited,
            battle_effect_party: BattleEffect::None,
            battle_effect_other: BattleEffect::None,
            own_nameplate: NameplateVisibility::DuringBattle,
            party_nameplate: NameplateVisibility::WhenTargeted,
            alliance_nameplate: NameplateVisibility::Never,
            others_nameplate: NameplateVisibility::OutOfBattle,
            friends_nameplate: NameplateVisibility::Always,
            engaged_enemy_nameplate: EngagedEnemyNameplateVisibility::WhenTargeted,
            own_hp_bar: HpBarVisibility::Never,
            party_hp_bar: HpBarVisibility::DuringBattle,
            alliance_hp_bar: HpBarVisibility::WhenHpNotFull,
            others_hp_bar: HpBarVisibility::Always,
            friends_hp_bar: HpBarVisibility::Never,
            engaged_enemy_hp_bar: EngagedEnemyHpBarVisibility::Never,
            own_highlight: HighlightColor::Green,
            party_highlight: HighlightColor::Yellow,
            others_highlight: HighlightColor::Magenta,
            only_in_duty: false,
        }
    }

    #[test]
    fn test_seed_all_copies_live_values_into_every_layer() {
        let live = live_layer();
        let source = LiveSnapshot::capture(&live);

        let mut store = LayerStore::default();
        seed_all(&mut store, &source);

        for (size, layer) in store.iter() {
            assert_eq!(*layer, live, "layer {size:?} differs from live settings");
        }
    }

    #[test]
    fn test_missing_reads_use_defaults() {
        let mut source = LiveSnapshot::new();
        source.set(LiveOption::HpBarParty, 3);

        let layer = seed_layer(&source);
        assert_eq!(layer.party_hp_bar, HpBarVisibility::Never);
        assert_eq!(
            Layer {
                party_hp_bar: HpBarVisibility::default(),
                ..layer
            },
            Layer::default()
        );
    }

    #[test]
    fn test_unknown_values_use_defaults_without_aborting() {
        let mut source = LiveSnapshot::new();
        source.set(LiveOption::BattleEffectSelf, 99);
        source.set(LiveOption::HighlightOther, 7);
        source.set(LiveOption::NameplateOther, 4);

        let layer = seed_layer(&source);
        assert_eq!(layer.battle_effect_self, BattleEffect::All);
        assert_eq!(layer.others_highlight, HighlightColor::None);
        assert_eq!(layer.others_nameplate, NameplateVisibility::OutOfBattle);
    }

    #[test]
    fn test_seed_clears_only_in_duty() {
        let mut store = LayerStore::default();
        store.layer_for_mut(GroupingSize::Solo).only_in_duty = true;

        seed_all(&mut store, &LiveSnapshot::new());
        assert!(!store.layer_for(GroupingSize::Solo).only_in_duty);
    }
}
