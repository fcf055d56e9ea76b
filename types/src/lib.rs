//! Shared preset types for Clarity.
//!
//! Everything here is plain data: the grouping contexts a preset can be bound
//! to, the native visibility options a preset carries, and the [`Layer`]
//! record that bundles them. Resolution and persistence live in `clarity-core`.

pub mod grouping;
pub mod layer;
pub mod options;

pub use grouping::GroupingSize;
pub use layer::Layer;
pub use options::{
    BattleEffect, EngagedEnemyHpBarVisibility, EngagedEnemyNameplateVisibility, HighlightColor,
    HpBarVisibility, NameplateVisibility, ParseNameError, UnknownValue,
};
