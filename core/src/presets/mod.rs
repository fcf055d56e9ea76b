//! Grouping-size preset layers and their resolution.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   classify()   ┌──────────────────────────────┐
//! │  BattleStateOracle   │ ─────────────▶ │ DebugOverrides::apply        │
//! └──────────────────────┘                └──────────────────────────────┘
//!                                                        │ (size, in_duty)
//!                                                        ▼
//! ┌──────────────────────┐   layer_for()  ┌──────────────────────────────┐
//! │     LayerStore       │ ◀───────────── │ resolve (fallback chain)     │
//! │ Backup..PvP, enabled │                └──────────────────────────────┘
//! └──────────────────────┘                               │ ActiveLayer
//!            ▲                                           ▼
//!            │ apply()    ┌──────────────────────────────────────────────┐
//!            └─────────── │ Configurator                                 │
//!                         │  save_now() every edit, push_layer() when    │
//!                         │  the edited layer was authoritative, sync()  │
//!                         │  on refresh when authority moved             │
//!                         └──────────────────────────────────────────────┘
//! ```

mod configurator;
mod resolver;
mod seeder;
mod store;


pub use configurator::Configurator;
pub use resolver::{ActiveLayer, FallbackChain, resolve, resolve_size};
pub use seeder::{seed_all, seed_layer};
pub use store::LayerStore;
