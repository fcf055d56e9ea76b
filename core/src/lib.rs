pub mod config;
pub mod context;
pub mod live;
pub mod presets;

// Re-exports for convenience
pub use clarity_types::*;
pub use config::{ClarityConfig, ConfigError, ConfigFile, Persistence};
pub use context::{BattleStateOracle, Classification, DebugOverrides};
pub use live::{LiveOption, LiveSettingsError, LiveSettingsSink, LiveSettingsSource, LiveSnapshot};
pub use presets::{ActiveLayer, Configurator, LayerStore, resolve};
