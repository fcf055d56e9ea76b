use std::path::Path;

use clarity_core::presets::{FallbackChain, seed_layer};
use clarity_core::{
    Classification, ConfigFile, Configurator, DebugOverrides, GroupingSize, Layer, LiveOption,
    LiveSettingsError, LiveSettingsSink, LiveSnapshot,
};

/// Stands in for the game client: logs every layer it is asked to apply.
struct LogSink;

impl LiveSettingsSink for LogSink {
    fn push_layer(&mut self, size: GroupingSize, layer: &Layer) -> Result<(), LiveSettingsError> {
        for option in LiveOption::ALL {
            tracing::debug!(%option, raw = option.read_raw(layer), "Live option");
        }
        tracing::info!(?size, "Pushed layer to client");
        Ok(())
    }
}

/// Load (or seed) the config and wire it to a fixed classification.
pub fn open(
    mut file: ConfigFile,
    live: Option<&Path>,
    current: GroupingSize,
    in_duty: bool,
) -> Result<Configurator, String> {
    let snapshot = match live {
        Some(path) => read_snapshot(path)?,
        None => LiveSnapshot::new(),
    };

    let config = file.load_or_seed(&snapshot).map_err(|e| e.to_string())?;

    Ok(Configurator::new(
        config,
        Box::new(Classification::new(current, in_duty)),
        Box::new(LogSink),
        Box::new(file),
    ))
}

fn read_snapshot(path: &Path) -> Result<LiveSnapshot, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    LiveSnapshot::from_toml_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Read-only commands
// ─────────────────────────────────────────────────────────────────────────────

pub fn show(configurator: &Configurator, size: Option<GroupingSize>) {
    print_status(configurator);

    let sizes = match size {
        Some(size) => vec![size],
        None => GroupingSize::ALL.to_vec(),
    };
    let active = configurator.active_size();

    for size in sizes {
        println!();
        print_layer(size, configurator.store().layer_for(size), size == active);
    }
}

pub fn resolve(configurator: &Configurator) {
    let classification = configurator.classification();
    let store = configurator.store();

    let path: Vec<&str> = if !store.enabled {
        vec![GroupingSize::Backup.key()]
    } else if classification.in_duty {
        vec![classification.size.key()]
    } else {
        FallbackChain::new(store, classification.size)
            .map(GroupingSize::key)
            .collect()
    };

    println!("{}", configurator.active_size().key());
    println!("path: {}", path.join(" -> "));
}

fn print_status(configurator: &Configurator) {
    let config = configurator.config();
    let classification = configurator.classification();

    println!(
        "Presets: {}",
        if config.presets.enabled {
            "enabled"
        } else {
            "disabled (using saved in-game settings)"
        }
    );
    println!(
        "Classification: {}, {}",
        classification.size,
        if classification.in_duty {
            "in duty"
        } else {
            "outside duty"
        }
    );
    if config.debug.is_active() {
        println!("Debug overrides: {:?}", config.debug);
    }
    println!("Active layer: {}", configurator.active_size());
}

fn print_layer(size: GroupingSize, layer: &Layer, active: bool) {
    println!(
        "== {}{} ==",
        size.label(),
        if active { " (active)" } else { "" }
    );
    if size.supports_only_in_duty() {
        println!("  {:<24} {}", "only_in_duty", layer.only_in_duty);
    }
    for option in LiveOption::ALL {
        println!("  {:<24} {}", option.key(), option.describe(layer));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edits
// ─────────────────────────────────────────────────────────────────────────────

pub fn set_option(
    configurator: &mut Configurator,
    size: GroupingSize,
    option: LiveOption,
    value: &str,
) -> Result<(), String> {
    let raw = option.parse_value(value).map_err(|e| e.to_string())?;

    let mut layer = *configurator.store().layer_for(size);
    option.write_raw(&mut layer, raw).map_err(|e| e.to_string())?;

    let before = configurator.active_size();
    let changed = configurator.apply(size, layer);
    report_edit(configurator, size, changed, before);
    Ok(())
}

pub fn set_only_in_duty(
    configurator: &mut Configurator,
    size: GroupingSize,
    only_in_duty: bool,
) -> Result<(), String> {
    if !size.supports_only_in_duty() {
        return Err(format!("{} cannot be restricted to duties", size.label()));
    }

    let layer = Layer {
        only_in_duty,
        ..*configurator.store().layer_for(size)
    };

    let before = configurator.active_size();
    let changed = configurator.apply(size, layer);
    report_edit(configurator, size, changed, before);
    Ok(())
}

pub fn set_enabled(configurator: &mut Configurator, enabled: bool) {
    if configurator.set_enabled(enabled) {
        println!("Presets {}", if enabled { "enabled" } else { "disabled" });
    } else {
        println!("No change");
    }
    println!("Active layer: {}", configurator.active_size());
}

pub fn set_debug(
    configurator: &mut Configurator,
    party_size: Option<u32>,
    force_in_duty: bool,
    force_pvp: bool,
    clear: bool,
) {
    let debug = if clear {
        DebugOverrides::default()
    } else {
        let mut debug = configurator.config().debug;
        if let Some(members) = party_size {
            debug.force_party_size = true;
            debug.party_size = members;
        }
        debug.force_in_duty |= force_in_duty;
        debug.force_in_pvp |= force_pvp;
        debug
    };

    if configurator.set_debug(debug) {
        println!("Debug overrides updated");
    } else {
        println!("No change");
    }
    print_status(configurator);
}

pub fn set_verbose(configurator: &mut Configurator, enabled: bool) {
    if configurator.set_debug_messages(enabled) {
        println!(
            "Debug logging {}",
            if enabled { "enabled" } else { "disabled" }
        );
    } else {
        println!("No change");
    }
}

/// Overwrite every layer's client options from a snapshot, keeping each
/// layer's `only_in_duty` flag.
pub fn seed(configurator: &mut Configurator, from: &Path) -> Result<(), String> {
    let snapshot = read_snapshot(from)?;
    if snapshot.is_empty() {
        return Err(format!("{} contains no live options", from.display()));
    }

    let mut updated = 0;
    for size in GroupingSize::ALL {
        let layer = Layer {
            only_in_duty: configurator.store().layer_for(size).only_in_duty,
            ..seed_layer(&snapshot)
        };
        if configurator.apply(size, layer) {
            updated += 1;
        }
    }
    configurator.sync();

    println!("Seeded {} of {} layers from {}", updated, GroupingSize::ALL.len(), from.display());
    Ok(())
}

fn report_edit(
    configurator: &mut Configurator,
    size: GroupingSize,
    changed: bool,
    before: GroupingSize,
) {
    if !changed {
        println!("{} unchanged", size.label());
        return;
    }

    if before == size {
        println!("Updated {} (active, pushed to client)", size.label());
    } else {
        println!("Updated {}", size.label());
    }

    // Toggling only_in_duty can move authority to another layer
    configurator.sync();
    let after = configurator.active_size();
    if after != before {
        println!("Active layer is now {}", after);
    }
}
