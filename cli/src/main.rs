mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clarity_core::{ConfigFile, GroupingSize, LiveOption};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Inspect and edit grouping-size visibility presets")]
struct Cli {
    /// Config file (defaults to the platform config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// TOML snapshot of raw live settings, used to seed a missing config
    #[arg(long, global = true)]
    live: Option<PathBuf>,

    /// Grouping size reported by the simulated battle-state oracle
    #[arg(long, global = true, default_value = "solo")]
    current: GroupingSize,

    /// Simulate being inside a duty
    #[arg(long, global = true)]
    in_duty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the authoritative layer and the contents of one or all layers
    Show {
        #[arg(short, long)]
        size: Option<GroupingSize>,
    },
    /// Print the authoritative size and the fallback path that led to it
    Resolve,
    /// Set one option of a layer, e.g. `set light_party nameplate_party never`
    Set {
        size: GroupingSize,
        option: LiveOption,
        value: String,
    },
    /// Restrict a layer to duties
    OnlyInDuty { size: GroupingSize, state: Switch },
    Enable,
    Disable,
    /// Edit developer overrides for the classifier
    Debug {
        /// Classify as a party of this many members
        #[arg(long)]
        party_size: Option<u32>,
        #[arg(long)]
        force_in_duty: bool,
        #[arg(long)]
        force_pvp: bool,
        /// Remove all overrides
        #[arg(long, conflicts_with_all = ["party_size", "force_in_duty", "force_pvp"])]
        clear: bool,
    },
    /// Toggle debug-level logging
    Verbose { state: Switch },
    /// Overwrite every layer's options from a TOML snapshot of live settings
    Seed {
        #[arg(long)]
        from: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> bool {
        matches!(switch, Switch::On)
    }
}

/// Initialize logging, writing to CLARITY_LOG_PATH if set, otherwise stderr.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("CLARITY_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    let file = match cli.config {
        Some(path) => ConfigFile::new(path),
        None => ConfigFile::at_default_path().map_err(|e| e.to_string())?,
    };

    // Peek at the stored verbosity before anything logs
    let verbose = file
        .load()
        .ok()
        .flatten()
        .is_some_and(|config| config.debug_messages);
    init_logging(verbose);

    let mut configurator =
        commands::open(file, cli.live.as_deref(), cli.current, cli.in_duty)?;

    match cli.command {
        Commands::Show { size } => commands::show(&configurator, size),
        Commands::Resolve => commands::resolve(&configurator),
        Commands::Set {
            size,
            option,
            value,
        } => commands::set_option(&mut configurator, size, option, &value)?,
        Commands::OnlyInDuty { size, state } => {
            commands::set_only_in_duty(&mut configurator, size, state.into())?
        }
        Commands::Enable => commands::set_enabled(&mut configurator, true),
        Commands::Disable => commands::set_enabled(&mut configurator, false),
        Commands::Debug {
            party_size,
            force_in_duty,
            force_pvp,
            clear,
        } => commands::set_debug(
            &mut configurator,
            party_size,
            force_in_duty,
            force_pvp,
            clear,
        ),
        Commands::Verbose { state } => commands::set_verbose(&mut configurator, state.into()),
        Commands::Seed { from } => commands::seed(&mut configurator, &from)?,
    }

    Ok(())
}
