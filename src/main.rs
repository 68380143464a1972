mod app;
mod config;
mod input;
mod render;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use moodpet::{Pet, SplitMix64};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moodpet", about = "Look after a virtual pet")]
#[command(version)]
struct Cli {
    /// Seed for the pet's random source (overrides settings)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Interactive terminal session with automatic ticks (default)
    Play,

    /// Read commands like `f 3` or `a 10` from stdin, one per line
    Script {
        /// Emit one JSON snapshot per line
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodpet=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings_path = config::resolve_settings_path(cli.config);
    let settings = settings_path
        .as_deref()
        .map(config::load_settings)
        .unwrap_or_default();

    let rng = match cli.seed.or(settings.seed) {
        Some(seed) => SplitMix64::new(seed),
        None => SplitMix64::from_entropy(),
    };
    tracing::debug!(seed = rng.seed(), "random source ready");
    let mut pet = Pet::with_random(rng);

    match cli.command.unwrap_or(Mode::Play) {
        Mode::Play => {
            app::run(settings.clone(), pet)?;
            match &settings_path {
                Some(path) => config::save_settings_atomic(path, &settings)?,
                None => tracing::warn!("no settings location on this platform; not saving"),
            }
        }
        Mode::Script { json } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            script::run(&mut pet, stdin.lock(), stdout.lock(), json)?;
        }
    }
    Ok(())
}
