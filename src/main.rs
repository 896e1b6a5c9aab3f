use anyhow::Result;
use clap::{Parser, ValueEnum};
use power_snake::game::GameConfig;
use power_snake::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "power_snake")]
#[command(version, about = "Snake with power-ups on a wrap-around grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width in cells
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u16).range(2..=200))]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u16).range(2..=200))]
    height: u16,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to simulate (headless)
    #[arg(long, default_value = "500")]
    ticks: u32,

    /// One input per tick: U/D/L/R to turn, P to pause, anything else to wait (headless)
    #[arg(long, default_value = "")]
    script: String,

    /// Write the final snapshot here instead of stdout (headless)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run a scripted game and print the final state as JSON
    Headless,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let headless = matches!(cli.mode, Mode::Headless);
    power_snake::logging::init(cli.log_file.as_deref(), headless)?;

    // Create game configuration from CLI arguments
    let mut config = GameConfig::new(usize::from(cli.width), usize::from(cli.height));
    config.seed = cli.seed;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let headless_config = HeadlessConfig {
                game_config: config,
                ticks: cli.ticks,
                script: cli.script,
                output: cli.output,
            };
            HeadlessMode::new(headless_config).run()?;
        }
    }

    Ok(())
}
