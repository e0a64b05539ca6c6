use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::game::GameConfig;
use snake_arcade::modes::PlayMode;
use snake_arcade::persistence::{HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Wrap-around Snake in the terminal")]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Size of one grid cell in canvas units
    #[arg(long)]
    grid_size: Option<i32>,

    /// Canvas width in canvas units
    #[arg(long)]
    width: Option<i32>,

    /// Canvas height in canvas units
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds per game tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug events as well
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.settings {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }

    fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        if self.no_save {
            Box::new(MemoryHighScoreStore::default())
        } else {
            Box::new(JsonHighScoreStore::new(&self.high_score_file))
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(?config, "Starting snake");

    let mut play_mode = PlayMode::new(config, cli.high_score_store())?;
    play_mode.run().await?;

    Ok(())
}
