use anyhow::{Context, Result};
use checker_snake::game::{GameConfig, Rgb};
use checker_snake::modes::{HumanMode, SessionEnd};
use checker_snake::scores::{Score, Scores};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Parser)]
#[command(name = "checker_snake")]
#[command(version, about = "Snake on a checkerboard, in your terminal")]
struct Cli {
    /// Grid width in tiles
    #[arg(short = 'w', long, default_value = "20")]
    width: usize,

    /// Grid height in tiles
    #[arg(short = 'e', long, default_value = "15")]
    height: usize,

    /// Ticks per second, between 1 and 25
    #[arg(long, default_value = "5")]
    fps: u32,

    /// Fruit color as #RRGGBB
    #[arg(long, default_value = "#FF0000")]
    fruit_color: Rgb,

    /// Snake body color as #RRGGBB
    #[arg(long, default_value = "#00FF00")]
    snake_body_color: Rgb,

    /// Snake head color as #RRGGBB
    #[arg(long, default_value = "#0000FF")]
    snake_head_color: Rgb,

    /// Number of fruits on the board at once
    #[arg(long, default_value = "1")]
    fruits: usize,

    /// Ignore turns straight back into the snake's neck
    #[arg(long)]
    forbid_reversal: bool,

    /// High-score file
    #[arg(long, default_value = "snake_scores.json")]
    scores_file: PathBuf,

    /// Size of a freshly created high-score table
    #[arg(long, default_value = "5")]
    max_scores: usize,

    /// Name recorded with a high score (defaults to $USER)
    #[arg(long)]
    name: Option<String>,

    /// Write logs to this file; without it logs are discarded
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_width: self.width,
            grid_height: self.height,
            fps: self.fps,
            fruit_count: self.fruits,
            fruit_color: self.fruit_color,
            snake_body_color: self.snake_body_color,
            snake_head_color: self.snake_head_color,
            forbid_reversal: self.forbid_reversal,
            ..Default::default()
        }
    }

    fn player_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Player".to_string())
    }
}

/// The game owns the terminal while it runs, so logs only go to a file.
/// Without `--log-file` they are discarded.
fn log_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::sink)),
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(log_writer(log_file)?)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Create game configuration from CLI arguments
    let config = cli.game_config();
    config.validate().context("Invalid game configuration")?;

    let mut scores = Scores::load_or_default(&cli.scores_file, cli.max_scores)?;
    let best = scores.iter().next().map(|entry| entry.score);

    let mut human_mode = HumanMode::new(config, best);
    match human_mode.run().await? {
        SessionEnd::Quit => {}
        SessionEnd::GameOver { score } => {
            println!("Game Over - score: {score}");
            record_score(&mut scores, &cli, score)?;
        }
    }

    Ok(())
}

fn record_score(scores: &mut Scores, cli: &Cli, score: u32) -> Result<()> {
    let name = cli.player_name();
    if scores.add_score(Score::new(name.clone(), score)) {
        info!(%name, score, "new high score");
        scores.save(&cli.scores_file)?;
        println!("New high score!");
    }

    println!();
    println!("High scores:");
    for (rank, entry) in scores.iter().enumerate() {
        println!("{:>2}. {:<16} {:>5}", rank + 1, entry.name, entry.score);
    }
    Ok(())
}
