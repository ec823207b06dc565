use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_core::{
    Grid, InputJournal, ReplayResult, Session, TileKind, WorldConfig, replay_inputs, summarize,
};
use env_logger::Env;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a journal JSON file to replay
    #[arg(short, long, conflicts_with_all = ["inputs", "seed"])]
    journal: Option<PathBuf>,

    /// Raw key string to replay, e.g. "N42SWWDD..:Q"
    #[arg(short, long)]
    inputs: Option<String>,

    /// Start a new game with this seed; `--inputs` are then played keys only
    #[arg(short, long)]
    seed: Option<u64>,

    /// World tuning as JSON; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Print the final grid
    #[arg(short, long)]
    render: bool,

    /// Print the replay summary as JSON
    #[arg(long)]
    json: bool,

    /// Write the accepted keys back out as a journal
    #[arg(long)]
    save_journal: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config JSON: {}", path.display()))
}

fn load_journal(args: &Args) -> Result<InputJournal> {
    if let Some(path) = &args.journal {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
        return InputJournal::from_json(&data)
            .with_context(|| format!("Failed to load journal: {}", path.display()));
    }
    let keys = args.inputs.as_deref().unwrap_or_default();
    match args.seed {
        Some(seed) => Ok(InputJournal::from_inputs(&format!("N{seed}S{keys}"))),
        None if keys.is_empty() => bail!("nothing to replay: pass --journal, --inputs or --seed"),
        None => Ok(InputJournal::from_inputs(keys)),
    }
}

/// One `glyph  description` line per tile kind present on the grid.
fn legend(grid: &Grid) -> Vec<String> {
    TileKind::ALL
        .into_iter()
        .filter(|&tile| tile != TileKind::Nothing && grid.count(tile) > 0)
        .map(|tile| format!("{}  {}", tile.glyph(), tile.info().description))
        .collect()
}

fn print_summary(result: &ReplayResult) {
    println!("Replay complete.");
    match result.seed {
        Some(seed) => println!("Seed: {seed}"),
        None => println!("Seed: none entered"),
    }
    println!("Status: {:?}", result.final_status);
    println!("Moves: {}", result.moves);
    println!("Enemy Ticks: {}", result.ticks);
    println!("Quit: {}", result.quit);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let journal = load_journal(&args)?;
    let session: Session =
        replay_inputs(&config, &journal).context("Replay failed during execution")?;
    let result = summarize(&session);

    if let Some(path) = &args.save_journal {
        let json = session.journal().to_json().context("Failed to serialize journal")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
    }

    if args.render {
        match session.world() {
            Some(world) => {
                print!("{}", world.grid());
                for line in legend(world.grid()) {
                    println!("{line}");
                }
            }
            None => println!("(no world generated)"),
        }
    }
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize summary")?
        );
    } else {
        print_summary(&result);
    }

    Ok(())
}
