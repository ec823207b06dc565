use anyhow::{Result, bail};
use clap::Parser;
use crawl_core::{Session, TileKind, WorldConfig, replay_to_end, session_hash};
use env_logger::Env;
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const PLAY_KEYS: [char; 5] = ['W', 'A', 'S', 'D', '.'];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First world seed; later runs use the following seeds
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 50)]
    runs: u64,
    #[arg(short, long, default_value_t = 1000)]
    keys: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

/// Plays random keys on one seed, checking positions after every key and
/// replay equivalence at the end.
fn fuzz_seed(config: &WorldConfig, seed: u64, keys: u32) -> Result<()> {
    let mut session = Session::new(config.clone())?;
    session.feed_all(&format!("N{seed}S"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..keys {
        if session.is_over() {
            break;
        }
        session.feed(choose(&mut rng, &PLAY_KEYS))?;
        let Some(world) = session.world() else {
            bail!("seed {seed}: no world after start");
        };
        let entities =
            [world.player(), world.treasure()].into_iter().chain(world.enemy_positions());
        for pos in entities {
            if world.grid().get(pos) == TileKind::Wall {
                bail!("seed {seed}: entity inside wall at {pos:?}");
            }
        }
    }

    let replayed = replay_to_end(config, session.journal())?;
    if replayed.final_snapshot_hash != session_hash(&session) {
        bail!("seed {seed}: replay diverged from the live session");
    }
    info!("seed {seed}: {:?} after {} keys", replayed.final_status, session.journal().len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!(
        "Starting Fuzz harness on seeds {}..{} for max {} keys each...",
        args.seed,
        args.seed + args.runs,
        args.keys
    );
    let config = WorldConfig::default();
    for seed in args.seed..args.seed + args.runs {
        fuzz_seed(&config, seed, args.keys)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
