pub mod config;
pub mod error;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod rng;
pub mod session;
pub mod types;

pub use config::{EnemyBehavior, WorldConfig};
pub use error::{ConfigError, JournalError, PlacementError};
pub use game::{World, generate};
pub use journal::InputJournal;
pub use mapgen::{Grid, Layout, Room};
pub use replay::*;
pub use rng::RandomStream;
pub use session::Session;
pub use types::*;
