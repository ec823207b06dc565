use std::hash::Hasher;

use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::{
    config::WorldConfig, error::ConfigError, journal::InputJournal, session::Session,
    types::Status,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    pub final_status: Status,
    pub final_snapshot_hash: u64,
    pub seed: Option<u64>,
    pub moves: u64,
    pub ticks: u64,
    pub quit: bool,
}

/// Folds the journal's keys over a fresh session.
pub fn replay_inputs(
    config: &WorldConfig,
    journal: &InputJournal,
) -> Result<Session, ConfigError> {
    let mut session = Session::new(config.clone())?;
    session.feed_all(&journal.inputs)?;
    Ok(session)
}

pub fn replay_to_end(
    config: &WorldConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ConfigError> {
    let session = replay_inputs(config, journal)?;
    Ok(summarize(&session))
}

pub fn summarize(session: &Session) -> ReplayResult {
    let world = session.world();
    ReplayResult {
        final_status: session.status(),
        final_snapshot_hash: session_hash(session),
        seed: session.seed(),
        moves: world.map_or(0, |world| world.moves()),
        ticks: world.map_or(0, |world| world.tick()),
        quit: session.has_quit(),
    }
}

/// World snapshot once play has begun; before that, a hash of the menu state.
pub fn session_hash(session: &Session) -> u64 {
    if let Some(world) = session.world() {
        return world.snapshot_hash();
    }
    let mut hasher = Xxh3::new();
    hasher.write_u8(session.status().code());
    hasher.write_u8(u8::from(session.has_quit()));
    hasher.write(session.journal().inputs.as_bytes());
    hasher.finish()
}
