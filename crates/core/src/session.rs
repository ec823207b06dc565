//! Key-driven session: menu, seed entry, then play until win, loss or quit.

use log::{debug, info};

use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::game::World;
use crate::journal::InputJournal;
use crate::types::{Direction, Status};

/// Seed digits beyond this many are recorded but ignored.
pub const MAX_SEED_DIGITS: usize = 18;

pub const ENEMY_TICK_KEY: char = '.';
pub const COMMAND_KEY: char = ':';

#[derive(Clone, Debug)]
pub struct Session {
    config: WorldConfig,
    status: Status,
    seed_digits: String,
    world: Option<World>,
    journal: InputJournal,
    awaiting_command: bool,
    quit: bool,
}

impl Session {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            status: Status::Start,
            seed_digits: String::new(),
            world: None,
            journal: InputJournal::new(),
            awaiting_command: false,
            quit: false,
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn is_over(&self) -> bool {
        self.quit || self.status.is_terminal()
    }

    /// Seed parsed from the first [`MAX_SEED_DIGITS`] entered digits.
    pub fn seed(&self) -> Option<u64> {
        if self.seed_digits.is_empty() {
            return None;
        }
        Some(
            self.seed_digits
                .bytes()
                .take(MAX_SEED_DIGITS)
                .fold(0_u64, |seed, digit| seed * 10 + u64::from(digit - b'0')),
        )
    }

    pub fn feed_all(&mut self, keys: &str) -> Result<Status, ConfigError> {
        for key in keys.chars() {
            self.feed(key)?;
        }
        Ok(self.status)
    }

    /// Applies one key. Keys that mean nothing in the current state are dropped
    /// and left out of the journal.
    pub fn feed(&mut self, key: char) -> Result<Status, ConfigError> {
        if self.is_over() {
            return Ok(self.status);
        }
        let key = key.to_ascii_uppercase();
        let accepted = match self.status {
            Status::Start => self.feed_menu(key),
            Status::SeedEntry => self.feed_seed(key)?,
            Status::Play => self.feed_play(key),
            Status::Win | Status::Lose => false,
        };
        if accepted {
            self.journal.append(key);
        }
        Ok(self.status)
    }

    fn feed_menu(&mut self, key: char) -> bool {
        match key {
            'N' => {
                self.status = Status::SeedEntry;
                true
            }
            'Q' => {
                info!("quit from menu");
                self.quit = true;
                true
            }
            _ => false,
        }
    }

    fn feed_seed(&mut self, key: char) -> Result<bool, ConfigError> {
        if key.is_ascii_digit() {
            self.seed_digits.push(key);
            return Ok(true);
        }
        if key != 'S' {
            return Ok(false);
        }
        let Some(seed) = self.seed() else {
            return Ok(false);
        };
        let world = World::generate(seed, &self.config)?;
        info!("seed {seed}: world ready with {} enemies", world.enemy_positions().len());
        self.status = world.status();
        self.world = Some(world);
        Ok(true)
    }

    fn feed_play(&mut self, key: char) -> bool {
        let Some(world) = self.world.as_mut() else {
            return false;
        };
        if self.awaiting_command {
            self.awaiting_command = false;
            if key == 'Q' {
                info!("quit after {} moves", world.moves());
                self.quit = true;
                return true;
            }
        }
        if key == COMMAND_KEY {
            self.awaiting_command = true;
            return true;
        }
        let status = if key == ENEMY_TICK_KEY {
            world.tick_enemies()
        } else if let Some(direction) = Direction::from_key(key) {
            world.move_player(direction)
        } else {
            debug!("ignored key {key:?} during play");
            return false;
        };
        self.status = status;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(WorldConfig::default()).expect("default config is valid")
    }

    #[test]
    fn new_seed_then_start_enters_play() {
        let mut session = session();
        assert_eq!(session.feed('n'), Ok(Status::SeedEntry));
        assert_eq!(session.feed_all("42s"), Ok(Status::Play));
        assert_eq!(session.seed(), Some(42));
        assert_eq!(session.journal().inputs, "N42S");
        assert!(session.world().is_some());
    }

    #[test]
    fn start_without_digits_is_ignored() {
        let mut session = session();
        assert_eq!(session.feed_all("NS"), Ok(Status::SeedEntry));
        assert_eq!(session.journal().inputs, "N");
    }

    #[test]
    fn only_the_first_eighteen_digits_seed_the_world() {
        let mut long = session();
        long.feed_all("N1234567890123456789999S").expect("generation succeeds");
        let mut short = session();
        short.feed_all("N123456789012345678S").expect("generation succeeds");
        assert_eq!(long.seed(), Some(123_456_789_012_345_678));
        assert_eq!(
            long.world().map(World::snapshot_hash),
            short.world().map(World::snapshot_hash)
        );
    }

    #[test]
    fn colon_then_q_quits_and_freezes_input() {
        let mut session = session();
        session.feed_all("N7S:Q").expect("generation succeeds");
        assert!(session.has_quit());
        let hash = session.world().map(World::snapshot_hash);
        session.feed_all("WWDD.").expect("input after quit is ignored");
        assert_eq!(session.world().map(World::snapshot_hash), hash);
        assert_eq!(session.journal().inputs, "N7S:Q");
    }

    #[test]
    fn colon_followed_by_another_key_cancels_the_quit() {
        let mut session = session();
        session.feed_all("N7S").expect("generation succeeds");
        session.feed_all(":X").expect("unknown key is dropped");
        assert!(!session.has_quit());
        assert_eq!(session.journal().inputs, "N7S:");
    }

    #[test]
    fn menu_ignores_unknown_keys_and_quits_on_q() {
        let mut session = session();
        assert_eq!(session.feed_all("LTZ"), Ok(Status::Start));
        assert!(session.journal().is_empty());
        session.feed('q').expect("quit is accepted");
        assert!(session.has_quit());
        assert!(session.is_over());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = WorldConfig::with_dimensions(0, 43);
        assert!(Session::new(config).is_err());
    }
}
