//! Tunable world parameters, loadable from JSON with per-field defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: i32 = 60;
pub const DEFAULT_HEIGHT: i32 = 43;
pub const HUD_ROWS: i32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Step greedily toward the player, wandering when no step gets closer.
    #[default]
    Pursue,
    Wander,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub hud_rows: i32,
    pub min_leaves: u32,
    pub max_leaves: u32,
    /// Chance per cell of a rune before stamping. Zero skips the scatter draws.
    pub decoration_rate: f64,
    pub enemy_count: usize,
    pub min_enemy_distance: u32,
    pub initial_pair_distance: u32,
    pub pair_distance_step: u32,
    pub pair_attempts: u32,
    pub enemy_room_attempts: u32,
    pub enemy_point_attempts: u32,
    pub enemy_cooldown_ticks: u32,
    pub enemy_behavior: EnemyBehavior,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            hud_rows: HUD_ROWS,
            min_leaves: 15,
            max_leaves: 30,
            decoration_rate: 0.0,
            enemy_count: 10,
            min_enemy_distance: 12,
            initial_pair_distance: 75,
            pair_distance_step: 2,
            pair_attempts: 100,
            enemy_room_attempts: 100,
            enemy_point_attempts: 50,
            enemy_cooldown_ticks: 0,
            enemy_behavior: EnemyBehavior::Pursue,
        }
    }
}

impl WorldConfig {
    pub fn with_dimensions(width: i32, height: i32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn grid_height(&self) -> i32 {
        self.height - self.hud_rows
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 {
            return Err(ConfigError::NonPositiveWidth { width: self.width });
        }
        if self.grid_height() <= 0 {
            return Err(ConfigError::NoGridRows { height: self.height, hud_rows: self.hud_rows });
        }
        if self.min_leaves == 0 || self.min_leaves > self.max_leaves {
            return Err(ConfigError::InvalidLeafRange {
                min: self.min_leaves,
                max: self.max_leaves,
            });
        }
        if !(0.0..=1.0).contains(&self.decoration_rate) {
            return Err(ConfigError::InvalidDecorationRate { rate: self.decoration_rate });
        }
        Ok(())
    }
}
