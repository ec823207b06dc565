//! Stable snapshot hashing for deterministic verification.
//! Covers the grid, entity positions and progress counters, not the config.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl World {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.moves);
        hasher.write_u64(self.rng.draws());
        hasher.write_u8(self.status.code());
        hasher.write_i32(self.player.x);
        hasher.write_i32(self.player.y);
        hasher.write_i32(self.treasure.x);
        hasher.write_i32(self.treasure.y);
        hasher.write_u32(self.enemies.len() as u32);
        for enemy in self.enemies.values() {
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.pos.y);
            hasher.write_u32(enemy.cooldown);
        }
        hasher.write(&self.grid.canonical_bytes());
        hasher.finish()
    }
}
