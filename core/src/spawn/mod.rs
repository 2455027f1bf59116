use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source of randomness for tile spawning.
pub trait TileSource {
    /// Uniformly chosen index in `0..len`, `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Probability that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl SpawnConfig {
    pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

    pub const fn new(four_probability: f64) -> Self {
        Self { four_probability }
    }

    pub fn validate(&self) -> Result<Self> {
        if (0.0..=1.0).contains(&self.four_probability) {
            Ok(*self)
        } else {
            Err(GameError::InvalidArgument(
                "four probability must be between 0 and 1",
            ))
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOUR_PROBABILITY)
    }
}

impl Board {
    /// Places a 2 (90%) or a 4 (10%) on a random empty cell, `false` if the board is full.
    pub fn spawn_random_tile(&mut self, source: &mut impl TileSource) -> bool {
        self.spawn_tile_with(source, &SpawnConfig::default())
    }

    pub fn spawn_tile_with(&mut self, source: &mut impl TileSource, config: &SpawnConfig) -> bool {
        let empty = self.empty_count();
        if empty == 0 {
            log::debug!("No empty cell left, skipping spawn");
            return false;
        }

        let pick = source.pick_index(empty);
        debug_assert!(pick < empty, "tile source picked {pick} out of {empty}");
        let Some(pos) = self.empty_cells().nth(pick.min(empty - 1)) else {
            return false;
        };

        let value = if source.chance(config.four_probability) {
            4
        } else {
            2
        };
        self.cells[pos] = value;
        log::debug!("Spawned {} at {:?}", value, pos);
        true
    }

    /// Empties the board and spawns the two starting tiles.
    pub fn reset(&mut self, source: &mut impl TileSource) {
        self.reset_with(source, &SpawnConfig::default());
    }

    pub fn reset_with(&mut self, source: &mut impl TileSource, config: &SpawnConfig) {
        self.clear();
        self.spawn_tile_with(source, config);
        self.spawn_tile_with(source, config);
    }
}
