//! Hard-coded game constants.
use std::ops::RangeInclusive;
use std::time::Duration;

/// Terminal columns used to draw one world cell. Terminal glyphs are about twice as tall as wide.
pub const SCALE: u16 = 2;

/// Simulation ticks per second
pub const FPS: u32 = 16;

pub const INITIAL_LENGTH: usize = 4;

/// Segments queued for growth each time a food cell is eaten
pub const PARTS_AFTER_FOOD: usize = 3;

/// Whole seconds between food spawns. A random fraction of a second is added on top.
pub const FOOD_INTERVAL: RangeInclusive<u32> = 1..=4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub scale: u16,
    pub fps: u32,
    pub initial_length: usize,
    pub parts_after_food: usize,
    pub food_interval: RangeInclusive<u32>,
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            scale: SCALE,
            fps: FPS,
            initial_length: INITIAL_LENGTH,
            parts_after_food: PARTS_AFTER_FOOD,
            food_interval: FOOD_INTERVAL,
        }
    }
}
