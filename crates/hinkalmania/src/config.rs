//! Tuning constants and the configuration bundle handed to a session.

use core::time::Duration;

use bits_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::catcher::CatcherLayout;
use crate::difficulty::DifficultyCurve;
use crate::scoring::ComboRules;

// Round
pub const ROUND_DURATION_SECS: u32 = 60;
pub const EARNED_COINS_DIVISOR: u32 = 10;

// Progress
pub const EXPERIENCE_PER_LEVEL: u32 = 100;
pub const EXPERIENCE_SCORE_DIVISOR: u32 = 5;
pub const STARTING_COINS: u32 = 150;
pub const STARTING_LIVES: u32 = 3;

// Falling items
pub const ITEM_SIZE: f32 = 60.0;

// Difficulty curve
pub const BASE_FALL_DURATION: Duration = Duration::from_millis(3000);
pub const FALL_DURATION_MULTIPLIER: f64 = 0.9;
pub const MIN_FALL_DURATION: Duration = Duration::from_millis(1200);
pub const DIFFICULTY_STEP_INTERVAL: Duration = Duration::from_secs(10);
pub const BASE_SPAWN_INTERVAL: Duration = Duration::from_millis(2000);
pub const SPAWN_INTERVAL_MULTIPLIER: f64 = 0.9;
pub const MIN_SPAWN_INTERVAL: Duration = Duration::from_millis(600);
pub const BASE_TRASH_CHANCE: f32 = 0.2;
pub const TRASH_CHANCE_INCREASE: f32 = 0.05;
pub const MAX_TRASH_CHANCE: f32 = 0.5;

// Combo bonuses
pub const COMBO_COIN_BONUS_EVERY: u32 = 3;
pub const COMBO_COIN_BONUS: u32 = 10;
pub const COMBO_LIFE_EVERY: u32 = 5;
pub const COMBO_DOUBLE_POINTS_EVERY: u32 = 10;

// Catcher
pub const PLAYER_SIZE: f32 = 50.0;
pub const PLATE_SIZE: (f32, f32) = (100.0, 60.0);
pub const PLAYER_BOTTOM_OFFSET: f32 = 200.0;
pub const PLATE_BOTTOM_OFFSET: f32 = 150.0;

/// Everything a session needs to run a round.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub round_duration_secs: u32,
    pub viewport: (f32, f32),
    pub item_size: f32,
    pub difficulty: DifficultyCurve,
    pub combo: ComboRules,
    pub catcher: CatcherLayout,
}

impl GameConfig {
    /// Distance an item covers from its spawn point until it leaves the screen.
    pub fn travel_distance(&self) -> f32 {
        self.viewport.1 + self.item_size
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,
            viewport: (WINDOW_WIDTH, WINDOW_HEIGHT),
            item_size: ITEM_SIZE,
            difficulty: DifficultyCurve::default(),
            combo: ComboRules::default(),
            catcher: CatcherLayout::default(),
        }
    }
}
