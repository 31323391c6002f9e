use core::time::Duration;

use crate::config::{
    BASE_FALL_DURATION, BASE_SPAWN_INTERVAL, BASE_TRASH_CHANCE, DIFFICULTY_STEP_INTERVAL,
    FALL_DURATION_MULTIPLIER, MAX_TRASH_CHANCE, MIN_FALL_DURATION, MIN_SPAWN_INTERVAL,
    SPAWN_INTERVAL_MULTIPLIER, TRASH_CHANCE_INCREASE,
};

/// Maps elapsed round time to fall duration, spawn cadence and trash odds.
///
/// Difficulty moves in discrete steps of `step_interval`; every value saturates
/// at its floor or ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyCurve {
    pub step_interval: Duration,
    pub base_fall_duration: Duration,
    /// Applied once per step, expected in `(0, 1]`
    pub fall_multiplier: f64,
    pub min_fall_duration: Duration,
    pub base_spawn_interval: Duration,
    pub spawn_multiplier: f64,
    pub min_spawn_interval: Duration,
    pub base_trash_chance: f32,
    pub trash_increase_rate: f32,
    pub max_trash_chance: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            step_interval: DIFFICULTY_STEP_INTERVAL,
            base_fall_duration: BASE_FALL_DURATION,
            fall_multiplier: FALL_DURATION_MULTIPLIER,
            min_fall_duration: MIN_FALL_DURATION,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_multiplier: SPAWN_INTERVAL_MULTIPLIER,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            base_trash_chance: BASE_TRASH_CHANCE,
            trash_increase_rate: TRASH_CHANCE_INCREASE,
            max_trash_chance: MAX_TRASH_CHANCE,
        }
    }
}

/// `base * multiplier^steps`, never below `floor`.
fn decay(base: Duration, multiplier: f64, steps: u32, floor: Duration) -> Duration {
    let scale = multiplier.clamp(0.0, 1.0).powi(steps.min(i32::MAX as u32) as i32);
    base.mul_f64(scale).max(floor)
}

impl DifficultyCurve {
    pub fn steps(&self, elapsed: Duration) -> u32 {
        let step = self.step_interval.as_millis().max(1);
        u32::try_from(elapsed.as_millis() / step).unwrap_or(u32::MAX)
    }

    /// Time an item spawned at `elapsed` takes to cross the screen.
    pub fn fall_duration(&self, elapsed: Duration) -> Duration {
        decay(
            self.base_fall_duration,
            self.fall_multiplier,
            self.steps(elapsed),
            self.min_fall_duration,
        )
    }

    /// Fall speed in pixels per second for an item that must cover `travel`.
    pub fn fall_speed(&self, elapsed: Duration, travel: f32) -> f32 {
        let secs = self.fall_duration(elapsed).as_secs_f32();
        if secs > 0.0 { travel / secs } else { travel }
    }

    pub fn spawn_interval(&self, elapsed: Duration) -> Duration {
        decay(
            self.base_spawn_interval,
            self.spawn_multiplier,
            self.steps(elapsed),
            self.min_spawn_interval,
        )
    }

    pub fn trash_chance(&self, elapsed: Duration) -> f32 {
        (self.steps(elapsed) as f32)
            .mul_add(self.trash_increase_rate, self.base_trash_chance)
            .clamp(0.0, self.max_trash_chance)
    }
}
