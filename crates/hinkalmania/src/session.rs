//! The round state machine.
//!
//! A [`Session`] owns everything that lives for a single round and is driven
//! by an explicit [`Session::tick`]. Countdown, spawn cadence and the fall
//! loop all advance from that one call, so ending a round stops all of them
//! at once.

use core::time::Duration;
use std::collections::BTreeSet;

use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::catalog::FoodKind;
use crate::catcher::CatcherPosition;
use crate::config::{EARNED_COINS_DIVISOR, GameConfig};
use crate::falling::{ActiveItems, FallingItem, ItemId};
use crate::progress::{Progress, RoundRecord};
use crate::scoring::{CatchOutcome, RoundScore};
use crate::spawner::Spawner;

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundPhase {
    #[default]
    Idle,
    Active,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEndReason {
    Timeout,
    LivesExhausted,
    Abandoned,
}

/// Results of a finished round, after they were folded into the progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub reason: RoundEndReason,
    pub score: u32,
    pub earned_coins: u32,
    /// Coin balance after the round, earned coins included
    pub coins: u32,
    pub best_combo: u32,
    pub catches: u32,
    pub record: RoundRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    Spawned(ItemId),
    /// The item left the play area without being caught.
    Expired(ItemId),
    /// Whole seconds left on the round clock.
    TimeChanged(u32),
    Caught {
        id: ItemId,
        /// Centre of the item when it was caught, in screen space
        position: Vec2,
        outcome: CatchOutcome,
    },
    Ended(RoundSummary),
}

#[derive(Resource, Debug)]
pub struct Session {
    config: GameConfig,
    rng: fastrand::Rng,
    phase: RoundPhase,
    round: RoundScore,
    items: ActiveItems,
    spawner: Spawner,
    elapsed: Duration,
    countdown: Duration,
    time_remaining: u32,
    foods: BTreeSet<FoodKind>,
    catcher: CatcherPosition,
    last_summary: Option<RoundSummary>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// A session whose spawns are reproducible.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: GameConfig, rng: fastrand::Rng) -> Self {
        let catcher = CatcherPosition::centered(viewport(&config));
        Self {
            time_remaining: config.round_duration_secs,
            config,
            rng,
            phase: RoundPhase::Idle,
            round: RoundScore::default(),
            items: ActiveItems::default(),
            spawner: Spawner::default(),
            elapsed: Duration::ZERO,
            countdown: Duration::ZERO,
            foods: BTreeSet::new(),
            catcher,
            last_summary: None,
        }
    }

    /// Starts a round from the player's progress. Only valid when idle.
    pub fn start(&mut self, progress: &Progress) -> bool {
        if self.phase != RoundPhase::Idle {
            debug!("Ignoring round start while {:?}", self.phase);
            return false;
        }

        self.round = RoundScore::new(progress.coins, progress.lives.max(1));
        self.items.clear();
        self.spawner.reset();
        self.elapsed = Duration::ZERO;
        self.countdown = Duration::ZERO;
        self.time_remaining = self.config.round_duration_secs;
        self.foods.clone_from(&progress.unlocked_foods);
        self.catcher = CatcherPosition::centered(viewport(&self.config));
        self.last_summary = None;
        self.phase = RoundPhase::Active;

        info!(
            "Round started with {} lives and {} dishes",
            self.round.lives,
            self.foods.len()
        );
        true
    }

    /// Advances the round by `dt`: the countdown first, then the spawner,
    /// then the fall loop. Does nothing unless the round is active.
    pub fn tick(&mut self, dt: Duration, progress: &mut Progress) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.phase != RoundPhase::Active {
            return events;
        }

        self.countdown += dt;
        while self.countdown >= COUNTDOWN_STEP && self.time_remaining > 0 {
            self.countdown -= COUNTDOWN_STEP;
            self.time_remaining -= 1;
            events.push(RoundEvent::TimeChanged(self.time_remaining));
        }
        if self.time_remaining == 0 {
            let summary = self.end_round(RoundEndReason::Timeout, progress);
            events.push(RoundEvent::Ended(summary));
            return events;
        }

        self.elapsed += dt;
        for item in self.spawner.tick(
            dt,
            self.elapsed,
            &self.foods,
            &self.config,
            &mut self.rng,
        ) {
            events.push(RoundEvent::Spawned(item.id));
            self.items.push(item);
        }

        let floor = self.config.viewport.1;
        for item in self.items.advance(dt.as_secs_f32(), floor) {
            events.push(RoundEvent::Expired(item.id));
        }

        events
    }

    /// Catches the item `id`. Items already caught or expired are ignored.
    pub fn catch(&mut self, id: ItemId, progress: &mut Progress) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.phase != RoundPhase::Active {
            return events;
        }
        let Some(item) = self.items.take(id) else {
            return events;
        };

        let outcome = self.round.apply(item.kind, &self.config.combo);
        progress.coins = self.round.coins;
        let lives_exhausted = outcome.lives_exhausted;

        events.push(RoundEvent::Caught {
            id,
            position: item.center(),
            outcome,
        });

        if lives_exhausted {
            let summary = self.end_round(RoundEndReason::LivesExhausted, progress);
            events.push(RoundEvent::Ended(summary));
        }
        events
    }

    /// Catches every item touching the plate.
    pub fn catch_at_plate(&mut self, progress: &mut Progress) -> Vec<RoundEvent> {
        let plate = self.catcher.plate_rect(&self.config.catcher);
        let mut events = Vec::new();
        for id in self.items.overlapping(plate) {
            if self.phase != RoundPhase::Active {
                break;
            }
            events.extend(self.catch(id, progress));
        }
        events
    }

    /// The item drawn on top at `point`, if any.
    pub fn item_at(&self, point: Vec2) -> Option<ItemId> {
        self.items.at_point(point)
    }

    pub fn move_catcher(&mut self, pointer_x: f32) {
        self.catcher =
            CatcherPosition::track(pointer_x, viewport(&self.config), &self.config.catcher);
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != RoundPhase::Active {
            return false;
        }
        self.phase = RoundPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != RoundPhase::Paused {
            return false;
        }
        self.phase = RoundPhase::Active;
        true
    }

    /// Ends a running or paused round on request.
    pub fn end(&mut self, reason: RoundEndReason, progress: &mut Progress) -> Option<RoundSummary> {
        match self.phase {
            RoundPhase::Active | RoundPhase::Paused => Some(self.end_round(reason, progress)),
            RoundPhase::Idle | RoundPhase::Ended => None,
        }
    }

    /// Leaves the results screen.
    pub fn finish(&mut self) -> bool {
        if self.phase != RoundPhase::Ended {
            return false;
        }
        self.phase = RoundPhase::Idle;
        true
    }

    fn end_round(&mut self, reason: RoundEndReason, progress: &mut Progress) -> RoundSummary {
        self.items.clear();
        self.phase = RoundPhase::Ended;

        let earned_coins = self.round.score / EARNED_COINS_DIVISOR;
        let coins = self.round.coins.saturating_add(earned_coins);
        let record = progress.record_round(self.round.score, coins, self.round.best_combo);

        info!(
            "Round ended ({reason:?}): score {}, earned {earned_coins} coins, {} new achievements",
            self.round.score,
            record.new_achievements.len()
        );

        let summary = RoundSummary {
            reason,
            score: self.round.score,
            earned_coins,
            coins,
            best_combo: self.round.best_combo,
            catches: self.round.catches,
            record,
        };
        self.last_summary = Some(summary.clone());
        summary
    }

    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub const fn round(&self) -> &RoundScore {
        &self.round
    }

    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn items(&self) -> impl Iterator<Item = &FallingItem> {
        self.items.iter()
    }

    pub const fn catcher(&self) -> &CatcherPosition {
        &self.catcher
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }
}

const fn viewport(config: &GameConfig) -> Vec2 {
    Vec2::new(config.viewport.0, config.viewport.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemKind, TrashKind};

    fn trash_at_plate(session: &Session, id: u64) -> FallingItem {
        let plate = session.catcher.plate_rect(&session.config.catcher);
        FallingItem {
            id: ItemId(id),
            kind: ItemKind::Trash(TrashKind::Pasta),
            position: plate.min,
            fall_speed: 100.0,
            size: session.config.item_size,
        }
    }

    fn food(id: u64) -> FallingItem {
        FallingItem {
            id: ItemId(id),
            kind: ItemKind::Food(FoodKind::Hinkali),
            position: Vec2::new(10.0, 10.0),
            fall_speed: 100.0,
            size: 60.0,
        }
    }

    #[test]
    fn start_seeds_the_round_from_progress() {
        let mut session = Session::with_seed(GameConfig::default(), 1);
        let progress = Progress {
            coins: 321,
            lives: 0,
            ..Progress::default()
        };

        assert!(session.start(&progress), "idle session starts");
        assert_eq!(session.phase(), RoundPhase::Active, "active");
        assert_eq!(session.round().coins, 321, "coins seeded");
        assert_eq!(session.round().lives, 1, "at least one life");
        assert_eq!(session.time_remaining(), 60, "full clock");
        assert!(!session.start(&progress), "cannot restart while active");
    }

    #[test]
    fn catching_writes_coins_through() {
        let mut session = Session::with_seed(GameConfig::default(), 2);
        let mut progress = Progress::default();
        session.start(&progress);
        session.items.push(food(1));

        let events = session.catch(ItemId(1), &mut progress);

        assert_eq!(events.len(), 1, "one catch event");
        assert_eq!(progress.coins, 152, "150 + 2 written through");
        assert!(
            session.catch(ItemId(1), &mut progress).is_empty(),
            "second catch is a no-op"
        );
    }

    #[test]
    fn losing_the_last_life_ends_the_round_once() {
        let mut session = Session::with_seed(GameConfig::default(), 3);
        let mut progress = Progress {
            lives: 2,
            ..Progress::default()
        };
        session.start(&progress);
        session.items.push(trash_at_plate(&session, 1));
        session.items.push(trash_at_plate(&session, 2));
        session.items.push(trash_at_plate(&session, 3));

        let events = session.catch_at_plate(&mut progress);

        let ended: Vec<&RoundEvent> = events
            .iter()
            .filter(|event| matches!(event, RoundEvent::Ended(_)))
            .collect();
        assert_eq!(ended.len(), 1, "ended exactly once: {events:?}");
        assert_eq!(session.phase(), RoundPhase::Ended, "round over");
        assert_eq!(progress.total_games_played, 1, "recorded once");
        assert_eq!(session.items().count(), 0, "items cleared");
        assert!(
            matches!(
                session.last_summary(),
                Some(RoundSummary {
                    reason: RoundEndReason::LivesExhausted,
                    ..
                })
            ),
            "ended by lives"
        );
    }

    #[test]
    fn paused_rounds_ignore_ticks_and_catches() {
        let mut session = Session::with_seed(GameConfig::default(), 4);
        let mut progress = Progress::default();
        session.start(&progress);
        session.items.push(food(1));

        assert!(session.pause(), "active round pauses");
        assert!(
            session.tick(Duration::from_secs(5), &mut progress).is_empty(),
            "no events while paused"
        );
        assert!(
            session.catch(ItemId(1), &mut progress).is_empty(),
            "no catches while paused"
        );
        assert_eq!(session.time_remaining(), 60, "clock stopped");

        assert!(session.resume(), "paused round resumes");
        assert_eq!(session.catch(ItemId(1), &mut progress).len(), 1, "catch works again");
    }

    #[test]
    fn countdown_reaching_zero_ends_by_timeout() {
        let mut session = Session::with_seed(GameConfig::default(), 5);
        let mut progress = Progress::default();
        session.start(&progress);

        let mut ended = 0;
        for _ in 0..120 {
            ended += session
                .tick(Duration::from_millis(500), &mut progress)
                .iter()
                .filter(|event| matches!(event, RoundEvent::Ended(_)))
                .count();
        }

        assert_eq!(ended, 1, "ended once");
        assert_eq!(session.time_remaining(), 0, "clock ran out");
        assert_eq!(
            session.last_summary().map(|summary| summary.reason),
            Some(RoundEndReason::Timeout),
            "timeout"
        );
    }

    #[test]
    fn ending_credits_earned_coins() {
        let mut session = Session::with_seed(GameConfig::default(), 6);
        let mut progress = Progress::default();
        session.start(&progress);
        for id in 1..=3 {
            session.items.push(food(id));
            session.catch(ItemId(id), &mut progress);
        }

        let summary = session
            .end(RoundEndReason::Abandoned, &mut progress)
            .expect("active round should end");

        assert_eq!(summary.score, 30, "three hinkali");
        assert_eq!(summary.earned_coins, 3, "score / 10");
        assert_eq!(progress.coins, 150 + 6 + 10 + 3, "round coins plus earned");
        assert_eq!(progress.high_score, 30, "high score updated");
        assert!(
            session.end(RoundEndReason::Abandoned, &mut progress).is_none(),
            "already ended"
        );
        assert!(session.finish(), "back to idle");
        assert!(session.start(&progress), "a new round can start");
    }

    #[test]
    fn items_keep_the_speed_they_spawned_with() {
        let mut session = Session::with_seed(GameConfig::default(), 7);
        let mut progress = Progress::default();
        session.start(&progress);
        let frame = Duration::from_millis(100);

        while session.elapsed() < Duration::from_secs(9) {
            session.tick(frame, &mut progress);
        }
        let early = session
            .items()
            .max_by_key(|item| item.id)
            .cloned()
            .expect("an item spawned at eight seconds is falling");

        while session.elapsed() < Duration::from_millis(10_500) {
            session.tick(frame, &mut progress);
        }
        let in_flight = session
            .items
            .get(early.id)
            .expect("item is still falling after the step");
        let travel = session.config.travel_distance();
        let fresh = session
            .config
            .difficulty
            .fall_speed(session.elapsed(), travel);

        assert!(
            (in_flight.fall_speed - early.fall_speed).abs() < f32::EPSILON,
            "speed unchanged by the difficulty step"
        );
        assert!(fresh > early.fall_speed, "new items fall faster");
    }

    #[test]
    fn catcher_is_clamped_to_the_viewport() {
        let mut session = Session::default();
        session.move_catcher(-100.0);
        assert!(
            session.catcher().plate_rect(&session.config.catcher).min.x >= 0.0,
            "plate stays on screen"
        );
    }
}
