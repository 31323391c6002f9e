use core::time::Duration;
use std::collections::BTreeSet;

use bevy::math::Vec2;

use crate::catalog::{FoodKind, ItemKind, TrashKind, all_trash};
use crate::config::GameConfig;
use crate::falling::{FallingItem, ItemId};

/// Drops new items on the cadence given by the difficulty curve.
///
/// Frame time accumulates until it covers the current spawn interval; the
/// interval is re-read after every spawn, so the cadence tightens mid-round.
#[derive(Debug, Default, Clone)]
pub struct Spawner {
    since_last_spawn: Duration,
    next_id: u64,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.since_last_spawn = Duration::ZERO;
    }

    /// Advances the spawn clock by `dt`; `elapsed` is the round time after
    /// this frame. A long frame can yield several items.
    pub fn tick(
        &mut self,
        dt: Duration,
        elapsed: Duration,
        foods: &BTreeSet<FoodKind>,
        config: &GameConfig,
        rng: &mut fastrand::Rng,
    ) -> Vec<FallingItem> {
        self.since_last_spawn += dt;

        let mut spawned = Vec::new();
        loop {
            let interval = config
                .difficulty
                .spawn_interval(elapsed)
                .max(Duration::from_millis(1));
            if self.since_last_spawn < interval {
                break;
            }
            self.since_last_spawn -= interval;
            spawned.push(self.spawn(elapsed, foods, config, rng));
        }
        spawned
    }

    pub fn spawn(
        &mut self,
        elapsed: Duration,
        foods: &BTreeSet<FoodKind>,
        config: &GameConfig,
        rng: &mut fastrand::Rng,
    ) -> FallingItem {
        let is_trash = rng.f32() < config.difficulty.trash_chance(elapsed);
        let kind = if is_trash {
            ItemKind::Trash(pick_trash(rng))
        } else {
            ItemKind::Food(pick_food(foods, rng))
        };

        let max_x = (config.viewport.0 - config.item_size).max(0.0);
        let position = Vec2::new(rng.f32() * max_x, -config.item_size);

        self.next_id += 1;
        FallingItem {
            id: ItemId(self.next_id),
            kind,
            position,
            fall_speed: config
                .difficulty
                .fall_speed(elapsed, config.travel_distance()),
            size: config.item_size,
        }
    }
}

fn pick_trash(rng: &mut fastrand::Rng) -> TrashKind {
    let count = all_trash().count();
    all_trash()
        .nth(rng.usize(..count))
        .unwrap_or(TrashKind::Pasta)
}

/// Uniform over the unlocked dishes, hinkali when nothing is unlocked.
fn pick_food(foods: &BTreeSet<FoodKind>, rng: &mut fastrand::Rng) -> FoodKind {
    if foods.is_empty() {
        return FoodKind::default();
    }
    foods
        .iter()
        .nth(rng.usize(..foods.len()))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyCurve;

    fn config_with_trash_chance(chance: f32) -> GameConfig {
        GameConfig {
            difficulty: DifficultyCurve {
                base_trash_chance: chance,
                max_trash_chance: chance,
                trash_increase_rate: 0.0,
                ..DifficultyCurve::default()
            },
            ..GameConfig::default()
        }
    }

    #[test]
    fn first_item_arrives_after_one_interval() {
        let config = GameConfig::default();
        let foods = BTreeSet::from([FoodKind::Hinkali]);
        let mut rng = fastrand::Rng::with_seed(1);
        let mut spawner = Spawner::default();

        let early = spawner.tick(
            Duration::from_millis(1999),
            Duration::from_millis(1999),
            &foods,
            &config,
            &mut rng,
        );
        assert!(early.is_empty(), "nothing before the first interval");

        let due = spawner.tick(
            Duration::from_millis(1),
            Duration::from_millis(2000),
            &foods,
            &config,
            &mut rng,
        );
        assert_eq!(due.len(), 1, "one item once the interval elapsed");
    }

    #[test]
    fn cadence_tightens_after_the_first_difficulty_step() {
        let config = GameConfig::default();
        let foods = BTreeSet::from([FoodKind::Hinkali]);
        let mut rng = fastrand::Rng::with_seed(3);
        let mut spawner = Spawner::default();
        let elapsed = Duration::from_secs(12);

        let early = spawner.tick(
            Duration::from_millis(1799),
            elapsed,
            &foods,
            &config,
            &mut rng,
        );
        assert!(early.is_empty(), "nothing before 1800ms at step one");

        let due = spawner.tick(Duration::from_millis(1), elapsed, &foods, &config, &mut rng);
        assert_eq!(due.len(), 1, "spawned on the 1800ms interval");
    }

    #[test]
    fn long_frames_spawn_several_items_with_unique_ids() {
        let config = GameConfig::default();
        let foods = BTreeSet::from([FoodKind::Hinkali]);
        let mut rng = fastrand::Rng::with_seed(2);
        let mut spawner = Spawner::default();

        let items = spawner.tick(
            Duration::from_millis(6500),
            Duration::from_millis(6500),
            &foods,
            &config,
            &mut rng,
        );
        assert_eq!(items.len(), 3, "three intervals fit in 6.5s");

        let ids: BTreeSet<ItemId> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 3, "ids are unique");
    }

    #[test]
    fn items_start_above_the_screen_within_horizontal_bounds() {
        let config = GameConfig::default();
        let foods = BTreeSet::from([FoodKind::Hinkali, FoodKind::Harcho]);
        let mut rng = fastrand::Rng::with_seed(3);
        let mut spawner = Spawner::default();

        for _ in 0..200 {
            let item = spawner.spawn(Duration::ZERO, &foods, &config, &mut rng);
            assert!(item.position.x >= 0.0, "left bound");
            assert!(
                item.position.x <= config.viewport.0 - config.item_size,
                "right bound"
            );
            assert!(
                (item.position.y + config.item_size).abs() < f32::EPSILON,
                "starts one item above the top"
            );
            assert!(item.fall_speed > 0.0, "falls");
        }
    }

    #[test]
    fn food_comes_from_the_unlocked_set() {
        let config = config_with_trash_chance(0.0);
        let foods = BTreeSet::from([FoodKind::Lobio, FoodKind::Satsivi]);
        let mut rng = fastrand::Rng::with_seed(4);
        let mut spawner = Spawner::default();

        for _ in 0..200 {
            let item = spawner.spawn(Duration::ZERO, &foods, &config, &mut rng);
            assert!(
                matches!(item.kind, ItemKind::Food(food) if foods.contains(&food)),
                "expected an unlocked dish, got {:?}",
                item.kind
            );
        }
    }

    #[test]
    fn empty_food_set_falls_back_to_hinkali() {
        let config = config_with_trash_chance(0.0);
        let mut rng = fastrand::Rng::with_seed(5);
        let mut spawner = Spawner::default();

        let item = spawner.spawn(Duration::ZERO, &BTreeSet::new(), &config, &mut rng);
        assert_eq!(item.kind, ItemKind::Food(FoodKind::Hinkali), "fallback dish");
    }

    #[test]
    fn certain_trash_chance_only_spawns_trash() {
        let config = config_with_trash_chance(1.0);
        let foods = BTreeSet::from([FoodKind::Hinkali]);
        let mut rng = fastrand::Rng::with_seed(6);
        let mut spawner = Spawner::default();

        for _ in 0..50 {
            let item = spawner.spawn(Duration::ZERO, &foods, &config, &mut rng);
            assert!(item.kind.is_trash(), "expected trash, got {:?}", item.kind);
        }
    }
}
