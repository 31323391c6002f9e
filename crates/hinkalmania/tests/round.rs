use core::time::Duration;
use std::collections::BTreeSet;

use bits_helpers::storage::MemoryStorage;
use hinkalmania::achievements::Achievement;
use hinkalmania::catalog::{FoodKind, ItemKind};
use hinkalmania::config::GameConfig;
use hinkalmania::difficulty::DifficultyCurve;
use hinkalmania::falling::ItemId;
use hinkalmania::progress::Progress;
use hinkalmania::session::{RoundEndReason, RoundEvent, RoundPhase, Session};
use hinkalmania::shop::{ShopItem, purchase};
use hinkalmania::store::ProgressStore;

const FRAME: Duration = Duration::from_millis(16);

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

/// Ticks frame by frame until `count` items were spawned, returning their ids.
fn spawn_items(session: &mut Session, progress: &mut Progress, count: usize) -> Vec<ItemId> {
    let mut spawned = Vec::new();
    while spawned.len() < count {
        for event in session.tick(FRAME, progress) {
            if let RoundEvent::Spawned(id) = event {
                spawned.push(id);
            }
        }
        assert_eq!(session.phase(), RoundPhase::Active, "round ended early");
    }
    spawned
}

fn catch_all(session: &mut Session, progress: &mut Progress, ids: &[ItemId]) -> Vec<RoundEvent> {
    ids.iter()
        .flat_map(|id| session.catch(*id, progress))
        .collect()
}

/// Catches items one by one as they appear, until `count` were caught or the
/// round is over.
fn spawn_and_catch(
    session: &mut Session,
    progress: &mut Progress,
    count: usize,
) -> Vec<RoundEvent> {
    let mut events = Vec::new();
    for _ in 0..count {
        if session.phase() != RoundPhase::Active {
            break;
        }
        let ids = spawn_items(session, progress, 1);
        events.extend(catch_all(session, progress, &ids));
    }
    events
}

#[test]
fn three_hinkali_catches_reach_116_coins() {
    let mut session = Session::with_seed(config_with_trash_chance(0.0), 7);
    let mut progress = Progress {
        coins: 100,
        unlocked_foods: BTreeSet::from([FoodKind::Hinkali]),
        ..Progress::default()
    };
    assert!(session.start(&progress), "round starts");

    spawn_and_catch(&mut session, &mut progress, 3);

    assert_eq!(session.round().coins, 116, "100 + 3 * 2 + 10 bonus");
    assert_eq!(session.round().score, 30, "3 * 10 points");
    assert_eq!(session.round().lives, 3, "no life lost");
    assert_eq!(session.round().combo, 3, "three in a row");
    assert_eq!(progress.coins, 116, "balance written through");
}

#[test]
fn trash_costs_coins_and_a_life_but_never_goes_negative() {
    let mut session = Session::with_seed(config_with_trash_chance(1.0), 8);
    let mut progress = Progress {
        coins: 1,
        ..Progress::default()
    };
    session.start(&progress);

    let events = spawn_and_catch(&mut session, &mut progress, 1);

    let outcome = events
        .iter()
        .find_map(|event| match event {
            RoundEvent::Caught { outcome, .. } => Some(outcome),
            _ => None,
        })
        .expect("one catch");
    assert!(outcome.kind.is_trash(), "trash only");
    assert!(outcome.life_lost, "a life is lost");
    assert_eq!(session.round().coins, 0, "floored at zero");
    assert_eq!(session.round().score, 0, "floored at zero");
    assert_eq!(session.round().lives, 2, "one life gone");
    assert_eq!(session.round().combo, 0, "combo reset");
}

#[test]
fn running_out_of_lives_ends_and_records_the_round_once() {
    let mut session = Session::with_seed(config_with_trash_chance(1.0), 9);
    let mut progress = Progress::default();
    session.start(&progress);

    let events = spawn_and_catch(&mut session, &mut progress, 4);

    let endings = events
        .iter()
        .filter(|event| matches!(event, RoundEvent::Ended(_)))
        .count();
    assert_eq!(endings, 1, "ended exactly once");
    assert_eq!(session.phase(), RoundPhase::Ended, "round over");
    assert_eq!(progress.total_games_played, 1, "one game recorded");
    assert!(
        session.tick(Duration::from_secs(1), &mut progress).is_empty(),
        "ticks after the end do nothing"
    );
    assert_eq!(
        session.last_summary().map(|summary| summary.reason),
        Some(RoundEndReason::LivesExhausted),
        "ended by lives"
    );
}

#[test]
fn a_full_round_times_out_after_sixty_seconds() {
    let mut session = Session::with_seed(GameConfig::default(), 10);
    let mut progress = Progress::default();
    session.start(&progress);

    let mut last_time = None;
    let mut ended = None;
    while ended.is_none() {
        for event in session.tick(FRAME, &mut progress) {
            match event {
                RoundEvent::TimeChanged(left) => last_time = Some(left),
                RoundEvent::Ended(summary) => ended = Some(summary),
                _ => {}
            }
        }
    }

    assert_eq!(last_time, Some(0), "clock counted down to zero");
    assert_eq!(
        ended.map(|summary| summary.reason),
        Some(RoundEndReason::Timeout),
        "timeout"
    );
    assert!(
        session.elapsed() < Duration::from_secs(60),
        "spawner stopped with the clock"
    );
    assert_eq!(session.items().count(), 0, "items cleared");
}

#[test]
fn spawned_items_fall_and_expire_without_scoring() {
    let mut session = Session::with_seed(config_with_trash_chance(0.0), 11);
    let mut progress = Progress::default();
    session.start(&progress);

    let ids = spawn_items(&mut session, &mut progress, 1);
    let mut expired = Vec::new();
    while expired.is_empty() {
        for event in session.tick(FRAME, &mut progress) {
            if let RoundEvent::Expired(id) = event {
                expired.push(id);
            }
        }
    }

    assert_eq!(expired.first(), ids.first(), "first item fell off first");
    assert_eq!(session.round().score, 0, "expiry is not scored");
    assert_eq!(session.round().lives, 3, "expiry costs no life");
    let first = *expired.first().expect("one expired item");
    assert!(
        session.catch(first, &mut progress).is_empty(),
        "expired items cannot be caught"
    );
}

#[test]
fn same_seed_replays_the_same_round() {
    let play = || {
        let mut session = Session::with_seed(GameConfig::default(), 12);
        let mut progress = Progress::default();
        session.start(&progress);
        for step in 0..600 {
            session.move_catcher((step % 360) as f32);
            session.tick(FRAME, &mut progress);
            session.catch_at_plate(&mut progress);
        }
        let items: Vec<(ItemId, ItemKind)> =
            session.items().map(|item| (item.id, item.kind)).collect();
        (session.round().clone(), items, progress)
    };

    assert_eq!(play(), play(), "deterministic with a fixed seed");
}

#[test]
fn progress_survives_a_round_a_purchase_and_a_reload() {
    let store = ProgressStore::new(Box::new(MemoryStorage::default()));
    let mut progress = store.load();
    progress.coins = 240;
    let mut session = Session::with_seed(config_with_trash_chance(0.0), 13);
    session.start(&progress);

    spawn_and_catch(&mut session, &mut progress, 6);
    let summary = session
        .end(RoundEndReason::Abandoned, &mut progress)
        .expect("active round ends on request");
    assert_eq!(progress.coins, summary.coins, "balance updated");
    assert!(
        progress.coins >= 240 + 12 + 20,
        "six dishes and two combo bonuses"
    );

    assert_eq!(
        purchase(&mut progress, ShopItem::Food(FoodKind::Adjarski)),
        Ok(()),
        "enough coins for adjarski"
    );
    store.save(&progress);

    let reloaded = store.load();
    assert_eq!(reloaded, progress, "identical after reload");
    assert!(
        reloaded.unlocked_foods.contains(&FoodKind::Adjarski),
        "purchase persisted"
    );
    assert!(
        reloaded.achievements.contains(&Achievement::FirstGame),
        "achievement persisted"
    );
}
