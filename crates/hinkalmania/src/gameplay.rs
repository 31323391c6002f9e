use bevy::color::palettes::css::{GOLD, GREEN, RED, WHITE};
use bevy::prelude::*;
use bits_helpers::floating_text::spawn_floating_text;
use bits_helpers::pointer::{just_pressed_world_position, pointer_world_position};
use bits_helpers::{FONT, Haptic, HostMessage, WINDOW_HEIGHT, WINDOW_WIDTH, send_host_message};

use crate::catalog::ItemKind;
use crate::core::{
    CoinsDisplay, GameState, ItemSprite, LivesDisplay, PlateSprite, PlayerSprite, RoundEventFired,
    ScoreDisplay, TimerDisplay, screen_to_world, world_to_screen,
};
use crate::progress::Progress;
use crate::scoring::CatchOutcome;
use crate::session::{RoundEvent, RoundSummary, Session};
use crate::store::ProgressStore;

const PLATE_COLOR: Color = Color::srgb(0.93, 0.93, 0.88);
const HUD_FONT_SIZE: f32 = 20.0;

/// Sends `pattern` to the host unless the player turned vibration off.
pub fn haptic(progress: &Progress, pattern: Haptic) {
    if progress.vibration_enabled {
        send_host_message(HostMessage::Haptic { pattern });
    }
}

/// Feedback for a catch: heavy on the last life, a combo reward gets a
/// stronger pulse than a plain dish.
pub const fn catch_haptic(outcome: &CatchOutcome) -> Haptic {
    if outcome.lives_exhausted {
        Haptic::Heavy
    } else if outcome.kind.is_trash() {
        Haptic::Error
    } else if outcome.bonuses.coins > 0 || outcome.bonuses.life_restored {
        Haptic::Medium
    } else {
        Haptic::Light
    }
}

/// Persists a finished round and tells the host about it.
pub fn announce_round_end(summary: &RoundSummary, progress: &Progress, store: &ProgressStore) {
    store.save(progress);
    haptic(progress, Haptic::Success);
    send_host_message(HostMessage::RoundEnded {
        score: summary.score,
        coins: summary.coins,
    });
}

/// Starts a round and spawns the catcher and the HUD
pub fn start_round(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut session: ResMut<Session>,
    progress: Res<Progress>,
) {
    session.finish();
    if !session.start(&progress) {
        warn!("Round could not start from {:?}", session.phase());
    }

    let layout = session.config().catcher.clone();
    let catcher = *session.catcher();
    let font = asset_server.load(FONT);

    let player = screen_to_world(catcher.player_rect(&layout).center());
    commands.spawn((
        PlayerSprite,
        Text2d::new(progress.current_skin.config().emoji),
        TextFont {
            font: font.clone(),
            font_size: layout.player_size,
            ..default()
        },
        Transform::from_xyz(player.x, player.y, 2.0),
    ));

    let plate = screen_to_world(catcher.plate_rect(&layout).center());
    commands.spawn((
        PlateSprite,
        Sprite::from_color(PLATE_COLOR, layout.plate_size),
        Transform::from_xyz(plate.x, plate.y, 1.0),
    ));

    let hud_y = WINDOW_HEIGHT / 2.0 - 20.0;
    let hud = [
        (-WINDOW_WIDTH / 2.0 + 50.0, JustifyText::Left),
        (-WINDOW_WIDTH / 6.0 + 10.0, JustifyText::Center),
        (WINDOW_WIDTH / 6.0 + 10.0, JustifyText::Center),
        (WINDOW_WIDTH / 2.0 - 50.0, JustifyText::Right),
    ];
    let hud_text = |x: f32, justify: JustifyText| {
        (
            Text2d::default(),
            TextFont {
                font: font.clone(),
                font_size: HUD_FONT_SIZE,
                ..default()
            },
            TextLayout::new_with_justify(justify),
            Transform::from_xyz(x, hud_y, 5.0),
        )
    };
    let [score, time, lives, coins] = hud;
    commands.spawn((ScoreDisplay, hud_text(score.0, score.1)));
    commands.spawn((TimerDisplay, hud_text(time.0, time.1)));
    commands.spawn((LivesDisplay, hud_text(lives.0, lives.1)));
    commands.spawn((CoinsDisplay, hud_text(coins.0, coins.1)));
}

/// Moves the catcher under the pointer
pub fn track_pointer(
    mut session: ResMut<Session>,
    windows: Query<&Window>,
    touch_input: Res<Touches>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
) {
    if let Some(world_pos) = pointer_world_position(&touch_input, &windows, &camera_query) {
        session.move_catcher(world_to_screen(world_pos).x);
    }
}

/// Catches the item under a tap
pub fn handle_taps(
    mut session: ResMut<Session>,
    mut progress: ResMut<Progress>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut round_events: EventWriter<RoundEventFired>,
) {
    let Some(world_pos) =
        just_pressed_world_position(&mouse_input, &touch_input, &windows, &camera_query)
    else {
        return;
    };
    let Some(id) = session.item_at(world_to_screen(world_pos)) else {
        return;
    };

    let events = session.catch(id, &mut progress);
    round_events.send_batch(events.into_iter().map(RoundEventFired));
}

/// Runs the round clock, the spawner, the fall loop and plate catches
pub fn advance_round(
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut progress: ResMut<Progress>,
    mut round_events: EventWriter<RoundEventFired>,
) {
    let mut events = session.tick(time.delta(), &mut progress);
    events.extend(session.catch_at_plate(&mut progress));
    round_events.send_batch(events.into_iter().map(RoundEventFired));
}

fn catch_label(outcome: &CatchOutcome) -> (String, Srgba) {
    let mut label = match outcome.points {
        points if points >= 0 => format!("+{points}"),
        points => points.to_string(),
    };
    if outcome.bonuses.double_points {
        label.push_str(" x2");
    }
    let color = match outcome.kind {
        ItemKind::Food(_) => GREEN,
        ItemKind::Trash(_) => RED,
    };
    (label, color)
}

/// Effects, haptics and persistence for what happened this frame
pub fn react_to_round_events(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut round_events: EventReader<RoundEventFired>,
    progress: Res<Progress>,
    store: Res<ProgressStore>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for RoundEventFired(event) in round_events.read() {
        match event {
            RoundEvent::Spawned(id) => debug!("Spawned {id}"),
            RoundEvent::Expired(id) => debug!("{id} fell off the screen"),
            RoundEvent::TimeChanged(_) => {}
            RoundEvent::Caught {
                position, outcome, ..
            } => {
                let world_pos = screen_to_world(*position);
                let (label, color) = catch_label(outcome);
                spawn_floating_text(&mut commands, &asset_server, world_pos, label, color);

                if outcome.bonuses.coins > 0 {
                    spawn_floating_text(
                        &mut commands,
                        &asset_server,
                        world_pos + Vec2::new(0.0, 30.0),
                        format!("Combo x{}! +{} coins", outcome.combo, outcome.bonuses.coins),
                        GOLD,
                    );
                }
                if outcome.bonuses.life_restored {
                    spawn_floating_text(
                        &mut commands,
                        &asset_server,
                        world_pos - Vec2::new(0.0, 30.0),
                        "+1 life",
                        WHITE,
                    );
                }

                haptic(&progress, catch_haptic(outcome));
                store.save(&progress);
            }
            RoundEvent::Ended(summary) => {
                announce_round_end(summary, &progress, &store);
                next_state.set(GameState::GameOver);
            }
        }
    }
}

/// Keeps one sprite per active item, placed where the session says it is
pub fn sync_item_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    session: Res<Session>,
    mut sprites: Query<(Entity, &ItemSprite, &mut Transform)>,
) {
    let mut drawn = Vec::new();
    for (entity, sprite, mut transform) in &mut sprites {
        let Some(item) = session.items().find(|item| item.id == sprite.0) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };
        let position = screen_to_world(item.center());
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        drawn.push(sprite.0);
    }

    for item in session.items().filter(|item| !drawn.contains(&item.id)) {
        let position = screen_to_world(item.center());
        commands
            .spawn((
                ItemSprite(item.id),
                Sprite::from_color(
                    item.kind.color().with_alpha(0.35),
                    Vec2::splat(item.size),
                ),
                Transform::from_xyz(position.x, position.y, 3.0),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(item.kind.config().emoji),
                    TextFont {
                        font: asset_server.load(FONT),
                        font_size: item.size * 0.7,
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }
}

pub fn sync_catcher(
    session: Res<Session>,
    mut player: Query<&mut Transform, (With<PlayerSprite>, Without<PlateSprite>)>,
    mut plate: Query<&mut Transform, (With<PlateSprite>, Without<PlayerSprite>)>,
) {
    let layout = &session.config().catcher;
    let catcher = session.catcher();

    if let Ok(mut transform) = player.get_single_mut() {
        transform.translation.x = screen_to_world(catcher.player_rect(layout).center()).x;
    }
    if let Ok(mut transform) = plate.get_single_mut() {
        transform.translation.x = screen_to_world(catcher.plate_rect(layout).center()).x;
    }
}

pub fn update_hud(
    session: Res<Session>,
    mut texts: ParamSet<(
        Query<&mut Text2d, With<ScoreDisplay>>,
        Query<&mut Text2d, With<TimerDisplay>>,
        Query<&mut Text2d, With<LivesDisplay>>,
        Query<&mut Text2d, With<CoinsDisplay>>,
    )>,
) {
    let round = session.round();

    if let Ok(mut text) = texts.p0().get_single_mut() {
        *text = Text2d::new(if round.combo > 1 {
            format!("⭐ {} (x{})", round.score, round.combo)
        } else {
            format!("⭐ {}", round.score)
        });
    }
    if let Ok(mut text) = texts.p1().get_single_mut() {
        *text = Text2d::new(format!("⏱ {}", session.time_remaining()));
    }
    if let Ok(mut text) = texts.p2().get_single_mut() {
        *text = Text2d::new("❤".repeat(round.lives as usize));
    }
    if let Ok(mut text) = texts.p3().get_single_mut() {
        *text = Text2d::new(format!("🪙 {}", round.coins));
    }
}

/// Cleans up round entities when leaving the Playing state
pub fn cleanup_game(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<ItemSprite>,
            With<PlayerSprite>,
            With<PlateSprite>,
            With<ScoreDisplay>,
            With<TimerDisplay>,
            With<LivesDisplay>,
            With<CoinsDisplay>,
        )>,
    >,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
