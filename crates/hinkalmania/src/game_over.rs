use bevy::color::palettes::css::{GOLD, SILVER};
use bevy::prelude::*;
use bits_helpers::pointer::any_just_pressed;
use bits_helpers::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::core::GameState;
use crate::progress::Progress;
use crate::session::{RoundEndReason, RoundSummary, Session};

/// Component marker for game over screen entities
#[derive(Component)]
pub struct GameOverScreen;

fn headline(reason: RoundEndReason) -> &'static str {
    match reason {
        RoundEndReason::Timeout => "Time's up!",
        RoundEndReason::LivesExhausted => "Out of lives!",
        RoundEndReason::Abandoned => "Round over",
    }
}

/// Lines of the results screen, top to bottom.
fn summary_lines(summary: &RoundSummary, progress: &Progress) -> Vec<(String, f32, Srgba)> {
    let record = &summary.record;
    let mut lines = vec![(headline(summary.reason).to_owned(), 44.0, Srgba::WHITE)];

    let score_line = if record.new_high_score {
        format!("New best: {}", summary.score)
    } else {
        format!("Score: {}", summary.score)
    };
    lines.push((score_line, 30.0, Srgba::WHITE));
    lines.push((
        format!("+{} coins, {} in total", summary.earned_coins, summary.coins),
        22.0,
        GOLD,
    ));
    lines.push((
        format!(
            "Best combo {}   +{} xp",
            summary.best_combo, record.experience_gained
        ),
        20.0,
        SILVER,
    ));
    if record.leveled_up {
        lines.push((format!("Level {}!", progress.level()), 24.0, GOLD));
    }
    for achievement in &record.new_achievements {
        lines.push((
            format!("{} {}", achievement.icon(), achievement.title()),
            20.0,
            GOLD,
        ));
    }
    lines
}

/// Spawns the results of the last round
pub fn spawn_game_over_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    session: Res<Session>,
    progress: Res<Progress>,
) {
    commands.spawn((
        GameOverScreen,
        Sprite {
            color: Color::srgba(0.0, 0.0, 0.0, 0.8),
            custom_size: Some(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 20.0),
        Visibility::Visible,
    ));

    let font = asset_server.load(FONT);
    let lines = session
        .last_summary()
        .map(|summary| summary_lines(summary, &progress))
        .unwrap_or_default();

    let mut y = WINDOW_HEIGHT / 4.0;
    for (text, size, color) in lines {
        commands.spawn((
            GameOverScreen,
            Text2d::new(text),
            TextFont {
                font: font.clone(),
                font_size: size,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::Srgba(color)),
            Transform::from_xyz(0.0, y, 21.0),
        ));
        y -= size + 14.0;
    }

    commands.spawn((
        GameOverScreen,
        Text2d::new("Tap to continue"),
        TextFont {
            font,
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 3.0, 21.0),
    ));
}

/// Handles input on the game over screen
pub fn handle_game_over_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if any_just_pressed(&mouse_input, &touch_input) {
        session.finish();
        next_state.set(GameState::Welcome);
    }
}

/// Cleans up the game over screen
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
