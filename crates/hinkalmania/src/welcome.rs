use bevy::color::palettes::css::{GOLD, SILVER};
use bevy::prelude::*;
use bits_helpers::pointer::any_just_pressed;
use bits_helpers::{FONT, WINDOW_HEIGHT};

use crate::core::GameState;
use crate::progress::Progress;
use crate::store::ProgressStore;

/// Component marker for welcome screen entities.
#[derive(Component)]
pub struct WelcomeScreen;

#[derive(Component)]
pub struct SettingsLine;

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn settings_text(progress: &Progress) -> String {
    format!(
        "[M] sound {}   [V] vibration {}",
        on_off(progress.sound_enabled),
        on_off(progress.vibration_enabled)
    )
}

/// Spawns the title, the player's stats and the start prompt.
pub fn spawn_welcome_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    progress: Res<Progress>,
) {
    let font = asset_server.load(FONT);
    let text = |value: String, size: f32, color: Srgba, y: f32| {
        (
            Text2d::new(value),
            TextFont {
                font: font.clone(),
                font_size: size,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::Srgba(color)),
            Transform::from_xyz(0.0, y, 0.0),
        )
    };

    commands
        .spawn((WelcomeScreen, Transform::default(), Visibility::Visible))
        .with_children(|parent| {
            parent.spawn(text("Hinkalmania".into(), 40.0, GOLD, WINDOW_HEIGHT / 4.0 + 40.0));
            parent.spawn(text(
                format!(
                    "{} Catch the dishes, dodge the trash",
                    progress.current_skin.config().emoji
                ),
                18.0,
                Srgba::WHITE,
                WINDOW_HEIGHT / 4.0 - 10.0,
            ));
            parent.spawn(text(
                format!(
                    "Level {}   Best {}   Coins {}",
                    progress.level(),
                    progress.high_score,
                    progress.coins
                ),
                22.0,
                Srgba::WHITE,
                20.0,
            ));
            parent.spawn(text(
                format!(
                    "Games {}   Achievements {}",
                    progress.total_games_played,
                    progress.achievements.len()
                ),
                18.0,
                SILVER,
                -15.0,
            ));
            parent.spawn((
                SettingsLine,
                text(settings_text(&progress), 16.0, SILVER, -60.0),
            ));
            parent.spawn(text(
                "Tap to Start".into(),
                32.0,
                Srgba::WHITE,
                -WINDOW_HEIGHT / 4.0,
            ));
        });
}

/// Starts the round on a tap, toggles settings from the keyboard.
pub fn handle_welcome_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    keycode: Res<ButtonInput<KeyCode>>,
    mut progress: ResMut<Progress>,
    store: Res<ProgressStore>,
    mut settings_line: Query<&mut Text2d, With<SettingsLine>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut changed = false;
    if keycode.just_pressed(KeyCode::KeyM) {
        let enabled = progress.toggle_sound();
        info!("Sound {}", on_off(enabled));
        changed = true;
    }
    if keycode.just_pressed(KeyCode::KeyV) {
        let enabled = progress.toggle_vibration();
        info!("Vibration {}", on_off(enabled));
        changed = true;
    }
    if changed {
        store.save(&progress);
        if let Ok(mut text) = settings_line.get_single_mut() {
            *text = Text2d::new(settings_text(&progress));
        }
    }

    if any_just_pressed(&mouse_input, &touch_input) {
        next_state.set(GameState::Playing);
    }
}

/// Cleans up the welcome screen by despawning its entities.
pub fn despawn_welcome_screen(mut commands: Commands, query: Query<Entity, With<WelcomeScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
