use bevy::prelude::*;
use bits_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::falling::ItemId;
use crate::session::RoundEvent;

/// Game states that control the flow of the application
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Welcome,
    Playing,
    GameOver,
}

/// Sprite drawing a falling item of the session
#[derive(Component)]
pub struct ItemSprite(pub ItemId);

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct PlateSprite;

#[derive(Component)]
pub struct ScoreDisplay;

#[derive(Component)]
pub struct TimerDisplay;

#[derive(Component)]
pub struct LivesDisplay;

#[derive(Component)]
pub struct CoinsDisplay;

/// Forwards what the session reported this frame to the presentation systems.
#[derive(Event, Debug, Clone)]
pub struct RoundEventFired(pub RoundEvent);

/// Converts a session position (origin top-left, y down) to world space
/// (origin at the centre, y up).
pub fn screen_to_world(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x - WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - position.y,
    )
}

pub fn world_to_screen(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x + WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - position.y,
    )
}
