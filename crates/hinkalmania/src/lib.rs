use bevy::prelude::*;
use bits_helpers::floating_text::{animate_floating_texts, despawn_floating_texts};
use bits_helpers::storage::default_storage;

pub mod achievements;
pub mod catalog;
pub mod catcher;
pub mod config;
pub mod difficulty;
pub mod falling;
pub mod progress;
pub mod scoring;
pub mod session;
pub mod shop;
pub mod spawner;
pub mod store;

mod core;
mod game_over;
mod gameplay;
mod host;
mod welcome;

use crate::core::{GameState, RoundEventFired};
use game_over::{cleanup_game_over, handle_game_over_input, spawn_game_over_screen};
use gameplay::{
    advance_round, cleanup_game, handle_taps, react_to_round_events, start_round, sync_catcher,
    sync_item_sprites, track_pointer, update_hud,
};
use host::Hinkalmania;
use session::Session;
use store::ProgressStore;
use welcome::{despawn_welcome_screen, handle_welcome_input, spawn_welcome_screen};

/// Entry point for the game
pub fn run() {
    let mut app = bits_helpers::get_default_app::<Hinkalmania>(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let store = ProgressStore::new(default_storage(env!("CARGO_PKG_NAME")));
    let progress = store.load();
    info!(
        "Loaded progress: level {}, {} coins, best {}",
        progress.level(),
        progress.coins,
        progress.high_score
    );

    app.insert_resource(progress)
        .insert_resource(store)
        .init_resource::<Session>()
        .init_state::<GameState>()
        .add_event::<RoundEventFired>()
        .add_systems(Startup, setup_camera)
        // Welcome state
        .add_systems(OnEnter(GameState::Welcome), spawn_welcome_screen)
        .add_systems(
            Update,
            handle_welcome_input.run_if(in_state(GameState::Welcome)),
        )
        .add_systems(OnExit(GameState::Welcome), despawn_welcome_screen)
        // Playing state
        .add_systems(OnEnter(GameState::Playing), start_round)
        .add_systems(
            Update,
            (
                track_pointer,
                handle_taps,
                advance_round,
                react_to_round_events,
                sync_item_sprites,
                sync_catcher,
                update_hud,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, animate_floating_texts)
        .add_systems(
            OnExit(GameState::Playing),
            (cleanup_game, despawn_floating_texts),
        )
        // Game over state
        .add_systems(OnEnter(GameState::GameOver), spawn_game_over_screen)
        .add_systems(
            Update,
            handle_game_over_input.run_if(in_state(GameState::GameOver)),
        )
        .add_systems(OnExit(GameState::GameOver), cleanup_game_over);

    app.run();
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
