#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::{AssetMetaCheck, AssetMode, AssetPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{
    Backends, PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority,
};
use bevy::window::{PresentMode, WindowMode, WindowResolution};

use crate::{HostBridgePlugin, HostCommandHandler};

#[cfg(not(target_arch = "wasm32"))]
pub const FONT: &str = "../../bits_helpers/assets/fonts/FiraSans-Bold.ttf";
#[cfg(target_arch = "wasm32")]
pub const FONT: &str = concat!(
    "../../bits_helpers-",
    env!("CARGO_PKG_VERSION"),
    "/assets/fonts/FiraSans-Bold.ttf"
);

// Portrait phone layout, matches the Mini App viewport
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

#[allow(unused_variables, reason = "bit_version is only part of the wasm asset path")]
fn asset_plugin(bit_name: &str, bit_version: &str) -> AssetPlugin {
    AssetPlugin {
        mode: AssetMode::Unprocessed,
        #[cfg(not(target_arch = "wasm32"))]
        file_path: "assets".to_string(),
        #[cfg(target_arch = "wasm32")]
        file_path: format!("bits/{bit_name}-{bit_version}/assets"),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    }
}

fn window_plugin(title: &str) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#bit".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Keep browser shortcuts (reload, back) working inside the Mini App
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }
}

fn render_plugin() -> RenderPlugin {
    RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            backends: Some(Backends::BROWSER_WEBGPU | Backends::GL),
            power_preference: PowerPreference::LowPower,
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    }
}

/// Builds the app every bit starts from: portrait window, frame pacing and the
/// host bridge wired to `T`.
pub fn get_default_app<T: HostCommandHandler>(bit_name: &str, bit_version: &str) -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin(bit_name, bit_version))
            .set(window_plugin(bit_name))
            .set(render_plugin()),
    );

    // Saves battery on phones, arcade bits don't need uncapped frame rates.
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(Color::srgb(0.27, 0.72, 0.82)));
    app.add_plugins(HostBridgePlugin::<T>::default());

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(crate::HostSimulation);
    #[cfg(target_arch = "wasm32")]
    app.add_systems(PreUpdate, crate::viewport::follow_browser_viewport);

    app
}
