use bevy::math::Vec2;

/// Largest surface WebGL will configure on most phones.
pub const MAX_SURFACE_SIZE: f32 = 2048.0;

/// Window size for a browser viewport of `inner` CSS pixels, clamped to what
/// the GPU surface accepts.
pub fn fit_to_surface(inner: Vec2) -> Vec2 {
    inner.min(Vec2::splat(MAX_SURFACE_SIZE)).max(Vec2::ONE)
}

/// Keeps the primary window the size of the Mini App viewport.
#[cfg(target_arch = "wasm32")]
pub fn follow_browser_viewport(
    mut windows: bevy::prelude::Query<
        &mut bevy::window::Window,
        bevy::prelude::With<bevy::window::PrimaryWindow>,
    >,
) {
    let Some(browser) = web_sys::window() else {
        return;
    };
    let (Ok(width), Ok(height)) = (browser.inner_width(), browser.inner_height()) else {
        return;
    };
    let (Some(width), Some(height)) = (width.as_f64(), height.as_f64()) else {
        return;
    };
    let target = fit_to_surface(Vec2::new(width as f32, height as f32));

    for mut window in &mut windows {
        let current = Vec2::new(window.resolution.width(), window.resolution.height());
        if (current - target).abs().max_element() > f32::EPSILON {
            window.resolution.set(target.x, target.y);
        }
    }
}
