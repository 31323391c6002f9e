use bevy::prelude::*;

fn screen_to_world(
    position: Vec2,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

/// Where the player is pointing right now: the hovering or pressed cursor, or
/// the first active touch.
pub fn pointer_screen_position(
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if let Some(touch) = touch_input.iter().next() {
        return Some(touch.position());
    }

    windows.get_single().ok()?.cursor_position()
}

pub fn pointer_world_position(
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = pointer_screen_position(touch_input, windows)?;
    screen_to_world(position, camera)
}

/// Position of a tap or click that started this frame.
pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input
            .iter_just_pressed()
            .next()
            .map(bevy::input::touch::Touch::position)
    }
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    screen_to_world(position, camera)
}

/// Any tap or click this frame, regardless of position.
pub fn any_just_pressed(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
) -> bool {
    button_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed()
}
