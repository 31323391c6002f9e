use core::time::Duration;

use bevy::prelude::*;

use crate::FONT;

const RISE_DISTANCE: f32 = 50.0;
const LIFETIME: Duration = Duration::from_millis(1000);

/// World-space text that drifts upwards and fades out, used for score deltas
/// and bonus callouts.
#[derive(Component)]
pub struct FloatingText {
    timer: Timer,
    origin: Vec2,
    color: Srgba,
}

pub fn spawn_floating_text(
    commands: &mut Commands,
    asset_server: &AssetServer,
    position: Vec2,
    text: impl Into<String>,
    color: Srgba,
) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::Srgba(color)),
        Transform::from_xyz(position.x, position.y, 10.0),
        FloatingText {
            timer: Timer::new(LIFETIME, TimerMode::Once),
            origin: position,
            color,
        },
    ));
}

pub fn animate_floating_texts(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingText)>,
) {
    for (entity, mut transform, mut text_color, mut floating) in &mut query {
        floating.timer.tick(time.delta());
        let progress = floating.timer.fraction();

        transform.translation.y = RISE_DISTANCE.mul_add(progress, floating.origin.y);
        text_color.0 = Color::Srgba(floating.color.with_alpha(1.0 - progress));

        if floating.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn despawn_floating_texts(mut commands: Commands, query: Query<Entity, With<FloatingText>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
