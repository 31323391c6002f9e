use bevy::math::{Rect, Vec2};

use crate::config::{PLATE_BOTTOM_OFFSET, PLATE_SIZE, PLAYER_BOTTOM_OFFSET, PLAYER_SIZE};

/// Sizes and vertical placement of the player and the plate they hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CatcherLayout {
    pub player_size: f32,
    pub plate_size: Vec2,
    /// Distance from the bottom of the viewport to the player's top edge
    pub player_bottom_offset: f32,
    /// Distance from the bottom of the viewport to the plate's top edge
    pub plate_bottom_offset: f32,
}

impl Default for CatcherLayout {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            plate_size: Vec2::new(PLATE_SIZE.0, PLATE_SIZE.1),
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            plate_bottom_offset: PLATE_BOTTOM_OFFSET,
        }
    }
}

/// Horizontal position of the catcher, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatcherPosition {
    center_x: f32,
    viewport: Vec2,
}

impl CatcherPosition {
    pub fn centered(viewport: Vec2) -> Self {
        Self {
            center_x: viewport.x / 2.0,
            viewport,
        }
    }

    /// Follows the pointer, keeping the widest part (player or plate) on screen.
    pub fn track(pointer_x: f32, viewport: Vec2, layout: &CatcherLayout) -> Self {
        let half = layout.plate_size.x.max(layout.player_size) / 2.0;
        let center_x = if viewport.x <= half * 2.0 {
            viewport.x / 2.0
        } else {
            pointer_x.clamp(half, viewport.x - half)
        };
        Self { center_x, viewport }
    }

    pub const fn center_x(&self) -> f32 {
        self.center_x
    }

    pub fn player_rect(&self, layout: &CatcherLayout) -> Rect {
        let top = self.viewport.y - layout.player_bottom_offset;
        Rect::from_center_size(
            Vec2::new(self.center_x, top + layout.player_size / 2.0),
            Vec2::splat(layout.player_size),
        )
    }

    pub fn plate_rect(&self, layout: &CatcherLayout) -> Rect {
        let top = self.viewport.y - layout.plate_bottom_offset;
        Rect::from_center_size(
            Vec2::new(self.center_x, top + layout.plate_size.y / 2.0),
            layout.plate_size,
        )
    }
}
