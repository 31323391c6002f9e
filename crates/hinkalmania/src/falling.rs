use core::fmt;

use bevy::math::{Rect, Vec2};

use crate::catalog::ItemKind;

/// Identity of a spawned item, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// An item falling through the play area.
///
/// Positions are in screen space: origin at the top-left corner of the
/// viewport, y growing downwards. `position` is the item's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub position: Vec2,
    /// Pixels per second, fixed at spawn
    pub fall_speed: f32,
    pub size: f32,
}

impl FallingItem {
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }
}

/// Items currently in flight, in spawn order.
#[derive(Debug, Default, Clone)]
pub struct ActiveItems {
    items: Vec<FallingItem>,
}

impl ActiveItems {
    pub fn push(&mut self, item: FallingItem) {
        self.items.push(item);
    }

    /// Moves every item down by `fall_speed * dt` and drops the ones whose top
    /// edge went past `floor`. Returns the dropped items.
    pub fn advance(&mut self, dt_secs: f32, floor: f32) -> Vec<FallingItem> {
        for item in &mut self.items {
            item.position.y = item.fall_speed.mul_add(dt_secs, item.position.y);
        }

        let (expired, active) = core::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.position.y > floor);
        self.items = active;
        expired
    }

    /// Removes and returns the item, or `None` if it already left the set.
    pub fn take(&mut self, id: ItemId) -> Option<FallingItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: ItemId) -> Option<&FallingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Topmost (most recently spawned) item under `point`.
    pub fn at_point(&self, point: Vec2) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.bounds().contains(point))
            .map(|item| item.id)
    }

    /// Items whose bounding box overlaps `area`.
    pub fn overlapping(&self, area: Rect) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| !item.bounds().intersect(area).is_empty())
            .map(|item| item.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
