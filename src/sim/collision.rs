//! Item/paddle overlap tests
//!
//! Items are treated as their axis-aligned bounding square. All bounds are
//! inclusive: an item exactly touching the paddle edge counts as caught.

use super::state::{FallingItem, Paddle};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

impl From<&Paddle> for Rect {
    fn from(paddle: &Paddle) -> Self {
        Rect {
            x: paddle.left(),
            y: paddle.top(),
            w: paddle.right() - paddle.left(),
            h: paddle.bottom() - paddle.top(),
        }
    }
}

/// Vertical span of the item overlaps the rect's band
#[inline]
pub fn overlaps_band(item: &FallingItem, rect: &Rect) -> bool {
    item.pos.y + item.radius >= rect.top() && item.pos.y - item.radius <= rect.bottom()
}

/// Horizontal span of the item overlaps the rect's extent
#[inline]
pub fn overlaps_extent(item: &FallingItem, rect: &Rect) -> bool {
    item.pos.x + item.radius >= rect.left() && item.pos.x - item.radius <= rect.right()
}

/// True when the item touches the rect
pub fn item_touches(item: &FallingItem, rect: &Rect) -> bool {
    overlaps_band(item, rect) && overlaps_extent(item, rect)
}

/// True once the item has fully left the bottom of the visible area
pub fn below_surface(item: &FallingItem, surface_height: f32) -> bool {
    item.pos.y - item.radius > surface_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ItemKind;
    use glam::Vec2;

    fn item_at(x: f32, y: f32) -> FallingItem {
        FallingItem {
            id: 1,
            kind: ItemKind::Kebab,
            pos: Vec2::new(x, y),
            vy: 100.0,
            radius: 10.0,
        }
    }

    fn paddle_rect() -> Rect {
        Rect {
            x: 100.0,
            y: 500.0,
            w: 80.0,
            h: 18.0,
        }
    }

    #[test]
    fn test_centered_hit() {
        assert!(item_touches(&item_at(140.0, 505.0), &paddle_rect()));
    }

    #[test]
    fn test_exact_boundaries_touch() {
        let rect = paddle_rect();
        // Bottom of item exactly on paddle top
        assert!(item_touches(&item_at(140.0, 490.0), &rect));
        // Top of item exactly on paddle bottom
        assert!(item_touches(&item_at(140.0, 528.0), &rect));
        // Right edge of item exactly on paddle left
        assert!(item_touches(&item_at(90.0, 505.0), &rect));
        // Left edge of item exactly on paddle right
        assert!(item_touches(&item_at(190.0, 505.0), &rect));
    }

    #[test]
    fn test_just_outside_misses() {
        let rect = paddle_rect();
        assert!(!item_touches(&item_at(140.0, 489.9), &rect));
        assert!(!item_touches(&item_at(89.9, 505.0), &rect));
        assert!(!item_touches(&item_at(190.1, 505.0), &rect));
        assert!(!item_touches(&item_at(140.0, 528.1), &rect));
    }

    #[test]
    fn test_band_without_extent_misses() {
        let rect = paddle_rect();
        let item = item_at(300.0, 505.0);
        assert!(overlaps_band(&item, &rect));
        assert!(!overlaps_extent(&item, &rect));
        assert!(!item_touches(&item, &rect));
    }

    #[test]
    fn test_paddle_rect_rests_on_floor() {
        let rect = Rect::from(&Paddle::default());
        assert_eq!(rect.bottom(), FLOOR_Y);
        assert_eq!(rect.h, PLAYER_HEIGHT);
        assert_eq!(rect.w, PLAYER_WIDTH);
    }

    #[test]
    fn test_below_surface() {
        assert!(!below_surface(&item_at(10.0, CANVAS_HEIGHT + 10.0), CANVAS_HEIGHT));
        assert!(below_surface(&item_at(10.0, CANVAS_HEIGHT + 10.5), CANVAS_HEIGHT));
    }
}
