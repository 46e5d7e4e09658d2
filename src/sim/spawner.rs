//! Falling item spawner
//!
//! Time accumulates toward a spawn interval that shrinks as the score grows.
//! Each time the accumulator reaches the interval an item is emitted and the
//! interval is subtracted, so a slow frame may emit several items.

use glam::Vec2;
use rand::Rng;

use super::state::{ArcadeState, FallingItem, ItemKind};
use crate::consts::*;

/// Seconds between spawns at the given score
pub fn spawn_interval(score: u32) -> f32 {
    let progress = score.min(SPAWN_SCORE_CAP) as f32;
    (SPAWN_INTERVAL_BASE - progress * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
}

/// Base fall speed at the given score, before jitter
pub fn base_fall_speed(score: u32) -> f32 {
    FALL_SPEED_BASE + (score as f32 * FALL_SPEED_PER_POINT).min(FALL_SPEED_BONUS_CAP)
}

/// Advance the spawn accumulator by `dt`, pushing any due items.
///
/// Returns the number of items spawned.
pub fn advance(state: &mut ArcadeState, dt: f32) -> usize {
    let interval = spawn_interval(state.score);
    state.spawn_timer += dt;

    let mut spawned = 0;
    while state.spawn_timer >= interval {
        state.spawn_timer -= interval;
        spawn_item(state);
        spawned += 1;
    }
    spawned
}

/// Create one item above the top edge
pub fn spawn_item(state: &mut ArcadeState) {
    let kind = if state.rng.random_bool(BOMB_CHANCE) {
        ItemKind::Bomb
    } else {
        ItemKind::Kebab
    };
    let radius = kind.radius();
    let x = radius + state.rng.random::<f32>() * (CANVAS_WIDTH - radius * 2.0);
    let vy = base_fall_speed(state.score) + state.rng.random::<f32>() * FALL_SPEED_JITTER;

    let item = FallingItem {
        id: state.next_entity_id(),
        kind,
        pos: Vec2::new(x, -radius - SPAWN_MARGIN),
        vy,
        radius,
    };
    state.items.push(item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_shrinks_with_score() {
        assert!((spawn_interval(0) - 0.9).abs() < 1e-6);
        assert!(spawn_interval(100) < spawn_interval(10));
        // Score cap freezes the curve
        assert_eq!(spawn_interval(150), spawn_interval(10_000));
        assert!(spawn_interval(u32::MAX) >= SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_fall_speed_capped() {
        assert_eq!(base_fall_speed(0), 140.0);
        assert_eq!(base_fall_speed(50), 240.0);
        assert_eq!(base_fall_speed(500), 400.0);
    }

    #[test]
    fn test_slow_frame_spawns_several() {
        let mut state = ArcadeState::new(42);
        state.start();
        let spawned = advance(&mut state, 2.0);
        // 2.0 / 0.9 -> two spawns, 0.2s carried over
        assert_eq!(spawned, 2);
        assert_eq!(state.items.len(), 2);
        assert!((state.spawn_timer - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_short_frame_only_accumulates() {
        let mut state = ArcadeState::new(42);
        state.start();
        assert_eq!(advance(&mut state, 0.5), 0);
        assert!(state.items.is_empty());
        assert_eq!(advance(&mut state, 0.4), 1);
    }

    #[test]
    fn test_spawned_items_within_bounds() {
        let mut state = ArcadeState::new(7);
        state.start();
        for _ in 0..500 {
            spawn_item(&mut state);
        }
        for item in &state.items {
            assert!(item.pos.x - item.radius >= 0.0);
            assert!(item.pos.x + item.radius <= CANVAS_WIDTH);
            assert!(item.pos.y + item.radius < 0.0);
            assert!(item.vy >= FALL_SPEED_BASE);
            assert!(item.vy <= FALL_SPEED_BASE + FALL_SPEED_JITTER);
        }
        let bombs = state
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Bomb)
            .count();
        // ~22% of 500 = 110
        assert!(bombs > 60 && bombs < 170, "bombs = {bombs}");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = ArcadeState::new(3);
        state.start();
        for _ in 0..20 {
            spawn_item(&mut state);
        }
        let mut ids: Vec<u32> = state.items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
