//! Demo-mode player
//!
//! Steers toward the lowest kebab still above the paddle and sidesteps bombs
//! about to land on it. Drives the headless native run.

use super::state::{ArcadeState, FallingItem, ItemKind};
use super::tick::TickInput;
use crate::consts::*;

/// Bombs closer than this (vertically) to the paddle top trigger a dodge
const DODGE_RANGE: f32 = 140.0;
/// Dead zone around the target to avoid jitter
const SETTLE_DISTANCE: f32 = 6.0;

fn threatens(bomb: &FallingItem, state: &ArcadeState) -> bool {
    let top = state.paddle.top();
    let above = bomb.pos.y + bomb.radius < top + PLAYER_HEIGHT;
    let close = top - (bomb.pos.y + bomb.radius) < DODGE_RANGE;
    let over = bomb.pos.x + bomb.radius >= state.paddle.left() - 4.0
        && bomb.pos.x - bomb.radius <= state.paddle.right() + 4.0;
    above && close && over
}

/// Pick inputs for the next frame
pub fn drive(state: &ArcadeState) -> TickInput {
    let mut input = TickInput {
        start: !state.is_running(),
        ..Default::default()
    };
    if !state.is_running() {
        return input;
    }

    let center = state.paddle.left() + PLAYER_WIDTH / 2.0;
    let top = state.paddle.top();

    if let Some(bomb) = state
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Bomb && threatens(i, state))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        // Run toward the wider side
        let go_left = if bomb.pos.x > center {
            true
        } else if bomb.pos.x < center {
            false
        } else {
            center > CANVAS_WIDTH / 2.0
        };
        let blocked = if go_left {
            state.paddle.left() <= 0.0
        } else {
            state.paddle.right() >= CANVAS_WIDTH
        };
        let go_left = go_left != blocked;
        input.left = go_left;
        input.right = !go_left;
        return input;
    }

    let target = state
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Kebab && i.pos.y - i.radius <= top)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(kebab) = target {
        let delta = kebab.pos.x - center;
        if delta.abs() > SETTLE_DISTANCE {
            input.left = delta < 0.0;
            input.right = delta > 0.0;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn running() -> ArcadeState {
        let mut state = ArcadeState::new(5);
        state.start();
        state
    }

    fn push(state: &mut ArcadeState, kind: ItemKind, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.items.push(FallingItem {
            id,
            kind,
            pos: Vec2::new(x, y),
            vy: 200.0,
            radius: kind.radius(),
        });
    }

    #[test]
    fn test_starts_when_not_running() {
        let state = ArcadeState::new(5);
        assert!(drive(&state).start);
    }

    #[test]
    fn test_chases_lowest_kebab() {
        let mut state = running();
        push(&mut state, ItemKind::Kebab, 20.0, 500.0);
        push(&mut state, ItemKind::Kebab, 400.0, 100.0);
        let input = drive(&state);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_dodges_incoming_bomb() {
        let mut state = running();
        let center = state.paddle.left() + PLAYER_WIDTH / 2.0;
        let top = state.paddle.top();
        push(&mut state, ItemKind::Bomb, center + 10.0, top - 40.0);
        push(&mut state, ItemKind::Kebab, center + 100.0, 400.0);
        let input = drive(&state);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_settles_under_target() {
        let mut state = running();
        let center = state.paddle.left() + PLAYER_WIDTH / 2.0;
        push(&mut state, ItemKind::Kebab, center + 2.0, 300.0);
        let input = drive(&state);
        assert!(!input.left && !input.right);
    }
}
