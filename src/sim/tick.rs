//! Per-frame simulation step
//!
//! Advances the arcade by one variable frame delta. The caller is expected to
//! clamp `dt` (see [`crate::platform::FrameClock`]).

use super::collision::{Rect, below_surface, item_touches};
use super::effects;
use super::spawner;
use super::state::{ArcadeState, GameEvent, GamePhase, ItemKind};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Start/confirm pressed (one-shot)
    pub start: bool,
}

/// Advance the arcade state by `dt` seconds
pub fn tick(state: &mut ArcadeState, input: &TickInput, dt: f32) {
    if input.start && !state.is_running() {
        state.start();
    }

    match state.phase {
        GamePhase::Running => {}
        GamePhase::GameOver => {
            // Let the final explosion play out
            effects::update(state, dt);
            return;
        }
        GamePhase::Idle => return,
    }

    state.elapsed += dt;

    // Update paddle
    let mut dx = 0.0;
    if input.left {
        dx -= PLAYER_SPEED * dt;
    }
    if input.right {
        dx += PLAYER_SPEED * dt;
    }
    state.paddle.shift(dx);

    spawner::advance(state, dt);

    for item in &mut state.items {
        item.pos.y += item.vy * dt;
    }

    resolve_catches(state);
    effects::update(state, dt);
}

/// Consume items touching the paddle and drop the ones that fell off-screen
fn resolve_catches(state: &mut ArcadeState) {
    let paddle = Rect::from(&state.paddle);
    let items = std::mem::take(&mut state.items);
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        if state.is_running() && item_touches(&item, &paddle) {
            match item.kind {
                ItemKind::Bomb => {
                    state.lives = state.lives.saturating_sub(1);
                    state.events.push(GameEvent::BombHit);
                    effects::on_catch(state, ItemKind::Bomb, item.pos);
                    if state.lives == 0 {
                        state.end();
                    }
                }
                ItemKind::Kebab => {
                    state.score += 1;
                    state.events.push(GameEvent::Ate);
                    effects::on_catch(state, ItemKind::Kebab, item.pos);
                }
            }
            continue;
        }
        // Missed kebabs fall through without penalty
        if !below_surface(&item, CANVAS_HEIGHT) {
            kept.push(item);
        }
    }

    state.items = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FallingItem;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> ArcadeState {
        let mut state = ArcadeState::new(12345);
        state.start();
        state.drain_events();
        state
    }

    fn drop_on_paddle(state: &mut ArcadeState, kind: ItemKind) {
        let id = state.next_entity_id();
        let x = state.paddle.left() + PLAYER_WIDTH / 2.0;
        state.items.push(FallingItem {
            id,
            kind,
            pos: Vec2::new(x, state.paddle.top()),
            vy: 0.0,
            radius: kind.radius(),
        });
    }

    #[test]
    fn test_idle_until_start() {
        let mut state = ArcadeState::new(1);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.items.is_empty());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events()[0], GameEvent::Started);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut state = running();
        state.score = 5;
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_paddle_moves_with_input() {
        let mut state = running();
        let x0 = state.paddle.x;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.03);
        assert!((state.paddle.x - (x0 - PLAYER_SPEED * 0.03)).abs() < 1e-3);

        // Both held cancel out
        let x1 = state.paddle.x;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.03);
        assert_eq!(state.paddle.x, x1);
    }

    #[test]
    fn test_kebab_scores() {
        let mut state = running();
        drop_on_paddle(&mut state, ItemKind::Kebab);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, START_LIVES);
        assert!(state.items.is_empty());
        assert!(state.drain_events().contains(&GameEvent::Ate));
    }

    #[test]
    fn test_bomb_costs_life_and_shakes() {
        let mut state = running();
        drop_on_paddle(&mut state, ItemKind::Bomb);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.shake_timer > 0.0);
        assert!(!state.particles.is_empty());
        assert!(state.drain_events().contains(&GameEvent::BombHit));
    }

    #[test]
    fn test_game_over_exactly_once() {
        let mut state = running();
        state.lives = 1;
        drop_on_paddle(&mut state, ItemKind::Bomb);
        drop_on_paddle(&mut state, ItemKind::Bomb);
        drop_on_paddle(&mut state, ItemKind::Kebab);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 0);
        let events = state.drain_events();
        let overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::BombHit).count(), 1);

        // Later frames change nothing
        drop_on_paddle(&mut state, ItemKind::Bomb);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running();
        state.lives = 1;
        state.score = 9;
        drop_on_paddle(&mut state, ItemKind::Bomb);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_missed_items_dropped_without_penalty() {
        let mut state = running();
        state.items.push(FallingItem {
            id: 99,
            kind: ItemKind::Kebab,
            pos: Vec2::new(5.0, CANVAS_HEIGHT + KEBAB_RADIUS + 1.0),
            vy: 300.0,
            radius: KEBAB_RADIUS,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.items.iter().all(|i| i.id != 99));
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_items_fall() {
        let mut state = running();
        state.items.push(FallingItem {
            id: 99,
            kind: ItemKind::Kebab,
            pos: Vec2::new(5.0, 100.0),
            vy: 300.0,
            radius: KEBAB_RADIUS,
        });
        tick(&mut state, &TickInput::default(), 0.02);
        let y = state
            .items
            .iter()
            .find(|i| i.id == 99)
            .map(|i| i.pos.y)
            .unwrap_or_default();
        assert!((y - 106.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = ArcadeState::new(99999);
        let mut b = ArcadeState::new(99999);
        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
        ];
        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut a, input, 0.033);
            tick(&mut b, input, 0.033);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.items.len(), b.items.len());
    }
}
