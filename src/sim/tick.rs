//! Per-frame simulation tick
//!
//! Handles session input, then motion, contacts and effects in that order.

use super::collision::detect_and_resolve;
use super::state::{SessionPhase, SimEvent, SimState};

/// Input commands for a single tick
///
/// `start_pause` wins: a tick that starts, pauses or resumes drops a
/// `toggle_special` raised alongside it.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start from the welcome screen, or toggle pause while in a session
    pub start_pause: bool,
    /// Toggle obstacle oscillation
    pub toggle_special: bool,
}

/// Advance the simulation by `dt` seconds
///
/// A tick that starts, pauses or resumes integrates nothing and asks the
/// caller to restart its clock, so time spent paused never moves the ball.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    state.collided = false;

    if input.start_pause {
        if input.toggle_special {
            log::debug!("Special toggle dropped, start/pause pressed in the same tick");
        }
        match state.phase {
            SessionPhase::WelcomeIdle => {
                state.start();
                log::info!("Session started, heading {:.3} rad", state.ball.heading);
            }
            SessionPhase::Playing => {
                state.phase = SessionPhase::Paused;
                state.clock_reset = true;
                state.events.push(SimEvent::Paused);
                log::info!("Paused");
            }
            SessionPhase::Paused => {
                state.phase = SessionPhase::Playing;
                state.clock_reset = true;
                state.events.push(SimEvent::Resumed);
                log::info!("Resumed");
            }
        }
        return;
    }

    if state.phase != SessionPhase::Playing {
        return;
    }

    if input.toggle_special {
        state.special = !state.special;
        state.events.push(SimEvent::SpecialToggled {
            enabled: state.special,
        });
        log::info!("Special effect {}", if state.special { "on" } else { "off" });
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    state.advance_obstacles();
    state.ball.advance(state.settings.ball_speed, dt);

    let contacts = detect_and_resolve(&mut state.ball, &state.field, &state.obstacles);
    if !contacts.is_empty() {
        state.collided = true;
        for contact in contacts {
            log::debug!(
                "Contact {:?}: heading {:.3} -> {:.3}, depth {:.3}",
                contact.surface,
                contact.heading_in,
                contact.heading_out,
                contact.depth
            );
            state.events.push(SimEvent::Collision(contact));
        }
        state.trigger_effect();
    }

    let params = state.settings.effect_params();
    state.effect.advance(&mut state.ball, &params);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::Surface;
    use crate::sim::rect::Side;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    const DT: f32 = 1.0 / 64.0;

    fn press() -> TickInput {
        TickInput {
            start_pause: true,
            ..Default::default()
        }
    }

    fn toggle() -> TickInput {
        TickInput {
            toggle_special: true,
            ..Default::default()
        }
    }

    fn playing(seed: u64) -> SimState {
        let mut state = SimState::new(Settings::default(), seed);
        tick(&mut state, &press(), DT);
        state.drain_events();
        state
    }

    #[test]
    fn test_idle_until_start() {
        let mut state = SimState::new(Settings::default(), 1);
        let before = state.ball.clone();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, SessionPhase::WelcomeIdle);
        assert_eq!(state.ball, before);

        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.ball.pos, state.field.center());
    }

    #[test]
    fn test_rightward_launch_hits_right_wall() {
        let mut state = playing(3);
        state.ball.heading = 0.0;
        let r = state.ball.radius;
        let wall = state.settings.panel_width();

        let mut last_x = state.ball.pos.x;
        let mut ticks = 0;
        while !state.collided {
            last_x = state.ball.pos.x;
            tick(&mut state, &TickInput::default(), DT);
            ticks += 1;
            assert!(ticks < 200, "never reached the wall");
        }

        // Previous tick still clear of the wall, this one crossed it
        assert!(last_x + r <= wall);
        let moved = last_x + state.settings.ball_speed * DT;
        let overshoot = moved + r - wall;
        assert!(overshoot > 0.0);
        assert_eq!(state.ball.pos.x, moved - 2.0 * overshoot);
        assert_eq!(state.ball.pos.y, 325.0);
        assert!((state.ball.heading - PI).abs() < 1e-6);

        let events = state.drain_events();
        let contacts: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Collision(c) => Some(c.surface),
                _ => None,
            })
            .collect();
        assert_eq!(contacts, vec![Surface::Boundary(Side::Right)]);
        assert!(state.effect.kind().is_some());
        assert_eq!(
            events.iter().filter(|e| matches!(e, SimEvent::EffectChanged(_))).count(),
            1
        );
    }

    #[test]
    fn test_pause_freezes_ball() {
        let mut state = playing(11);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), DT);
        }

        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, SessionPhase::Paused);
        let frozen = state.ball.clone();
        let elapsed = state.elapsed;

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 5.0);
        }
        assert_eq!(state.ball, frozen);

        // The resuming tick integrates nothing either
        state.clock_reset = false;
        tick(&mut state, &press(), 5.0);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert!(state.clock_reset);
        assert_eq!(state.ball, frozen);
        assert_eq!(state.elapsed, elapsed);

        tick(&mut state, &TickInput::default(), DT);
        assert_ne!(state.ball.pos, frozen.pos);
    }

    #[test]
    fn test_special_toggle_only_while_running() {
        let mut state = playing(5);
        tick(&mut state, &press(), DT);
        tick(&mut state, &toggle(), DT);
        assert!(!state.special);

        tick(&mut state, &press(), DT);
        tick(&mut state, &toggle(), DT);
        assert!(state.special);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.obstacles.iter().any(|o| o.pos != o.anchor));

        tick(&mut state, &toggle(), DT);
        assert!(!state.special);
        assert!(state.obstacles.iter().all(|o| o.pos == o.anchor));
    }

    #[test]
    fn test_elapsed_accumulates_while_playing() {
        let mut state = playing(8);
        for _ in 0..64 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!((state.elapsed - 1.0).abs() < 1e-5);
        assert_eq!(state.time_ticks, 64);
    }

    #[test]
    fn test_ball_stays_in_field_and_out_of_obstacles() {
        for seed in 0..24 {
            let mut state = playing(seed);
            for step in 0..4_000 {
                tick(&mut state, &TickInput::default(), 1.0 / 60.0);
                let pos = state.ball.pos;
                assert!(state.field.contains_point(pos), "seed {seed} step {step}: left the field at {pos}");
                for obstacle in &state.obstacles {
                    assert!(
                        !obstacle.rect().interior_contains(pos),
                        "seed {seed} step {step}: center {pos} inside obstacle at {}",
                        obstacle.pos
                    );
                }
                assert!((0.0..2.0 * PI).contains(&state.ball.heading));
            }
            state.drain_events();
        }
    }

    #[test]
    fn test_collisions_drive_effects() {
        let mut state = playing(21);
        let mut rolls = 0;
        for _ in 0..3_000 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            let events = state.drain_events();
            let collided = events.iter().any(|e| matches!(e, SimEvent::Collision(_)));
            let changed = events
                .iter()
                .filter(|e| matches!(e, SimEvent::EffectChanged(_)))
                .count();
            assert_eq!(collided, state.collided);
            assert_eq!(changed, usize::from(collided));
            rolls += changed;
        }
        assert!(rolls > 0);
    }

    #[test]
    fn test_restart_is_deterministic() {
        let mut a = playing(99);
        let mut b = playing(99);
        let inputs = [TickInput::default(), toggle(), TickInput::default(), press(), press()];
        for input in inputs.iter().cycle().take(500) {
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.effect, b.effect);
        assert_eq!(a.phase, b.phase);
        assert_eq!(
            a.obstacles.iter().map(|o| o.pos).collect::<Vec<Vec2>>(),
            b.obstacles.iter().map(|o| o.pos).collect::<Vec<Vec2>>()
        );
    }

    #[test]
    fn test_start_pause_drops_same_tick_toggle() {
        let mut state = playing(13);
        let both = TickInput {
            start_pause: true,
            toggle_special: true,
        };
        tick(&mut state, &both, DT);
        assert_eq!(state.phase, SessionPhase::Paused);
        assert!(!state.special);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, SimEvent::SpecialToggled { .. }))
        );
    }

    fn assert_clear_of_obstacles(state: &SimState, seed: u64, step: usize) {
        let pos = state.ball.pos;
        assert!(state.field.contains_point(pos), "seed {seed} step {step}: left the field at {pos}");
        for (i, obstacle) in state.obstacles.iter().enumerate() {
            assert!(
                !obstacle.rect().interior_contains(pos),
                "seed {seed} step {step}: center {pos} inside obstacle {i} at {}",
                obstacle.pos
            );
        }
    }

    #[test]
    fn test_oscillating_obstacles_never_swallow_ball() {
        for seed in 0..200 {
            let mut state = playing(seed);
            tick(&mut state, &toggle(), 1.0 / 60.0);
            assert!(state.special);
            for step in 0..3_000 {
                tick(&mut state, &TickInput::default(), 1.0 / 60.0);
                assert_clear_of_obstacles(&state, seed, step);
            }
            state.drain_events();
        }
    }

    #[test]
    fn test_toggling_special_never_drops_obstacle_on_ball() {
        for seed in 0..200 {
            let mut state = playing(seed);
            for step in 0..3_000 {
                let input = if step % 97 == 50 { toggle() } else { TickInput::default() };
                tick(&mut state, &input, 1.0 / 60.0);
                assert_clear_of_obstacles(&state, seed, step);
            }
            state.drain_events();
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn static_obstacles_are_never_penetrated(seed in 0u64..10_000, heading in 0.0f32..TAU) {
            let mut state = playing(seed);
            state.ball.heading = heading;
            for _ in 0..1_500 {
                tick(&mut state, &TickInput::default(), 1.0 / 60.0);
                let pos = state.ball.pos;
                prop_assert!(state.field.contains_point(pos));
                for obstacle in &state.obstacles {
                    prop_assert!(!obstacle.rect().interior_contains(pos));
                }
            }
        }
    }
}
