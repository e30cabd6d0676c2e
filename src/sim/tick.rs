//! Per-frame simulation step
//!
//! Order within a step matters: tilt, integrate, wrap, contacts, cue expiry,
//! then the frame update (camera or terminal check) and garbage collection, so
//! the camera always reflects this step's position and cleanup never sees a
//! removed player.

use super::camera::in_scroll_band;
use super::collision;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState, SessionOutcome, SessionResult};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap received since the last step
    pub activate: bool,
    /// Latest tilt reading, roughly [-1, 1]
    pub tilt: f32,
}

/// Advance the session by one step. A terminated session is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Terminated || state.player.is_none() {
        return;
    }

    state.time_ticks += 1;
    state.time_secs += f64::from(dt);

    if input.activate {
        activate(state);
    }

    // Black holes sweep from session start, before the first tap too
    let width = state.settings.scene_width;
    let leg = state.settings.hazard_leg_duration;
    for hazard in &mut state.hazards {
        hazard.pos.x = hazard.motion.advance(dt, width, leg);
    }

    if state.phase == GamePhase::Running {
        let settings = &state.settings;
        if let Some(player) = state.player.as_mut() {
            physics::apply_lateral_control(player, input.tilt, settings.tilt_gain);
            physics::integrate(player, settings.gravity, dt);
            physics::wrap_horizontal(player, settings.scene_width);
        }
        collision::resolve_all(state);
    }

    let now = state.time_secs;
    if let Some(player) = state.player.as_mut() {
        player.exhaust.expire(now);
    }

    update_frame(state);
}

/// Handle a tap.
///
/// The first tap starts the session; every tap (the first included) spends one
/// impulse if any remain. Returns true if an impulse was applied.
pub fn activate(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Terminated => return false,
        GamePhase::PreStart => {
            state.phase = GamePhase::Running;
            if let Some(player) = state.player.as_mut() {
                player.is_active = true;
            }
            state.events.push(GameEvent::SessionStarted);
            log::info!("Session started");
        }
        GamePhase::Running => {}
    }

    if !state.ledger.try_consume_impulse() {
        return false;
    }

    let now = state.time_secs;
    let boost = state.settings.impulse_velocity;
    let exhaust = state.settings.exhaust_duration;
    if let Some(player) = state.player.as_mut() {
        player.vel.y += boost;
        player.exhaust.arm(now, exhaust);
    }
    state.refresh_hud();
    true
}

/// Camera tracking inside the scroll band, terminal checks outside it, then
/// garbage collection.
pub fn update_frame(state: &mut GameState) {
    let Some(player) = state.player.as_ref() else {
        return;
    };
    let y = player.pos.y;
    let height = player.size.y;

    if in_scroll_band(y, &state.settings) {
        state.camera.track(y, &state.settings);
    } else if y >= state.settings.win_altitude {
        terminate(state, SessionOutcome::Win);
    } else if y + height <= 0.0 {
        terminate(state, SessionOutcome::Loss);
    }

    collect_garbage(state);
}

/// Drop black holes and orbs that fell more than a screen below the player
pub fn collect_garbage(state: &mut GameState) {
    let Some(player_y) = state.player.as_ref().map(|p| p.pos.y) else {
        return;
    };
    let limit = state.settings.scene_height;
    let before = state.hazards.len() + state.pickups.len();

    state.hazards.retain(|h| player_y - h.pos.y <= limit);
    state.pickups.retain(|p| player_y - p.pos.y <= limit);

    let removed = before - state.hazards.len() - state.pickups.len();
    if removed > 0 {
        log::debug!("Collected {removed} off-screen entities");
    }
}

/// End the session: remove the player, freeze the loop and record the result.
///
/// Only the first call has any effect.
pub fn terminate(state: &mut GameState, outcome: SessionOutcome) -> Option<SessionResult> {
    if state.result.is_some() || state.phase == GamePhase::Terminated {
        return None;
    }

    let result = SessionResult {
        outcome,
        score: state.ledger.score(),
    };
    state.player = None;
    state.phase = GamePhase::Terminated;
    state.result = Some(result);
    state.events.push(GameEvent::SessionEnded(result));

    log::info!("Session over: {:?} with score {}", outcome, result.score);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::collision::{Contact, resolve_contact};
    use crate::sim::state::EntityKind;
    use crate::sim::world::{Placement, WorldLayout};
    use glam::Vec2;

    fn layout() -> WorldLayout {
        WorldLayout {
            hazards: vec![Placement { x: 160.0, y: 2000.0 }],
            pickups: vec![
                Placement { x: 20.0, y: 1000.0 },
                Placement { x: 300.0, y: 1500.0 },
            ],
        }
    }

    fn new_state() -> GameState {
        GameState::new(Settings::default(), &layout()).unwrap()
    }

    fn tap() -> TickInput {
        TickInput {
            activate: true,
            ..Default::default()
        }
    }

    fn player(state: &GameState) -> &crate::sim::state::PlayerBody {
        state.player.as_ref().unwrap()
    }

    #[test]
    fn test_prestart_is_inert() {
        let mut state = new_state();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::PreStart);
        assert_eq!(player(&state).pos, Vec2::new(160.0, 220.0));
        // Black holes already sweeping
        assert!(state.hazards[0].pos.x < 160.0);
    }

    #[test]
    fn test_first_tap_starts_and_boosts() {
        let mut state = new_state();
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(player(&state).is_active);
        assert!(player(&state).vel.y > 0.0);
        assert_eq!(state.ledger.impulse_count(), 3);
        assert!(player(&state).exhaust.is_visible());
        assert!(state.drain_events().contains(&GameEvent::SessionStarted));
    }

    #[test]
    fn test_impulses_run_out() {
        let mut state = new_state();
        for _ in 0..4 {
            assert!(activate(&mut state));
        }
        assert_eq!(state.ledger.impulse_count(), 0);

        let vel = player(&state).vel;
        assert!(!activate(&mut state));
        assert_eq!(player(&state).vel, vel);
        assert_eq!(state.ledger.impulse_count(), 0);
    }

    #[test]
    fn test_exhaust_hides_after_delay() {
        let mut state = new_state();
        tick(&mut state, &tap(), 0.1);
        tick(&mut state, &TickInput::default(), 0.3);
        assert!(player(&state).exhaust.is_visible());

        // A second tap re-arms instead of stacking
        tick(&mut state, &tap(), 0.3);
        tick(&mut state, &TickInput::default(), 0.3);
        assert!(player(&state).exhaust.is_visible());
        tick(&mut state, &TickInput::default(), 0.3);
        assert!(!player(&state).exhaust.is_visible());
    }

    #[test]
    fn test_tilt_ignored_before_first_tap() {
        let mut state = new_state();
        let input = TickInput {
            activate: false,
            tilt: 1.0,
        };
        for _ in 0..30 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::PreStart);
        assert_eq!(player(&state).pos, Vec2::new(160.0, 220.0));
        assert_eq!(player(&state).vel, Vec2::ZERO);
    }

    #[test]
    fn test_tilt_drives_lateral_velocity() {
        let mut state = new_state();
        tick(&mut state, &tap(), SIM_DT);
        let input = TickInput {
            activate: false,
            tilt: 0.5,
        };
        let x = player(&state).pos.x;
        tick(&mut state, &input, SIM_DT);
        assert_eq!(player(&state).vel.x, 190.0);
        assert!(player(&state).pos.x > x);
    }

    #[test]
    fn test_wraps_during_tick() {
        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            p.pos.x = -19.0;
        }
        let input = TickInput {
            activate: false,
            tilt: -1.0,
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(player(&state).pos.x, 300.0);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 900.0;
            p.vel = Vec2::ZERO;
        }
        update_frame(&mut state);
        assert!((state.camera.offsets.foreground.y - -720.0).abs() < 1e-3);
        assert!((state.camera.offsets.stars.y - -120.0).abs() < 1e-3);
    }

    #[test]
    fn test_win_at_altitude() {
        let mut state = new_state();
        activate(&mut state);
        state.ledger.collect_pickup();
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 7000.0;
        }
        update_frame(&mut state);
        assert_eq!(state.phase, GamePhase::Terminated);
        assert!(state.player.is_none());
        assert_eq!(
            state.result,
            Some(SessionResult {
                outcome: SessionOutcome::Win,
                score: 1
            })
        );
    }

    #[test]
    fn test_no_terminal_between_ceiling_and_win() {
        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 6999.0;
        }
        update_frame(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_loss_below_floor() {
        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            p.pos.y = -p.size.y;
        }
        update_frame(&mut state);
        assert_eq!(state.result.map(|r| r.outcome), Some(SessionOutcome::Loss));

        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            p.pos.y = -p.size.y + 1.0;
        }
        update_frame(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_terminate_once() {
        let mut state = new_state();
        activate(&mut state);
        assert!(terminate(&mut state, SessionOutcome::Loss).is_some());
        assert!(terminate(&mut state, SessionOutcome::Win).is_none());
        assert_eq!(state.result.map(|r| r.outcome), Some(SessionOutcome::Loss));

        let ended = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded(_)))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_terminated_session_is_frozen() {
        let mut state = new_state();
        activate(&mut state);
        terminate(&mut state, SessionOutcome::Loss);
        let ticks = state.time_ticks;
        let ledger = state.ledger;
        let camera = state.camera;

        tick(&mut state, &tap(), SIM_DT);
        assert!(!activate(&mut state));
        update_frame(&mut state);

        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.ledger, ledger);
        assert_eq!(state.camera, camera);
    }

    #[test]
    fn test_garbage_collection() {
        let mut state = new_state();
        activate(&mut state);
        if let Some(p) = state.player.as_mut() {
            // Orb at y=1000 is a full screen below, orb at 1500 is not
            p.pos.y = 2000.0;
        }
        collect_garbage(&mut state);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos.y, 1500.0);
        assert_eq!(state.hazards.len(), 1);

        // Exactly one screen below is still kept
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 2568.0;
        }
        collect_garbage(&mut state);
        assert_eq!(state.hazards.len(), 1);

        if let Some(p) = state.player.as_mut() {
            p.pos.y = 2569.0;
        }
        collect_garbage(&mut state);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_collected_pickup_gone_from_contacts() {
        let mut state = new_state();
        activate(&mut state);
        let orb = state.pickups[0].pos;
        if let Some(p) = state.player.as_mut() {
            p.pos = orb;
            p.vel = Vec2::ZERO;
        }
        collision::resolve_all(&mut state);
        assert_eq!(state.ledger.score(), 1);
        assert!(collision::detect_contacts(&state).is_empty());
    }

    #[test]
    fn test_hazard_then_fall_to_loss() {
        let mut state = GameState::new(
            Settings {
                starting_impulses: 4,
                ..Default::default()
            },
            &layout(),
        )
        .unwrap();
        activate(&mut state);
        assert_eq!(state.ledger.impulse_count(), 3);

        let hazard = Contact {
            id: state.hazards[0].id,
            kind: EntityKind::Hazard,
        };
        assert!(resolve_contact(&mut state, hazard));
        assert_eq!(state.ledger.impulse_count(), 0);

        let vel = player(&state).vel;
        assert!(!activate(&mut state));
        assert_eq!(player(&state).vel, vel);

        let mut steps = 0;
        while !state.is_terminated() && steps < 60 * 60 {
            tick(&mut state, &tap(), SIM_DT);
            steps += 1;
        }
        assert_eq!(state.result.map(|r| r.outcome), Some(SessionOutcome::Loss));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ledger_and_hud_agree_under_any_interleaving(
            ops in prop::collection::vec(0u8..3, 0..48),
        ) {
            let mut state = new_state();
            let mut last_score = 0;
            for op in ops {
                match op {
                    0 => {
                        activate(&mut state);
                    }
                    1 => {
                        if let Some(id) = state.pickups.first().map(|p| p.id) {
                            resolve_contact(&mut state, Contact { id, kind: EntityKind::Pickup });
                        }
                    }
                    _ => {
                        let id = state.hazards[0].id;
                        resolve_contact(&mut state, Contact { id, kind: EntityKind::Hazard });
                    }
                }
                prop_assert!(state.ledger.score() >= last_score);
                last_score = state.ledger.score();
                prop_assert_eq!(&state.hud.impulses, &state.ledger.impulse_label());
                prop_assert_eq!(&state.hud.score, &state.ledger.score_label());
            }
        }
    }
}
