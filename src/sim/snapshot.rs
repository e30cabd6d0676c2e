//! Read-only view of the scene for a renderer
//!
//! Entity positions are in world coordinates; apply `layers.foreground` to
//! place them on screen. The player also carries its screen position.

use glam::Vec2;
use serde::Serialize;

use super::camera::LayerOffsets;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    /// Position after the foreground scroll
    pub screen_pos: Vec2,
    pub size: Vec2,
    pub exhaust_visible: bool,
    /// Red blend factor in [0, 1]
    pub tint: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub layers: LayerOffsets,
    pub hazards: Vec<Vec2>,
    pub pickups: Vec<Vec2>,
    pub score_text: String,
    pub impulse_text: String,
}

impl SceneSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.time_secs;
        Self {
            phase: state.phase,
            player: state.player.as_ref().map(|p| PlayerView {
                pos: p.pos,
                screen_pos: state.camera.to_screen(p.pos),
                size: p.size,
                exhaust_visible: p.exhaust.is_visible(),
                tint: p.tint.map_or(0.0, |t| t.blend(now)),
            }),
            layers: state.camera.offsets,
            hazards: state.hazards.iter().map(|h| h.pos).collect(),
            pickups: state.pickups.iter().map(|p| p.pos).collect(),
            score_text: state.hud.score.clone(),
            impulse_text: state.hud.impulses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::{Contact, resolve_contact};
    use crate::sim::state::EntityKind;
    use crate::sim::tick::activate;
    use crate::sim::world::{Placement, WorldLayout};

    #[test]
    fn test_capture_reflects_damage_tint() {
        let layout = WorldLayout {
            hazards: vec![Placement { x: 10.0, y: 900.0 }],
            pickups: vec![Placement { x: 10.0, y: 400.0 }],
        };
        let mut state = GameState::new(Settings::default(), &layout).unwrap();
        activate(&mut state);
        let hazard = Contact {
            id: state.hazards[0].id,
            kind: EntityKind::Hazard,
        };
        resolve_contact(&mut state, hazard);
        state.time_secs += 0.25;

        let snap = SceneSnapshot::capture(&state);
        let player = snap.player.unwrap();
        assert!(player.exhaust_visible);
        assert!((player.tint - 0.25).abs() < 1e-6);
        assert_eq!(snap.hazards.len(), 1);
        assert_eq!(snap.impulse_text, "IMPULSES : 0");
    }

    #[test]
    fn test_player_screen_position_follows_scroll() {
        let layout = WorldLayout {
            hazards: vec![Placement { x: 10.0, y: 3000.0 }],
            pickups: vec![Placement { x: 10.0, y: 400.0 }],
        };
        let mut state = GameState::new(Settings::default(), &layout).unwrap();
        if let Some(p) = state.player.as_mut() {
            p.pos.y = 900.0;
        }
        state.camera.track(900.0, &state.settings);

        let player = SceneSnapshot::capture(&state).player.unwrap();
        assert_eq!(player.pos.y, 900.0);
        assert!((player.screen_pos.y - 180.0).abs() < 1e-3);
        assert_eq!(player.screen_pos.x, player.pos.x);
    }
}
