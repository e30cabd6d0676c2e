//! Player body integration, lateral control and horizontal wrap
//!
//! Stands in for the host rigid-body step: gravity plus semi-implicit Euler.
//! Impulses are applied to velocity directly by the tap handler.

use super::state::PlayerBody;

/// Overwrite horizontal velocity from the tilt reading; vertical is left alone
#[inline]
pub fn apply_lateral_control(player: &mut PlayerBody, tilt: f32, gain: f32) {
    player.vel.x = tilt * gain;
}

/// Advance the body by `dt`. Inactive bodies do not move.
pub fn integrate(player: &mut PlayerBody, gravity: f32, dt: f32) {
    if !player.is_active {
        return;
    }
    player.vel.y += gravity * dt;
    player.pos += player.vel * dt;
}

/// Wrap the body across the left/right scene edges, preserving y
pub fn wrap_horizontal(player: &mut PlayerBody, scene_width: f32) {
    let half = player.half_width();
    if player.pos.x < -half {
        player.pos.x = scene_width - half;
    } else if player.pos.x > scene_width {
        player.pos.x = half;
    }
}
