//! Vertical scrolling with parallax
//!
//! Each layer offset is a pure function of the player's altitude while the
//! player is inside the scroll band. Outside the band the last offsets hold.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Offsets applied to each scene layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerOffsets {
    pub background: Vec2,
    pub stars: Vec2,
    pub planet: Vec2,
    /// Gameplay layer holding the player, black holes and orbs
    pub foreground: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub offsets: LayerOffsets,
}

/// Offset of a layer scrolling at `1 / divisor` of the player's climb
#[inline]
pub fn parallax_offset(player_y: f32, baseline: f32, divisor: f32) -> f32 {
    -(player_y - baseline) / divisor
}

/// Whether the camera follows the player at this altitude
#[inline]
pub fn in_scroll_band(player_y: f32, settings: &Settings) -> bool {
    player_y >= settings.scroll_baseline && player_y < settings.scroll_ceiling
}

impl ScrollState {
    /// Recompute vertical offsets from the player's altitude.
    ///
    /// Horizontal offsets are never touched.
    pub fn track(&mut self, player_y: f32, settings: &Settings) {
        let base = settings.scroll_baseline;
        let o = &mut self.offsets;
        o.background.y = parallax_offset(player_y, base, settings.background_parallax);
        o.stars.y = parallax_offset(player_y, base, settings.stars_parallax);
        o.planet.y = parallax_offset(player_y, base, settings.planet_parallax);
        o.foreground.y = parallax_offset(player_y, base, 1.0);
    }

    /// Convert a foreground world position to screen space
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world + self.offsets.foreground
    }
}
