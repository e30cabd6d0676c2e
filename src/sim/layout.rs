//! Seeded placement data
//!
//! Produces a `WorldLayout` procedurally for hosts that ship no placement
//! files. Same seed, same layout.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::{Placement, WorldLayout};
use crate::settings::Settings;

/// Vertical gap between consecutive orbs
const ORB_SPACING: f32 = 140.0;
/// Vertical gap between consecutive black holes
const BLACK_HOLE_SPACING: f32 = 600.0;
/// First orb altitude
const FIRST_ORB_Y: f32 = 500.0;
/// First black hole altitude
const FIRST_BLACK_HOLE_Y: f32 = 1000.0;

/// Generate a layout reaching up to the win altitude
pub fn generate(seed: u64, settings: &Settings) -> WorldLayout {
    let mut rng = Pcg32::seed_from_u64(seed);
    let width = settings.scene_width;
    let margin = settings.pickup_radius.min(width / 4.0);
    let top = settings.win_altitude - settings.scene_height / 2.0;

    // Orbs zig-zag upward so a steady tilt can chain them
    let mut pickups = Vec::new();
    let mut y = FIRST_ORB_Y;
    let mut x = width / 2.0;
    while y < top {
        let drift: f32 = rng.random_range(-0.35f32..0.35) * width;
        x = (x + drift).clamp(margin, width - margin);
        pickups.push(Placement { x, y });
        y += ORB_SPACING * rng.random_range(0.8f32..1.2);
    }

    let mut hazards = Vec::new();
    let mut y = FIRST_BLACK_HOLE_Y;
    while y < top {
        let x = rng.random_range(0.0f32..width);
        hazards.push(Placement { x, y });
        y += BLACK_HOLE_SPACING * rng.random_range(0.75f32..1.25);
    }

    log::debug!(
        "Generated layout (seed {seed}): {} black holes, {} orbs",
        hazards.len(),
        pickups.len()
    );
    WorldLayout { hazards, pickups }
}
