//! Super Space Man - an endless-ascent arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, camera, game state)
//! - `session`: Fixed-timestep driver and host collaborator boundary
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Configuration and sensor errors

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigurationError, SensorError};
pub use session::{Session, SessionSink};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene dimensions (points)
    pub const SCENE_WIDTH: f32 = 320.0;
    pub const SCENE_HEIGHT: f32 = 568.0;

    /// Impulses available at session start
    pub const STARTING_IMPULSES: u32 = 4;
    /// Upward velocity added by one impulse (points/s)
    pub const IMPULSE_VELOCITY: f32 = 700.0;
    /// Downward acceleration (points/s²)
    pub const GRAVITY: f32 = -750.0;

    /// Lateral velocity per unit of tilt
    pub const TILT_GAIN: f32 = 380.0;
    /// Seconds between tilt sensor deliveries
    pub const TILT_UPDATE_INTERVAL: f32 = 0.3;

    /// Player body
    pub const PLAYER_START_Y: f32 = 220.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 56.0;

    /// Contact radii for the collectible orb and the black hole
    pub const PICKUP_RADIUS: f32 = 12.0;
    pub const HAZARD_RADIUS: f32 = 24.0;

    /// Camera tracks the player while y is in [SCROLL_BASELINE, SCROLL_CEILING)
    pub const SCROLL_BASELINE: f32 = 180.0;
    pub const SCROLL_CEILING: f32 = 6400.0;
    /// Reaching this altitude wins the session
    pub const WIN_ALTITUDE: f32 = 7000.0;

    /// Parallax divisors (smaller = closer to camera)
    pub const BACKGROUND_PARALLAX: f32 = 8.0;
    pub const STARS_PARALLAX: f32 = 6.0;
    pub const PLANET_PARALLAX: f32 = 8.0;

    /// Seconds per black hole sweep leg
    pub const HAZARD_LEG_DURATION: f32 = 2.0;
    /// Seconds the engine exhaust stays visible after an impulse
    pub const EXHAUST_DURATION: f32 = 0.5;
    /// Seconds for the damage tint to reach full strength
    pub const DAMAGE_TINT_DURATION: f32 = 1.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
