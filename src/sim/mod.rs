//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Step size supplied by the caller, no wall clock
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod layout;
pub mod ledger;
pub mod motion;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tilt;
pub mod world;

pub use camera::{LayerOffsets, ScrollState};
pub use collision::{Contact, detect_contacts, resolve_contact};
pub use ledger::Ledger;
pub use motion::{SweepLeg, SweepMotion};
pub use snapshot::SceneSnapshot;
pub use state::{
    ContactMask, EntityKind, GameEvent, GamePhase, GameState, Hazard, Pickup, PlayerBody,
    SessionOutcome, SessionResult, SoundCue,
};
pub use tick::{TickInput, activate, terminate, tick};
pub use tilt::{NoTiltSensor, TiltCell, TiltSensor};
pub use world::{Placement, PlacementList, WorldLayout};
