//! Game state and core simulation types
//!
//! Everything the per-frame loop reads or writes lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::ScrollState;
use super::ledger::Ledger;
use super::motion::SweepMotion;
use super::world::{self, WorldLayout};
use crate::error::ConfigurationError;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player inert, waiting for the first tap
    PreStart,
    /// Player dynamic, physics active
    Running,
    /// Result produced, loop inert
    Terminated,
}

/// Type tag carried by every non-player body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Black hole
    Hazard,
    /// Power-up orb
    Pickup,
}

/// Which entity kinds the player still reacts to on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMask {
    pub hazards: bool,
    pub pickups: bool,
}

impl ContactMask {
    pub const ALL: Self = Self {
        hazards: true,
        pickups: true,
    };
    pub const NONE: Self = Self {
        hazards: false,
        pickups: false,
    };
    pub const PICKUPS_ONLY: Self = Self {
        hazards: false,
        pickups: true,
    };

    #[inline]
    pub fn accepts(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Hazard => self.hazards,
            EntityKind::Pickup => self.pickups,
        }
    }
}

/// A visibility flag that switches itself off at a deadline.
///
/// Re-arming replaces the deadline; pending expiries never stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedCue {
    expires_at: Option<f64>,
}

impl TimedCue {
    pub fn arm(&mut self, now: f64, duration: f32) {
        self.expires_at = Some(now + f64::from(duration));
    }

    /// Drop the flag once `now` has reached the deadline
    pub fn expire(&mut self, now: f64) {
        if self.expires_at.is_some_and(|t| now >= t) {
            self.expires_at = None;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.expires_at.is_some()
    }
}

/// Red colorize applied once the player strikes a black hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageTint {
    pub started_at: f64,
    pub duration: f32,
}

impl DamageTint {
    /// Blend factor in [0, 1]; holds at 1 once the fade completes
    pub fn blend(&self, now: f64) -> f32 {
        let t = (now - self.started_at) / f64::from(self.duration);
        t.clamp(0.0, 1.0) as f32
    }
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Center position in world coordinates
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// False until the first tap; an inactive body ignores gravity
    pub is_active: bool,
    /// False once a black hole has been struck
    pub is_alive: bool,
    pub contact_mask: ContactMask,
    /// Engine exhaust shown after each impulse
    pub exhaust: TimedCue,
    pub tint: Option<DamageTint>,
}

impl PlayerBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            is_active: false,
            is_alive: true,
            contact_mask: ContactMask::ALL,
            exhaust: TimedCue::default(),
            tint: None,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Radius of the circular contact shape
    #[inline]
    pub fn contact_radius(&self) -> f32 {
        self.size.x / 2.0
    }
}

/// A black hole sweeping across the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub motion: SweepMotion,
}

/// A one-shot power-up orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Win,
    Loss,
}

/// Final outcome handed to the next screen, produced once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: SessionOutcome,
    pub score: u64,
}

/// Fire-and-forget sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Orb collected
    OrbPop,
}

/// Something the host should react to, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First tap received; start sampling tilt
    SessionStarted,
    PlaySound(SoundCue),
    /// HUD strings were recomputed
    HudChanged,
    SessionEnded(SessionResult),
}

/// HUD text derived from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: String,
    pub impulses: String,
}

impl Hud {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            score: ledger.score_label(),
            impulses: ledger.impulse_label(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Absent once the session has terminated
    pub player: Option<PlayerBody>,
    /// Sorted by id
    pub hazards: Vec<Hazard>,
    /// Sorted by id
    pub pickups: Vec<Pickup>,
    pub ledger: Ledger,
    pub hud: Hud,
    pub camera: ScrollState,
    pub result: Option<SessionResult>,
    /// Simulated seconds since session start
    pub time_secs: f64,
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh session from validated tuning and placement data
    pub fn new(settings: Settings, layout: &WorldLayout) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        layout.validate()?;

        let ledger = Ledger::new(settings.starting_impulses);
        let player = PlayerBody::new(
            Vec2::new(settings.scene_width / 2.0, settings.player_start_y),
            Vec2::new(settings.player_width, settings.player_height),
        );

        let mut state = Self {
            settings,
            phase: GamePhase::PreStart,
            player: Some(player),
            hazards: Vec::new(),
            pickups: Vec::new(),
            hud: Hud::from_ledger(&ledger),
            ledger,
            camera: ScrollState::default(),
            result: None,
            time_secs: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        world::populate(&mut state, layout);

        log::info!(
            "Session ready: {} black holes, {} orbs, {} impulses",
            state.hazards.len(),
            state.pickups.len(),
            state.ledger.impulse_count()
        );
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Recompute HUD strings; call after every ledger mutation
    pub fn refresh_hud(&mut self) {
        self.hud = Hud::from_ledger(&self.ledger);
        self.events.push(GameEvent::HudChanged);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == GamePhase::Terminated
    }
}
