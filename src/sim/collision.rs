//! Contact detection and response
//!
//! Detection treats every body as a circle and reports which non-player bodies
//! overlap the player this step. Response is the game policy: orbs pay out and
//! vanish, black holes doom the player.

use glam::Vec2;

use super::state::{
    ContactMask, DamageTint, EntityKind, GameEvent, GamePhase, GameState, SoundCue,
};

/// The non-player side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub id: u32,
    pub kind: EntityKind,
}

/// Circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Collect contacts the player's mask still reacts to, black holes first
pub fn detect_contacts(state: &GameState) -> Vec<Contact> {
    let Some(player) = state.player.as_ref() else {
        return Vec::new();
    };
    let mask = player.contact_mask;
    let radius = player.contact_radius();
    let mut contacts = Vec::new();

    if mask.accepts(EntityKind::Hazard) {
        contacts.extend(
            state
                .hazards
                .iter()
                .filter(|h| {
                    circles_overlap(player.pos, radius, h.pos, state.settings.hazard_radius)
                })
                .map(|h| Contact {
                    id: h.id,
                    kind: EntityKind::Hazard,
                }),
        );
    }

    if mask.accepts(EntityKind::Pickup) {
        contacts.extend(
            state
                .pickups
                .iter()
                .filter(|p| {
                    circles_overlap(player.pos, radius, p.pos, state.settings.pickup_radius)
                })
                .map(|p| Contact {
                    id: p.id,
                    kind: EntityKind::Pickup,
                }),
        );
    }

    contacts
}

/// Apply the effect of one contact. Returns true if anything changed.
///
/// Safe to call with stale contacts: a consumed orb, a collected black hole,
/// a masked kind, or a terminated session are all no-ops.
pub fn resolve_contact(state: &mut GameState, contact: Contact) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    let accepts = state
        .player
        .as_ref()
        .is_some_and(|p| p.contact_mask.accepts(contact.kind));
    if !accepts {
        return false;
    }

    match contact.kind {
        EntityKind::Pickup => collect_pickup(state, contact.id),
        EntityKind::Hazard => strike_hazard(state, contact.id),
    }
}

fn collect_pickup(state: &mut GameState, id: u32) -> bool {
    let Some(index) = state.pickups.iter().position(|p| p.id == id) else {
        return false;
    };
    state.pickups.remove(index);

    state.events.push(GameEvent::PlaySound(SoundCue::OrbPop));
    state.ledger.collect_pickup();
    state.refresh_hud();

    log::debug!(
        "Orb {id} collected: score {}, impulses {}",
        state.ledger.score(),
        state.ledger.impulse_count()
    );
    true
}

fn strike_hazard(state: &mut GameState, id: u32) -> bool {
    if !state.hazards.iter().any(|h| h.id == id) {
        return false;
    }
    let now = state.time_secs;
    let mask = if state.settings.doomed_player_collects_pickups {
        ContactMask::PICKUPS_ONLY
    } else {
        ContactMask::NONE
    };
    let tint_duration = state.settings.damage_tint_duration;

    let Some(player) = state.player.as_mut() else {
        return false;
    };
    player.contact_mask = mask;
    player.is_alive = false;
    player.tint = Some(DamageTint {
        started_at: now,
        duration: tint_duration,
    });

    state.ledger.strip_impulses();
    state.refresh_hud();

    log::debug!("Black hole {id} struck at y = {:.1}", player_y(state));
    true
}

fn player_y(state: &GameState) -> f32 {
    state.player.as_ref().map_or(0.0, |p| p.pos.y)
}

/// Detect and resolve every contact for this step
pub fn resolve_all(state: &mut GameState) {
    for contact in detect_contacts(state) {
        resolve_contact(state, contact);
    }
}
