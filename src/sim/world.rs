//! World generation from placement data
//!
//! Placements are positions only. One black hole or orb is created per entry,
//! in list order, with no randomization at this layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::SweepMotion;
use super::state::{GameState, Hazard, Pickup};
use crate::error::ConfigurationError;

/// A single entity position in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}

impl From<Placement> for Vec2 {
    fn from(p: Placement) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// One placement file: `{"positions": [{"x": .., "y": ..}, ..]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementList {
    pub positions: Vec<Placement>,
}

impl PlacementList {
    pub fn from_json(json: &str, list: &'static str) -> Result<Self, ConfigurationError> {
        let parsed: PlacementList = serde_json::from_str(json)
            .map_err(|source| ConfigurationError::Parse { what: list, source })?;
        validate_list(&parsed.positions, list)?;
        Ok(parsed)
    }
}

/// Both placement sequences for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub hazards: Vec<Placement>,
    pub pickups: Vec<Placement>,
}

impl WorldLayout {
    /// Parse a combined `{"hazards": [..], "pickups": [..]}` document
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let layout: WorldLayout = serde_json::from_str(json).map_err(|source| {
            ConfigurationError::Parse {
                what: "world layout",
                source,
            }
        })?;
        layout.validate()?;
        Ok(layout)
    }

    /// Combine two separate placement files
    pub fn from_lists(
        hazards_json: &str,
        pickups_json: &str,
    ) -> Result<Self, ConfigurationError> {
        let hazards = PlacementList::from_json(hazards_json, "hazards")?;
        let pickups = PlacementList::from_json(pickups_json, "pickups")?;
        Ok(Self {
            hazards: hazards.positions,
            pickups: pickups.positions,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_list(&self.hazards, "hazards")?;
        validate_list(&self.pickups, "pickups")
    }
}

fn validate_list(positions: &[Placement], list: &'static str) -> Result<(), ConfigurationError> {
    if positions.is_empty() {
        return Err(ConfigurationError::EmptyPlacements { list });
    }
    if let Some(index) = positions
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(ConfigurationError::NonFiniteCoordinate { list, index });
    }
    Ok(())
}

/// Instantiate black holes and orbs on the foreground layer
pub fn populate(state: &mut GameState, layout: &WorldLayout) {
    for placement in &layout.hazards {
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: (*placement).into(),
            motion: SweepMotion::new(placement.x),
        });
    }

    for placement in &layout.pickups {
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            pos: (*placement).into(),
        });
    }
}
