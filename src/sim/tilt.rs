//! Lateral tilt input
//!
//! The sensor callback writes from its own thread; the game loop reads once per
//! step. A single f32 in an atomic is enough, last write wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::SensorError;

/// Shared single-slot tilt value, roughly in [-1, 1]
#[derive(Debug, Clone, Default)]
pub struct TiltCell {
    bits: Arc<AtomicU32>,
}

impl TiltCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// A source of periodic tilt readings
pub trait TiltSensor {
    /// Begin delivering readings into `cell` every `interval` seconds
    fn start(&mut self, cell: TiltCell, interval: f32) -> Result<(), SensorError>;

    fn stop(&mut self) {}
}

/// Sensor for hosts without an accelerometer
#[derive(Debug, Default)]
pub struct NoTiltSensor;

impl TiltSensor for NoTiltSensor {
    fn start(&mut self, _cell: TiltCell, _interval: f32) -> Result<(), SensorError> {
        Err(SensorError::Unavailable)
    }
}
