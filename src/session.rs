//! Session driver
//!
//! Owns the game state, feeds it fixed-size steps from variable frame times,
//! starts the tilt sensor on the first tap and forwards core events to the
//! host's audio, HUD and next-screen collaborators.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigurationError;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GameState, SceneSnapshot, SessionResult, SoundCue, TickInput, TiltCell,
    TiltSensor, WorldLayout, tick,
};

/// Host side of the boundary
pub trait SessionSink {
    fn play_sound(&mut self, _cue: SoundCue) {}

    fn hud_changed(&mut self, _score: &str, _impulses: &str) {}

    /// Called exactly once, when the session ends
    fn session_ended(&mut self, result: SessionResult);
}

pub struct Session<S: TiltSensor> {
    state: GameState,
    tilt: TiltCell,
    sensor: S,
    sensor_running: bool,
    accumulator: f32,
    pending_taps: u32,
}

impl<S: TiltSensor> Session<S> {
    pub fn new(
        settings: Settings,
        layout: &WorldLayout,
        sensor: S,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            state: GameState::new(settings, layout)?,
            tilt: TiltCell::new(),
            sensor,
            sensor_running: false,
            accumulator: 0.0,
            pending_taps: 0,
        })
    }

    /// Queue an activation tap for the next step
    pub fn tap(&mut self) {
        if !self.state.is_terminated() {
            self.pending_taps += 1;
        }
    }

    /// Handle for input callbacks that deliver tilt readings
    pub fn tilt_cell(&self) -> TiltCell {
        self.tilt.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.state)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminated()
    }

    /// Run simulation steps for `frame_dt` seconds of real time
    pub fn update(&mut self, frame_dt: f32, sink: &mut impl SessionSink) {
        if self.state.is_terminated() {
            return;
        }
        // Non-finite frame times (clock glitches) count as no time passing
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                activate: self.pending_taps > 0,
                tilt: self.tilt.load(),
            };
            self.pending_taps = self.pending_taps.saturating_sub(1);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.dispatch(sink);
            if self.state.is_terminated() {
                self.accumulator = 0.0;
                self.pending_taps = 0;
                self.stop_sensor();
                break;
            }
        }
    }

    fn dispatch(&mut self, sink: &mut impl SessionSink) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SessionStarted => self.start_sensor(),
                GameEvent::PlaySound(cue) => sink.play_sound(cue),
                GameEvent::HudChanged => {
                    sink.hud_changed(&self.state.hud.score, &self.state.hud.impulses)
                }
                GameEvent::SessionEnded(result) => sink.session_ended(result),
            }
        }
    }

    fn start_sensor(&mut self) {
        let interval = self.state.settings.tilt_update_interval;
        match self.sensor.start(self.tilt.clone(), interval) {
            Ok(()) => {
                self.sensor_running = true;
                log::info!("Tilt sensor started ({interval}s interval)");
            }
            Err(e) => log::warn!("{e}; lateral control stays at its last value"),
        }
    }

    fn stop_sensor(&mut self) {
        if self.sensor_running {
            self.sensor.stop();
            self.sensor_running = false;
        }
    }
}

impl<S: TiltSensor> Drop for Session<S> {
    fn drop(&mut self) {
        self.stop_sensor();
    }
}
