//! Super Space Man headless runner
//!
//! Plays one session with a simple autopilot and prints the result.
//!
//! Usage: `super-spaceman [SETTINGS.json] [LAYOUT.json]`
//! Without a layout file a seeded layout is generated.

use std::error::Error;

use super_spaceman::error::SensorError;
use super_spaceman::sim::{
    GameState, SessionResult, SoundCue, TiltCell, TiltSensor, WorldLayout, layout,
};
use super_spaceman::{Session, SessionSink, Settings};

const LAYOUT_SEED: u64 = 0x5EED;
/// Give up after this many simulated seconds
const MAX_SECONDS: f32 = 300.0;

/// Tilt source driven by the autopilot instead of an accelerometer
#[derive(Default)]
struct AutopilotTilt {
    cell: Option<TiltCell>,
}

impl AutopilotTilt {
    fn steer(&self, value: f32) {
        if let Some(cell) = &self.cell {
            cell.store(value.clamp(-1.0, 1.0));
        }
    }
}

impl TiltSensor for AutopilotTilt {
    fn start(&mut self, cell: TiltCell, _interval: f32) -> Result<(), SensorError> {
        self.cell = Some(cell);
        Ok(())
    }
}

#[derive(Default)]
struct ConsoleSink {
    result: Option<SessionResult>,
}

impl SessionSink for ConsoleSink {
    fn play_sound(&mut self, cue: SoundCue) {
        log::debug!("sound: {cue:?}");
    }

    fn hud_changed(&mut self, score: &str, impulses: &str) {
        log::info!("{impulses}    {score}");
    }

    fn session_ended(&mut self, result: SessionResult) {
        self.result = Some(result);
    }
}

/// Tilt toward the nearest orb above the player
fn autopilot_tilt(state: &GameState) -> f32 {
    let Some(player) = state.player.as_ref() else {
        return 0.0;
    };
    state
        .pickups
        .iter()
        .filter(|p| p.pos.y > player.pos.y)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map_or(0.0, |p| (p.pos.x - player.pos.x) / 100.0)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Super Space Man (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let world = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            WorldLayout::from_json(&json)?
        }
        None => layout::generate(LAYOUT_SEED, &settings),
    };

    let dt = super_spaceman::consts::SIM_DT;
    let tilt_every = (settings.tilt_update_interval / dt).round().max(1.0) as u64;
    let mut session = Session::new(settings, &world, AutopilotTilt::default())?;
    let tilt = session.tilt_cell();
    let autopilot = AutopilotTilt { cell: Some(tilt) };
    let mut sink = ConsoleSink::default();

    let mut frame: u64 = 0;
    while !session.is_finished() && (frame as f32) * dt < MAX_SECONDS {
        let state = session.state();
        let falling = state.player.as_ref().is_some_and(|p| p.vel.y < 0.0);
        if frame == 0 || (falling && state.ledger.impulse_count() > 0) {
            session.tap();
        }
        if frame % tilt_every == 0 {
            autopilot.steer(autopilot_tilt(session.state()));
        }
        session.update(dt, &mut sink);
        frame += 1;
    }

    match sink.result {
        Some(result) => println!("{:?} with score {}", result.outcome, result.score),
        None => println!("Session still running after {MAX_SECONDS} s"),
    }
    Ok(())
}
