//! Headless demo runner — drives the session engine at the frame rate
//! with a scripted auto-aim player and emits snapshots as JSON lines.
//!
//! Usage: `duckhunt [levels.json]`. Without an argument the built-in
//! level progression is used. Malformed level data aborts before the
//! session starts.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use duckhunt_core::commands::PlayerCommand;
use duckhunt_core::constants::TICK_RATE;
use duckhunt_core::enums::GamePhase;
use duckhunt_core::level::LevelSet;
use duckhunt_core::state::GameStateSnapshot;
use duckhunt_sim::engine::{SessionEngine, SimConfig};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// The scripted player pulls the trigger at most this often.
const SHOT_INTERVAL_TICKS: u64 = 30;

fn main() -> io::Result<()> {
    let levels = match std::env::args().nth(1) {
        Some(path) => {
            let data = std::fs::read_to_string(&path)?;
            LevelSet::from_json(&data)?
        }
        None => LevelSet::normal(),
    };

    let mut engine = SessionEngine::with_levels(SimConfig::default(), levels);
    engine.queue_command(PlayerCommand::StartGame);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last_emitted = String::new();
    let mut last_shot_tick = 0u64;
    let mut next_tick_time = Instant::now();

    loop {
        // The auto-aim player: fire at the first duck it can see.
        if engine.phase() == GamePhase::Active {
            let tick = engine.time().tick;
            if tick.saturating_sub(last_shot_tick) >= SHOT_INTERVAL_TICKS {
                if let Some(target) = first_live_duck(&engine) {
                    engine.queue_command(PlayerCommand::Fire {
                        x: target.0,
                        y: target.1,
                    });
                    last_shot_tick = tick;
                }
            }
        }

        let snapshot = engine.tick();
        emit_if_changed(&mut out, &snapshot, &mut last_emitted)?;

        if matches!(engine.phase(), GamePhase::Won | GamePhase::Lost) {
            break;
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        }
    }

    Ok(())
}

/// World position of the first live duck, if any.
fn first_live_duck(engine: &SessionEngine) -> Option<(f64, f64)> {
    use duckhunt_core::components::Duck;
    use duckhunt_core::types::Position;

    engine
        .world()
        .query::<(&Position, &Duck)>()
        .iter()
        .find(|(_, (_, duck))| duck.alive)
        .map(|(_, (pos, _))| (pos.x, pos.y))
}

/// Print one JSON line whenever the HUD-level state changes (duck
/// positions churn every tick and are not worth logging). Ticks that
/// carry audio cues always emit; cues are one-shot.
fn emit_if_changed(
    out: &mut impl Write,
    snapshot: &GameStateSnapshot,
    last_key: &mut String,
) -> io::Result<()> {
    let key = serde_json::to_string(&(
        snapshot.phase,
        snapshot.wave_phase,
        snapshot.sky,
        &snapshot.hud,
        snapshot.shots_remaining,
    ))?;
    if !snapshot.audio_events.is_empty() || key != *last_key {
        let line = serde_json::to_string(snapshot)?;
        writeln!(out, "{line}")?;
        *last_key = key;
    }
    Ok(())
}
