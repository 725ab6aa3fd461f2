//! Snapshot system: queries the world and builds a GameStateSnapshot.
//!
//! Read-only — it never modifies the world.

use hecs::World;

use duckhunt_core::components::Duck;
use duckhunt_core::enums::{GamePhase, SkyColor, WavePhase};
use duckhunt_core::events::AudioCue;
use duckhunt_core::state::{DogView, DuckView, GameStateSnapshot, HudView};
use duckhunt_core::types::{Position, SimTime};

use crate::dog::Dog;

/// Build a complete snapshot from the current session state.
#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    wave_phase: WavePhase,
    sky: SkyColor,
    hud: HudView,
    shots_remaining: u32,
    dog: &Dog,
    audio_events: Vec<AudioCue>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave_phase,
        sky,
        hud,
        shots_remaining,
        ducks: build_ducks(world),
        dog: DogView { state: dog.state() },
        audio_events,
    }
}

/// Build DuckView list in stable spawn order.
fn build_ducks(world: &World) -> Vec<DuckView> {
    let mut ducks: Vec<_> = world
        .query::<(&Position, &Duck)>()
        .iter()
        .map(|(entity, (pos, duck))| {
            (
                entity.to_bits(),
                DuckView {
                    position: *pos,
                    facing: duck.facing,
                    alive: duck.alive,
                    visible: duck.visible,
                },
            )
        })
        .collect();

    ducks.sort_by_key(|(bits, _)| *bits);
    ducks.into_iter().map(|(_, view)| view).collect()
}
