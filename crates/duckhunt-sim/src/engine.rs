//! Session engine — the core of the game.
//!
//! `SessionEngine` owns the hecs world of ducks, processes player
//! commands, advances motion, and runs the wave / level / session state
//! machine. Completely headless (no rendering or audio dependency),
//! enabling deterministic testing.
//!
//! Tick order: commands first, then motion, then wave-end evaluation —
//! so a shot resolves against positions as the player last saw them,
//! and a kill that empties the live set is observed the same tick.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use duckhunt_core::commands::PlayerCommand;
use duckhunt_core::components::{Duck, Motion, MotionIntent};
use duckhunt_core::constants::{
    ms_to_ticks, DEATH_DELAY_MS, DEATH_FALL_MS, DT, FLY_AWAY_X, FLY_AWAY_Y, HIT_RADIUS,
    SUCCESS_RATIO, WORLD_HEIGHT,
};
use duckhunt_core::enums::{Facing, GamePhase, SkyColor, WavePhase};
use duckhunt_core::events::AudioCue;
use duckhunt_core::level::{Level, LevelSet};
use duckhunt_core::state::{GameStateSnapshot, HudView};
use duckhunt_core::types::{viewport_to_world, Position, SimTime, ViewportScale};

use crate::dog::Dog;
use crate::flight;
use crate::systems;
use crate::systems::motion::Completion;
use crate::world_setup;

/// Configuration for starting a new session.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The session engine. Owns the duck world and all session state.
pub struct SessionEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    sky: SkyColor,
    rng: ChaCha8Rng,
    viewport: ViewportScale,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioCue>,
    completion_buffer: Vec<Completion>,
    despawn_buffer: Vec<hecs::Entity>,
    dog: Dog,

    // --- Session ---
    levels: Vec<Level>,
    level_index: usize,
    /// The level currently being played (clone of levels[level_index];
    /// win evaluation reads it after the index has advanced).
    level: Level,
    score: u32,
    game_status: String,

    // --- Level ---
    kills_this_level: u32,
    /// 1-based wave number; 0 when no wave is running.
    wave: u32,

    // --- Wave ---
    shots_fired: u32,
    wave_start_tick: u64,
    wave_ending: bool,
    wave_over: bool,
}

impl SessionEngine {
    /// Create an engine with the built-in level progression.
    pub fn new(config: SimConfig) -> Self {
        Self::with_levels(config, LevelSet::normal())
    }

    /// Create an engine with an already-validated level set
    /// (see `LevelSet::from_json`).
    pub fn with_levels(config: SimConfig, levels: LevelSet) -> Self {
        let level = levels.levels[0].clone();
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            sky: SkyColor::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            viewport: ViewportScale::default(),
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            completion_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            dog: Dog::default(),
            levels: levels.levels,
            level_index: 0,
            level,
            score: 0,
            game_status: String::new(),
            kills_this_level: 0,
            wave: 0,
            shots_fired: 0,
            wave_start_tick: 0,
            wave_ending: false,
            wave_over: false,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the session by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        match self.phase {
            GamePhase::LevelIntro => {
                self.time.advance();
                self.run_intro_frame();
            }
            GamePhase::Active => {
                self.time.advance();
                self.run_frame();
            }
            GamePhase::MainMenu | GamePhase::Won | GamePhase::Lost => {}
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.phase,
            self.wave_phase(),
            self.sky,
            self.hud_view(),
            self.level.bullets.saturating_sub(self.shots_fired),
            &self.dog,
            audio_events,
        )
    }

    /// Get the current session phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.reset_session();
                    self.start_level();
                }
            }
            PlayerCommand::Fire { x, y } => {
                if self.phase == GamePhase::Active {
                    self.handle_fire(Position::new(x, y));
                }
            }
            PlayerCommand::SetViewportScale { scale } => {
                if scale.x > 0.0 && scale.y > 0.0 {
                    self.viewport = scale;
                }
            }
            PlayerCommand::ReturnToMenu => {
                if matches!(self.phase, GamePhase::Won | GamePhase::Lost) {
                    self.reset_session();
                    self.phase = GamePhase::MainMenu;
                }
            }
        }
    }

    /// Wipe all per-session state back to a fresh start.
    fn reset_session(&mut self) {
        systems::cleanup::remove_all(&mut self.world, &mut self.despawn_buffer);
        self.level_index = 0;
        self.score = 0;
        self.kills_this_level = 0;
        self.wave = 0;
        self.shots_fired = 0;
        self.wave_ending = false;
        self.wave_over = false;
        self.sky = SkyColor::Blue;
        self.game_status.clear();
        self.dog.reset();
    }

    // --- Level / session flow ---

    fn start_level(&mut self) {
        self.level = self.levels[self.level_index].clone();
        self.kills_this_level = 0;
        self.wave = 0;
        self.game_status = self.level.title.clone();
        self.phase = GamePhase::LevelIntro;
        self.dog.level_intro(self.time.tick);
    }

    /// Pre-level intro: wave 1 starts once the dog has crossed the stage.
    fn run_intro_frame(&mut self) {
        self.dog.update(self.time.tick);
        if !self.dog.is_active() {
            self.game_status.clear();
            self.phase = GamePhase::Active;
            self.start_wave();
        }
    }

    fn start_wave(&mut self) {
        self.wave += 1;
        self.wave_start_tick = self.time.tick;
        self.shots_fired = 0;
        self.wave_ending = false;
        self.wave_over = false;
        world_setup::spawn_ducks(
            &mut self.world,
            &mut self.rng,
            self.time.tick,
            self.level.ducks,
            self.level.speed,
        );
    }

    /// Forced removal of every duck, then advance.
    fn end_wave(&mut self) {
        systems::cleanup::remove_all(&mut self.world, &mut self.despawn_buffer);
        self.go_to_next_wave();
    }

    fn go_to_next_wave(&mut self) {
        self.sky = SkyColor::Blue;
        if self.wave >= self.level.waves {
            self.end_level();
        } else {
            self.start_wave();
        }
    }

    fn end_level(&mut self) {
        self.wave = 0;
        self.go_to_next_level();
    }

    /// Win check for the level just finished. Loss is terminal and
    /// immediate: one failed level ends the whole session.
    fn go_to_next_level(&mut self) {
        let won = level_won(self.kills_this_level, &self.level);
        self.level_index += 1;
        if !won {
            self.loss();
        } else if self.level_index < self.levels.len() {
            self.start_level();
        } else {
            self.win();
        }
    }

    fn win(&mut self) {
        self.phase = GamePhase::Won;
        self.game_status = "You Win!".to_string();
        self.audio_events.push(AudioCue::Win);
    }

    fn loss(&mut self) {
        self.phase = GamePhase::Lost;
        self.game_status = "You Lose!".to_string();
        self.audio_events.push(AudioCue::Loss);
    }

    // --- Per-frame wave logic ---

    fn run_frame(&mut self) {
        let now = self.time.tick;

        // 1. Advance every active motion; continuations chain here.
        let mut completions = std::mem::take(&mut self.completion_buffer);
        systems::motion::run(&mut self.world, now, &mut completions);
        for completion in &completions {
            self.handle_completion(completion.entity, completion.intent);
        }
        self.completion_buffer = completions;

        self.dog.update(now);

        // 2. Drop ducks whose death sequence has landed.
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 3. Wave-end evaluation, after all motion has advanced.
        if !self.stage_active() && !self.wave_over {
            self.wave_over = true;
            self.end_wave();
        } else if self.should_wave_end() {
            self.wave_ending = true;
            if self.any_ducks_alive() {
                self.sky = SkyColor::Pink;
                self.dog.laugh(now);
                self.fly_away(now);
            }
        }
    }

    /// Whether any motion or dog animation is still outstanding.
    fn stage_active(&self) -> bool {
        systems::motion::any_active(&self.world) || self.dog.is_active()
    }

    /// End the wave once per wave, on any of: time up, ammunition spent,
    /// no ducks left alive.
    fn should_wave_end(&self) -> bool {
        (self.is_wave_time_up() || self.out_of_ammo() || !self.any_ducks_alive())
            && !self.wave_ending
    }

    fn is_wave_time_up(&self) -> bool {
        self.wave_elapsed_secs() >= self.level.time
    }

    fn wave_elapsed_secs(&self) -> f64 {
        (self.time.tick - self.wave_start_tick) as f64 * DT
    }

    fn out_of_ammo(&self) -> bool {
        self.shots_fired >= self.level.bullets
    }

    fn any_ducks_alive(&self) -> bool {
        self.world
            .query::<&Duck>()
            .iter()
            .any(|(_, duck)| duck.alive)
    }

    /// Chain a finished motion into its continuation.
    fn handle_completion(&mut self, entity: hecs::Entity, intent: MotionIntent) {
        let now = self.time.tick;
        match intent {
            // Free flight is self-chaining while the duck lives.
            MotionIntent::Flight => {
                let next = match self.world.query_one_mut::<(&mut Duck, &Position)>(entity) {
                    Ok((duck, pos)) if duck.alive => {
                        let from = *pos;
                        let leg = flight::pick_leg(&mut self.rng, from, duck.speed_level);
                        duck.facing = leg.facing;
                        Some((from, leg))
                    }
                    _ => None,
                };
                if let Some((from, leg)) = next {
                    let _ = self.world.insert_one(
                        entity,
                        Motion {
                            from,
                            to: leg.to,
                            start_tick: now,
                            delay_ticks: 0,
                            duration_ticks: leg.duration_ticks,
                            intent: MotionIntent::Flight,
                        },
                    );
                }
            }
            // Off-screen; removed with the rest at wave cleanup.
            MotionIntent::FlyAway => {}
            MotionIntent::DeathFall => {
                self.audio_events.push(AudioCue::Thud);
                if let Ok(duck) = self.world.query_one_mut::<&mut Duck>(entity) {
                    duck.visible = false;
                }
            }
        }
    }

    // --- Hit resolution ---

    /// Resolve a click. Rejected outright once ammunition is spent:
    /// no counter increment, no hit test.
    fn handle_fire(&mut self, point: Position) {
        if self.out_of_ammo() {
            return;
        }
        self.shots_fired += 1;
        self.audio_events.push(AudioCue::Fire);

        let world_point = viewport_to_world(self.viewport, point);
        let killed = self.resolve_hits(world_point);
        if killed > 0 {
            self.kills_this_level += killed;
            self.score += killed * self.level.points_per_duck;
        }
    }

    /// Every live duck within the hit radius dies; no per-click cap.
    fn resolve_hits(&mut self, point: Position) -> u32 {
        let now = self.time.tick;

        let mut hit: Vec<hecs::Entity> = Vec::new();
        for (entity, (pos, duck)) in self.world.query_mut::<(&Position, &Duck)>() {
            if duck.alive && pos.distance_to(&point) < HIT_RADIUS {
                hit.push(entity);
            }
        }

        let killed = hit.len() as u32;
        for entity in hit {
            self.shoot_duck(entity, now);
            self.dog.retrieve(now);
            self.audio_events.push(AudioCue::Bark);
        }
        killed
    }

    /// Kill a duck: no-op if already dead (one kill, one cue, one death
    /// sequence per duck, ever). Installing the death fall replaces —
    /// and thereby cancels — any in-flight motion.
    fn shoot_duck(&mut self, entity: hecs::Entity, now: u64) {
        let from = match self.world.query_one_mut::<(&mut Duck, &Position)>(entity) {
            Ok((duck, pos)) if duck.alive => {
                duck.alive = false;
                duck.facing = Facing::Shot;
                Some(*pos)
            }
            _ => None,
        };

        if let Some(from) = from {
            self.audio_events.push(AudioCue::Quack);
            let _ = self.world.insert_one(
                entity,
                Motion {
                    from,
                    to: Position::new(from.x, WORLD_HEIGHT),
                    start_tick: now,
                    delay_ticks: ms_to_ticks(DEATH_DELAY_MS),
                    duration_ticks: ms_to_ticks(DEATH_FALL_MS),
                    intent: MotionIntent::DeathFall,
                },
            );
        }
    }

    /// Scripted exit for survivors at wave end: one forced move toward
    /// the off-screen point, no continuation.
    fn fly_away(&mut self, now: u64) {
        let exit = Position::new(FLY_AWAY_X, FLY_AWAY_Y);

        let mut survivors: Vec<(hecs::Entity, Position, u8)> = Vec::new();
        for (entity, (pos, duck)) in self.world.query_mut::<(&Position, &Duck)>() {
            if duck.alive {
                survivors.push((entity, *pos, duck.speed_level));
            }
        }

        for (entity, from, speed_level) in survivors {
            let duration_ticks = flight::leg_duration_ticks(&mut self.rng, speed_level);
            if let Ok(duck) = self.world.query_one_mut::<&mut Duck>(entity) {
                duck.facing = flight::facing_for_travel(from, exit);
            }
            let _ = self.world.insert_one(
                entity,
                Motion {
                    from,
                    to: exit,
                    start_tick: now,
                    delay_ticks: 0,
                    duration_ticks,
                    intent: MotionIntent::FlyAway,
                },
            );
        }
    }

    // --- Display state ---

    fn wave_phase(&self) -> WavePhase {
        if self.phase != GamePhase::Active || self.wave == 0 {
            WavePhase::Idle
        } else if self.wave_over {
            WavePhase::Over
        } else if self.wave_ending {
            WavePhase::Ending
        } else {
            WavePhase::Active
        }
    }

    fn hud_view(&self) -> HudView {
        let wave_status = if self.wave > 0 {
            format!("Wave {} of {}", self.wave, self.level.waves)
        } else {
            String::new()
        };
        HudView {
            score: self.score,
            wave_status,
            game_status: self.game_status.clone(),
        }
    }

    // --- Test introspection ---

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn kills_this_level(&self) -> u32 {
        self.kills_this_level
    }

    #[cfg(test)]
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    #[cfg(test)]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[cfg(test)]
    pub fn wave_ending(&self) -> bool {
        self.wave_ending
    }

    /// Positions of all live ducks (for aiming in tests).
    #[cfg(test)]
    pub fn alive_duck_positions(&self) -> Vec<Position> {
        self.world
            .query::<(&Position, &Duck)>()
            .iter()
            .filter(|(_, (_, duck))| duck.alive)
            .map(|(_, (pos, _))| *pos)
            .collect()
    }

    /// Teleport every live duck to one point (for multi-kill tests).
    #[cfg(test)]
    pub fn place_live_ducks(&mut self, point: Position) {
        for (_entity, (pos, duck)) in self.world.query_mut::<(&mut Position, &Duck)>() {
            if duck.alive {
                *pos = point;
            }
        }
    }
}

/// Strict-inequality win rule: kills must exceed the success ratio of
/// the level's total duck budget.
pub fn level_won(kills: u32, level: &Level) -> bool {
    kills as f64 > SUCCESS_RATIO * level.total_ducks() as f64
}
