//! Simulation engine — the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems, and produces `MatchSnapshot`s. Completely headless
//! (no rendering or input dependency), enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use arena_core::commands::Command;
use arena_core::constants::*;
use arena_core::enums::{MatchPhase, PowerUpGrant};
use arena_core::events::FxEvent;
use arena_core::state::MatchSnapshot;
use arena_core::types::{PlayerId, SimTime};

use crate::match_state::{RespawnQueue, ScoreBoard};
use crate::systems;
use crate::systems::pickups::PickupSchedule;
use crate::world_setup;

/// A static circle of blocking geometry for spawn clearance checks.
#[derive(Debug, Clone, Copy)]
pub struct Blocker {
    pub center: Vec2,
    pub radius: f32,
}

/// Pickup spawn manager settings.
#[derive(Debug, Clone)]
pub struct PickupConfig {
    pub min_interval_secs: f32,
    pub max_interval_secs: f32,
    pub max_concurrent: usize,
    /// Clearance radius for pickup placement.
    pub check_radius: f32,
    /// Candidate drop positions.
    pub spawn_points: Vec<Vec2>,
    /// Grant pool drawn from uniformly. Empty disables the spawner.
    pub grants: Vec<PowerUpGrant>,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: PICKUP_MIN_INTERVAL_SECS,
            max_interval_secs: PICKUP_MAX_INTERVAL_SECS,
            max_concurrent: MAX_CONCURRENT_PICKUPS,
            check_radius: PICKUP_CHECK_RADIUS,
            spawn_points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 4.0),
                Vec2::new(0.0, -4.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(-4.0, 0.0),
            ],
            grants: vec![
                PowerUpGrant::Shotgun {
                    pellets: SHOTGUN_PELLETS,
                    spread_deg: SHOTGUN_SPREAD_DEG,
                    duration_secs: SHOTGUN_DURATION_SECS,
                },
                PowerUpGrant::SniperCharges {
                    count: SNIPER_CHARGES_GRANTED,
                },
                PowerUpGrant::ShieldCharges {
                    amount: SHIELD_CHARGES_GRANTED,
                },
            ],
        }
    }
}

/// Configuration for a match. Invalid values are clamped, never
/// rejected — a degraded match beats no match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed + same commands = same match.
    pub seed: u64,
    /// Kills required to win.
    pub winning_score: u32,
    pub tank_max_hp: i32,
    pub respawn_delay_secs: f32,
    /// Candidate respawn positions for rejection sampling.
    pub spawn_points: Vec<Vec2>,
    pub spawn_check_radius: f32,
    pub max_spawn_attempts: u32,
    /// Static geometry that blocks spawn placement.
    pub blockers: Vec<Blocker>,
    pub projectile_ttl_secs: f32,
    pub sniper_speed: f32,
    pub sniper_pierce_budget: i32,
    pub sniper_destroy_on_hit: bool,
    pub pickups: PickupConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            winning_score: SCORE_TO_WIN,
            tank_max_hp: TANK_MAX_HP,
            respawn_delay_secs: RESPAWN_DELAY_SECS,
            spawn_points: vec![
                Vec2::new(-4.0, -4.0),
                Vec2::new(4.0, -4.0),
                Vec2::new(-4.0, 4.0),
                Vec2::new(4.0, 4.0),
            ],
            spawn_check_radius: SPAWN_CHECK_RADIUS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            blockers: Vec::new(),
            projectile_ttl_secs: PROJECTILE_TTL_SECS,
            sniper_speed: SNIPER_SPEED,
            sniper_pierce_budget: SNIPER_PIERCE_BUDGET,
            sniper_destroy_on_hit: SNIPER_DESTROY_ON_HIT,
            pickups: PickupConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Clamp out-of-range settings to safe minimums, warning on each.
    fn sanitized(mut self) -> Self {
        if self.winning_score == 0 {
            warn!("winning_score 0 clamped to 1");
            self.winning_score = 1;
        }
        if self.tank_max_hp < 1 {
            warn!("tank_max_hp {} clamped to 1", self.tank_max_hp);
            self.tank_max_hp = 1;
        }
        if self.respawn_delay_secs < 0.0 {
            warn!("negative respawn_delay clamped to 0");
            self.respawn_delay_secs = 0.0;
        }
        if self.max_spawn_attempts == 0 {
            warn!("max_spawn_attempts 0 clamped to 1");
            self.max_spawn_attempts = 1;
        }
        if self.pickups.max_interval_secs < self.pickups.min_interval_secs {
            warn!("pickup max_interval below min_interval, using min");
            self.pickups.max_interval_secs = self.pickups.min_interval_secs;
        }
        self
    }
}

/// The simulation engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    world: World,
    time: SimTime,
    phase: MatchPhase,
    config: MatchConfig,
    rng: ChaCha8Rng,
    next_projectile_id: u32,
    next_pickup_id: u32,
    command_queue: VecDeque<Command>,
    despawn_buffer: Vec<hecs::Entity>,
    fx_events: Vec<FxEvent>,
    score: ScoreBoard,
    respawns: RespawnQueue,
    winner: Option<PlayerId>,
    pickup_schedule: PickupSchedule,
}

impl MatchEngine {
    /// Create a new engine with the given config.
    pub fn new(config: MatchConfig) -> Self {
        let config = config.sanitized();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: MatchPhase::default(),
            config,
            rng,
            next_projectile_id: 0,
            next_pickup_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fx_events: Vec::new(),
            score: ScoreBoard::default(),
            respawns: RespawnQueue::default(),
            winner: None,
            pickup_schedule: PickupSchedule::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.phase == MatchPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.fx_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.winner,
            self.config.winning_score,
            &self.score,
            &self.respawns,
            events,
        )
    }

    /// Get the current match phase.
    pub fn phase(&self) -> MatchPhase {
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

    /// Get a mutable reference to the ECS world (for tests that set up
    /// states the command surface cannot reach directly).
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get a read-only reference to the scoreboard.
    #[cfg(test)]
    pub(crate) fn score(&self) -> &ScoreBoard {
        &self.score
    }

    /// Get a read-only reference to the respawn queue.
    #[cfg(test)]
    pub(crate) fn respawns(&self) -> &RespawnQueue {
        &self.respawns
    }

    /// Process all queued commands in order.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::StartMatch => self.start_match(),
            Command::Pause => {
                if self.phase == MatchPhase::Active {
                    self.phase = MatchPhase::Paused;
                }
            }
            Command::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Active;
                }
            }
            Command::Fire { player_id } => {
                if self.phase == MatchPhase::Active {
                    systems::weapons::fire(
                        &mut self.world,
                        player_id,
                        self.time.tick,
                        &self.config,
                        &mut self.next_projectile_id,
                        &mut self.fx_events,
                    );
                }
            }
            Command::ReportContact {
                projectile_id,
                surface,
            } => {
                if self.phase == MatchPhase::Active {
                    systems::combat::resolve_contact(
                        &mut self.world,
                        projectile_id,
                        surface,
                        self.time.tick,
                        &self.config,
                        &mut self.score,
                        &mut self.respawns,
                        &mut self.phase,
                        &mut self.winner,
                        &mut self.fx_events,
                    );
                }
            }
            Command::CollectPickup {
                pickup_id,
                player_id,
            } => {
                if self.phase == MatchPhase::Active {
                    systems::pickups::collect(
                        &mut self.world,
                        pickup_id,
                        player_id,
                        self.time.tick,
                        &mut self.fx_events,
                    );
                }
            }
            Command::GrantPowerUp { player_id, grant } => {
                if self.phase == MatchPhase::Active {
                    systems::abilities::apply_grant(
                        &mut self.world,
                        player_id,
                        grant,
                        self.time.tick,
                        &mut self.fx_events,
                    );
                }
            }
        }
    }

    /// Build a fresh match: new world, zeroed scores, cleared tasks.
    fn start_match(&mut self) {
        self.world = World::new();
        world_setup::setup_match(&mut self.world, &self.config);
        self.time = SimTime::default();
        self.score = ScoreBoard::new([PlayerId::P1, PlayerId::P2]);
        self.respawns.clear();
        self.winner = None;
        self.next_projectile_id = 0;
        self.next_pickup_id = 0;
        self.fx_events.clear();
        self.pickup_schedule
            .arm(&mut self.rng, &self.config, self.time.tick);
        self.phase = MatchPhase::Active;
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self) {
        // 1. Fire-rate gate countdown
        systems::weapons::tick_cooldowns(&mut self.world);
        // 2. Timed ability expiry
        systems::abilities::expire(&mut self.world, self.time.tick, &mut self.fx_events);
        // 3. Due respawn tasks
        systems::director::resolve_due_respawns(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &mut self.respawns,
            self.time.tick,
            &mut self.fx_events,
        );
        // 4. Pickup spawn cycle
        systems::pickups::run(
            &mut self.world,
            &mut self.rng,
            &mut self.pickup_schedule,
            &self.config,
            self.time.tick,
            &mut self.next_pickup_id,
            &mut self.fx_events,
        );
        // 5. Kinematic integration
        systems::movement::run(&mut self.world);
        // 6. Projectile TTL
        systems::projectile::expire(&mut self.world, self.time.tick, &mut self.despawn_buffer);
        // 7. Cleanup (OOB, expired)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
