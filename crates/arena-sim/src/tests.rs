//! Tests for the match engine: damage resolution, projectile rules,
//! ability state, scoring, and respawn scheduling.

use glam::Vec2;

use arena_core::commands::{Command, ContactSurface};
use arena_core::components::Projectile;
use arena_core::constants::{FALLBACK_SPAWN_P2, TANK_MAX_HP};
use arena_core::enums::*;
use arena_core::events::FxEvent;
use arena_core::state::MatchSnapshot;
use arena_core::types::{PlayerId, Velocity};

use crate::engine::{Blocker, MatchConfig, MatchEngine};
use crate::match_state::{RespawnQueue, ScoreBoard};
use crate::systems::{director, weapons};

const P1: PlayerId = PlayerId::P1;
const P2: PlayerId = PlayerId::P2;

/// Config with the pickup spawner disabled so random drops cannot
/// perturb combat-focused tests.
fn quiet_config() -> MatchConfig {
    let mut config = MatchConfig::default();
    config.pickups.grants = Vec::new();
    config
}

/// Engine with the match already started.
fn started_engine(config: MatchConfig) -> MatchEngine {
    let mut engine = MatchEngine::new(config);
    engine.queue_command(Command::StartMatch);
    engine.tick();
    engine
}

fn run_ticks(engine: &mut MatchEngine, n: u64) -> Vec<FxEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick().events);
    }
    events
}

fn fire(engine: &mut MatchEngine, player: PlayerId) -> MatchSnapshot {
    engine.queue_command(Command::Fire { player_id: player });
    engine.tick()
}

fn newest_projectile_id(snap: &MatchSnapshot) -> u32 {
    snap.projectiles
        .iter()
        .map(|p| p.projectile_id)
        .max()
        .expect("no projectile in flight")
}

fn report_tank_contact(engine: &mut MatchEngine, projectile_id: u32, victim: PlayerId) {
    engine.queue_command(Command::ReportContact {
        projectile_id,
        surface: ContactSurface::Tank { player_id: victim },
    });
}

fn tank_view(snap: &MatchSnapshot, player: PlayerId) -> &arena_core::state::TankView {
    snap.tanks
        .iter()
        .find(|t| t.player_id == player)
        .expect("tank missing from snapshot")
}

/// Wait out the fire cooldown, fire one standard round, and land it on
/// `victim`. Returns the post-contact snapshot.
fn land_hit(engine: &mut MatchEngine, shooter: PlayerId, victim: PlayerId) -> MatchSnapshot {
    run_ticks(engine, 31);
    let snap = fire(engine, shooter);
    let id = newest_projectile_id(&snap);
    report_tank_contact(engine, id, victim);
    engine.tick()
}

// ---- Projectile rules ----

#[test]
fn test_standard_round_survives_exactly_its_bounce_budget() {
    // Default budget is 3: three wall hits survived, the fourth kills it.
    let mut engine = started_engine(quiet_config());
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    for bounce in 1..=3 {
        engine.queue_command(Command::ReportContact {
            projectile_id: id,
            surface: ContactSurface::Wall {
                normal: Vec2::new(0.0, -1.0),
            },
        });
        let snap = engine.tick();
        assert!(
            snap.projectiles.iter().any(|p| p.projectile_id == id),
            "round should survive wall hit {bounce}"
        );
    }

    engine.queue_command(Command::ReportContact {
        projectile_id: id,
        surface: ContactSurface::Wall {
            normal: Vec2::new(0.0, -1.0),
        },
    });
    let snap = engine.tick();
    assert!(
        !snap.projectiles.iter().any(|p| p.projectile_id == id),
        "round should destruct on the bounce past its budget"
    );
}

#[test]
fn test_wall_bounce_reflects_velocity_and_preserves_speed() {
    let mut engine = started_engine(quiet_config());
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);
    let before = snap.projectiles[0].velocity;
    assert!((before - Vec2::new(0.0, 12.0)).length() < 1e-4);

    engine.queue_command(Command::ReportContact {
        projectile_id: id,
        surface: ContactSurface::Wall {
            normal: Vec2::new(0.0, -1.0),
        },
    });
    let snap = engine.tick();
    let after = snap.projectiles[0].velocity;
    assert!((after - Vec2::new(0.0, -12.0)).length() < 1e-4);
    assert!((after.length() - before.length()).abs() < 1e-4);
}

#[test]
fn test_standard_round_destructs_on_other_contact() {
    let mut engine = started_engine(quiet_config());
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    engine.queue_command(Command::ReportContact {
        projectile_id: id,
        surface: ContactSurface::Other,
    });
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_owner_hull_is_excluded_from_own_round() {
    let mut engine = started_engine(quiet_config());
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    report_tank_contact(&mut engine, id, P1);
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P1).hp, TANK_MAX_HP);
    assert!(
        snap.projectiles.iter().any(|p| p.projectile_id == id),
        "own-hull contact must not destruct the round"
    );
}

#[test]
fn test_projectile_ttl_is_a_hard_deadline() {
    let mut engine = started_engine(quiet_config());
    fire(&mut engine, P1);

    // Park the round so OOB cleanup cannot race the TTL check.
    for (_entity, (vel, _p)) in engine
        .world_mut()
        .query_mut::<(&mut Velocity, &Projectile)>()
    {
        vel.0 = Vec2::ZERO;
    }

    run_ticks(&mut engine, 300);
    assert_eq!(engine.tick().projectiles.len(), 1, "alive before ttl");
    run_ticks(&mut engine, 100);
    assert!(engine.tick().projectiles.is_empty(), "gone after ttl");
}

#[test]
fn test_stale_contact_report_is_ignored() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::ReportContact {
        projectile_id: 999,
        surface: ContactSurface::Other,
    });
    // Must not panic or mutate anything.
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P1).hp, TANK_MAX_HP);
}

// ---- Sniper rounds ----

#[test]
fn test_sniper_passes_through_walls() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperCharges { count: 1 },
    });
    engine.tick();

    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Sniper);

    engine.queue_command(Command::ReportContact {
        projectile_id: id,
        surface: ContactSurface::Wall {
            normal: Vec2::new(0.0, -1.0),
        },
    });
    let snap = engine.tick();
    let round = snap
        .projectiles
        .iter()
        .find(|p| p.projectile_id == id)
        .expect("sniper round must survive wall contact");
    // Velocity unchanged: no reflection on the non-colliding channel.
    assert!((round.velocity - Vec2::new(0.0, 20.0)).length() < 1e-4);
}

#[test]
fn test_sniper_destructs_exactly_when_pierce_budget_reaches_zero() {
    let mut config = quiet_config();
    config.sniper_destroy_on_hit = false;
    config.sniper_pierce_budget = 2;
    let mut engine = started_engine(config);

    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperCharges { count: 1 },
    });
    engine.tick();

    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    // First tank hit: budget 2 -> 1, survives.
    report_tank_contact(&mut engine, id, P2);
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P2).hp, TANK_MAX_HP - 1);
    assert!(snap.projectiles.iter().any(|p| p.projectile_id == id));

    // Second tank hit: budget 1 -> 0, destructs exactly now.
    report_tank_contact(&mut engine, id, P2);
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P2).hp, TANK_MAX_HP - 2);
    assert!(!snap.projectiles.iter().any(|p| p.projectile_id == id));
}

#[test]
fn test_sniper_unlimited_pierce_never_destructs_on_tanks() {
    let mut config = quiet_config();
    config.sniper_destroy_on_hit = false;
    config.sniper_pierce_budget = -1;
    config.winning_score = 100;
    let mut engine = started_engine(config);

    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperCharges { count: 1 },
    });
    engine.tick();
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    for _ in 0..TANK_MAX_HP - 1 {
        report_tank_contact(&mut engine, id, P2);
        engine.tick();
    }
    let snap = engine.tick();
    assert!(snap.projectiles.iter().any(|p| p.projectile_id == id));
}

#[test]
fn test_sniper_destroy_on_hit_overrides_remaining_budget() {
    let mut config = quiet_config();
    config.sniper_destroy_on_hit = true;
    config.sniper_pierce_budget = 5;
    let mut engine = started_engine(config);

    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperCharges { count: 1 },
    });
    engine.tick();
    let snap = fire(&mut engine, P1);
    let id = newest_projectile_id(&snap);

    report_tank_contact(&mut engine, id, P2);
    let snap = engine.tick();
    assert!(!snap.projectiles.iter().any(|p| p.projectile_id == id));
}

// ---- Shield ----

#[test]
fn test_shield_absorbs_before_health() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P2,
        grant: PowerUpGrant::ShieldCharges { amount: 1 },
    });
    engine.tick();

    let snap = land_hit(&mut engine, P1, P2);
    let tank = tank_view(&snap, P2);
    assert_eq!(tank.hp, TANK_MAX_HP, "absorbed hit must not touch hp");
    assert_eq!(tank.shield_charges, 0, "exactly one charge consumed");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, FxEvent::ShieldBlocked { player_id, .. } if *player_id == P2)));

    // With the pool empty the next hit lands on health.
    let snap = land_hit(&mut engine, P1, P2);
    assert_eq!(tank_view(&snap, P2).hp, TANK_MAX_HP - 1);
}

#[test]
fn test_shield_charges_accumulate_across_pickups() {
    let mut engine = started_engine(quiet_config());
    for _ in 0..2 {
        engine.queue_command(Command::GrantPowerUp {
            player_id: P2,
            grant: PowerUpGrant::ShieldCharges { amount: 1 },
        });
    }
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P2).shield_charges, 2);
}

// ---- Shotgun ----

#[test]
fn test_pellet_headings_three_pellets_twenty_degrees() {
    let headings = weapons::pellet_headings(0.0, 3, 20.0);
    let expected = [-10.0_f32.to_radians(), 0.0, 10.0_f32.to_radians()];
    assert_eq!(headings.len(), 3);
    for (got, want) in headings.iter().zip(expected) {
        assert!((got - want).abs() < 1e-5, "heading {got} != {want}");
    }
}

#[test]
fn test_pellet_headings_single_pellet_flies_straight() {
    assert_eq!(weapons::pellet_headings(1.2, 1, 45.0), vec![1.2]);
}

#[test]
fn test_shotgun_fire_emits_fanned_pellets() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::Shotgun {
            pellets: 3,
            spread_deg: 20.0,
            duration_secs: 6.0,
        },
    });
    engine.tick();

    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles.len(), 3);

    let mut angles: Vec<f32> = snap
        .projectiles
        .iter()
        .map(|p| p.velocity.x.atan2(p.velocity.y).to_degrees())
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for (got, want) in angles.iter().zip([-10.0_f32, 0.0, 10.0]) {
        assert!((got - want).abs() < 1e-3, "pellet at {got}°, wanted {want}°");
    }
    assert!(snap.projectiles.iter().all(|p| p.owner == P1));
}

#[test]
fn test_shotgun_zero_pellets_clamps_to_one() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::Shotgun {
            pellets: 0,
            spread_deg: 20.0,
            duration_secs: 6.0,
        },
    });
    engine.tick();
    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles.len(), 1);
}

#[test]
fn test_shotgun_reapplication_replaces_deadline_not_extends() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::Shotgun {
            pellets: 3,
            spread_deg: 20.0,
            duration_secs: 1.0,
        },
    });
    engine.tick();

    // Half a second in, re-apply: the deadline moves to one second from
    // now, not two seconds from the first grant.
    run_ticks(&mut engine, 30);
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::Shotgun {
            pellets: 3,
            spread_deg: 20.0,
            duration_secs: 1.0,
        },
    });
    engine.tick();

    // Past the first grant's would-be expiry, still active.
    run_ticks(&mut engine, 40);
    let before = engine.tick().projectiles.len();
    let snap = fire(&mut engine, P1);
    assert_eq!(
        snap.projectiles.len() - before,
        3,
        "re-applied mode still live"
    );

    // Past the replacement deadline, lapsed.
    let events = run_ticks(&mut engine, 40);
    assert!(events.iter().any(|e| matches!(
        e,
        FxEvent::AbilityExpired {
            ability: TimedAbility::Shotgun,
            ..
        }
    )));
    let before = engine.tick().projectiles.len();
    let snap = fire(&mut engine, P1);
    assert_eq!(
        snap.projectiles.len() - before,
        1,
        "mode lapsed after replacement"
    );
}

// ---- Sniper charges and timed mode ----

#[test]
fn test_sniper_charges_accumulate_and_consume_one_per_shot() {
    let mut engine = started_engine(quiet_config());
    for _ in 0..2 {
        engine.queue_command(Command::GrantPowerUp {
            player_id: P1,
            grant: PowerUpGrant::SniperCharges { count: 1 },
        });
    }
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P1).sniper_charges, 2);

    let snap = fire(&mut engine, P1);
    assert_eq!(tank_view(&snap, P1).sniper_charges, 1);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Sniper);
}

#[test]
fn test_timed_sniper_mode_fires_snipers_until_expiry() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperTimed { duration_secs: 1.0 },
    });
    engine.tick();

    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Sniper);
    assert_eq!(
        tank_view(&snap, P1).sniper_charges,
        0,
        "timed mode consumes no charges"
    );

    let events = run_ticks(&mut engine, 70);
    assert!(events.iter().any(|e| matches!(
        e,
        FxEvent::AbilityExpired {
            ability: TimedAbility::SniperTimed,
            ..
        }
    )));
    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Standard);
}

#[test]
fn test_charges_take_priority_over_timed_mode() {
    let mut engine = started_engine(quiet_config());
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperTimed { duration_secs: 6.0 },
    });
    engine.queue_command(Command::GrantPowerUp {
        player_id: P1,
        grant: PowerUpGrant::SniperCharges { count: 1 },
    });
    engine.tick();

    let snap = fire(&mut engine, P1);
    let tank = tank_view(&snap, P1);
    assert_eq!(tank.sniper_charges, 0, "charge consumed first");
    assert!(tank.sniper_timed_active, "timed mode untouched");
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Sniper);
}

// ---- Fire-rate gate ----

#[test]
fn test_fire_rejected_while_cooling() {
    let mut engine = started_engine(quiet_config());
    fire(&mut engine, P1);
    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles.len(), 1, "second request gated");

    run_ticks(&mut engine, 31);
    let snap = fire(&mut engine, P1);
    assert_eq!(snap.projectiles.len(), 2, "gate reopens after cooldown");
}

#[test]
fn test_dead_tank_cannot_fire() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    let mut engine = started_engine(config);

    land_hit(&mut engine, P1, P2);
    let snap = fire(&mut engine, P2);
    assert!(
        snap.projectiles.is_empty(),
        "dead tank's fire request must no-op"
    );
}

// ---- Death, scoring, respawn ----

#[test]
fn test_death_scores_attacker_and_schedules_respawn() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    let mut engine = started_engine(config);

    let snap = land_hit(&mut engine, P1, P2);
    let victim = tank_view(&snap, P2);
    assert!(!victim.alive);
    assert_eq!(victim.hp, 0);
    assert_eq!(snap.scores, vec![
        arena_core::state::ScoreEntry { player_id: P1, kills: 1 },
        arena_core::state::ScoreEntry { player_id: P2, kills: 0 },
    ]);
    assert_eq!(snap.pending_respawns, vec![P2]);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, FxEvent::TankDestroyed { victim, attacker, .. }
            if *victim == P2 && *attacker == P1)));
}

#[test]
fn test_dead_tank_ignores_further_damage() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    let mut engine = started_engine(config);

    land_hit(&mut engine, P1, P2);
    // A second hit during the grace window must not double-count.
    let snap = land_hit(&mut engine, P1, P2);
    assert_eq!(engine.score().kills(P1), 1);
    assert_eq!(snap.pending_respawns, vec![P2]);
}

#[test]
fn test_respawn_completes_after_delay_at_a_clear_spawn_point() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    let mut engine = started_engine(config.clone());

    land_hit(&mut engine, P1, P2);
    let events = run_ticks(&mut engine, 95);
    assert!(events
        .iter()
        .any(|e| matches!(e, FxEvent::Respawned { player_id, .. } if *player_id == P2)));

    let snap = engine.tick();
    let tank = tank_view(&snap, P2);
    assert!(tank.alive);
    assert_eq!(tank.hp, tank.max_hp);
    assert_eq!(tank.velocity, Vec2::ZERO);
    assert!(
        config.spawn_points.contains(&tank.position),
        "respawn position {:?} not a configured spawn point",
        tank.position
    );
    assert!(snap.pending_respawns.is_empty());
}

#[test]
fn test_respawn_falls_back_when_every_spawn_point_is_blocked() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    config.blockers = vec![Blocker {
        center: Vec2::ZERO,
        radius: 100.0,
    }];
    let mut engine = started_engine(config);

    land_hit(&mut engine, P1, P2);
    run_ticks(&mut engine, 95);

    let snap = engine.tick();
    let tank = tank_view(&snap, P2);
    assert!(tank.alive, "respawn must still complete");
    assert_eq!(tank.position, FALLBACK_SPAWN_P2);
}

#[test]
fn test_ability_charges_persist_across_respawn() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    let mut engine = started_engine(config);

    engine.queue_command(Command::GrantPowerUp {
        player_id: P2,
        grant: PowerUpGrant::SniperCharges { count: 2 },
    });
    engine.tick();

    land_hit(&mut engine, P1, P2);
    run_ticks(&mut engine, 95);

    let snap = engine.tick();
    let tank = tank_view(&snap, P2);
    assert!(tank.alive);
    assert_eq!(tank.sniper_charges, 2, "charges survive death by policy");
}

#[test]
fn test_respawn_is_idempotent_on_a_living_tank() {
    let mut engine = started_engine(quiet_config());
    land_hit(&mut engine, P1, P2); // hp 3 -> 2, still alive

    let target = Vec2::new(1.0, 2.0);
    assert!(director::respawn_at(engine.world_mut(), P2, target));
    assert!(director::respawn_at(engine.world_mut(), P2, target));

    let snap = engine.tick();
    let tank = tank_view(&snap, P2);
    assert!(tank.alive);
    assert_eq!(tank.hp, tank.max_hp);
}

// ---- Win condition ----

#[test]
fn test_final_kill_ends_match_and_skips_victim_respawn() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    config.winning_score = 2;
    let mut engine = started_engine(config);

    // First kill: score 1 of 2, normal respawn.
    land_hit(&mut engine, P1, P2);
    assert_eq!(engine.score().kills(P1), 1);
    run_ticks(&mut engine, 95);

    // Boundary kill: score reaches winning_score.
    let snap = land_hit(&mut engine, P1, P2);
    assert_eq!(snap.phase, MatchPhase::GameOver);
    assert_eq!(snap.winner, Some(P1));
    assert!(
        snap.pending_respawns.is_empty(),
        "no respawn for the final victim"
    );
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, FxEvent::MatchWon { winner } if *winner == P1)));
}

#[test]
fn test_game_over_freezes_gameplay() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    config.winning_score = 1;
    let mut engine = started_engine(config);

    land_hit(&mut engine, P1, P2);
    assert_eq!(engine.phase(), MatchPhase::GameOver);

    let tick_before = engine.time().tick;
    let snap = fire(&mut engine, P1);
    assert!(snap.projectiles.is_empty(), "fire ignored after game over");
    assert_eq!(engine.time().tick, tick_before, "time frozen");
    assert!(!engine.respawns().is_pending(P2));
}

#[test]
fn test_self_kill_does_not_score() {
    // Victim == attacker models a scripted hazard death; neither player
    // may be credited, but the respawn still runs.
    let mut phase = MatchPhase::Active;
    let mut winner = None;
    let mut score = ScoreBoard::new([P1, P2]);
    let mut respawns = RespawnQueue::default();
    let mut fx = Vec::new();
    director::on_combatant_destroyed(
        P2,
        P2,
        0,
        &MatchConfig::default(),
        &mut score,
        &mut respawns,
        &mut phase,
        &mut winner,
        &mut fx,
    );
    assert_eq!(score.kills(P1), 0);
    assert_eq!(score.kills(P2), 0);
    assert!(respawns.is_pending(P2), "self-kill still respawns");
}

// ---- Match state units ----

#[test]
fn test_respawn_queue_refuses_double_scheduling() {
    let mut queue = RespawnQueue::default();
    assert!(queue.schedule(P2, 100));
    assert!(!queue.schedule(P2, 50), "second task must be refused");
    assert!(queue.take_due(99).is_empty());
    assert_eq!(queue.take_due(100), vec![P2]);
    assert!(!queue.is_pending(P2));
}

#[test]
fn test_scoreboard_ignores_unregistered_ids() {
    let mut score = ScoreBoard::new([P1, P2]);
    score.add_kill(PlayerId(9));
    assert_eq!(score.kills(PlayerId(9)), 0);
    score.add_kill(P2);
    assert_eq!(score.leader(), Some((P2, 1)));
}

// ---- Pickups ----

#[test]
fn test_pickup_spawns_and_applies_on_collection() {
    let mut config = MatchConfig::default();
    config.pickups.min_interval_secs = 0.5;
    config.pickups.max_interval_secs = 1.0;
    config.pickups.grants = vec![PowerUpGrant::ShieldCharges { amount: 1 }];
    let mut engine = started_engine(config);

    let mut pickup_id = None;
    for _ in 0..200 {
        let snap = engine.tick();
        if let Some(p) = snap.pickups.first() {
            pickup_id = Some(p.pickup_id);
            break;
        }
    }
    let pickup_id = pickup_id.expect("pickup should spawn within interval");

    engine.queue_command(Command::CollectPickup {
        pickup_id,
        player_id: P1,
    });
    let snap = engine.tick();
    assert!(snap.pickups.is_empty());
    assert_eq!(tank_view(&snap, P1).shield_charges, 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, FxEvent::PickupCollected { player_id, .. } if *player_id == P1)));

    // Stale collection of the same id is a silent no-op.
    engine.queue_command(Command::CollectPickup {
        pickup_id,
        player_id: P2,
    });
    let snap = engine.tick();
    assert_eq!(tank_view(&snap, P2).shield_charges, 0);
}

#[test]
fn test_pickup_concurrency_cap() {
    let mut config = MatchConfig::default();
    config.pickups.min_interval_secs = 0.1;
    config.pickups.max_interval_secs = 0.2;
    config.pickups.max_concurrent = 1;
    config.pickups.grants = vec![PowerUpGrant::ShieldCharges { amount: 1 }];
    let mut engine = started_engine(config);

    for _ in 0..600 {
        let snap = engine.tick();
        assert!(snap.pickups.len() <= 1, "concurrency cap exceeded");
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed_same_commands() {
    let script = |engine: &mut MatchEngine| {
        engine.queue_command(Command::StartMatch);
        engine.queue_command(Command::GrantPowerUp {
            player_id: P1,
            grant: PowerUpGrant::Shotgun {
                pellets: 3,
                spread_deg: 20.0,
                duration_secs: 6.0,
            },
        });
    };

    let mut engine_a = MatchEngine::new(MatchConfig::default());
    let mut engine_b = MatchEngine::new(MatchConfig::default());
    script(&mut engine_a);
    script(&mut engine_b);

    for tick in 0..1200 {
        if tick % 40 == 0 {
            engine_a.queue_command(Command::Fire { player_id: P1 });
            engine_b.queue_command(Command::Fire { player_id: P1 });
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_start_match_resets_scores_and_world() {
    let mut config = quiet_config();
    config.tank_max_hp = 1;
    config.winning_score = 1;
    let mut engine = started_engine(config);

    land_hit(&mut engine, P1, P2);
    assert_eq!(engine.phase(), MatchPhase::GameOver);

    engine.queue_command(Command::StartMatch);
    let snap = engine.tick();
    assert_eq!(snap.phase, MatchPhase::Active);
    assert_eq!(snap.winner, None);
    assert!(snap.scores.iter().all(|s| s.kills == 0));
    assert_eq!(snap.tanks.len(), 2);
    assert!(snap.tanks.iter().all(|t| t.alive));
}

#[test]
fn test_pause_halts_time() {
    let mut engine = started_engine(quiet_config());
    run_ticks(&mut engine, 10);
    engine.queue_command(Command::Pause);
    engine.tick();
    let frozen = engine.time().tick;
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, frozen);
    engine.queue_command(Command::Resume);
    engine.tick();
    assert_eq!(engine.time().tick, frozen + 1);
}
