//! Contact resolution — damage, reflection, piercing, and death.
//!
//! Contacts are reported by the external physics layer and resolved one
//! at a time in queue order, so a full damage chain (shield check,
//! health, death notification, score) completes before the next contact
//! for the same tank is examined.

use glam::Vec2;
use hecs::World;
use tracing::{debug, trace};

use arena_core::commands::ContactSurface;
use arena_core::components::{AbilityState, Combatant, ProjectileState};
use arena_core::constants::HIT_DAMAGE;
use arena_core::enums::{MatchPhase, ProjectileKind};
use arena_core::events::FxEvent;
use arena_core::types::{reflect, PlayerId, Position, Velocity};

use crate::engine::MatchConfig;
use crate::match_state::{RespawnQueue, ScoreBoard};
use crate::systems::{abilities, director};

/// What became of the projectile after a contact.
enum ProjectileFate {
    Keep,
    Destroy,
}

/// Resolve one reported contact for the named projectile.
#[allow(clippy::too_many_arguments)]
pub fn resolve_contact(
    world: &mut World,
    projectile_id: u32,
    surface: ContactSurface,
    current_tick: u64,
    config: &MatchConfig,
    score: &mut ScoreBoard,
    respawns: &mut RespawnQueue,
    phase: &mut MatchPhase,
    winner: &mut Option<PlayerId>,
    fx: &mut Vec<FxEvent>,
) {
    let Some(entity) = find_projectile(world, projectile_id) else {
        // Stale report: the round already destructed this tick.
        trace!(projectile_id, "contact for unknown projectile ignored");
        return;
    };

    let fate = match surface {
        ContactSurface::Wall { normal } => resolve_wall(world, entity, normal),
        ContactSurface::Tank { player_id } => resolve_tank_hit(
            world,
            entity,
            player_id,
            current_tick,
            config,
            score,
            respawns,
            phase,
            winner,
            fx,
        ),
        ContactSurface::Other => resolve_other(world, entity),
    };

    if matches!(fate, ProjectileFate::Destroy) {
        let _ = world.despawn(entity);
    }
}

/// Wall contact: standard rounds reflect and pay a bounce; one more
/// wall than the budget destroys the round. Sniper rounds pass through
/// solid geometry untouched.
fn resolve_wall(world: &mut World, entity: hecs::Entity, normal: Vec2) -> ProjectileFate {
    let Ok(mut query) = world.query_one::<(&mut ProjectileState, &mut Velocity)>(entity) else {
        return ProjectileFate::Keep;
    };
    let Some((state, velocity)) = query.get() else {
        return ProjectileFate::Keep;
    };

    if state.kind == ProjectileKind::Sniper {
        return ProjectileFate::Keep;
    }

    velocity.0 = reflect(velocity.0, normal);
    state.remaining_bounces -= 1;
    if state.remaining_bounces < 0 {
        return ProjectileFate::Destroy;
    }
    ProjectileFate::Keep
}

/// Anything else solid: standard rounds destruct, sniper rounds (which
/// fly on a trigger channel) ignore it.
fn resolve_other(world: &mut World, entity: hecs::Entity) -> ProjectileFate {
    match world.get::<&ProjectileState>(entity) {
        Ok(state) if state.kind == ProjectileKind::Sniper => ProjectileFate::Keep,
        Ok(_) => ProjectileFate::Destroy,
        Err(_) => ProjectileFate::Keep,
    }
}

/// Tank contact: damage the victim (unless it is the owner's own hull,
/// which is excluded from the round's contacts), then settle the
/// round's fate from its kind and budgets.
#[allow(clippy::too_many_arguments)]
fn resolve_tank_hit(
    world: &mut World,
    entity: hecs::Entity,
    struck: PlayerId,
    current_tick: u64,
    config: &MatchConfig,
    score: &mut ScoreBoard,
    respawns: &mut RespawnQueue,
    phase: &mut MatchPhase,
    winner: &mut Option<PlayerId>,
    fx: &mut Vec<FxEvent>,
) -> ProjectileFate {
    let (owner, kind) = {
        let Ok(state) = world.get::<&ProjectileState>(entity) else {
            return ProjectileFate::Keep;
        };
        (state.owner, state.kind)
    };

    if struck == owner {
        return ProjectileFate::Keep;
    }

    let damaged = take_damage(
        world,
        struck,
        HIT_DAMAGE,
        owner,
        current_tick,
        config,
        score,
        respawns,
        phase,
        winner,
        fx,
    );
    if !damaged {
        // Dead or missing tank: no contact to resolve.
        return ProjectileFate::Keep;
    }

    match kind {
        ProjectileKind::Standard => ProjectileFate::Destroy,
        ProjectileKind::Sniper => {
            let Ok(mut state) = world.get::<&mut ProjectileState>(entity) else {
                return ProjectileFate::Keep;
            };
            if state.pierce_budget > 0 {
                state.pierce_budget -= 1;
            }
            // -1 pierces forever; reaching exactly 0 forces destruction.
            if state.destroy_on_hit || state.pierce_budget == 0 {
                ProjectileFate::Destroy
            } else {
                ProjectileFate::Keep
            }
        }
    }
}

/// Apply damage to a player's tank: shield absorption first (a full
/// short-circuit), then health, then the death chain. Returns false if
/// the tank is dead or missing and the hit had no target.
#[allow(clippy::too_many_arguments)]
pub fn take_damage(
    world: &mut World,
    victim: PlayerId,
    amount: i32,
    attacker: PlayerId,
    current_tick: u64,
    config: &MatchConfig,
    score: &mut ScoreBoard,
    respawns: &mut RespawnQueue,
    phase: &mut MatchPhase,
    winner: &mut Option<PlayerId>,
    fx: &mut Vec<FxEvent>,
) -> bool {
    let mut died_at = None;
    let mut landed = false;

    for (_entity, (combatant, state, pos, vel)) in world.query_mut::<(
        &mut Combatant,
        &mut AbilityState,
        &Position,
        &mut Velocity,
    )>() {
        if combatant.player_id != victim {
            continue;
        }
        if !combatant.alive {
            return false;
        }
        landed = true;

        if abilities::try_absorb(state) {
            fx.push(FxEvent::ShieldBlocked {
                player_id: victim,
                position: pos.0,
            });
            return true;
        }

        combatant.hp = (combatant.hp - amount).max(0);
        if combatant.hp == 0 {
            combatant.alive = false;
            vel.0 = Vec2::ZERO;
            died_at = Some(pos.0);
        }
        break;
    }

    if let Some(position) = died_at {
        debug!(victim = %victim, attacker = %attacker, "tank destroyed");
        fx.push(FxEvent::TankDestroyed {
            victim,
            attacker,
            position,
        });
        director::on_combatant_destroyed(
            victim,
            attacker,
            current_tick,
            config,
            score,
            respawns,
            phase,
            winner,
            fx,
        );
    }
    landed
}

/// Look up a live projectile entity by its engine-assigned id.
fn find_projectile(world: &mut World, projectile_id: u32) -> Option<hecs::Entity> {
    world
        .query_mut::<&ProjectileState>()
        .into_iter()
        .find(|(_, state)| state.projectile_id == projectile_id)
        .map(|(entity, _)| entity)
}
