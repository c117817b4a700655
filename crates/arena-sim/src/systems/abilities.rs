//! Ability state system — power-up application and timed expiry.
//!
//! All timed abilities are deadlines in ticks checked each tick;
//! re-applying a timed power-up overwrites the deadline (replace, never
//! extend), which is the cancel-and-restart the rules require.

use hecs::World;
use tracing::{debug, warn};

use arena_core::components::{AbilityState, Combatant, ShotgunMode};
use arena_core::enums::{PowerUpGrant, TimedAbility};
use arena_core::events::FxEvent;
use arena_core::types::{secs_to_ticks, PlayerId};

/// Apply a power-up grant to the named player's tank. A missing tank
/// is a warned no-op, never an error.
pub fn apply_grant(
    world: &mut World,
    player_id: PlayerId,
    grant: PowerUpGrant,
    current_tick: u64,
    fx: &mut Vec<FxEvent>,
) {
    let mut applied = false;
    for (_entity, (combatant, state)) in world.query_mut::<(&Combatant, &mut AbilityState)>() {
        if combatant.player_id != player_id {
            continue;
        }
        match grant {
            PowerUpGrant::Shotgun {
                pellets,
                spread_deg,
                duration_secs,
            } => apply_shotgun(state, pellets, spread_deg, duration_secs, current_tick),
            PowerUpGrant::SniperCharges { count } => apply_sniper_charges(state, count),
            PowerUpGrant::SniperTimed { duration_secs } => {
                apply_sniper_timed(state, duration_secs, current_tick)
            }
            PowerUpGrant::ShieldCharges { amount } => add_shield_charges(state, amount),
        }
        applied = true;
        break;
    }

    if applied {
        debug!(%player_id, ?grant, "power-up applied");
        fx.push(FxEvent::PickupCollected { player_id, grant });
    } else {
        warn!(%player_id, "power-up grant dropped: no tank for player");
    }
}

/// Enable shotgun mode, overwriting any live instance and its deadline.
pub fn apply_shotgun(
    state: &mut AbilityState,
    pellets: u32,
    spread_deg: f32,
    duration_secs: f32,
    current_tick: u64,
) {
    if pellets == 0 {
        warn!("shotgun pellet count 0 clamped to 1");
    }
    state.shotgun = Some(ShotgunMode {
        pellets: pellets.max(1),
        spread_deg: spread_deg.max(0.0),
        expires_at_tick: current_tick + secs_to_ticks(duration_secs),
    });
}

/// Add consumable sniper charges. Grants below one are clamped up.
pub fn apply_sniper_charges(state: &mut AbilityState, count: u32) {
    state.sniper_charges += count.max(1);
}

/// Enable timed sniper mode, overwriting any existing deadline.
pub fn apply_sniper_timed(state: &mut AbilityState, duration_secs: f32, current_tick: u64) {
    state.sniper_timed_until = Some(current_tick + secs_to_ticks(duration_secs));
}

/// Add shield charges to the always-present pool.
pub fn add_shield_charges(state: &mut AbilityState, amount: u32) {
    state.shield_charges += amount;
}

/// Atomic check-and-decrement of the shield pool. Returns true when a
/// charge absorbed the hit; the caller must then skip damage entirely.
pub fn try_absorb(state: &mut AbilityState) -> bool {
    if state.shield_charges == 0 {
        return false;
    }
    state.shield_charges -= 1;
    true
}

/// Whether timed sniper mode is live at `current_tick`.
pub fn sniper_timed_active(state: &AbilityState, current_tick: u64) -> bool {
    state
        .sniper_timed_until
        .is_some_and(|until| current_tick < until)
}

/// Whether shotgun mode is live at `current_tick`.
pub fn shotgun_active(state: &AbilityState, current_tick: u64) -> Option<ShotgunMode> {
    state
        .shotgun
        .filter(|mode| current_tick < mode.expires_at_tick)
}

/// Per-tick expiry: clear lapsed timed abilities.
pub fn expire(world: &mut World, current_tick: u64, fx: &mut Vec<FxEvent>) {
    for (_entity, (combatant, state)) in world.query_mut::<(&Combatant, &mut AbilityState)>() {
        if let Some(mode) = state.shotgun {
            if current_tick >= mode.expires_at_tick {
                state.shotgun = None;
                fx.push(FxEvent::AbilityExpired {
                    player_id: combatant.player_id,
                    ability: TimedAbility::Shotgun,
                });
            }
        }
        if let Some(until) = state.sniper_timed_until {
            if current_tick >= until {
                state.sniper_timed_until = None;
                fx.push(FxEvent::AbilityExpired {
                    player_id: combatant.player_id,
                    ability: TimedAbility::SniperTimed,
                });
            }
        }
    }
}
