//! Draw cycle: start, pool partitioning, slot assignment, and completion.
//!
//! These are the synchronous steps between the engine's suspension points. The engine
//! interleaves them with the reveal animation; nothing here sleeps.

use crate::models::{
    DrawCycleId, DrawError, DrawHistoryEntry, DrawPhase, DrawState, GroupLabel, SlotPosition,
    Team,
};
use chrono::Utc;
use uuid::Uuid;

/// Start a draw cycle if the seeds are ready.
///
/// Requires SeedSelection, exactly four seeds, and no draw in progress; otherwise returns
/// None and leaves the state untouched. On success sets the drawing guard, clears history,
/// spotlight and every slot, moves to SeedDraw, and returns the new cycle id.
pub fn begin_draw(state: &mut DrawState) -> Option<DrawCycleId> {
    if !state.can_confirm() {
        return None;
    }
    let cycle_id = Uuid::new_v4();
    state.drawing = true;
    state.cycle_id = Some(cycle_id);
    state.history.clear();
    state.spotlight = None;
    state.celebrating = false;
    for group in &mut state.groups {
        group.clear();
    }
    state.phase = DrawPhase::SeedDraw;
    state.status = String::from("Drawing seed teams...");
    Some(cycle_id)
}

/// Seed teams, in roster order. Seed ids missing from the roster are skipped.
pub fn seed_pool(state: &DrawState) -> Vec<Team> {
    state
        .teams
        .iter()
        .filter(|t| state.is_seed(t.id))
        .cloned()
        .collect()
}

/// Every non-seed team, in roster order.
pub fn regular_pool(state: &DrawState) -> Vec<Team> {
    state
        .teams
        .iter()
        .filter(|t| !state.is_seed(t.id))
        .cloned()
        .collect()
}

/// Fail with PoolTooSmall if `pool` cannot fill one slot in every group.
pub fn ensure_pool_covers_groups(pool: &[Team]) -> Result<(), DrawError> {
    let needed = GroupLabel::ALL.len();
    if pool.len() < needed {
        return Err(DrawError::PoolTooSmall {
            needed,
            available: pool.len(),
        });
    }
    Ok(())
}

/// Move from the seed round to the regular rounds.
pub fn begin_regular_rounds(state: &mut DrawState) {
    state.phase = DrawPhase::RegularDraw;
    state.status = String::from("Drawing the remaining teams...");
}

/// Status shown while a slot is being revealed.
pub fn announce_slot(state: &mut DrawState, group: GroupLabel, position: SlotPosition) {
    state.status = format!("Drawing group {}, slot {}...", group, position);
}

/// Commit `team` into (group, position) and prepend a history entry.
///
/// Fails without mutating anything if the group or slot is missing, the slot is already
/// filled, or the team already sits in another slot.
pub fn assign_slot(
    state: &mut DrawState,
    group: GroupLabel,
    position: SlotPosition,
    team: Team,
) -> Result<(), DrawError> {
    if state.is_drawn(team.id) {
        return Err(DrawError::TeamAlreadyDrawn(team.id));
    }
    let slot = state
        .group_mut(group)
        .ok_or(DrawError::GroupNotFound(group))?
        .slot_mut(position)
        .ok_or(DrawError::SlotNotFound { group, position })?;
    if slot.team.is_some() {
        return Err(DrawError::SlotOccupied { group, position });
    }
    slot.team = Some(team.clone());

    log::info!("Group {} slot {}: {}", group, position, team);
    state.history.insert(
        0,
        DrawHistoryEntry {
            group,
            position,
            team,
            drawn_at: Utc::now(),
        },
    );
    Ok(())
}

/// Finish a successful cycle: Complete, drawing guard off, celebration raised.
pub fn finish_draw(state: &mut DrawState) {
    state.phase = DrawPhase::Complete;
    state.drawing = false;
    state.celebrating = true;
    state.status = String::from("Draw complete! All groups are set.");
}

/// Abort the cycle after `err`: phase and filled slots stay as they are.
pub fn abort_draw(state: &mut DrawState, err: &DrawError) {
    state.drawing = false;
    state.status = err.to_string();
}

/// Clear the spotlight if `cycle_id` is still the current cycle.
pub fn clear_spotlight_for(state: &mut DrawState, cycle_id: DrawCycleId) -> bool {
    if state.cycle_id != Some(cycle_id) || state.spotlight.is_none() {
        return false;
    }
    state.spotlight = None;
    true
}

/// Lower the celebration flag if `cycle_id` is still the current cycle.
pub fn clear_celebration_for(state: &mut DrawState, cycle_id: DrawCycleId) -> bool {
    if state.cycle_id != Some(cycle_id) || !state.celebrating {
        return false;
    }
    state.celebrating = false;
    true
}
