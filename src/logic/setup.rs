//! Setup phase: roster replacement, seed selection, and reset.

use crate::models::{
    select_seeds_status, DrawPhase, DrawState, RosterStatus, Team, TeamId, SEED_COUNT,
};

/// Toggle a team in the seed selection (saturating at [`SEED_COUNT`]).
///
/// Only valid in SeedSelection while no draw is running. Selected ids are removed;
/// unselected ids are added if fewer than 4 are selected. Unknown ids are ignored.
/// Returns true if the selection changed.
pub fn toggle_seed(state: &mut DrawState, team_id: TeamId) -> bool {
    if state.phase != DrawPhase::SeedSelection || state.drawing {
        return false;
    }
    if let Some(idx) = state.seed_ids.iter().position(|&id| id == team_id) {
        state.seed_ids.remove(idx);
    } else if state.seed_ids.len() < SEED_COUNT && state.team(team_id).is_some() {
        state.seed_ids.push(team_id);
    } else {
        return false;
    }
    log::debug!("Seed selection now {:?}", state.seed_ids);
    state.status = select_seeds_status(state.seed_ids.len());
    true
}

/// Reset to SeedSelection: clears seeds, slots, history, spotlight and celebration.
///
/// Rejected while a draw is running. Returns true if the reset happened.
pub fn reset_draw(state: &mut DrawState) -> bool {
    if state.drawing {
        return false;
    }
    state.seed_ids.clear();
    for group in &mut state.groups {
        group.clear();
    }
    state.history.clear();
    state.spotlight = None;
    state.celebrating = false;
    // Invalidates deferred clears scheduled by the previous cycle.
    state.cycle_id = None;
    state.phase = DrawPhase::SeedSelection;
    state.status = select_seeds_status(0);
    true
}

/// Replace the roster with freshly loaded teams and reset the draw.
///
/// Rejected while a draw is running. Returns true if the roster was replaced.
pub fn replace_roster(state: &mut DrawState, teams: Vec<Team>) -> bool {
    if state.drawing {
        return false;
    }
    state.teams = teams;
    state.roster_status = RosterStatus::Loaded;
    reset_draw(state)
}

/// Record a failed roster load so the operator can retry. Existing teams are kept.
pub fn mark_roster_failed(state: &mut DrawState, reason: impl Into<String>) {
    let reason = reason.into();
    // A running draw keeps its own status line.
    if !state.drawing {
        state.status = format!("{} Retry to load the teams again.", reason);
    }
    state.roster_status = RosterStatus::Failed(reason);
}
