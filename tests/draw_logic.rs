//! Integration tests for the synchronous draw steps: seed selection, cycle start,
//! slot assignment, reset, and roster replacement.

use group_draw_web::{
    abort_draw, assign_slot, begin_draw, clear_celebration_for, clear_spotlight_for,
    ensure_pool_covers_groups, finish_draw, mark_roster_failed, regular_pool, replace_roster,
    reset_draw, seed_pool, toggle_seed, DrawError, DrawErrorKind, DrawPhase, DrawState,
    GroupLabel, RosterStatus, SlotPosition, Team,
};
use uuid::Uuid;

fn teams(n: u32) -> Vec<Team> {
    (1..=n).map(|i| Team::new(i, format!("Team {i}"))).collect()
}

fn state_with_teams(n: u32) -> DrawState {
    DrawState::with_teams(teams(n))
}

fn state_with_seeds(n: u32, seeds: &[u32]) -> DrawState {
    let mut s = state_with_teams(n);
    for &id in seeds {
        assert!(toggle_seed(&mut s, id));
    }
    s
}

#[test]
fn toggle_adds_then_removes() {
    let mut s = state_with_teams(12);
    assert!(toggle_seed(&mut s, 3));
    assert_eq!(s.seed_ids, vec![3]);
    assert!(toggle_seed(&mut s, 3));
    assert!(s.seed_ids.is_empty());
}

#[test]
fn toggle_saturates_at_four_seeds() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    assert!(!toggle_seed(&mut s, 5));
    assert_eq!(s.seed_ids, vec![1, 2, 3, 4]);
    // Removing still works once saturated.
    assert!(toggle_seed(&mut s, 2));
    assert!(toggle_seed(&mut s, 5));
    assert_eq!(s.seed_ids, vec![1, 3, 4, 5]);
}

#[test]
fn toggle_sequence_never_exceeds_four_or_duplicates() {
    let mut s = state_with_teams(12);
    let sequence = [1, 2, 1, 3, 3, 4, 5, 6, 2, 7, 8, 12, 12, 9, 4, 10, 11, 1];
    for id in sequence {
        toggle_seed(&mut s, id);
        assert!(s.seed_ids.len() <= 4);
        let mut sorted = s.seed_ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), s.seed_ids.len());
    }
}

#[test]
fn toggle_ignores_unknown_team() {
    let mut s = state_with_teams(12);
    assert!(!toggle_seed(&mut s, 99));
    assert!(s.seed_ids.is_empty());
}

#[test]
fn toggle_rejected_outside_seed_selection_or_while_drawing() {
    let mut s = state_with_teams(12);
    s.drawing = true;
    assert!(!toggle_seed(&mut s, 1));

    let mut s = state_with_teams(12);
    s.phase = DrawPhase::Complete;
    assert!(!toggle_seed(&mut s, 1));
    assert!(s.seed_ids.is_empty());
}

#[test]
fn begin_draw_requires_exactly_four_seeds() {
    let mut s = state_with_seeds(12, &[1, 2, 3]);
    let status_before = s.status.clone();
    assert!(begin_draw(&mut s).is_none());
    assert_eq!(s.phase, DrawPhase::SeedSelection);
    assert!(!s.drawing);
    assert_eq!(s.status, status_before);
    assert_eq!(s.remaining_slots(), 12);
}

#[test]
fn begin_draw_rejected_while_drawing() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    s.drawing = true;
    assert!(begin_draw(&mut s).is_none());
    assert_eq!(s.phase, DrawPhase::SeedSelection);
}

#[test]
fn begin_draw_clears_previous_cycle_and_enters_seed_draw() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    assign_slot(&mut s, GroupLabel::A, SlotPosition::Seed, Team::new(1, "Team 1")).unwrap();
    s.spotlight = Some(Team::new(1, "Team 1"));

    let cycle = begin_draw(&mut s).expect("seeds are ready");
    assert_eq!(s.cycle_id, Some(cycle));
    assert_eq!(s.phase, DrawPhase::SeedDraw);
    assert!(s.drawing);
    assert!(s.history.is_empty());
    assert!(s.spotlight.is_none());
    assert_eq!(s.remaining_slots(), 12);
}

#[test]
fn pools_partition_roster_by_seed_set() {
    let s = state_with_seeds(12, &[2, 5, 9, 12]);
    let seeds: Vec<u32> = seed_pool(&s).iter().map(|t| t.id).collect();
    let regular: Vec<u32> = regular_pool(&s).iter().map(|t| t.id).collect();
    assert_eq!(seeds, vec![2, 5, 9, 12]);
    assert_eq!(regular, vec![1, 3, 4, 6, 7, 8, 10, 11]);
}

#[test]
fn pool_smaller_than_group_count_is_pool_exhaustion() {
    let err = ensure_pool_covers_groups(&teams(3)).unwrap_err();
    assert_eq!(err, DrawError::PoolTooSmall { needed: 4, available: 3 });
    assert_eq!(err.kind(), DrawErrorKind::PoolExhaustion);
    assert!(ensure_pool_covers_groups(&teams(4)).is_ok());
}

#[test]
fn assign_slot_fills_once_and_prepends_history() {
    let mut s = state_with_teams(12);
    assign_slot(&mut s, GroupLabel::A, SlotPosition::Seed, Team::new(1, "Team 1")).unwrap();
    assert_eq!(s.remaining_slots(), 11);
    assign_slot(&mut s, GroupLabel::B, SlotPosition::Seed, Team::new(2, "Team 2")).unwrap();
    assert_eq!(s.remaining_slots(), 10);

    assert_eq!(s.history.len(), 2);
    assert_eq!(s.history[0].team.id, 2);
    assert_eq!(s.history[0].group, GroupLabel::B);
    assert_eq!(s.history[1].team.id, 1);
    assert_eq!(
        s.group(GroupLabel::A).unwrap().team_at(SlotPosition::Seed).map(|t| t.id),
        Some(1)
    );
}

#[test]
fn assign_slot_rejects_occupied_slot_and_repeated_team() {
    let mut s = state_with_teams(12);
    assign_slot(&mut s, GroupLabel::C, SlotPosition::Second, Team::new(7, "Team 7")).unwrap();

    let err = assign_slot(&mut s, GroupLabel::C, SlotPosition::Second, Team::new(8, "Team 8"))
        .unwrap_err();
    assert_eq!(
        err,
        DrawError::SlotOccupied { group: GroupLabel::C, position: SlotPosition::Second }
    );
    assert_eq!(err.kind(), DrawErrorKind::InvalidDrawState);

    let err = assign_slot(&mut s, GroupLabel::D, SlotPosition::Third, Team::new(7, "Team 7"))
        .unwrap_err();
    assert_eq!(err, DrawError::TeamAlreadyDrawn(7));

    // Failed assignments leave no trace.
    assert_eq!(s.history.len(), 1);
    assert_eq!(s.remaining_slots(), 11);
}

#[test]
fn assign_slot_reports_missing_group() {
    let mut s = state_with_teams(12);
    s.groups.retain(|g| g.label != GroupLabel::D);
    let err = assign_slot(&mut s, GroupLabel::D, SlotPosition::Seed, Team::new(1, "Team 1"))
        .unwrap_err();
    assert_eq!(err, DrawError::GroupNotFound(GroupLabel::D));
    assert_eq!(err.kind(), DrawErrorKind::InvalidDrawState);
}

#[test]
fn abort_keeps_phase_and_filled_slots() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    begin_draw(&mut s).unwrap();
    assign_slot(&mut s, GroupLabel::A, SlotPosition::Seed, Team::new(1, "Team 1")).unwrap();

    let err = DrawError::PoolExhausted { group: GroupLabel::B, position: SlotPosition::Seed };
    abort_draw(&mut s, &err);
    assert_eq!(s.phase, DrawPhase::SeedDraw);
    assert!(!s.drawing);
    assert_eq!(s.status, err.to_string());
    assert_eq!(s.filled_slots(), 1);
}

#[test]
fn reset_clears_everything() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    begin_draw(&mut s).unwrap();
    assign_slot(&mut s, GroupLabel::A, SlotPosition::Seed, Team::new(1, "Team 1")).unwrap();
    s.spotlight = Some(Team::new(1, "Team 1"));
    finish_draw(&mut s);

    assert!(reset_draw(&mut s));
    assert_eq!(s.phase, DrawPhase::SeedSelection);
    assert!(s.seed_ids.is_empty());
    assert_eq!(s.remaining_slots(), 12);
    assert!(s.history.is_empty());
    assert!(s.spotlight.is_none());
    assert!(!s.celebrating);
    assert!(s.cycle_id.is_none());
}

#[test]
fn reset_rejected_while_drawing() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    begin_draw(&mut s).unwrap();
    assert!(!reset_draw(&mut s));
    assert_eq!(s.phase, DrawPhase::SeedDraw);
    assert_eq!(s.seed_ids.len(), 4);
}

#[test]
fn deferred_clears_only_apply_to_current_cycle() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    let cycle = begin_draw(&mut s).unwrap();
    s.spotlight = Some(Team::new(1, "Team 1"));
    finish_draw(&mut s);

    let stale = Uuid::new_v4();
    assert!(!clear_spotlight_for(&mut s, stale));
    assert!(!clear_celebration_for(&mut s, stale));
    assert!(s.spotlight.is_some());
    assert!(s.celebrating);

    assert!(clear_spotlight_for(&mut s, cycle));
    assert!(clear_celebration_for(&mut s, cycle));
    assert!(s.spotlight.is_none());
    assert!(!s.celebrating);
}

#[test]
fn roster_failure_then_replacement() {
    let mut s = DrawState::new();
    mark_roster_failed(&mut s, "file not found");
    assert_eq!(s.roster_status, RosterStatus::Failed("file not found".to_string()));

    assert!(replace_roster(&mut s, teams(12)));
    assert_eq!(s.roster_status, RosterStatus::Loaded);
    assert_eq!(s.teams.len(), 12);
    assert_eq!(s.phase, DrawPhase::SeedSelection);
}

#[test]
fn replace_roster_rejected_while_drawing() {
    let mut s = state_with_seeds(12, &[1, 2, 3, 4]);
    begin_draw(&mut s).unwrap();
    assert!(!replace_roster(&mut s, teams(3)));
    assert_eq!(s.teams.len(), 12);
}

#[test]
fn slot_position_serializes_as_number() {
    assert_eq!(serde_json::to_string(&SlotPosition::Second).unwrap(), "2");
    let p: SlotPosition = serde_json::from_str("3").unwrap();
    assert_eq!(p, SlotPosition::Third);
    assert!(serde_json::from_str::<SlotPosition>("4").is_err());
}
