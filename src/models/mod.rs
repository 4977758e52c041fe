//! Data structures for the group draw: teams, groups, draw state.

mod draw;
mod group;
mod team;

pub(crate) use draw::select_seeds_status;
pub use draw::{
    DrawCycleId, DrawError, DrawErrorKind, DrawHistoryEntry, DrawPhase, DrawState, RosterStatus,
    EXPECTED_ROSTER_SIZE, SEED_COUNT, TOTAL_SLOTS,
};
pub use group::{Group, GroupLabel, GroupSlot, SlotPosition};
pub use team::{Team, TeamId};
