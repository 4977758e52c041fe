//! Group draw web app: library with models, draw logic, the reveal animation, and the engine.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod reveal;
pub mod roster;

pub use config::{DrawTiming, RevealTiming, ServerConfig};
pub use engine::{ConfirmOutcome, DrawEngine};
pub use logic::{
    abort_draw, assign_slot, begin_draw, clear_celebration_for, clear_spotlight_for,
    ensure_pool_covers_groups, finish_draw, mark_roster_failed, regular_pool, replace_roster,
    reset_draw, seed_pool, toggle_seed,
};
pub use models::{
    DrawCycleId, DrawError, DrawErrorKind, DrawHistoryEntry, DrawPhase, DrawState, Group,
    GroupLabel, GroupSlot, RosterStatus, SlotPosition, Team, TeamId, EXPECTED_ROSTER_SIZE,
    SEED_COUNT, TOTAL_SLOTS,
};
pub use reveal::RevealAnimator;
pub use roster::{load_roster, parse_roster};
