//! Draw business logic: setup (seeds, reset, roster) and the draw cycle steps.

mod cycle;
mod setup;

pub use cycle::{
    abort_draw, announce_slot, assign_slot, begin_draw, begin_regular_rounds,
    clear_celebration_for, clear_spotlight_for, ensure_pool_covers_groups, finish_draw,
    regular_pool, seed_pool,
};
pub use setup::{mark_roster_failed, replace_roster, reset_draw, toggle_seed};
