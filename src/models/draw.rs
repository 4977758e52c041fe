//! DrawState, DrawPhase, history, and draw errors.

use crate::models::group::{Group, GroupLabel, SlotPosition};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of seed teams (one per group).
pub const SEED_COUNT: usize = 4;

/// Slots across all groups (4 groups x 3 positions).
pub const TOTAL_SLOTS: usize = 12;

/// Number of rows the roster is expected to contain. A mismatch is only a warning.
pub const EXPECTED_ROSTER_SIZE: usize = 12;

/// Errors that can occur while loading the roster or running a draw cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// The roster resource could not be read or parsed.
    RosterLoad(String),
    /// A referenced group does not exist.
    GroupNotFound(GroupLabel),
    /// A referenced slot position does not exist in the group.
    SlotNotFound { group: GroupLabel, position: SlotPosition },
    /// The slot was already filled this cycle.
    SlotOccupied { group: GroupLabel, position: SlotPosition },
    /// The team is already placed in another slot.
    TeamAlreadyDrawn(TeamId),
    /// The reveal animator was asked to pick from an empty pool.
    EmptyPool,
    /// A round's pool is smaller than the number of groups it must fill.
    PoolTooSmall { needed: usize, available: usize },
    /// The pool ran out before every group received a team.
    PoolExhausted { group: GroupLabel, position: SlotPosition },
}

/// Coarse classification of a [`DrawError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawErrorKind {
    /// Recoverable: retry loading the roster.
    RosterLoad,
    /// Internal consistency fault; aborts the current cycle.
    InvalidDrawState,
    /// Not enough teams to fill a round; aborts the current cycle.
    PoolExhaustion,
}

impl DrawError {
    pub fn kind(&self) -> DrawErrorKind {
        match self {
            DrawError::RosterLoad(_) => DrawErrorKind::RosterLoad,
            DrawError::GroupNotFound(_)
            | DrawError::SlotNotFound { .. }
            | DrawError::SlotOccupied { .. }
            | DrawError::TeamAlreadyDrawn(_)
            | DrawError::EmptyPool => DrawErrorKind::InvalidDrawState,
            DrawError::PoolTooSmall { .. } | DrawError::PoolExhausted { .. } => {
                DrawErrorKind::PoolExhaustion
            }
        }
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::RosterLoad(reason) => write!(f, "Could not load the team list: {}", reason),
            DrawError::GroupNotFound(group) => write!(f, "Group {} not found", group),
            DrawError::SlotNotFound { group, position } => {
                write!(f, "Slot {} not found in group {}", position, group)
            }
            DrawError::SlotOccupied { group, position } => {
                write!(f, "Slot {} in group {} is already filled", position, group)
            }
            DrawError::TeamAlreadyDrawn(id) => write!(f, "Team #{} has already been drawn", id),
            DrawError::EmptyPool => write!(f, "Cannot pick a team from an empty pool"),
            DrawError::PoolTooSmall { needed, available } => write!(
                f,
                "Not enough teams to draw: need {}, only {} available",
                needed, available
            ),
            DrawError::PoolExhausted { group, position } => write!(
                f,
                "No teams left to draw for group {}, slot {}",
                group, position
            ),
        }
    }
}

impl std::error::Error for DrawError {}

/// Identifier of one draw cycle (one `confirm_seeds` run).
pub type DrawCycleId = Uuid;

/// Current phase of the draw.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    /// Operator is picking the four seed teams.
    #[default]
    SeedSelection,
    /// Seeds are being drawn into slot 1 of each group.
    SeedDraw,
    /// Non-seed teams are being drawn into slots 2 and 3.
    RegularDraw,
    /// Every slot is filled.
    Complete,
}

/// Whether the roster has been loaded.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum RosterStatus {
    #[default]
    NotLoaded,
    Loaded,
    /// Load failed; the operator may retry.
    Failed(String),
}

/// One committed assignment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawHistoryEntry {
    pub group: GroupLabel,
    pub position: SlotPosition,
    pub team: Team,
    pub drawn_at: DateTime<Utc>,
}

/// Full draw state: roster, seeds, groups, history, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawState {
    /// Teams from the roster, in roster order.
    pub teams: Vec<Team>,
    pub roster_status: RosterStatus,
    /// Selected seed ids, in selection order (at most [`SEED_COUNT`]).
    pub seed_ids: Vec<TeamId>,
    pub phase: DrawPhase,
    /// Always the four groups A..D.
    pub groups: Vec<Group>,
    /// Most recent assignment first.
    pub history: Vec<DrawHistoryEntry>,
    /// True while a draw cycle is running.
    pub drawing: bool,
    /// Team currently highlighted by the reveal animation.
    pub spotlight: Option<Team>,
    /// Human-readable status line for the operator.
    pub status: String,
    /// Raised briefly after a successful cycle.
    pub celebrating: bool,
    /// Cycle that last started; deferred clears only apply while it is current.
    pub cycle_id: Option<DrawCycleId>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawState {
    /// Create an empty state in SeedSelection with no roster.
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            roster_status: RosterStatus::NotLoaded,
            seed_ids: Vec::new(),
            phase: DrawPhase::SeedSelection,
            groups: GroupLabel::ALL.iter().map(|&label| Group::new(label)).collect(),
            history: Vec::new(),
            drawing: false,
            spotlight: None,
            status: String::from("Loading teams..."),
            celebrating: false,
            cycle_id: None,
        }
    }

    /// Create a state with a loaded roster. Still in SeedSelection.
    pub fn with_teams(teams: Vec<Team>) -> Self {
        Self {
            teams,
            roster_status: RosterStatus::Loaded,
            status: select_seeds_status(0),
            ..Self::new()
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn is_seed(&self, id: TeamId) -> bool {
        self.seed_ids.contains(&id)
    }

    pub fn group(&self, label: GroupLabel) -> Option<&Group> {
        self.groups.iter().find(|g| g.label == label)
    }

    pub fn group_mut(&mut self, label: GroupLabel) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.label == label)
    }

    /// True if the team already sits in any slot.
    pub fn is_drawn(&self, id: TeamId) -> bool {
        self.groups.iter().any(|g| g.contains(id))
    }

    pub fn filled_slots(&self) -> usize {
        self.groups.iter().map(Group::filled_slots).sum()
    }

    /// Count of empty slots across all groups.
    pub fn remaining_slots(&self) -> usize {
        TOTAL_SLOTS - self.filled_slots()
    }

    /// Confirm is only offered with exactly four seeds, in SeedSelection, while idle.
    pub fn can_confirm(&self) -> bool {
        self.phase == DrawPhase::SeedSelection
            && !self.drawing
            && self.seed_ids.len() == SEED_COUNT
    }
}

/// Status line shown while seeds are being picked.
pub(crate) fn select_seeds_status(selected: usize) -> String {
    if selected == SEED_COUNT {
        String::from("Seeds ready. Confirm to start the draw.")
    } else {
        format!("Select {} seed teams ({}/{} selected)", SEED_COUNT, selected, SEED_COUNT)
    }
}
