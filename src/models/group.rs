//! Group, GroupSlot, and the fixed labels/positions of the 4x3 layout.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Label of one of the four groups. Also the fixed order groups are drawn in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum GroupLabel {
    A,
    B,
    C,
    D,
}

impl GroupLabel {
    /// All groups, in draw order.
    pub const ALL: [GroupLabel; 4] = [GroupLabel::A, GroupLabel::B, GroupLabel::C, GroupLabel::D];
}

impl std::fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupLabel::A => "A",
            GroupLabel::B => "B",
            GroupLabel::C => "C",
            GroupLabel::D => "D",
        };
        f.write_str(s)
    }
}

/// Slot position inside a group. Serialized as its number (1, 2 or 3).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SlotPosition {
    /// Reserved for a seed team.
    Seed,
    Second,
    Third,
}

impl SlotPosition {
    /// All positions, in the order the rounds fill them.
    pub const ALL: [SlotPosition; 3] = [SlotPosition::Seed, SlotPosition::Second, SlotPosition::Third];

    pub fn number(self) -> u8 {
        match self {
            SlotPosition::Seed => 1,
            SlotPosition::Second => 2,
            SlotPosition::Third => 3,
        }
    }
}

impl From<SlotPosition> for u8 {
    fn from(position: SlotPosition) -> Self {
        position.number()
    }
}

impl TryFrom<u8> for SlotPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SlotPosition::Seed),
            2 => Ok(SlotPosition::Second),
            3 => Ok(SlotPosition::Third),
            other => Err(format!("slot position must be 1, 2 or 3 (got {})", other)),
        }
    }
}

impl std::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One cell of a group. `team` is None until the round for this position assigns it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupSlot {
    pub position: SlotPosition,
    pub team: Option<Team>,
}

/// A group: its label and exactly three slots in position order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: GroupLabel,
    pub slots: Vec<GroupSlot>,
}

impl Group {
    /// Create an empty group with slots 1..=3.
    pub fn new(label: GroupLabel) -> Self {
        Self {
            label,
            slots: SlotPosition::ALL
                .iter()
                .map(|&position| GroupSlot { position, team: None })
                .collect(),
        }
    }

    pub fn slot(&self, position: SlotPosition) -> Option<&GroupSlot> {
        self.slots.iter().find(|s| s.position == position)
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> Option<&mut GroupSlot> {
        self.slots.iter_mut().find(|s| s.position == position)
    }

    /// Team at the given position, if drawn.
    pub fn team_at(&self, position: SlotPosition) -> Option<&Team> {
        self.slot(position).and_then(|s| s.team.as_ref())
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.slots
            .iter()
            .any(|s| s.team.as_ref().is_some_and(|t| t.id == team_id))
    }

    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.team.is_some()).count()
    }

    /// Empty every slot (reset / start of a new cycle).
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.team = None;
        }
    }
}
