//! Live, user-editable view of the current round with two-click slot swapping.

use crate::models::round::{Round, SlotRef};
use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Pending manual selection between two clicks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "slot", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Empty,
    OneSelected(SlotRef),
}

/// What a slot click did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectOutcome {
    /// First click: the slot is now selected.
    Selected(SlotRef),
    /// Same slot clicked again: selection cancelled.
    Cancelled,
    /// Second, different slot: occupants exchanged.
    Swapped(SlotRef, SlotRef),
    /// Click on a slot that does not exist in the current round; nothing changed.
    Ignored,
}

/// Current round plus the pending selection. Empty until the first draw.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    round: Option<Round>,
    selection: Selection,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the round wholesale (after a draw) and clear any pending selection.
    pub fn replace(&mut self, round: Round) {
        self.round = Some(round);
        self.selection = Selection::Empty;
    }

    pub fn cancel_selection(&mut self) {
        self.selection = Selection::Empty;
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn occupant_at(&self, slot: SlotRef) -> Option<&Player> {
        self.round.as_ref()?.occupant_at(slot)
    }

    /// Two-click selection state machine:
    /// Empty -> OneSelected(slot); OneSelected(slot) + same slot -> Empty;
    /// OneSelected(a) + b -> swap(a, b), Empty.
    pub fn select_slot(&mut self, slot: SlotRef) -> SelectOutcome {
        if self.occupant_at(slot).is_none() {
            return SelectOutcome::Ignored;
        }
        match self.selection {
            Selection::Empty => {
                self.selection = Selection::OneSelected(slot);
                SelectOutcome::Selected(slot)
            }
            Selection::OneSelected(selected) if selected == slot => {
                self.selection = Selection::Empty;
                SelectOutcome::Cancelled
            }
            Selection::OneSelected(selected) => {
                self.swap(selected, slot);
                self.selection = Selection::Empty;
                SelectOutcome::Swapped(selected, slot)
            }
        }
    }

    /// Exchange the occupants of two slots (court or waiting). Never changes how many
    /// players are on each court or waiting.
    pub fn swap(&mut self, a: SlotRef, b: SlotRef) -> bool {
        match self.round.as_mut() {
            Some(round) => round.swap(a, b),
            None => false,
        }
    }
}
