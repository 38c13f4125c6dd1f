//! Court, Round and slot references for one draw outcome.

use crate::models::player::{Pair, Player};
use serde::{Deserialize, Serialize};

/// Players per court (2 vs 2).
pub const COURT_SIZE: usize = 4;

/// One court: slots 0-1 are pair A, slots 2-3 are pair B.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Court {
    pub slots: [Player; COURT_SIZE],
}

impl Court {
    pub fn new(slots: [Player; COURT_SIZE]) -> Self {
        Self { slots }
    }

    /// Build a court from exactly four players. Returns `None` for any other length.
    pub fn from_chunk(chunk: &[Player]) -> Option<Self> {
        let slots: [Player; COURT_SIZE] = chunk.to_vec().try_into().ok()?;
        Some(Self { slots })
    }

    /// The two pairs on this court, side A first.
    pub fn pairs(&self) -> [Pair; 2] {
        let s = &self.slots;
        [
            Pair::new(s[0].clone(), s[1].clone()),
            Pair::new(s[2].clone(), s[3].clone()),
        ]
    }
}

/// A whole round: court assignments plus the players sitting out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub courts: Vec<Court>,
    pub waiting: Vec<Player>,
}

impl Round {
    /// Every pair formed on the courts of this round.
    pub fn pairs(&self) -> Vec<Pair> {
        self.courts.iter().flat_map(|c| c.pairs()).collect()
    }

    /// Every player in the round, courts first (in slot order) then waiting.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.courts
            .iter()
            .flat_map(|c| c.slots.iter())
            .chain(self.waiting.iter())
    }

    fn slot(&self, slot: SlotRef) -> Option<&Player> {
        match slot {
            SlotRef::Court { court, position } => self.courts.get(court)?.slots.get(position),
            SlotRef::Waiting { index } => self.waiting.get(index),
        }
    }

    fn slot_mut(&mut self, slot: SlotRef) -> Option<&mut Player> {
        match slot {
            SlotRef::Court { court, position } => {
                self.courts.get_mut(court)?.slots.get_mut(position)
            }
            SlotRef::Waiting { index } => self.waiting.get_mut(index),
        }
    }

    /// Player occupying `slot`, if the slot exists.
    pub fn occupant_at(&self, slot: SlotRef) -> Option<&Player> {
        self.slot(slot)
    }

    /// Exchange the occupants of two slots. Returns `false` (and changes nothing) if either
    /// slot does not exist.
    pub fn swap(&mut self, a: SlotRef, b: SlotRef) -> bool {
        let (Some(first), Some(second)) = (self.slot(a).cloned(), self.slot(b).cloned()) else {
            return false;
        };
        if let Some(s) = self.slot_mut(a) {
            *s = second;
        }
        if let Some(s) = self.slot_mut(b) {
            *s = first;
        }
        true
    }
}

/// Reference to one occupied position: a court slot (court index, position 0-3) or a
/// waiting slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotRef {
    Court { court: usize, position: usize },
    Waiting { index: usize },
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotRef::Court { court, position } => {
                write!(f, "court {} position {}", court + 1, position + 1)
            }
            SlotRef::Waiting { index } => write!(f, "waiting slot {}", index + 1),
        }
    }
}
