//! Session-wide settings, the saved base roster, and SessionError.

use crate::models::player::Player;
use crate::models::round::SlotRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most courts a session may use.
pub const MAX_COURTS: u32 = 6;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Not enough players to draw (need at least 4).
    InsufficientPlayers { have: usize },
    /// No base roster has been saved yet.
    NoSavedBase,
    /// The roster is empty, so there is nothing to save as base.
    NoRosterToSave,
    /// No round has been drawn yet.
    NoRound,
    /// The clicked slot does not exist in the current round.
    SlotOutOfRange(SlotRef),
    /// Court count must be between 1 and MAX_COURTS.
    InvalidCourtCount(u32),
    /// Custom round duration must be at least one minute.
    InvalidDuration,
    /// The uploaded roster could not be read.
    Import(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InsufficientPlayers { have } => {
                write!(f, "Need at least 4 players to draw (have {})", have)
            }
            SessionError::NoSavedBase => write!(f, "No base roster has been saved"),
            SessionError::NoRosterToSave => write!(f, "There are no players to save"),
            SessionError::NoRound => write!(f, "No round has been drawn yet"),
            SessionError::SlotOutOfRange(slot) => write!(f, "No player at {}", slot),
            SessionError::InvalidCourtCount(n) => {
                write!(f, "Court count must be between 1 and {} (got {})", MAX_COURTS, n)
            }
            SessionError::InvalidDuration => write!(f, "Round duration must be at least 1 minute"),
            SessionError::Import(msg) => write!(f, "Could not read roster: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// How a round is drawn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Uniform shuffle of the whole roster.
    #[default]
    Normal,
    /// Waiting priority from the last two rounds plus anti-repeat pairing.
    Smart,
}

/// Snapshot of the roster saved for reuse at a later session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseRoster {
    pub names: Vec<Player>,
    pub saved_at: DateTime<Utc>,
}

impl BaseRoster {
    pub fn new(names: Vec<Player>) -> Self {
        Self {
            names,
            saved_at: Utc::now(),
        }
    }
}
