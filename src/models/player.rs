//! Player names and doubles pairs.

use serde::{Deserialize, Serialize};

/// A player is identified by their display name (exact, case-sensitive match).
pub type Player = String;

/// Trim a raw name from user input. Returns `None` when nothing is left.
pub fn normalize_name(raw: &str) -> Option<Player> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Two players on the same side of the net. Unordered: `Pair::new(a, b) == Pair::new(b, a)`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Player; 2]", into = "[Player; 2]")]
pub struct Pair {
    // Kept sorted so equality and hashing ignore order.
    low: Player,
    high: Player,
}

impl Pair {
    pub fn new(a: impl Into<Player>, b: impl Into<Player>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn contains(&self, player: &str) -> bool {
        self.low == player || self.high == player
    }
}

impl From<[Player; 2]> for Pair {
    fn from([a, b]: [Player; 2]) -> Self {
        Pair::new(a, b)
    }
}

impl From<Pair> for [Player; 2] {
    fn from(p: Pair) -> Self {
        [p.low, p.high]
    }
}
