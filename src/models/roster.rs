//! Ordered list of active players.

use crate::models::player::{normalize_name, Player};
use serde::{Deserialize, Serialize};

/// Active players in insertion order. Names are unique (case-sensitive).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    names: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a list of names, dropping blanks and later duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.as_ref());
        }
        roster
    }

    /// Add a player. Returns `false` (no-op) when the trimmed name is empty or already present.
    pub fn add(&mut self, raw: &str) -> bool {
        let Some(name) = normalize_name(raw) else {
            return false;
        };
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove the matching player. Returns `false` if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.names.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replace the whole roster (blanks and duplicates are dropped).
    pub fn replace_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        *self = Self::from_names(names);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Player] {
        &self.names
    }
}
