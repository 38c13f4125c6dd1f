//! Badminton session organizer: library with models, the court draw and persistence.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    courts_in_play, draw_round, parse_roster_csv, roster_to_csv, select_waiting, DrawOutcome,
    Organizer, SessionView, DEFAULT_COURT_COUNT, MAX_PAIRING_ATTEMPTS,
};
pub use models::{
    Alarm, BaseRoster, BoardState, Court, DrawMode, HistoryEntry, HistoryLog, Pair, Player,
    Roster, Round, RoundTimer, SelectOutcome, Selection, SessionError, SlotRef, TimerEvent,
    TimerSetting, ALARM_RING_SECS, COURT_SIZE, DEFAULT_ROUND_SECS, HISTORY_DEPTH, MAX_COURTS,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
