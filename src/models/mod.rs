//! Data structures for a badminton session: players, rounds, history, board and timer.

mod board;
mod history;
mod player;
mod roster;
mod round;
mod session;
mod timer;

pub use board::{BoardState, SelectOutcome, Selection};
pub use history::{HistoryEntry, HistoryLog, HISTORY_DEPTH};
pub use player::{normalize_name, Pair, Player};
pub use roster::Roster;
pub use round::{Court, Round, SlotRef, COURT_SIZE};
pub use session::{BaseRoster, DrawMode, SessionError, MAX_COURTS};
pub use timer::{
    format_mm_ss, Alarm, RoundTimer, TimerEvent, TimerSetting, ALARM_RING_SECS,
    DEFAULT_ROUND_SECS,
};
