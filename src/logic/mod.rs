//! Session logic: the court draw, roster import, and the organizer controller.

mod draw;
mod import;
mod organizer;

pub use draw::{courts_in_play, draw_round, select_waiting, DrawOutcome, MAX_PAIRING_ATTEMPTS};
pub use import::{parse_roster_csv, roster_to_csv};
pub use organizer::{Organizer, SessionView, DEFAULT_COURT_COUNT};
