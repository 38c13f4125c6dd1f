//! Organizer: owns one session's state and exposes it as a command interface.
//!
//! Every command runs to completion before the next; the web layer serializes access.
//! Roster, history and the saved base roster are persisted through a [`KeyValueStore`]
//! after each change. Persistence failures are logged, never propagated.

use crate::logic::draw::{draw_round, DrawOutcome};
use crate::logic::import::{parse_roster_csv, roster_to_csv};
use crate::models::{
    Alarm, BaseRoster, BoardState, DrawMode, HistoryLog, Player, Roster, Round, RoundTimer,
    SelectOutcome, Selection, SessionError, SlotRef, TimerEvent, TimerSetting, MAX_COURTS,
};
use crate::storage::{
    load_json, save_json, KeyValueStore, BASE_ROSTER_KEY, HISTORY_KEY, ROSTER_KEY,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

/// Courts selected for a fresh session.
pub const DEFAULT_COURT_COUNT: u32 = 2;

/// Snapshot handed to the renderer after every command.
#[derive(Clone, Debug, Serialize)]
pub struct SessionView {
    pub players: Vec<Player>,
    pub player_count: usize,
    pub draw_label: String,
    pub court_count: u32,
    pub mode: DrawMode,
    pub round: Option<Round>,
    pub selection: Selection,
    pub has_saved_base: bool,
    pub base_saved_at: Option<DateTime<Utc>>,
    pub history_rounds: usize,
    pub timer_setting: TimerSetting,
    pub timer_label: String,
    pub timer_running: bool,
    pub alarm_ringing: bool,
    /// Hint for the platform to keep the display awake (true while the timer runs).
    pub keep_awake: bool,
}

/// Application state for one session, with an injected store and random source.
pub struct Organizer<S, R> {
    roster: Roster,
    history: HistoryLog,
    board: BoardState,
    base: Option<BaseRoster>,
    court_count: u32,
    mode: DrawMode,
    timer: RoundTimer,
    alarm: Alarm,
    store: S,
    rng: R,
}

impl<S: KeyValueStore, R: Rng> Organizer<S, R> {
    /// Restore persisted roster, history and base roster from `store`.
    pub fn load(store: S, rng: R) -> Self {
        let names: Vec<Player> = load_json(&store, ROSTER_KEY).unwrap_or_default();
        let history: HistoryLog = load_json(&store, HISTORY_KEY).unwrap_or_default();
        let base: Option<BaseRoster> = load_json(&store, BASE_ROSTER_KEY);
        Self {
            roster: Roster::from_names(names),
            history,
            board: BoardState::new(),
            base,
            court_count: DEFAULT_COURT_COUNT,
            mode: DrawMode::default(),
            timer: RoundTimer::default(),
            alarm: Alarm::default(),
            store,
            rng,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn base(&self) -> Option<&BaseRoster> {
        self.base.as_ref()
    }

    pub fn court_count(&self) -> u32 {
        self.court_count
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Call-to-action label carrying the live player count.
    pub fn draw_label(&self) -> String {
        format!("Draw courts ({} players)", self.roster.count())
    }

    pub fn keep_awake(&self) -> bool {
        self.timer.is_running()
    }

    /// Add a player. Empty or duplicate names are ignored (returns `false`).
    pub fn on_add_player(&mut self, name: &str) -> bool {
        let added = self.roster.add(name);
        if added {
            self.persist_roster();
        }
        added
    }

    /// Remove a player. Absent names are ignored (returns `false`).
    pub fn on_remove_player(&mut self, name: &str) -> bool {
        let removed = self.roster.remove(name);
        if removed {
            self.persist_roster();
        }
        removed
    }

    /// Replace the whole roster. History is cleared: it no longer describes these players.
    pub fn on_replace_roster<I, T>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.roster.replace_all(names);
        self.history.clear();
        self.board.cancel_selection();
        self.persist_roster();
        self.persist_history();
        log::info!("Roster replaced with {} player(s); history cleared", self.roster.count());
        self.roster.count()
    }

    /// Save the current roster as the base roster for later sessions.
    pub fn on_save_base(&mut self) -> Result<usize, SessionError> {
        if self.roster.is_empty() {
            return Err(SessionError::NoRosterToSave);
        }
        let base = BaseRoster::new(self.roster.names().to_vec());
        if let Err(e) = save_json(&mut self.store, BASE_ROSTER_KEY, &base) {
            log::error!("Failed to persist base roster: {}", e);
        }
        self.base = Some(base);
        Ok(self.roster.count())
    }

    /// Replace the roster with the saved base roster.
    pub fn on_apply_base(&mut self) -> Result<usize, SessionError> {
        let names = self
            .base
            .as_ref()
            .map(|b| b.names.clone())
            .ok_or(SessionError::NoSavedBase)?;
        Ok(self.on_replace_roster(names))
    }

    /// Replace the roster with the names in an uploaded CSV.
    pub fn on_import_csv(&mut self, data: &[u8]) -> Result<usize, SessionError> {
        let names = parse_roster_csv(data)?;
        Ok(self.on_replace_roster(names))
    }

    pub fn export_csv(&self) -> Result<String, SessionError> {
        roster_to_csv(self.roster.names())
    }

    pub fn on_set_courts(&mut self, court_count: u32) -> Result<(), SessionError> {
        if !(1..=MAX_COURTS).contains(&court_count) {
            return Err(SessionError::InvalidCourtCount(court_count));
        }
        self.court_count = court_count;
        Ok(())
    }

    pub fn on_set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Draw a new round, replace the board and record the round in history.
    /// On error nothing is changed.
    pub fn on_draw(&mut self) -> Result<DrawOutcome, SessionError> {
        let outcome = draw_round(
            self.roster.names(),
            self.court_count,
            self.mode,
            &self.history,
            &mut self.rng,
        )?;
        if outcome.repeats_accepted {
            log::info!("Round drawn with repeated pairs after exhausting the pairing search");
        }
        self.history
            .record_round(outcome.round.waiting.clone(), outcome.pairs.clone());
        self.board.replace(outcome.round.clone());
        self.persist_history();
        Ok(outcome)
    }

    /// Slot click: select, cancel, or swap with the selected slot.
    pub fn on_slot_clicked(&mut self, slot: SlotRef) -> Result<SelectOutcome, SessionError> {
        if self.board.round().is_none() {
            return Err(SessionError::NoRound);
        }
        match self.board.select_slot(slot) {
            SelectOutcome::Ignored => Err(SessionError::SlotOutOfRange(slot)),
            outcome => Ok(outcome),
        }
    }

    /// Choose a preset or custom duration. Stops the timer and the alarm.
    pub fn on_timer_setting(&mut self, setting: TimerSetting) -> Result<(), SessionError> {
        if setting.seconds() == 0 {
            return Err(SessionError::InvalidDuration);
        }
        self.timer.apply_setting(setting);
        self.alarm.stop();
        Ok(())
    }

    /// Start or pause. Pausing also silences the alarm.
    pub fn on_timer_toggle(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            self.alarm.stop();
        } else {
            self.timer.toggle();
        }
    }

    pub fn on_timer_reset(&mut self) {
        self.timer.reset();
        self.alarm.stop();
    }

    /// Periodic one-second tick. Reaching zero stops the timer and starts the alarm.
    pub fn on_timer_tick(&mut self) -> TimerEvent {
        self.alarm.tick();
        let event = self.timer.tick();
        if event == TimerEvent::Finished {
            log::info!("Round timer finished");
            self.alarm.play();
        }
        event
    }

    pub fn on_stop_alarm(&mut self) {
        self.alarm.stop();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            players: self.roster.names().to_vec(),
            player_count: self.roster.count(),
            draw_label: self.draw_label(),
            court_count: self.court_count,
            mode: self.mode,
            round: self.board.round().cloned(),
            selection: self.board.selection(),
            has_saved_base: self.base.is_some(),
            base_saved_at: self.base.as_ref().map(|b| b.saved_at),
            history_rounds: self.history.len(),
            timer_setting: self.timer.setting(),
            timer_label: self.timer.label(),
            timer_running: self.timer.is_running(),
            alarm_ringing: self.alarm.is_ringing(),
            keep_awake: self.keep_awake(),
        }
    }

    fn persist_roster(&mut self) {
        if let Err(e) = save_json(&mut self.store, ROSTER_KEY, &self.roster) {
            log::error!("Failed to persist roster: {}", e);
        }
    }

    fn persist_history(&mut self) {
        if let Err(e) = save_json(&mut self.store, HISTORY_KEY, &self.history) {
            log::error!("Failed to persist match history: {}", e);
        }
    }
}
