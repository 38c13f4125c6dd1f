//! Round countdown timer and the alarm it triggers.

use serde::{Deserialize, Serialize};

/// Seconds loaded when nothing else was chosen.
pub const DEFAULT_ROUND_SECS: u32 = 60;

/// How long the alarm rings before it stops by itself.
pub const ALARM_RING_SECS: u32 = 10;

/// Chosen round duration: a preset in seconds or a custom number of minutes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimerSetting {
    Preset(u32),
    CustomMinutes(u32),
}

impl Default for TimerSetting {
    fn default() -> Self {
        TimerSetting::Preset(DEFAULT_ROUND_SECS)
    }
}

impl TimerSetting {
    pub fn seconds(self) -> u32 {
        match self {
            TimerSetting::Preset(secs) => secs,
            TimerSetting::CustomMinutes(m) => m.saturating_mul(60),
        }
    }
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerEvent {
    /// Timer not running; nothing happened.
    Idle,
    /// One second elapsed, still counting.
    Tick { remaining: u32 },
    /// Reached zero; the timer has stopped.
    Finished,
}

/// Countdown for one round. Ticks are driven from outside, once per second.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    setting: TimerSetting,
    remaining_secs: u32,
    running: bool,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(TimerSetting::default())
    }
}

impl RoundTimer {
    pub fn new(setting: TimerSetting) -> Self {
        Self {
            setting,
            remaining_secs: setting.seconds(),
            running: false,
        }
    }

    pub fn setting(&self) -> TimerSetting {
        self.setting
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Load a new duration. Stops the timer.
    pub fn apply_setting(&mut self, setting: TimerSetting) {
        self.setting = setting;
        self.stop();
        self.remaining_secs = setting.seconds();
    }

    /// Start when stopped, pause when running. Starting with nothing left is a no-op.
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    /// Halt future ticks; remaining time is kept so the timer can resume.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and reload the current setting.
    pub fn reset(&mut self) {
        self.apply_setting(self.setting);
    }

    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TimerEvent::Finished
        } else {
            TimerEvent::Tick {
                remaining: self.remaining_secs,
            }
        }
    }

    /// `MM:SS` display of the remaining time.
    pub fn label(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }
}

pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Alarm signal for the audio collaborator: rings for a fixed number of ticks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    ring_secs_left: u32,
}

impl Alarm {
    /// Start (or restart from the top) the alarm.
    pub fn play(&mut self) {
        self.ring_secs_left = ALARM_RING_SECS;
    }

    pub fn stop(&mut self) {
        self.ring_secs_left = 0;
    }

    pub fn is_ringing(&self) -> bool {
        self.ring_secs_left > 0
    }

    pub fn tick(&mut self) {
        self.ring_secs_left = self.ring_secs_left.saturating_sub(1);
    }
}
