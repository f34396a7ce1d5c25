//! Wall-clock display driven by a scoped repeating timer.
//!
//! The timer is polled from the app's tick events rather than running on its
//! own thread, so the clock string is only ever written from the UI thread.
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use chrono::{DateTime, Datelike, Local, TimeZone};

/// Source of the current wall-clock time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// English ordinal suffix for a day of the month (`1st`, `2nd`, `11th`, ...).
fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Format a timestamp for display.
///
/// With no pattern the long form is used: `October 16th 2026, 3:04:05 pm`.
/// Otherwise `pattern` is a chrono strftime string; a pattern chrono cannot
/// format falls back to the long form.
pub fn format_timestamp<Tz>(dt: &DateTime<Tz>, pattern: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if let Some(pattern) = pattern {
        let mut out = String::new();
        if write!(out, "{}", dt.format(pattern)).is_ok() {
            return out;
        }
    }
    let day = dt.day();
    format!(
        "{} {}{} {}",
        dt.format("%B"),
        day,
        ordinal_suffix(day),
        dt.format("%Y, %-I:%M:%S %P")
    )
}

/// A repeating timer that must be explicitly acquired.
///
/// Owning a `RepeatingTimer` is what keeps the clock running; dropping it is
/// the cancellation. It never fires more than once per poll, even if several
/// periods were missed.
#[derive(Debug)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTimer {
    /// Start a timer whose first firing is one period after `now`.
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Returns `true` if the timer fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Keeps the formatted clock string current while its timer is held.
pub struct ClockUpdater {
    period: Duration,
    pattern: Option<String>,
    timer: Option<RepeatingTimer>,
    display: String,
}

impl ClockUpdater {
    pub fn new(period: Duration, pattern: Option<String>) -> Self {
        Self {
            period,
            pattern,
            timer: None,
            display: String::new(),
        }
    }

    /// Acquire the repeating timer and sample the time immediately.
    pub fn start(&mut self, now: Instant, time: &dyn TimeSource) {
        self.timer = Some(RepeatingTimer::start(self.period, now));
        self.refresh(time);
    }

    /// Release the timer. The clock string is frozen from here on.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!("clock timer released");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Recompute the clock string if the timer fired. Returns `true` when
    /// the display changed.
    pub fn poll(&mut self, now: Instant, time: &dyn TimeSource) -> bool {
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.poll(now),
            None => false,
        };
        fired && self.refresh(time)
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn refresh(&mut self, time: &dyn TimeSource) -> bool {
        let next = format_timestamp(&time.now(), self.pattern.as_deref());
        if next == self.display {
            return false;
        }
        self.display = next;
        true
    }
}
