//! Wall-clock timestamps and the clock capability that produces them.

use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;
use std::fmt;

/// Local wall-clock instant at which an event happened.
///
/// Displays as `dd/mm/yyyy HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// `strftime` pattern used by `Display`.
    pub const FORMAT: &'static str = "%d/%m/%Y %H:%M:%S";

    pub fn new(value: NaiveDateTime) -> Self {
        Timestamp(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Source of timestamps for customers, accounts and movements.
///
/// The registry hands one shared clock to every account it opens.
pub trait Clock: fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Reads the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(Local::now().naive_local())
    }
}

/// A clock that only moves when told to.
///
/// Each call to [`Clock::now`] returns the current reading and then advances
/// it by `step`, so consecutive events get distinct, predictable timestamps.
#[derive(Debug)]
pub struct ManualClock {
    current: Cell<NaiveDateTime>,
    step: Duration,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self::with_step(start, Duration::zero())
    }

    /// A clock starting at `start` that ticks `step` after every reading.
    pub fn with_step(start: NaiveDateTime, step: Duration) -> Self {
        ManualClock {
            current: Cell::new(start),
            step,
        }
    }

    pub fn set(&self, value: NaiveDateTime) {
        self.current.set(value);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let reading = self.current.get();
        self.current.set(reading + self.step);
        Timestamp(reading)
    }
}
