use chrono::{DateTime, Utc};
#[cfg(test)]
use chrono::TimeDelta;
#[cfg(test)]
use std::sync::Mutex;

/// Source of wall clock timestamps for mission log entries.
pub trait MissionClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl MissionClock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A logical clock that only moves when told to.
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Mutex::new(start) }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock only ever holds a valid timestamp, so keep using it.
        self.current.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut current = self.lock_current();
        *current += delta;
    }

    pub fn set(&self, time: DateTime<Utc>) { *self.lock_current() = time; }
}

#[cfg(test)]
impl MissionClock for ManualClock {
    fn now(&self) -> DateTime<Utc> { *self.lock_current() }
}
