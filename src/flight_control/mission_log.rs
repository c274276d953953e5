use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One timestamped mission event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    time: DateTime<Utc>,
    message: String,
}

impl LogEntry {
    pub fn new(time: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self { time, message: message.into() }
    }

    pub fn time(&self) -> DateTime<Utc> { self.time }

    pub fn message(&self) -> &str { &self.message }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.time.format("%H:%M:%S"), self.message)
    }
}

/// Append-only, unbounded record of mission events.
///
/// `epoch` is bumped on every [`MissionLog::clear`], so incremental readers
/// holding a cursor can tell that the entries they already consumed are gone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissionLog {
    entries: Vec<LogEntry>,
    #[serde(skip)]
    epoch: u64,
}

impl MissionLog {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, entry: LogEntry) { self.entries.push(entry); }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    pub fn entries(&self) -> &[LogEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn last(&self) -> Option<&LogEntry> { self.entries.last() }

    pub fn epoch(&self) -> u64 { self.epoch }

    /// Number of entries whose message contains `needle`, ignoring ASCII case.
    pub fn count_containing(&self, needle: &str) -> usize {
        let lowered = needle.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|e| e.message.to_ascii_lowercase().contains(&lowered))
            .count()
    }

    /// Entries appended after the first `cursor` entries.
    pub fn since(&self, cursor: usize) -> &[LogEntry] {
        self.entries.get(cursor..).unwrap_or(&[])
    }
}
