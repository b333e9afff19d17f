//! In-memory trace of committed transitions.
//!
//! The log records every swap the machine commits, in order. It is plain
//! data, serializable for diagnostics but never written anywhere by the
//! core, and recording is a functional update that returns a new log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the state transitioned from.
    pub from: String,
    /// Name of the state transitioned to.
    pub to: String,
    /// When the swap was committed.
    pub at: DateTime<Utc>,
}

impl TransitionRecord {
    /// Stamp a record for a swap committed now.
    pub fn now(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            at: Utc::now(),
        }
    }
}

/// Ordered trace of committed transitions.
///
/// ```rust
/// use stategate::{TransitionLog, TransitionRecord};
///
/// let log = TransitionLog::new()
///     .record(TransitionRecord::now("off", "on"))
///     .record(TransitionRecord::now("on", "running"));
///
/// assert_eq!(log.path(), ["off", "on", "running"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the extended log.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All committed transitions, in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Whether any transition has been committed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sequence of state names traversed: the origin of the first
    /// record, then the target of each record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last committed transition.
    /// `None` while the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}
