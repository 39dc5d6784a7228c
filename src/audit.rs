//! In-memory audit log of review actions.

use chrono::{DateTime, Local, Timelike};
use uuid::Uuid;

use crate::models::{AuditEntry, Field, ReviewAction};

/// Append-only list of [`AuditEntry`] records for one session.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current local minute.
    pub fn record(
        &mut self,
        reviewer: &str,
        name: &str,
        action: ReviewAction,
        fields: Vec<Field>,
    ) -> &AuditEntry {
        self.record_at(Local::now(), reviewer, name, action, fields)
    }

    /// Append an entry at an explicit time. Seconds and below are dropped.
    pub fn record_at(
        &mut self,
        time: DateTime<Local>,
        reviewer: &str,
        name: &str,
        action: ReviewAction,
        fields: Vec<Field>,
    ) -> &AuditEntry {
        let entry = AuditEntry {
            id: Uuid::new_v4(),
            time: truncate_to_minute(time),
            reviewer: reviewer.to_string(),
            name: name.to_string(),
            action,
            fields,
        };

        tracing::info!(
            reviewer = %entry.reviewer,
            doctor = %entry.name,
            action = entry.action.as_str(),
            fields = %entry.fields_label(),
            "Review action recorded"
        );

        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn truncate_to_minute(time: DateTime<Local>) -> DateTime<Local> {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
