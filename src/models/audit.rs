use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::doctor::Field;

/// Display format for audit timestamps (minute precision).
pub const AUDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What a reviewer did to a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReviewAction {
    #[serde(rename = "accepted")]
    Accepted,
    /// Accept pressed on a row with nothing to apply.
    #[serde(rename = "accepted (no-op)")]
    AcceptedNoOp,
    #[serde(rename = "rejected")]
    Rejected,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::AcceptedNoOp => "accepted (no-op)",
            Self::Rejected => "rejected",
        }
    }

    /// The decision this action leaves on the row, if it counts as one.
    pub fn decision(&self) -> Option<Decision> {
        match self {
            Self::Accepted => Some(Decision::Accepted),
            Self::AcceptedNoOp => None,
            Self::Rejected => Some(Decision::Rejected),
        }
    }
}

/// The most recent decision recorded for a doctor in this session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected,
}

/// An append-only log entry for one accept or reject.
///
/// Entries are never edited. The whole log can be emptied from the review
/// page, but individual entries cannot be removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    /// Local time, truncated to the minute.
    pub time: DateTime<Local>,
    pub reviewer: String,
    /// Doctor the action applied to.
    pub name: String,
    pub action: ReviewAction,
    /// Fields affected, in tracked-field order. Empty for no-ops.
    pub fields: Vec<Field>,
}

impl AuditEntry {
    pub fn time_label(&self) -> String {
        self.time.format(AUDIT_TIME_FORMAT).to_string()
    }

    /// Comma-joined field labels, or `-` when nothing was affected.
    pub fn fields_label(&self) -> String {
        if self.fields.is_empty() {
            "-".to_string()
        } else {
            self.fields
                .iter()
                .map(Field::label)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Doctor names grouped by their last decision, in first-decided order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

impl ReviewSummary {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}
