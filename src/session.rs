//! Review session state.
//!
//! [`ReviewSession`] bundles the rows, the per-doctor decision map and the
//! audit log. [`SessionStore`] shares one session between HTTP handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;

use crate::audit::AuditLog;
use crate::error::ReviewError;
use crate::models::*;
use crate::review::{self, Change, Resolution};
use crate::seed;

pub struct ReviewSession {
    reviewer: String,
    doctors: Vec<Doctor>,
    /// Doctor name → last decision. Keeps first-decided order.
    actions: IndexMap<String, Decision>,
    audit: AuditLog,
    /// One-shot message for the next page render.
    notice: Option<String>,
}

impl ReviewSession {
    pub fn new(reviewer: impl Into<String>, doctors: Vec<Doctor>) -> Result<Self, ReviewError> {
        seed::check_unique_names(&doctors)?;
        Ok(Self {
            reviewer: reviewer.into(),
            doctors,
            actions: IndexMap::new(),
            audit: AuditLog::new(),
            notice: None,
        })
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn doctor(&self, index: usize) -> Result<&Doctor, ReviewError> {
        self.doctors
            .get(index)
            .ok_or(ReviewError::DoctorNotFound(index))
    }

    pub fn actions(&self) -> &IndexMap<String, Decision> {
        &self.actions
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Accept the proposals on row `index` and log the result.
    pub fn accept(&mut self, index: usize) -> Result<AuditEntry, ReviewError> {
        self.resolve(index, review::accept)
    }

    /// Reject the proposals on row `index` and log the result.
    pub fn reject(&mut self, index: usize) -> Result<AuditEntry, ReviewError> {
        self.resolve(index, review::reject)
    }

    fn resolve(
        &mut self,
        index: usize,
        apply: fn(&mut Doctor) -> Resolution,
    ) -> Result<AuditEntry, ReviewError> {
        let doctor = self
            .doctors
            .get_mut(index)
            .ok_or(ReviewError::DoctorNotFound(index))?;

        let resolution = apply(doctor);
        let name = doctor.name.clone();

        if let Some(decision) = resolution.action.decision() {
            self.actions.insert(name.clone(), decision);
        }
        self.notice = Some(notice_for(&name, &resolution));

        let entry = self
            .audit
            .record(&self.reviewer, &name, resolution.action, resolution.fields)
            .clone();
        Ok(entry)
    }

    /// Names grouped by last decision.
    pub fn summary(&self) -> ReviewSummary {
        let mut summary = ReviewSummary::default();
        for (name, decision) in &self.actions {
            match decision {
                Decision::Accepted => summary.accepted.push(name.clone()),
                Decision::Rejected => summary.rejected.push(name.clone()),
            }
        }
        summary
    }

    /// Forget every decision. Rows and the audit log are untouched.
    pub fn clear_actions(&mut self) {
        self.actions.clear();
        self.notice = Some("Cleared session actions.".to_string());
        tracing::info!("Session actions cleared");
    }

    /// Empty the audit log. Rows and decisions are untouched.
    pub fn clear_audit(&mut self) {
        self.audit.clear();
        self.notice = Some("Cleared audit log.".to_string());
        tracing::info!("Audit log cleared");
    }

    /// Take the pending notice, leaving none.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

fn notice_for(name: &str, resolution: &Resolution) -> String {
    match resolution.action {
        ReviewAction::AcceptedNoOp => format!("No changes to apply for {}.", name),
        ReviewAction::Accepted => {
            let details = resolution
                .applied
                .iter()
                .map(|Change { field, old, new }| format!("{}: '{}' -> '{}'", field, old, new))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{} updated. {}", name, details)
        }
        ReviewAction::Rejected if resolution.fields.is_empty() => {
            format!("Rejected for {} (no proposed changes).", name)
        }
        ReviewAction::Rejected => {
            let fields = resolution
                .fields
                .iter()
                .map(Field::label)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Rejected proposed changes for {} ({}).", name, fields)
        }
    }
}

/// Shared handle to the single review session.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<Mutex<ReviewSession>>,
}

impl SessionStore {
    pub fn new(session: ReviewSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Hold the session for the rest of one request.
    pub fn lock(&self) -> MutexGuard<'_, ReviewSession> {
        self.session.lock().expect("session lock poisoned")
    }
}
