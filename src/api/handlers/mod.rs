mod pages;

pub use pages::*;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ReviewError;
use crate::models::*;
use crate::review;
use crate::session::SessionStore;

// ============================================================
// Error Handling
// ============================================================

/// Map a session error to a response.
///
/// A missing row is the caller's mistake and is returned as-is. Anything
/// else is logged server-side and reported as a generic failure.
fn review_error(e: ReviewError) -> (StatusCode, String) {
    match e {
        ReviewError::DoctorNotFound(_) => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        other => {
            tracing::error!("Internal error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Doctors
// ============================================================

pub async fn list_doctors(State(store): State<SessionStore>) -> Json<Vec<DoctorWithChanges>> {
    let session = store.lock();
    let doctors = session
        .doctors()
        .iter()
        .enumerate()
        .map(|(index, doctor)| with_changes(index, doctor))
        .collect();
    Json(doctors)
}

pub async fn get_doctor(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
) -> Result<Json<DoctorWithChanges>, (StatusCode, String)> {
    let session = store.lock();
    let doctor = session.doctor(index).map_err(review_error)?;
    Ok(Json(with_changes(index, doctor)))
}

pub async fn accept_doctor(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
) -> Result<Json<AuditEntry>, (StatusCode, String)> {
    let entry = store.lock().accept(index);
    entry.map(Json).map_err(review_error)
}

pub async fn reject_doctor(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
) -> Result<Json<AuditEntry>, (StatusCode, String)> {
    let entry = store.lock().reject(index);
    entry.map(Json).map_err(review_error)
}

fn with_changes(index: usize, doctor: &Doctor) -> DoctorWithChanges {
    DoctorWithChanges {
        index,
        doctor: doctor.clone(),
        changes: review::changes(doctor),
    }
}

// ============================================================
// Session
// ============================================================

pub async fn get_summary(State(store): State<SessionStore>) -> Json<ReviewSummary> {
    let summary = store.lock().summary();
    Json(summary)
}

pub async fn list_audit(State(store): State<SessionStore>) -> Json<Vec<AuditEntry>> {
    let entries = store.lock().audit().entries().to_vec();
    Json(entries)
}

pub async fn clear_audit(State(store): State<SessionStore>) -> StatusCode {
    store.lock().clear_audit();
    StatusCode::NO_CONTENT
}

pub async fn clear_actions(State(store): State<SessionStore>) -> StatusCode {
    store.lock().clear_actions();
    StatusCode::NO_CONTENT
}
