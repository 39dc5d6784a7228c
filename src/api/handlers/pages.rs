//! Handlers behind the HTML review page.
//!
//! Mutating routes redirect back to `/` so a browser refresh never repeats
//! an action.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
};

use super::review_error;
use crate::export::{snapshot_csv, SNAPSHOT_FILE_NAME};
use crate::render::render_page;
use crate::session::SessionStore;

pub async fn review_page(State(store): State<SessionStore>) -> Html<String> {
    let mut session = store.lock();
    let notice = session.take_notice();
    Html(render_page(&session, notice.as_deref()))
}

pub async fn accept_form(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
) -> Result<Redirect, (StatusCode, String)> {
    store.lock().accept(index).map_err(review_error)?;
    Ok(Redirect::to("/"))
}

pub async fn reject_form(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
) -> Result<Redirect, (StatusCode, String)> {
    store.lock().reject(index).map_err(review_error)?;
    Ok(Redirect::to("/"))
}

pub async fn clear_actions_form(State(store): State<SessionStore>) -> Redirect {
    store.lock().clear_actions();
    Redirect::to("/")
}

pub async fn clear_audit_form(State(store): State<SessionStore>) -> Redirect {
    store.lock().clear_audit();
    Redirect::to("/")
}

pub async fn download_snapshot(State(store): State<SessionStore>) -> impl IntoResponse {
    let csv = snapshot_csv(store.lock().doctors());
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SNAPSHOT_FILE_NAME),
            ),
        ],
        csv,
    )
}
