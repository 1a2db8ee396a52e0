//! services/portal/src/web/pages.rs
//!
//! Handlers for the HTML pages: the day listing and the per-session entry page.

use std::collections::HashMap;
use std::sync::Arc;

use attendance_core::PortError;
use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse},
};
use tracing::{debug, error, info, warn};

use crate::web::state::AppState;
use crate::web::templates::{render_entry_page, render_units_page, CODE_FIELD};

pub const UNITS_PATH: &str = "/student/Units.aspx";

/// `?s=` is what the portal's own links use; `?session=` is accepted as well.
///
/// Built from the raw pairs so a repeated key keeps its first value instead
/// of failing the request.
#[derive(Debug, Default)]
pub struct EntryQuery {
    s: Option<String>,
    session: Option<String>,
}

impl EntryQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "s" => &mut query.s,
                "session" => &mut query.session,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    fn session_id(&self) -> Option<&str> {
        self.s
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.session.as_deref().filter(|id| !id.is_empty()))
    }
}

type PageResult = Result<Html<String>, (StatusCode, String)>;

/// The request URL without its query, used as the page's `<base href>`.
fn base_href(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}{}", host, uri.path())
}

fn missing_session_id() -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, "Missing session id".to_string())
}

fn port_error_response(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "Session not found".to_string()),
        other => {
            error!("Failed to serve entry page: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET / and GET /student/ - Send the browser to the day listing.
pub async fn redirect_to_units() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, UNITS_PATH)])
}

/// GET /student/Units.aspx - List every session grouped by day.
pub async fn units_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Html<String> {
    let days = state.store.list_by_day().await;
    Html(render_units_page(
        &days,
        &base_href(&headers, &uri),
        &state.config.student_name,
    ))
}

/// GET /student/Entry.aspx - Show one session's detail and the code form.
pub async fn entry_page_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    uri: Uri,
) -> PageResult {
    let query = EntryQuery::from_pairs(pairs);
    let session_id = query.session_id().ok_or_else(missing_session_id)?;
    let (_, view) = state
        .store
        .detail(session_id)
        .await
        .map_err(port_error_response)?;
    Ok(Html(render_entry_page(&view, &base_href(&headers, &uri), None)))
}

/// POST /student/Entry.aspx - Submit an attendance code for one session.
///
/// A body that is not a urlencoded form counts as an empty code.
pub async fn entry_submit_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    uri: Uri,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> PageResult {
    let query = EntryQuery::from_pairs(pairs);
    let session_id = query.session_id().ok_or_else(missing_session_id)?;
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!("Treating unreadable form as empty: {}", rejection);
            HashMap::new()
        }
    };
    let candidate = fields.get(CODE_FIELD).map(String::as_str).unwrap_or("");

    let submission = state
        .store
        .submit_code(session_id, candidate)
        .await
        .map_err(port_error_response)?;
    if submission.outcome.is_accepted() {
        info!(
            session_id,
            outcome = submission.outcome.reason(),
            "Attendance code submitted"
        );
    } else {
        warn!(
            session_id,
            outcome = submission.outcome.reason(),
            "Attendance code refused"
        );
    }

    Ok(Html(render_entry_page(
        &submission.detail,
        &base_href(&headers, &uri),
        Some(submission.outcome),
    )))
}
