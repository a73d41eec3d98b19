//! Request handlers and the JSON contract.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    convert::{Conversion, ConvertError},
    metrics,
    server::AppState,
};

const INDEX_HTML: &str = include_str!("index.html");
const MAIN_JS: &str = include_str!("main.js");

/// Success payload: one or two result entries.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub results: Conversion,
}

/// Failure payload with a user-facing message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, error: message.into() }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

// The page template carries one server-injected value: the timezone the
// select starts on.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_HTML.replace("{{default_timezone}}", &state.default_timezone))
}

pub async fn main_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], MAIN_JS)
}

pub async fn timezones(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.provider.identifiers().to_vec())
}

pub async fn health() -> &'static str {
    "healthy"
}

pub async fn convert(
    State(state): State<AppState>,
    payload: Option<Json<ConvertRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, Json(ErrorBody::new("Invalid request"))).into_response();
    };

    let input = request.input.trim();
    let timezone = request.timezone.as_deref().unwrap_or(&state.default_timezone);

    match state.converter.convert(input, timezone) {
        Ok(results) => {
            metrics::client().incr("convert.success");
            metrics::client().count("convert.entries", results.entries().len() as u64);
            (StatusCode::OK, Json(ConvertResponse { success: true, results })).into_response()
        },
        Err(err) => {
            metrics::client().incr(error_metric(&err));
            (error_status(&err), Json(ErrorBody::new(err.to_string()))).into_response()
        },
    }
}

// Status codes are this layer's concern, not the dispatcher's. The
// format-mismatch branch reports through the JSON body alone.
fn error_status(err: &ConvertError) -> StatusCode {
    match err {
        ConvertError::InvalidInput | ConvertError::InvalidTimezone => StatusCode::BAD_REQUEST,
        ConvertError::InvalidFormat => StatusCode::OK,
        ConvertError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_metric(err: &ConvertError) -> &'static str {
    match err {
        ConvertError::InvalidInput => "convert.invalid_input",
        ConvertError::InvalidTimezone => "convert.invalid_timezone",
        ConvertError::InvalidFormat => "convert.invalid_format",
        ConvertError::Internal => "convert.internal_error",
    }
}
