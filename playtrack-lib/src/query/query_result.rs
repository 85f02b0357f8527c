use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// Outcome of a query about a single game.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    /// The game is tracked; here is the answer.
    Found(T),

    /// The requested identifier is not among the tracked games.
    NotTracked(String),
}

impl<T: Serialize> IntoResponse for QueryResult<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Found(data) => (StatusCode::OK, Json(data)).into_response(),
            Self::NotTracked(id) => (StatusCode::NOT_FOUND, Json(json!({ "error": format!("game {id} is not tracked") }))).into_response(),
        }
    }
}
