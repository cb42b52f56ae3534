//! Error taxonomy for the word store, plus the HTTP status mapping.
//!
//! Store failures never crash a drill session: the WebSocket loop turns
//! them into non-blocking notices and keeps serving from its in-memory
//! snapshot. The HTTP handlers map them to status codes here.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  /// Malformed input, e.g. an empty word on create.
  #[error("invalid word: {0}")]
  Invalid(String),

  /// Create collided with an existing word.
  #[error("word already exists: {0}")]
  Duplicate(String),

  /// The word is absent from the store.
  #[error("word not found: {0}")]
  NotFound(String),

  /// Storage/transport failure (snapshot IO, backend unreachable).
  #[error("word store unavailable: {0}")]
  Unavailable(String),
}

impl StoreError {
  pub fn status(&self) -> StatusCode {
    match self {
      StoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
      StoreError::Duplicate(_) => StatusCode::CONFLICT,
      StoreError::NotFound(_) => StatusCode::NOT_FOUND,
      StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for StoreError {
  fn into_response(self) -> Response {
    let status = self.status();
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_follow_taxonomy() {
    assert_eq!(StoreError::Invalid("".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(StoreError::Duplicate("cat".into()).status(), StatusCode::CONFLICT);
    assert_eq!(StoreError::NotFound("cat".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(StoreError::Unavailable("io".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
