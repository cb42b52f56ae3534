//! HTTP endpoint handlers: the word CRUD surface the SPA talks to.
//! Thin instrumented wrappers over the store; `StoreError` maps itself to
//! status codes.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::error::StoreError;
use crate::protocol::*;
use crate::state::AppState;
use crate::store::WordStore;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_words(
  State(state): State<AppState>,
) -> Result<impl IntoResponse, StoreError> {
  let words = state.store.list().await?;
  info!(target: "typelearner_backend", count = words.len(), "HTTP words listed");
  Ok(Json(words))
}

#[instrument(level = "info", skip(state, body), fields(word = %body.word))]
pub async fn http_create_word(
  State(state): State<AppState>,
  Json(body): Json<CreateWordIn>,
) -> Result<impl IntoResponse, StoreError> {
  let entry = state.store.create(&body.word).await?;
  info!(target: "typelearner_backend", word = %entry.text, "HTTP word created");
  Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(level = "info", skip(state, body), fields(word = %body.word, delta = body.score_adjustment))]
pub async fn http_check_word(
  State(state): State<AppState>,
  Json(body): Json<CheckIn>,
) -> Result<impl IntoResponse, StoreError> {
  state
    .store
    .adjust_score(&body.word, body.score_adjustment)
    .await?;
  info!(target: "typelearner_backend", word = %body.word, delta = body.score_adjustment, "HTTP word score updated");
  Ok(Json(MessageOut { message: "Word score updated".into() }))
}

#[instrument(level = "info", skip(state), fields(%word))]
pub async fn http_delete_word(
  State(state): State<AppState>,
  Path(word): Path<String>,
) -> Result<impl IntoResponse, StoreError> {
  state.store.delete(&word).await?;
  info!(target: "typelearner_backend", %word, "HTTP word deleted");
  Ok(Json(MessageOut { message: "Word deleted successfully".into() }))
}
