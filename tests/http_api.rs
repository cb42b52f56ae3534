//! Integration tests for the word CRUD surface, driving the router
//! in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{header, Method, Request, StatusCode},
  Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use typelearner_backend::config::AppConfig;
use typelearner_backend::domain::WordEntry;
use typelearner_backend::routes::build_router;
use typelearner_backend::state::AppState;
use typelearner_backend::store::MemoryStore;

fn app_with(words: Vec<WordEntry>) -> Router {
  let store = Arc::new(MemoryStore::open(None, words));
  build_router(AppState::with_store(store, AppConfig::default()))
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
  let app = app_with(vec![]);
  let response = app.oneshot(get("/api/v1/health")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn list_returns_words_with_scores() {
  let app = app_with(vec![
    WordEntry::with_score("peak", 3),
    WordEntry::new("surge"),
  ]);
  let response = app.oneshot(get("/api/v1/words")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(
    body_json(response).await,
    json!([
      { "word": "peak", "score": 3 },
      { "word": "surge", "score": 1 },
    ])
  );
}

#[tokio::test]
async fn create_validates_and_rejects_duplicates() {
  let app = app_with(vec![WordEntry::new("peak")]);

  let response = app
    .clone()
    .oneshot(json_request(Method::POST, "/api/v1/words", json!({ "word": "plummet" })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);
  assert_eq!(body_json(response).await, json!({ "word": "plummet", "score": 1 }));

  let response = app
    .clone()
    .oneshot(json_request(Method::POST, "/api/v1/words", json!({ "word": "PEAK" })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CONFLICT);

  let response = app
    .oneshot(json_request(Method::POST, "/api/v1/words", json!({ "word": "  " })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn check_applies_signed_adjustment() {
  let store = Arc::new(MemoryStore::open(None, vec![WordEntry::with_score("peak", 10)]));
  let app = build_router(AppState::with_store(store.clone(), AppConfig::default()));

  let response = app
    .clone()
    .oneshot(json_request(
      Method::POST,
      "/api/v1/words/check",
      json!({ "word": "peak", "scoreAdjustment": -5 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  use typelearner_backend::store::WordStore;
  assert_eq!(store.list().await.unwrap()[0].score, 5);

  let response = app
    .oneshot(json_request(
      Method::POST,
      "/api/v1/words/check",
      json!({ "word": "missing", "scoreAdjustment": 1 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_distinct_about_absence() {
  let app = app_with(vec![WordEntry::new("peak")]);

  let request = Request::builder()
    .method(Method::DELETE)
    .uri("/api/v1/words/peak")
    .body(Body::empty())
    .unwrap();
  let response = app.clone().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let request = Request::builder()
    .method(Method::DELETE)
    .uri("/api/v1/words/peak")
    .body(Body::empty())
    .unwrap();
  let response = app.oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
