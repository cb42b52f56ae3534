//! typelearner · Vocabulary Drill Backend
//!
//! - Axum HTTP + WebSocket API
//! - Word list with score-weighted drill selection
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 5000)
//!   SNAPSHOT_PATH    : JSON file the word list is persisted to
//!   APP_CONFIG_PATH  : path to TOML config (seed words, delays, speech)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, instrument};

use typelearner_backend::routes::build_router;
use typelearner_backend::state::AppState;
use typelearner_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (word store, config).
  let state = AppState::new();

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  // Read port from env or default to 5000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "typelearner_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
