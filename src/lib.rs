//! Vocabulary drill backend: word store, weighted drill session engine,
//! and the HTTP/WebSocket surface that serves the SPA.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod speech;
pub mod state;
pub mod store;
pub mod telemetry;
