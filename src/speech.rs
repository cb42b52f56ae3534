//! Speech presentation boundary.
//!
//! The engine never synthesizes audio itself; it drives a `SpeechSink`
//! whenever the current word or the speech configuration changes. The
//! contract is last-write-wins: cancel any in-flight utterance before
//! starting a new one, never queue.

use crate::domain::SpeechConfig;

pub trait SpeechSink: Send {
  fn speak(&mut self, text: &str, cfg: &SpeechConfig);
  fn cancel(&mut self);
}

/// Headless sink: logs utterances instead of producing audio. Used when a
/// session has no client-side synthesizer attached, and in tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl SpeechSink for NullSink {
  fn speak(&mut self, text: &str, cfg: &SpeechConfig) {
    tracing::debug!(target: "drill", text, rate = cfg.rate, "speech suppressed (null sink)");
  }

  fn cancel(&mut self) {}
}

#[cfg(test)]
pub mod testing {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  pub enum SpeechCall {
    Speak(String, SpeechConfig),
    Cancel,
  }

  /// Records every call behind a shared handle so tests can assert
  /// cancel-before-speak ordering after handing the sink to an engine.
  #[derive(Debug, Default)]
  pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SpeechCall>>>,
  }

  impl RecordingSink {
    pub fn handle(&self) -> Arc<Mutex<Vec<SpeechCall>>> {
      self.calls.clone()
    }
  }

  impl SpeechSink for RecordingSink {
    fn speak(&mut self, text: &str, cfg: &SpeechConfig) {
      self.calls.lock().unwrap().push(SpeechCall::Speak(text.to_string(), cfg.clone()));
    }

    fn cancel(&mut self) {
      self.calls.lock().unwrap().push(SpeechCall::Cancel);
    }
  }
}
