//! Domain models shared by the store, the session engine, and the wire DTOs.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCORE: i64 = 1;
/// Adjusted scores never drop below this; weighted selection assumes
/// positive weights and a floor of 1 keeps every word selectable.
pub const MIN_SCORE: i64 = 1;

fn default_score() -> i64 {
  DEFAULT_SCORE
}

/// A word in the drill list together with its selection weight.
///
/// Higher scores come up more often. New words start at 1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
  #[serde(rename = "word")]
  pub text: String,
  #[serde(default = "default_score")]
  pub score: i64,
}

impl WordEntry {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), score: DEFAULT_SCORE }
  }

  pub fn with_score(text: impl Into<String>, score: i64) -> Self {
    Self { text: text.into(), score }
  }
}

/// Speech presentation parameters forwarded to the speech collaborator.
/// Mirrors the browser SpeechSynthesisUtterance knobs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpeechConfig {
  #[serde(default = "default_volume")]
  pub volume: f32,
  #[serde(default = "default_rate")]
  pub rate: f32,
  #[serde(default = "default_pitch")]
  pub pitch: f32,
  #[serde(default)]
  pub voice: Option<String>,
}

fn default_volume() -> f32 { 1.0 }
fn default_rate() -> f32 { 1.0 }
fn default_pitch() -> f32 { 1.0 }

impl Default for SpeechConfig {
  fn default() -> Self {
    Self { volume: 1.0, rate: 1.0, pitch: 1.0, voice: None }
  }
}
