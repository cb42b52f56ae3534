//! Loading app configuration (seed words, session tuning, speech defaults)
//! from TOML.
//!
//! See `AppConfig` for the expected schema. Everything is optional; missing
//! sections fall back to defaults so the binary runs with no config at all.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{SpeechConfig, WordEntry, DEFAULT_SCORE};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub session: SessionTuning,
  #[serde(default)]
  pub speech: SpeechConfig,
  #[serde(default)]
  pub words: Vec<SeedWordCfg>,
}

/// Word entry accepted in TOML configuration. Score is optional and
/// defaults to the store's initial score.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedWordCfg {
  pub text: String,
  #[serde(default)]
  pub score: Option<i64>,
}

impl SeedWordCfg {
  pub fn to_entry(&self) -> WordEntry {
    WordEntry::with_score(self.text.clone(), self.score.unwrap_or(DEFAULT_SCORE))
  }
}

/// Drill-session timing knobs. The reveal delays match the original UI:
/// 2 s after a correct answer, 4 s when skipping with "next".
#[derive(Clone, Debug, Deserialize)]
pub struct SessionTuning {
  #[serde(default = "default_advance_delay_ms")]
  pub advance_delay_ms: u64,
  #[serde(default = "default_skip_delay_ms")]
  pub skip_delay_ms: u64,
}

fn default_advance_delay_ms() -> u64 { 2000 }
fn default_skip_delay_ms() -> u64 { 4000 }

impl Default for SessionTuning {
  fn default() -> Self {
    Self {
      advance_delay_ms: default_advance_delay_ms(),
      skip_delay_ms: default_skip_delay_ms(),
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO
/// error, returns None and the caller uses defaults.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "typelearner_backend", %path, words = cfg.words.len(), "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "typelearner_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "typelearner_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_config() {
    let cfg: AppConfig = toml::from_str(
      r#"
      [session]
      advance_delay_ms = 500
      skip_delay_ms = 1000

      [speech]
      volume = 0.5
      rate = 1.2
      pitch = 0.9
      voice = "en-GB"

      [[words]]
      text = "fluctuate"
      score = 7

      [[words]]
      text = "peak"
      "#,
    )
    .unwrap();

    assert_eq!(cfg.session.advance_delay_ms, 500);
    assert_eq!(cfg.speech.voice.as_deref(), Some("en-GB"));
    assert_eq!(cfg.words.len(), 2);
    assert_eq!(cfg.words[0].to_entry().score, 7);
    assert_eq!(cfg.words[1].to_entry().score, DEFAULT_SCORE);
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg: AppConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.session.advance_delay_ms, 2000);
    assert_eq!(cfg.session.skip_delay_ms, 4000);
    assert_eq!(cfg.speech.volume, 1.0);
    assert!(cfg.words.is_empty());
  }
}
