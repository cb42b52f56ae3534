//! The session engine: one drill session's state machine, wiring the
//! word store, the speech sink, and the auto-advance timer together.
//!
//! Every user action returns a list of `EngineEvent`s for the transport
//! layer to render. Store failures degrade to `Notice` events and the
//! session keeps running from its in-memory snapshot; they are never
//! fatal.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::SessionTuning;
use crate::domain::SpeechConfig;
use crate::session::{
  self, correct_delta, display_hint, is_correct, select_weighted, Selection, SessionState,
};
use crate::speech::SpeechSink;
use crate::store::WordStore;

/// What happened in response to a session action. The WebSocket layer
/// maps these onto wire messages; tests assert on them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
  /// A new word is ready to be typed. Only its length is disclosed; the
  /// text itself travels through the speech sink.
  WordReady { length: usize, remaining: usize, score: u64, attempts: u64 },
  AnswerCorrect { word: String, delta: i64, score: u64, attempts: u64 },
  AnswerIncorrect { masked: String, score: u64, attempts: u64 },
  Hint { masked: String },
  /// The word is shown before a skip advances the session.
  Reveal { word: String },
  /// Every word has been presented; terminal for this session.
  Exhausted { score: u64, attempts: u64 },
  /// Non-fatal store/transport problem surfaced to the user.
  Notice { message: String },
  /// Ask the transport to call `advance(token)` after the delay. A stale
  /// token (superseded by a newer selection) is ignored on arrival.
  ScheduleAdvance { delay: Duration, token: u64 },
}

pub struct SessionEngine<R: Rng + Send = SmallRng> {
  store: Arc<dyn WordStore>,
  speech: Box<dyn SpeechSink>,
  speech_cfg: SpeechConfig,
  tuning: SessionTuning,
  state: SessionState,
  rng: R,
  /// Bumped on every selection; outstanding advance timers carry the
  /// token they were issued under and are dropped when it goes stale.
  advance_token: u64,
}

impl SessionEngine<SmallRng> {
  pub fn new(
    store: Arc<dyn WordStore>,
    speech: Box<dyn SpeechSink>,
    speech_cfg: SpeechConfig,
    tuning: SessionTuning,
  ) -> Self {
    Self::with_rng(store, speech, speech_cfg, tuning, SmallRng::from_entropy())
  }
}

impl<R: Rng + Send> SessionEngine<R> {
  pub fn with_rng(
    store: Arc<dyn WordStore>,
    speech: Box<dyn SpeechSink>,
    speech_cfg: SpeechConfig,
    tuning: SessionTuning,
    rng: R,
  ) -> Self {
    Self {
      store,
      speech,
      speech_cfg,
      tuning,
      state: SessionState::default(),
      rng,
      advance_token: 0,
    }
  }

  pub fn state(&self) -> &SessionState {
    &self.state
  }

  /// Load the full word list once and pick the first word. Retried lazily
  /// on the next `start` when the store is unreachable.
  pub async fn start(&mut self) -> Vec<EngineEvent> {
    match self.store.list().await {
      Ok(words) => {
        info!(target: "drill", words = words.len(), "Session started");
        self.state = SessionState::begin(words);
        self.select_next()
      }
      Err(e) => {
        warn!(target: "drill", error = %e, "Could not load words for session");
        vec![EngineEvent::Notice { message: format!("Failed to fetch words: {e}") }]
      }
    }
  }

  /// Pick the next word over the local snapshot and speak it. Invalidates
  /// any pending auto-advance.
  fn select_next(&mut self) -> Vec<EngineEvent> {
    self.advance_token += 1;
    match select_weighted(&mut self.state, &mut self.rng) {
      Selection::Word(word) => {
        self.speech.cancel();
        self.speech.speak(&word, &self.speech_cfg);
        info!(target: "drill", remaining = self.state.remaining(), "Word selected");
        vec![EngineEvent::WordReady {
          length: word.chars().count(),
          remaining: self.state.remaining(),
          score: self.state.score,
          attempts: self.state.attempts,
        }]
      }
      Selection::Exhausted => {
        self.speech.cancel();
        info!(target: "drill", score = self.state.score, attempts = self.state.attempts, "Session exhausted");
        vec![EngineEvent::Exhausted { score: self.state.score, attempts: self.state.attempts }]
      }
    }
  }

  /// Evaluate a typed answer against the current word.
  pub async fn submit(&mut self, answer: &str) -> Vec<EngineEvent> {
    if self.state.current_word.is_empty() {
      return vec![EngineEvent::Notice { message: "No word selected yet".into() }];
    }

    self.state.attempts += 1;
    if is_correct(&self.state, answer) {
      self.state.score += 1;
      let word = self.state.current_word.clone();
      let delta = correct_delta(&self.state);

      // Fire-and-forget with respect to the UI: a reporting failure is a
      // notice, never a rollback of the local score increment.
      let mut events = Vec::new();
      if let Err(e) = self.store.adjust_score(&word, delta).await {
        warn!(target: "drill", %word, delta, error = %e, "Score report failed");
        events.push(EngineEvent::Notice { message: format!("Failed to update word score: {e}") });
      }

      self.state.is_first_attempt = true;
      self.state.revealed_positions.clear();

      events.push(EngineEvent::AnswerCorrect {
        word,
        delta,
        score: self.state.score,
        attempts: self.state.attempts,
      });
      events.push(EngineEvent::ScheduleAdvance {
        delay: Duration::from_millis(self.tuning.advance_delay_ms),
        token: self.advance_token,
      });
      events
    } else {
      session::reveal_hint(&mut self.state, &mut self.rng);
      self.state.is_first_attempt = false;
      vec![EngineEvent::AnswerIncorrect {
        masked: display_hint(&self.state),
        score: self.state.score,
        attempts: self.state.attempts,
      }]
    }
  }

  /// Explicit hint request. Revealing every position is a no-op, not an
  /// error; the fully-revealed mask simply comes back unchanged.
  pub fn hint(&mut self) -> Vec<EngineEvent> {
    if self.state.current_word.is_empty() {
      return vec![EngineEvent::Notice { message: "No word selected yet".into() }];
    }
    session::reveal_hint(&mut self.state, &mut self.rng);
    vec![EngineEvent::Hint { masked: display_hint(&self.state) }]
  }

  /// Re-speak the current word (cancel first, last-write-wins).
  pub fn hear_again(&mut self) -> Vec<EngineEvent> {
    if !self.state.current_word.is_empty() {
      let word = self.state.current_word.clone();
      self.speech.cancel();
      self.speech.speak(&word, &self.speech_cfg);
    }
    Vec::new()
  }

  /// Skip the current word: show it briefly, then advance.
  pub fn next_word(&mut self) -> Vec<EngineEvent> {
    if self.state.current_word.is_empty() {
      return self.select_next();
    }
    self.state.revealed_positions.clear();
    self.state.is_first_attempt = true;
    vec![
      EngineEvent::Reveal { word: self.state.current_word.clone() },
      EngineEvent::ScheduleAdvance {
        delay: Duration::from_millis(self.tuning.skip_delay_ms),
        token: self.advance_token,
      },
    ]
  }

  /// Permanently drop the current word from store and session, then
  /// select again over the reduced set. Already-removed on the store side
  /// is success; even a transport failure only produces a notice, the
  /// local removal goes ahead.
  pub async fn remove_word(&mut self) -> Vec<EngineEvent> {
    let word = self.state.current_word.clone();
    if word.is_empty() {
      return vec![EngineEvent::Notice { message: "No word selected yet".into() }];
    }

    let mut events = Vec::new();
    match self.store.delete(&word).await {
      Ok(()) => info!(target: "drill", %word, "Word removed"),
      Err(crate::error::StoreError::NotFound(_)) => {
        info!(target: "drill", %word, "Word already absent from store");
      }
      Err(e) => {
        warn!(target: "drill", %word, error = %e, "Word removal failed on store");
        events.push(EngineEvent::Notice { message: format!("Failed to remove word: {e}") });
      }
    }

    self.state.remove_word(&word);
    events.extend(self.select_next());
    events
  }

  /// Apply new speech parameters; an on-screen word is re-spoken with
  /// them immediately.
  pub fn set_speech(&mut self, cfg: SpeechConfig) -> Vec<EngineEvent> {
    self.speech_cfg = cfg;
    self.hear_again()
  }

  /// Timer callback for a previously scheduled advance. Stale tokens
  /// (a selection happened in between) are dropped so a timer never acts
  /// on a word it was not armed for.
  pub fn advance(&mut self, token: u64) -> Vec<EngineEvent> {
    if token != self.advance_token {
      return Vec::new();
    }
    self.select_next()
  }

  /// Session teardown: silence any in-flight utterance.
  pub fn teardown(&mut self) {
    self.speech.cancel();
  }
}
