//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  /// Snapshot the word list and select the first word.
  StartSession,
  SubmitAnswer {
    answer: String,
  },
  Hint,
  HearAgain,
  NextWord,
  RemoveWord,
  SetSpeech {
    #[serde(default = "one")]
    volume: f32,
    #[serde(default = "one")]
    rate: f32,
    #[serde(default = "one")]
    pitch: f32,
    #[serde(default)]
    voice: Option<String>,
  },
}

fn one() -> f32 {
  1.0
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  /// A word is ready to be typed. Only the length travels here; the text
  /// itself arrives via `speak` so the client cannot read the answer off
  /// the wire inspector by accident.
  WordReady {
    length: usize,
    remaining: usize,
    score: u64,
    attempts: u64,
  },
  /// Client-side synthesis request; supersedes any in-flight utterance.
  Speak {
    text: String,
    volume: f32,
    rate: f32,
    pitch: f32,
    voice: Option<String>,
  },
  CancelSpeech,
  AnswerResult {
    correct: bool,
    /// Masked word with hints applied; present on incorrect answers.
    masked: Option<String>,
    /// The full word, revealed on a correct answer for the display delay.
    reveal: Option<String>,
    score: u64,
    attempts: u64,
  },
  Hint {
    masked: String,
  },
  /// The word shown before a skip advances the session.
  Reveal {
    word: String,
  },
  /// No words left to select this session. Informational, not an error.
  Exhausted {
    score: u64,
    attempts: u64,
  },
  /// Non-fatal store/transport problem; the session keeps running.
  Notice {
    message: String,
  },
  Error {
    message: String,
  },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct CreateWordIn {
  pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckIn {
  pub word: String,
  #[serde(rename = "scoreAdjustment")]
  pub score_adjustment: i64,
}

#[derive(Serialize)]
pub struct MessageOut {
  pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn client_messages_parse_from_tagged_json() {
    let msg: ClientWsMessage =
      serde_json::from_str(r#"{"type":"submit_answer","answer":"peak"}"#).unwrap();
    match msg {
      ClientWsMessage::SubmitAnswer { answer } => assert_eq!(answer, "peak"),
      other => panic!("unexpected: {other:?}"),
    }

    let msg: ClientWsMessage =
      serde_json::from_str(r#"{"type":"set_speech","rate":1.5}"#).unwrap();
    match msg {
      ClientWsMessage::SetSpeech { volume, rate, voice, .. } => {
        assert_eq!(volume, 1.0);
        assert_eq!(rate, 1.5);
        assert!(voice.is_none());
      }
      other => panic!("unexpected: {other:?}"),
    }
  }

  #[test]
  fn check_body_uses_camel_case_adjustment() {
    let body: CheckIn =
      serde_json::from_str(r#"{"word":"peak","scoreAdjustment":-5}"#).unwrap();
    assert_eq!(body.score_adjustment, -5);
  }
}
