//! WebSocket upgrade + drill-session loop. One engine per connection; the
//! loop multiplexes client messages, outgoing speech/engine messages, and
//! auto-advance timer ticks.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::domain::SpeechConfig;
use crate::engine::{EngineEvent, SessionEngine};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::speech::SpeechSink;
use crate::state::AppState;
use crate::store::WordStore;

/// Speech sink that forwards utterances to the connected client. The
/// client owns actual synthesis; cancel-before-speak ordering is preserved
/// by the message order on the wire.
struct ClientSpeech {
  tx: UnboundedSender<ServerWsMessage>,
}

impl SpeechSink for ClientSpeech {
  fn speak(&mut self, text: &str, cfg: &SpeechConfig) {
    let _ = self.tx.send(ServerWsMessage::Speak {
      text: text.to_string(),
      volume: cfg.volume,
      rate: cfg.rate,
      pitch: cfg.pitch,
      voice: cfg.voice.clone(),
    });
  }

  fn cancel(&mut self) {
    let _ = self.tx.send(ServerWsMessage::CancelSpeech);
  }
}

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
  info!(target: "typelearner_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(socket: WebSocket, state: AppState) {
  info!(target: "typelearner_backend", "WebSocket connected");
  let (mut sender, mut receiver) = socket.split();

  // Outgoing messages funnel through one channel so speech and engine
  // replies keep their relative order on the wire.
  let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerWsMessage>();
  let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<u64>();

  let mut engine = SessionEngine::new(
    state.store.clone() as Arc<dyn WordStore>,
    Box::new(ClientSpeech { tx: out_tx.clone() }),
    state.cfg.speech.clone(),
    state.cfg.session.clone(),
  );
  let mut pending_advance: Option<JoinHandle<()>> = None;

  loop {
    tokio::select! {
      incoming = receiver.next() => {
        let Some(Ok(msg)) = incoming else { break };
        match msg {
          Message::Text(txt) => {
            match serde_json::from_str::<ClientWsMessage>(&txt) {
              Ok(ClientWsMessage::Ping) => { let _ = out_tx.send(ServerWsMessage::Pong); }
              Ok(incoming) => {
                debug!(target: "typelearner_backend", "WS received: {:?}", &incoming);
                let events = run_action(incoming, &mut engine).await;
                deliver(events, &out_tx, &tick_tx, &mut pending_advance);
              }
              Err(e) => {
                let _ = out_tx.send(ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) });
              }
            }
          }
          Message::Ping(payload) => { let _ = sender.send(Message::Pong(payload)).await; }
          Message::Close(_) => break,
          _ => {}
        }
      }

      Some(out) = out_rx.recv() => {
        let txt = serde_json::to_string(&out).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });
        if let Err(e) = sender.send(Message::Text(txt)).await {
          error!(target: "typelearner_backend", error = %e, "WS send error");
          break;
        }
      }

      Some(token) = tick_rx.recv() => {
        let events = engine.advance(token);
        deliver(events, &out_tx, &tick_tx, &mut pending_advance);
      }
    }
  }

  // Teardown: silence speech and drop any armed timer so it cannot act on
  // a stale word.
  if let Some(h) = pending_advance.take() {
    h.abort();
  }
  engine.teardown();
  info!(target: "typelearner_backend", "WebSocket disconnected");
}

async fn run_action(msg: ClientWsMessage, engine: &mut SessionEngine) -> Vec<EngineEvent> {
  match msg {
    // Handled before dispatch; kept for exhaustiveness.
    ClientWsMessage::Ping => Vec::new(),
    ClientWsMessage::StartSession => engine.start().await,
    ClientWsMessage::SubmitAnswer { answer } => engine.submit(&answer).await,
    ClientWsMessage::Hint => engine.hint(),
    ClientWsMessage::HearAgain => engine.hear_again(),
    ClientWsMessage::NextWord => engine.next_word(),
    ClientWsMessage::RemoveWord => engine.remove_word().await,
    ClientWsMessage::SetSpeech { volume, rate, pitch, voice } => {
      engine.set_speech(SpeechConfig { volume, rate, pitch, voice })
    }
  }
}

/// Turn engine events into wire messages; advance scheduling arms a timer
/// task (replacing any previous one) that reports back through `tick_tx`.
fn deliver(
  events: Vec<EngineEvent>,
  out_tx: &UnboundedSender<ServerWsMessage>,
  tick_tx: &UnboundedSender<u64>,
  pending_advance: &mut Option<JoinHandle<()>>,
) {
  for event in events {
    let msg = match event {
      EngineEvent::ScheduleAdvance { delay, token } => {
        if let Some(h) = pending_advance.take() {
          h.abort();
        }
        let tick = tick_tx.clone();
        *pending_advance = Some(tokio::spawn(async move {
          tokio::time::sleep(delay).await;
          let _ = tick.send(token);
        }));
        continue;
      }
      EngineEvent::WordReady { length, remaining, score, attempts } => {
        ServerWsMessage::WordReady { length, remaining, score, attempts }
      }
      EngineEvent::AnswerCorrect { word, delta: _, score, attempts } => {
        ServerWsMessage::AnswerResult {
          correct: true,
          masked: None,
          reveal: Some(word),
          score,
          attempts,
        }
      }
      EngineEvent::AnswerIncorrect { masked, score, attempts } => {
        ServerWsMessage::AnswerResult {
          correct: false,
          masked: Some(masked),
          reveal: None,
          score,
          attempts,
        }
      }
      EngineEvent::Hint { masked } => ServerWsMessage::Hint { masked },
      EngineEvent::Reveal { word } => ServerWsMessage::Reveal { word },
      EngineEvent::Exhausted { score, attempts } => ServerWsMessage::Exhausted { score, attempts },
      EngineEvent::Notice { message } => ServerWsMessage::Notice { message },
    };
    let _ = out_tx.send(msg);
  }
}
