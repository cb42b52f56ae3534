//! The word store: a persisted mapping from word text to selection score.
//!
//! The session engine consumes the `WordStore` trait and never assumes a
//! concrete backend. `MemoryStore` is the in-process implementation: an
//! ordered list behind an async RwLock, optionally mirrored to a JSON
//! snapshot file so scores survive restarts. Snapshot IO failure degrades
//! to a logged warning; in-memory state stays authoritative.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{WordEntry, MIN_SCORE};
use crate::error::StoreError;
use crate::session::normalize_answer;

#[async_trait]
pub trait WordStore: Send + Sync {
  /// All words with their current scores, in insertion order.
  async fn list(&self) -> Result<Vec<WordEntry>, StoreError>;

  /// Add a new word at the default score. `Invalid` for empty text,
  /// `Duplicate` when the word (case-insensitively) already exists.
  async fn create(&self, text: &str) -> Result<WordEntry, StoreError>;

  /// Apply a signed score adjustment. The resulting score is floored at
  /// `MIN_SCORE`. `NotFound` when the word is absent.
  async fn adjust_score(&self, text: &str, delta: i64) -> Result<(), StoreError>;

  /// Remove a word. `NotFound` when absent, so callers can distinguish
  /// already-deleted from transport failure.
  async fn delete(&self, text: &str) -> Result<(), StoreError>;
}

pub struct MemoryStore {
  words: RwLock<Vec<WordEntry>>,
  snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
  /// Open the store: load the snapshot when one exists, otherwise start
  /// from the given seed list.
  #[instrument(level = "info", skip(seed), fields(seed_len = seed.len()))]
  pub fn open(snapshot_path: Option<PathBuf>, seed: Vec<WordEntry>) -> Self {
    let words = match &snapshot_path {
      Some(path) if path.exists() => match std::fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Vec<WordEntry>>(&s) {
          Ok(list) => {
            info!(target: "typelearner_backend", path = %path.display(), words = list.len(), "Loaded word snapshot");
            list
          }
          Err(e) => {
            warn!(target: "typelearner_backend", path = %path.display(), error = %e, "Snapshot unreadable; falling back to seed words");
            seed
          }
        },
        Err(e) => {
          warn!(target: "typelearner_backend", path = %path.display(), error = %e, "Snapshot read failed; falling back to seed words");
          seed
        }
      },
      _ => seed,
    };

    info!(target: "typelearner_backend", words = words.len(), "Startup word inventory");
    Self {
      words: RwLock::new(words),
      snapshot_path,
    }
  }

  /// Rewrite the snapshot via a temp file + rename. Failures only warn:
  /// the in-memory list is the source of truth for the running process.
  fn persist(&self, words: &[WordEntry]) {
    let Some(path) = &self.snapshot_path else { return };
    let tmp = path.with_extension(format!("tmp-{}", Uuid::new_v4()));
    let result = serde_json::to_string_pretty(words)
      .map_err(|e| e.to_string())
      .and_then(|json| std::fs::write(&tmp, json).map_err(|e| e.to_string()))
      .and_then(|_| std::fs::rename(&tmp, path).map_err(|e| e.to_string()));
    if let Err(e) = result {
      let _ = std::fs::remove_file(&tmp);
      warn!(target: "typelearner_backend", path = %path.display(), error = %e, "Snapshot write failed");
    }
  }
}

#[async_trait]
impl WordStore for MemoryStore {
  async fn list(&self) -> Result<Vec<WordEntry>, StoreError> {
    Ok(self.words.read().await.clone())
  }

  #[instrument(level = "debug", skip(self))]
  async fn create(&self, text: &str) -> Result<WordEntry, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
      return Err(StoreError::Invalid("word text must be non-empty".into()));
    }
    let mut words = self.words.write().await;
    let normalized = normalize_answer(trimmed);
    if words.iter().any(|w| normalize_answer(&w.text) == normalized) {
      return Err(StoreError::Duplicate(trimmed.to_string()));
    }
    let entry = WordEntry::new(trimmed);
    words.push(entry.clone());
    self.persist(&words);
    Ok(entry)
  }

  #[instrument(level = "debug", skip(self))]
  async fn adjust_score(&self, text: &str, delta: i64) -> Result<(), StoreError> {
    let mut words = self.words.write().await;
    let entry = words
      .iter_mut()
      .find(|w| w.text == text)
      .ok_or_else(|| StoreError::NotFound(text.to_string()))?;
    entry.score = (entry.score + delta).max(MIN_SCORE);
    self.persist(&words);
    Ok(())
  }

  #[instrument(level = "debug", skip(self))]
  async fn delete(&self, text: &str) -> Result<(), StoreError> {
    let mut words = self.words.write().await;
    let before = words.len();
    words.retain(|w| w.text != text);
    if words.len() == before {
      return Err(StoreError::NotFound(text.to_string()));
    }
    self.persist(&words);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_matches::assert_matches;

  fn store() -> MemoryStore {
    MemoryStore::open(None, vec![WordEntry::with_score("cat", 4)])
  }

  #[tokio::test]
  async fn create_rejects_empty_and_duplicates() {
    let s = store();
    assert_matches!(s.create("  ").await, Err(StoreError::Invalid(_)));
    assert_matches!(s.create("CAT").await, Err(StoreError::Duplicate(_)));
    let made = s.create("  dog ").await.unwrap();
    assert_eq!(made.text, "dog");
    assert_eq!(made.score, 1);
  }

  #[tokio::test]
  async fn adjust_floors_score_at_minimum() {
    let s = store();
    s.adjust_score("cat", -10).await.unwrap();
    let words = s.list().await.unwrap();
    assert_eq!(words[0].score, MIN_SCORE);
    s.adjust_score("cat", 3).await.unwrap();
    assert_eq!(s.list().await.unwrap()[0].score, 4);
    assert_matches!(s.adjust_score("dog", 1).await, Err(StoreError::NotFound(_)));
  }

  #[tokio::test]
  async fn delete_distinguishes_absent() {
    let s = store();
    s.delete("cat").await.unwrap();
    assert_matches!(s.delete("cat").await, Err(StoreError::NotFound(_)));
    assert!(s.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn snapshot_round_trips_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.json");

    let s = MemoryStore::open(Some(path.clone()), vec![WordEntry::new("peak")]);
    s.create("surge").await.unwrap();
    s.adjust_score("surge", 5).await.unwrap();

    let reopened = MemoryStore::open(Some(path), vec![]);
    let words = reopened.list().await.unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[1], WordEntry::with_score("surge", 6));
  }

  #[tokio::test]
  async fn corrupt_snapshot_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.json");
    std::fs::write(&path, "not json").unwrap();

    let s = MemoryStore::open(Some(path), vec![WordEntry::new("rise")]);
    assert_eq!(s.list().await.unwrap(), vec![WordEntry::new("rise")]);
  }
}
