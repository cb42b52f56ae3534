//! Drill-session state and the pure functions that drive it: weighted
//! word selection, progressive letter hints, and answer scoring.
//!
//! Everything here is synchronous and side-effect free apart from mutating
//! the passed-in `SessionState`, so the whole state machine is unit
//! testable without a socket, a store, or a rendering environment. The
//! random source is injected so tests can fix the draw.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::WordEntry;

/// All mutable state of one running drill session. Owned by exactly one
/// connection; never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
  /// Snapshot of the word list taken at session start.
  pub working_set: Vec<WordEntry>,
  /// Texts already presented this session. Subset of `working_set`;
  /// grows monotonically until a new session resets it.
  pub used_words: HashSet<String>,
  /// The word currently being drilled; empty before the first selection.
  pub current_word: String,
  /// Char indices of `current_word` already disclosed as hints.
  /// Cleared whenever `current_word` changes.
  pub revealed_positions: HashSet<usize>,
  /// True until the first incorrect submission for the current word.
  pub is_first_attempt: bool,
  pub score: u64,
  pub attempts: u64,
}

impl SessionState {
  /// Start a fresh session over a snapshot of the word list.
  pub fn begin(working_set: Vec<WordEntry>) -> Self {
    Self {
      working_set,
      is_first_attempt: true,
      ..Self::default()
    }
  }

  /// Words not yet presented this session, in working-set order.
  pub fn available(&self) -> Vec<&WordEntry> {
    self
      .working_set
      .iter()
      .filter(|w| !self.used_words.contains(&w.text))
      .collect()
  }

  pub fn remaining(&self) -> usize {
    self.available().len()
  }

  /// Drop a word from the session entirely (store deletion already done
  /// or in flight). Clears current-word state when it was the one shown.
  pub fn remove_word(&mut self, text: &str) {
    self.working_set.retain(|w| w.text != text);
    self.used_words.remove(text);
    if self.current_word == text {
      self.current_word.clear();
      self.revealed_positions.clear();
      self.is_first_attempt = true;
    }
  }
}

/// Outcome of a selection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Word(String),
  /// Every word has been presented; terminal for this session, not an error.
  Exhausted,
}

/// Pick the next word, biased toward higher scores, excluding used words.
///
/// Marks the pick as used, sets it current, clears hint state and resets
/// the first-attempt flag.
pub fn select_weighted<R: Rng>(state: &mut SessionState, rng: &mut R) -> Selection {
  let available = state.available();
  if available.is_empty() {
    return Selection::Exhausted;
  }

  let total: i64 = available.iter().map(|w| w.score.max(0)).sum();
  let draw = if total > 0 { rng.gen::<f64>() * total as f64 } else { 0.0 };
  let idx = pick_index(&available, draw);
  let text = available[idx].text.clone();

  state.used_words.insert(text.clone());
  state.current_word = text.clone();
  state.revealed_positions.clear();
  state.is_first_attempt = true;
  Selection::Word(text)
}

/// Walk the available entries subtracting scores from the draw; the first
/// entry where the remainder drops to <= 0 wins. A degenerate all-zero
/// total (draw 0.0) lands on the first entry, so there is no divide or
/// empty draw to go wrong.
fn pick_index(available: &[&WordEntry], draw: f64) -> usize {
  let mut r = draw;
  for (i, w) in available.iter().enumerate() {
    r -= w.score.max(0) as f64;
    if r <= 0.0 {
      return i;
    }
  }
  // Float rounding can leave a sliver above zero after the last entry.
  available.len() - 1
}

/// Reveal one not-yet-revealed char position of the current word, chosen
/// uniformly. No-op when everything is already revealed.
pub fn reveal_hint<R: Rng>(state: &mut SessionState, rng: &mut R) -> Option<usize> {
  let len = state.current_word.chars().count();
  let candidates: Vec<usize> = (0..len)
    .filter(|i| !state.revealed_positions.contains(i))
    .collect();
  if candidates.is_empty() {
    return None;
  }
  let pos = candidates[rng.gen_range(0..candidates.len())];
  state.revealed_positions.insert(pos);
  Some(pos)
}

/// Render the current word with revealed positions shown and everything
/// else masked with `_`.
pub fn display_hint(state: &SessionState) -> String {
  state
    .current_word
    .chars()
    .enumerate()
    .map(|(i, c)| if state.revealed_positions.contains(&i) { c } else { '_' })
    .collect()
}

/// Trim + case-fold, applied to both sides before comparing.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

pub fn is_correct(state: &SessionState, answer: &str) -> bool {
  !state.current_word.is_empty()
    && normalize_answer(answer) == normalize_answer(&state.current_word)
}

/// Score adjustment reported to the store on a correct answer: a clean
/// first try lowers the stored weight by 5; an answer that needed N hints
/// raises it by N so poorly-known words come up more often.
pub fn correct_delta(state: &SessionState) -> i64 {
  if state.is_first_attempt {
    -5
  } else {
    state.revealed_positions.len() as i64
  }
}
