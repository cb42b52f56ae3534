//! Built-in seed vocabulary so the app is useful with no external config
//! and an empty store.

use crate::domain::WordEntry;

/// IELTS chart-description vocabulary. Every entry starts at the default
/// score; drilling reshapes the weights from there.
pub const SEED_WORDS: &[&str] = &[
  "increase",
  "decrease",
  "rise",
  "fall",
  "fluctuate",
  "peak",
  "drop",
  "climb",
  "decline",
  "remain steady",
  "remain constant",
  "stabilize",
  "surge",
  "plummet",
  "grow",
  "shrink",
  "level off",
  "plateau",
  "double",
  "halve",
  "upward trend",
  "downward trend",
  "dramatically",
  "significantly",
  "slightly",
  "gradually",
  "sharply",
  "steadily",
  "rapidly",
  "moderately",
  "marginally",
  "substantially",
  "consistently",
  "approximately",
  "roughly",
  "around",
  "nearly",
  "comparatively",
  "proportion",
  "percentage",
  "majority",
  "minority",
  "over the period",
  "time span",
  "highest",
  "lowest",
  "respectively",
  "in contrast",
  "similarly",
  "on the other hand",
];

pub fn seed_words() -> Vec<WordEntry> {
  SEED_WORDS.iter().map(|w| WordEntry::new(*w)).collect()
}
