//! Per-seat high scores
//!
//! One best score per player slot, stored as two decimal lines.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;
use crate::sim::PlayerSlot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub scores: [u32; 2],
}

impl HighScores {
    pub fn new(player_one: u32, player_two: u32) -> Self {
        Self {
            scores: [player_one, player_two],
        }
    }

    pub fn get(&self, slot: PlayerSlot) -> u32 {
        self.scores[slot.index()]
    }

    /// Parse saved lines; anything unreadable yields zeros
    pub fn from_lines(lines: &[String]) -> Self {
        let parsed: Vec<u32> = lines
            .iter()
            .take(2)
            .filter_map(|line| line.trim().parse().ok())
            .collect();
        match parsed.as_slice() {
            [one, two] => Self::new(*one, *two),
            _ => {
                log::warn!("Ignoring corrupt high score data: {:?}", lines);
                Self::default()
            }
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.scores.iter().map(u32::to_string).collect()
    }

    /// Load from a store, starting fresh when nothing is stored
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.read_lines() {
            Some(lines) => {
                let scores = Self::from_lines(&lines);
                log::info!("Loaded high scores {:?}", scores.scores);
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::default()
            }
        }
    }

    /// Keep any score that beats the stored one. Returns true if any did.
    pub fn record(&mut self, current: [u32; 2]) -> bool {
        let mut improved = false;
        for (best, score) in self.scores.iter_mut().zip(current) {
            if score > *best {
                *best = score;
                improved = true;
            }
        }
        improved
    }

    /// Write to a store. Returns true on success.
    pub fn save(&self, store: &mut dyn ScoreStore) -> bool {
        let saved = store.write_lines(&self.to_lines());
        if saved {
            log::info!("High scores saved {:?}", self.scores);
        } else {
            log::warn!("High scores could not be saved");
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_keeps_best_per_slot() {
        let mut scores = HighScores::new(5, 10);
        assert!(scores.record([7, 3]));
        assert_eq!(scores.scores, [7, 10]);
        assert!(!scores.record([7, 10]));
        assert!(!scores.record([0, 0]));
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::with_lines(&["5", "10"]);
        let mut scores = HighScores::load(&store);
        assert_eq!(scores, HighScores::new(5, 10));

        scores.record([7, 3]);
        assert!(scores.save(&mut store));
        assert_eq!(store.lines, Some(vec!["7".to_string(), "10".to_string()]));
    }

    #[test]
    fn test_missing_or_corrupt_defaults_to_zero() {
        assert_eq!(HighScores::load(&MemoryStore::default()), HighScores::new(0, 0));
        assert_eq!(
            HighScores::load(&MemoryStore::with_lines(&["12", "lots"])),
            HighScores::new(0, 0)
        );
        assert_eq!(
            HighScores::load(&MemoryStore::with_lines(&["12"])),
            HighScores::new(0, 0)
        );
        assert_eq!(
            HighScores::load(&MemoryStore::with_lines(&[" 12 ", "3", ""])),
            HighScores::new(12, 3)
        );
    }

    #[test]
    fn test_failed_write_reports_false() {
        let mut store = MemoryStore::with_lines(&["1", "1"]);
        store.read_only = true;
        assert!(!HighScores::new(4, 4).save(&mut store));
        assert_eq!(store.lines, Some(vec!["1".to_string(), "1".to_string()]));
    }
}
