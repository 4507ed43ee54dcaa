//! Sound cue lookup
//!
//! The simulation never plays audio itself. Entities own a bank mapping cue
//! names to handles supplied by the audio layer, and playing a cue emits the
//! handle as a [`GameEvent::Sound`](crate::sim::GameEvent::Sound).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::SimError;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Match paused
    Pause,
    /// Time ran out
    Exit,
    /// Player bumped into the other player
    Hit,
    /// Player started a dodge
    Jump,
    /// Bonus item collected
    ItemScore,
    /// Penalty item collected
    ItemDamage,
    /// Neutral item collected
    ItemCollect,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Pause,
        SoundCue::Exit,
        SoundCue::Hit,
        SoundCue::Jump,
        SoundCue::ItemScore,
        SoundCue::ItemDamage,
        SoundCue::ItemCollect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Pause => "pause",
            SoundCue::Exit => "exit",
            SoundCue::Hit => "hit",
            SoundCue::Jump => "jump",
            SoundCue::ItemScore => "score",
            SoundCue::ItemDamage => "damage",
            SoundCue::ItemCollect => "collect",
        }
    }
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to a loaded sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// Cue -> handle mapping owned by an entity or the match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundBank {
    sounds: HashMap<SoundCue, SoundId>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank holding every cue, numbered in declaration order
    pub fn sequential() -> Self {
        SoundCue::ALL
            .iter()
            .enumerate()
            .map(|(i, &cue)| (cue, SoundId(i as u32)))
            .collect()
    }

    pub fn insert(&mut self, cue: SoundCue, id: SoundId) {
        self.sounds.insert(cue, id);
    }

    pub fn contains(&self, cue: SoundCue) -> bool {
        self.sounds.contains_key(&cue)
    }

    /// Resolve a cue to its handle. A cue missing from the bank is a setup bug.
    pub fn play(&self, cue: SoundCue) -> Result<SoundId, SimError> {
        self.sounds
            .get(&cue)
            .copied()
            .ok_or(SimError::MissingSound(cue))
    }
}

impl FromIterator<(SoundCue, SoundId)> for SoundBank {
    fn from_iter<I: IntoIterator<Item = (SoundCue, SoundId)>>(iter: I) -> Self {
        Self {
            sounds: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_bank_has_every_cue() {
        let bank = SoundBank::sequential();
        for cue in SoundCue::ALL {
            assert!(bank.contains(cue), "missing {cue}");
        }
        assert_eq!(bank.play(SoundCue::Pause).unwrap(), SoundId(0));
    }

    #[test]
    fn test_missing_cue_is_an_error() {
        let mut bank = SoundBank::new();
        bank.insert(SoundCue::Hit, SoundId(9));
        assert_eq!(bank.play(SoundCue::Hit).unwrap(), SoundId(9));
        assert!(matches!(
            bank.play(SoundCue::Jump),
            Err(SimError::MissingSound(SoundCue::Jump))
        ));
    }
}
