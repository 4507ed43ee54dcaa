//! Match state and lifecycle
//!
//! Everything a match needs lives in one [`MatchState`] passed by reference
//! through [`tick`](super::tick::tick) and the renderer. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::SimError;
use super::arena::carve_arena;
use super::entity::{Entity, EntityId, GridPos, Passability, Texture};
use super::level::{FrameTime, Level, Viewport};
use super::modifier::ScoreModifier;
use super::player::PlayerSlot;
use crate::audio::{SoundBank, SoundCue, SoundId};
use crate::consts::GAME_TITLE;
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Lead-in before the clock starts; players are frozen
    MatchBeginning,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Time ran out
    GameOver,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A sound to play
    Sound(SoundId),
    PlayerHit { scorer: EntityId, target: EntityId },
    ItemCollected { player: EntityId, item: EntityId, value: i32 },
    Dodged { player: EntityId },
    ItemRespawned { item: EntityId, cell: GridPos, value: i32 },
    PhaseChanged(MatchPhase),
    /// At least one high score improved and was saved
    NewHighScore,
}

/// Current score per seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player_one: u32,
    pub player_two: u32,
}

impl Scoreboard {
    pub fn get(&self, slot: PlayerSlot) -> u32 {
        match slot {
            PlayerSlot::One => self.player_one,
            PlayerSlot::Two => self.player_two,
        }
    }

    pub fn as_array(&self) -> [u32; 2] {
        [self.player_one, self.player_two]
    }

    /// The seat ahead on points, `None` on a draw
    pub fn leader(&self) -> Option<PlayerSlot> {
        match self.player_one.cmp(&self.player_two) {
            std::cmp::Ordering::Greater => Some(PlayerSlot::One),
            std::cmp::Ordering::Less => Some(PlayerSlot::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Texture handles a match is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSet {
    pub floor: Texture,
    pub wall: Texture,
    pub player: Texture,
    pub item: Texture,
}

impl TextureSet {
    /// Four square tile-sized handles numbered 0..4
    pub fn uniform(tile_length: f32) -> Self {
        Self {
            floor: Texture::square(0, tile_length),
            wall: Texture::square(1, tile_length),
            player: Texture::square(2, tile_length),
            item: Texture::square(3, tile_length),
        }
    }
}

/// Inputs for building a match
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub tuning: Tuning,
    pub textures: TextureSet,
    /// Cloned into every player and collectable, and used for match cues
    pub sounds: SoundBank,
    pub high_scores: HighScores,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub level: Level,
    /// Player entities, indexed by [`PlayerSlot::index`]
    pub players: [EntityId; 2],
    /// The fixed pool of collectables, recycled on pickup
    pub collectables: Vec<EntityId>,
    pub scores: Scoreboard,
    pub high_scores: HighScores,
    /// Set when the last game over improved and saved a high score
    pub new_high_score: bool,
    /// Whole seconds left on the match clock
    pub remaining_secs: i64,
    pub match_started_at: f64,
    pub phase_started_at: f64,
    /// Lead-in and paused time, excluded from the match clock
    pub idle_secs: f64,
    pub last_respawn_at: f64,
    /// Clock of the latest tick
    pub clock: FrameTime,
    pub title: String,
    pub exit_requested: bool,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
    pub viewport: Viewport,
    tuning: Tuning,
    rng: Pcg32,
    sounds: SoundBank,
    spawn_cells: [GridPos; 2],
}

impl MatchState {
    /// Build the arena, players and collectables and enter the lead-in
    pub fn new(setup: MatchSetup, now: f64) -> Result<Self, SimError> {
        let MatchSetup {
            tuning,
            textures,
            sounds,
            high_scores,
        } = setup;

        let mut level = Level::new(textures.floor, tuning.columns, tuning.rows, tuning.tile_length);
        carve_arena(&mut level, textures.wall)?;

        let players = PlayerSlot::BOTH.map(|slot| {
            level.spawn(
                Entity::player(textures.player, slot, tuning.tile_length, tuning.player_lives)
                    .with_sounds(sounds.clone()),
            )
        });
        let collectables = (0..tuning.collectable_count)
            .map(|_| {
                level.spawn(
                    Entity::score_modifier(textures.item, ScoreModifier::default().value)
                        .with_sounds(sounds.clone()),
                )
            })
            .collect();

        let (width, height) = tuning.viewport_size();
        let mut state = Self {
            phase: MatchPhase::MatchBeginning,
            level,
            players,
            collectables,
            scores: Scoreboard::default(),
            high_scores,
            new_high_score: false,
            remaining_secs: i64::from(tuning.match_duration_secs),
            match_started_at: now,
            phase_started_at: now,
            idle_secs: 0.0,
            last_respawn_at: now,
            clock: FrameTime::new(now, 0.0),
            title: GAME_TITLE.to_string(),
            exit_requested: false,
            events: Vec::new(),
            viewport: Viewport { width, height },
            rng: Pcg32::seed_from_u64(tuning.seed),
            spawn_cells: spawn_cells(&tuning),
            sounds,
            tuning,
        };
        log::info!("Match created with seed {:#x}", state.tuning.seed);
        state.begin(now)?;
        Ok(state)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player_entity(&self, slot: PlayerSlot) -> &Entity {
        self.level.entity(self.players[slot.index()])
    }

    /// Reset players, reshuffle collectables and re-enter the lead-in
    pub fn restart(&mut self, now: f64) -> Result<(), SimError> {
        log::info!("Restarting match");
        self.begin(now)
    }

    fn begin(&mut self, now: f64) -> Result<(), SimError> {
        // Clear everything movable first so no spawn cell is taken
        for id in self.players.iter().chain(&self.collectables).copied() {
            let (displaced, cell) = {
                let entity = self.level.entity(id);
                (entity.displaced, entity.cell)
            };
            if !displaced {
                self.level.remove_object(cell)?;
            }
        }

        let lives = self.tuning.player_lives;
        for slot in PlayerSlot::BOTH {
            let id = self.players[slot.index()];
            let entity = self.level.entity_mut(id);
            entity.sprite.velocity = Vec2::ZERO;
            if let Some(player) = entity.as_player_mut() {
                player.reset(lives);
            }
            self.level.set_object(self.spawn_cells[slot.index()], id, Passability::Block)?;
        }

        for item in self.collectables.clone() {
            self.place_collectable(item)?;
        }

        self.scores = Scoreboard::default();
        self.new_high_score = false;
        self.remaining_secs = i64::from(self.tuning.match_duration_secs);
        self.match_started_at = now;
        self.idle_secs = 0.0;
        self.last_respawn_at = now;
        self.title = GAME_TITLE.to_string();
        self.set_phase(MatchPhase::MatchBeginning, now);
        Ok(())
    }

    pub(crate) fn set_phase(&mut self, phase: MatchPhase, now: f64) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_started_at = now;
        self.events.push(GameEvent::PhaseChanged(phase));
    }

    /// Roll a value and put a displaced collectable on a random free cell
    fn place_collectable(&mut self, item: EntityId) -> Result<Option<GridPos>, SimError> {
        let Some(cell) = self
            .level
            .random_free_cell(&mut self.rng, self.tuning.free_cell_attempts)
        else {
            log::warn!("No free cell for collectable {:?}", item);
            return Ok(None);
        };
        let value = ScoreModifier::roll(&self.tuning.modifier_values, &mut self.rng);
        self.level.entity_mut(item).set_modifier(value);
        self.level.set_object(cell, item, Passability::Passable)?;
        Ok(Some(cell))
    }

    /// Bring back at most one collected item per respawn window.
    ///
    /// The window restarts on every eligible call, even when nothing was
    /// waiting to respawn.
    pub fn respawn_collectables(&mut self, now: f64) -> Result<Option<EntityId>, SimError> {
        if now - self.last_respawn_at < self.tuning.respawn_interval_secs {
            return Ok(None);
        }
        self.last_respawn_at = now;

        let Some(item) = self
            .collectables
            .iter()
            .copied()
            .find(|&id| self.level.entity(id).displaced)
        else {
            return Ok(None);
        };
        let Some(cell) = self.place_collectable(item)? else {
            return Ok(None);
        };
        let value = self.level.entity(item).modifier().unwrap_or_default();
        log::debug!("Respawned {:?} at {:?} worth {:+}", item, cell, value);
        self.events.push(GameEvent::ItemRespawned { item, cell, value });
        Ok(Some(item))
    }

    /// Copy player scores into the scoreboard
    pub fn sync_scores(&mut self) {
        let [one, two] = self
            .players
            .map(|id| self.level.entity(id).as_player().map_or(0, |p| p.score()));
        self.scores = Scoreboard {
            player_one: one,
            player_two: two,
        };
    }

    /// End a running match and record high scores.
    ///
    /// Returns true if the match was running. Calling it again once the
    /// match is over does nothing.
    pub fn game_over(&mut self, now: f64, store: &mut dyn ScoreStore) -> Result<bool, SimError> {
        if self.phase != MatchPhase::Running {
            return Ok(false);
        }
        log::info!(
            "Time is out! {} - {}",
            self.scores.player_one,
            self.scores.player_two
        );
        let exit = self.sounds.play(SoundCue::Exit)?;
        self.events.push(GameEvent::Sound(exit));
        self.set_phase(MatchPhase::GameOver, now);

        let improved = self.high_scores.record(self.scores.as_array());
        if self.high_scores.save(store) && improved {
            self.new_high_score = true;
            self.title = format!("New High Scores! Saved - {GAME_TITLE}");
            self.events.push(GameEvent::NewHighScore);
        }
        Ok(true)
    }

    /// Toggle between running and paused. Other phases ignore it.
    pub fn toggle_pause(&mut self, now: f64) -> Result<(), SimError> {
        match self.phase {
            MatchPhase::Running => {
                let pause = self.sounds.play(SoundCue::Pause)?;
                self.events.push(GameEvent::Sound(pause));
                self.title = format!("Paused - {GAME_TITLE}");
                self.set_phase(MatchPhase::Paused, now);
            }
            MatchPhase::Paused => {
                self.title = GAME_TITLE.to_string();
                self.set_phase(MatchPhase::Running, now);
            }
            MatchPhase::MatchBeginning | MatchPhase::GameOver => {}
        }
        Ok(())
    }

    /// Seconds left in the lead-in
    pub fn lead_in_remaining(&self) -> f64 {
        if self.phase != MatchPhase::MatchBeginning {
            return 0.0;
        }
        (self.tuning.lead_in_secs - (self.clock.total - self.phase_started_at)).max(0.0)
    }
}

/// Whole seconds left: duration minus the non-idle time since the start
pub fn countdown_remaining(duration_secs: u32, elapsed_secs: f64, idle_secs: f64) -> i64 {
    i64::from(duration_secs) - (elapsed_secs - idle_secs).floor() as i64
}

/// Side-by-side cells in the middle of the grid
fn spawn_cells(tuning: &Tuning) -> [GridPos; 2] {
    let row = tuning.rows / 2;
    let middle = tuning.columns / 2;
    [
        GridPos::new(middle.saturating_sub(2), row),
        GridPos::new((middle + 1).min(tuning.columns.saturating_sub(1)), row),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn setup(high_scores: HighScores) -> MatchSetup {
        MatchSetup {
            tuning: Tuning::default(),
            textures: TextureSet::uniform(32.0),
            sounds: SoundBank::sequential(),
            high_scores,
        }
    }

    fn new_match() -> MatchState {
        MatchState::new(setup(HighScores::default()), 0.0).unwrap()
    }

    fn displace(state: &mut MatchState, item: EntityId) {
        let cell = state.level.entity(item).cell;
        state.level.remove_object(cell).unwrap();
    }

    fn running(state: &mut MatchState) {
        state.phase = MatchPhase::Running;
    }

    #[test]
    fn test_new_match_layout() {
        let state = new_match();
        assert_eq!(state.phase, MatchPhase::MatchBeginning);
        assert_eq!(state.remaining_secs, 20);
        assert_eq!(state.title, "Time Attack!");

        let one = state.player_entity(PlayerSlot::One);
        let two = state.player_entity(PlayerSlot::Two);
        assert_eq!(one.cell, GridPos::new(8, 7));
        assert_eq!(two.cell, GridPos::new(11, 7));
        assert_eq!(one.sprite.position, Vec2::new(256.0, 224.0));
        assert_eq!(one.sprite.speed, 32.0);

        assert_eq!(state.collectables.len(), 6);
        for &item in &state.collectables {
            let entity = state.level.entity(item);
            assert!(!entity.displaced);
            assert_eq!(entity.sprite.passability, Passability::Passable);
            assert!([1, -1].contains(&entity.modifier().unwrap()));
        }
        // 66 walls, 2 players, 6 items
        assert_eq!(state.level.live_objects().len(), 74);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = new_match();
        let b = new_match();
        let cells = |s: &MatchState| -> Vec<GridPos> {
            s.collectables.iter().map(|&id| s.level.entity(id).cell).collect()
        };
        assert_eq!(cells(&a), cells(&b));
    }

    #[test]
    fn test_respawn_throttle() {
        let mut state = new_match();
        let (first, second) = (state.collectables[0], state.collectables[1]);
        displace(&mut state, first);
        displace(&mut state, second);

        assert_eq!(state.respawn_collectables(2.9).unwrap(), None);
        assert_eq!(state.respawn_collectables(3.0).unwrap(), Some(first));
        assert_eq!(state.respawn_collectables(5.9).unwrap(), None);
        assert!(state.level.entity(second).displaced);
        assert_eq!(state.respawn_collectables(6.0).unwrap(), Some(second));
        assert!(!state.level.entity(second).displaced);
    }

    #[test]
    fn test_respawn_window_restarts_when_nothing_waits() {
        let mut state = new_match();
        assert_eq!(state.respawn_collectables(3.0).unwrap(), None);
        let item = state.collectables[0];
        displace(&mut state, item);
        assert_eq!(state.respawn_collectables(4.0).unwrap(), None);
        assert_eq!(state.respawn_collectables(6.0).unwrap(), Some(item));
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::ItemRespawned { item: i, .. } if *i == item
        )));
    }

    #[test]
    fn test_countdown_remaining() {
        assert_eq!(countdown_remaining(20, 25.0, 6.0), 1);
        assert_eq!(countdown_remaining(20, 26.0, 6.0), 0);
        assert_eq!(countdown_remaining(20, 0.5, 0.0), 20);
        assert_eq!(countdown_remaining(20, 30.0, 0.0), -10);
    }

    #[test]
    fn test_game_over_saves_improved_high_scores() {
        let mut store = MemoryStore::with_lines(&["5", "10"]);
        let mut state = MatchState::new(setup(HighScores::load(&store)), 0.0).unwrap();
        running(&mut state);
        state.scores = Scoreboard {
            player_one: 7,
            player_two: 3,
        };

        assert!(state.game_over(30.0, &mut store).unwrap());
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(store.lines, Some(vec!["7".to_string(), "10".to_string()]));
        assert!(state.new_high_score);
        assert_eq!(state.title, "New High Scores! Saved - Time Attack!");
        assert!(state.events.contains(&GameEvent::NewHighScore));
        assert!(state.events.contains(&GameEvent::Sound(SoundId(1))));

        // Already over
        state.events.clear();
        assert!(!state.game_over(31.0, &mut store).unwrap());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_without_improvement_keeps_title() {
        let mut store = MemoryStore::with_lines(&["5", "10"]);
        let mut state = MatchState::new(setup(HighScores::load(&store)), 0.0).unwrap();
        running(&mut state);
        state.scores = Scoreboard {
            player_one: 5,
            player_two: 2,
        };
        assert!(state.game_over(30.0, &mut store).unwrap());
        assert!(!state.new_high_score);
        assert_eq!(state.title, "Time Attack!");
    }

    #[test]
    fn test_failed_save_skips_celebration() {
        let mut store = MemoryStore::default();
        store.read_only = true;
        let mut state = new_match();
        running(&mut state);
        state.scores.player_two = 4;
        assert!(state.game_over(30.0, &mut store).unwrap());
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert!(!state.new_high_score);
        assert_eq!(state.title, "Time Attack!");
    }

    #[test]
    fn test_restart_resets_players_and_items() {
        let mut state = new_match();
        running(&mut state);
        let p1 = state.players[0];
        {
            let entity = state.level.entity_mut(p1);
            entity.sprite.position = Vec2::new(32.0, 32.0);
            entity.as_player_mut().unwrap().add_score(6);
        }
        let item = state.collectables[3];
        displace(&mut state, item);
        state.idle_secs = 9.0;

        state.restart(40.0).unwrap();
        assert_eq!(state.phase, MatchPhase::MatchBeginning);
        assert_eq!(state.match_started_at, 40.0);
        assert_eq!(state.idle_secs, 0.0);
        let entity = state.level.entity(p1);
        assert_eq!(entity.sprite.position, Vec2::new(256.0, 224.0));
        assert_eq!(entity.as_player().unwrap().score(), 0);
        assert_eq!(entity.as_player().unwrap().lives, 5);
        assert!(!state.level.entity(item).displaced);
        assert_eq!(state.level.live_objects().len(), 74);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = new_match();
        state.toggle_pause(1.0).unwrap();
        assert_eq!(state.phase, MatchPhase::MatchBeginning);

        running(&mut state);
        state.toggle_pause(5.0).unwrap();
        assert_eq!(state.phase, MatchPhase::Paused);
        assert_eq!(state.title, "Paused - Time Attack!");
        assert!(state.events.contains(&GameEvent::Sound(SoundId(0))));

        state.toggle_pause(6.0).unwrap();
        assert_eq!(state.phase, MatchPhase::Running);
        assert_eq!(state.title, "Time Attack!");
    }

    #[test]
    fn test_scoreboard_leader() {
        let mut board = Scoreboard::default();
        assert_eq!(board.leader(), None);
        board.player_two = 2;
        assert_eq!(board.leader(), Some(PlayerSlot::Two));
        assert_eq!(board.get(PlayerSlot::Two), 2);
    }
}
