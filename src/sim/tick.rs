//! Per-frame simulation step
//!
//! One call advances the match by one frame. Within a frame the level
//! updates first, then collectables respawn, then scores and the clock are
//! aggregated, and only then are pause/restart/exit controls applied.

use super::SimError;
use super::level::{FrameTime, UpdateContext};
use super::player::PlayerSlot;
use super::state::{MatchPhase, MatchState, countdown_remaining};
use crate::persistence::ScoreStore;

/// Buttons held by one player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Dodge hop
    pub jump: bool,
}

impl PlayerInput {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down || self.jump
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub players: [PlayerInput; 2],
    /// Pause toggle (pressed this frame)
    pub pause: bool,
    /// Restart (pressed this frame)
    pub restart: bool,
    /// Quit request
    pub exit: bool,
    /// Idle/demo mode - bots play both seats
    pub idle_mode: bool,
}

/// Advance the match by one frame
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    time: FrameTime,
    store: &mut dyn ScoreStore,
) -> Result<(), SimError> {
    state.events.clear();
    state.clock = time;

    match state.phase {
        MatchPhase::MatchBeginning => {
            state.idle_secs += time.elapsed;
            if time.total - state.phase_started_at >= state.tuning().lead_in_secs {
                log::info!("Match started");
                state.set_phase(MatchPhase::Running, time.total);
            }
        }
        MatchPhase::Paused => state.idle_secs += time.elapsed,
        MatchPhase::Running => {
            let players = if input.idle_mode {
                PlayerSlot::BOTH.map(|slot| attract_input(state, slot))
            } else {
                input.players
            };
            run(state, &players, time, store)?;
        }
        MatchPhase::GameOver => {}
    }

    handle_controls(state, input, time.total)
}

fn run(
    state: &mut MatchState,
    players: &[PlayerInput; 2],
    time: FrameTime,
    store: &mut dyn ScoreStore,
) -> Result<(), SimError> {
    let tuning = state.tuning().clone();
    let ctx = UpdateContext {
        time,
        viewport: state.viewport,
        inputs: players,
        tuning: &tuning,
    };
    state.level.update(&ctx, &mut state.events)?;
    state.respawn_collectables(time.total)?;
    state.sync_scores();

    let remaining = countdown_remaining(
        tuning.match_duration_secs,
        time.total - state.match_started_at,
        state.idle_secs,
    );
    state.remaining_secs = remaining.max(0);
    if remaining <= 0 {
        state.game_over(time.total, store)?;
    }
    Ok(())
}

/// Controls are ignored during the lead-in, and restart only works once the
/// match is paused or over.
fn handle_controls(state: &mut MatchState, input: &TickInput, now: f64) -> Result<(), SimError> {
    if state.phase == MatchPhase::MatchBeginning {
        return Ok(());
    }
    if input.exit && !state.exit_requested {
        log::info!("Exit requested");
        state.exit_requested = true;
    }
    if input.restart && matches!(state.phase, MatchPhase::Paused | MatchPhase::GameOver) {
        return state.restart(now);
    }
    if input.pause {
        state.toggle_pause(now)?;
    }
    Ok(())
}

/// Bot steering for attract mode: head for the nearest collectable, one
/// axis at a time
pub fn attract_input(state: &MatchState, slot: PlayerSlot) -> PlayerInput {
    let me = state.player_entity(slot).sprite.position;
    let half_tile = state.level.tile_length() / 2.0;

    let target = state
        .collectables
        .iter()
        .map(|&id| state.level.entity(id))
        .filter(|item| !item.displaced && item.modifier().is_some_and(|value| value > 0))
        .map(|item| item.sprite.position)
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut input = PlayerInput::default();
    let Some(target) = target else {
        return input;
    };
    let delta = target - me;
    if delta.x.abs() >= half_tile {
        input.left = delta.x < 0.0;
        input.right = delta.x > 0.0;
    } else if delta.y.abs() >= half_tile {
        input.up = delta.y < 0.0;
        input.down = delta.y > 0.0;
    }
    input
}
