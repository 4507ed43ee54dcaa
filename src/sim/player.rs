//! Player state machine, collision resolution and item pickup
//!
//! Per tick, in order: sample input (throttled), wrap at the screen edge,
//! resolve blocking collisions (cooldown-gated), pick up items, then commit
//! velocity to position exactly once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimError;
use super::collision::axis_contact;
use super::entity::{EntityId, Kind, Passability, Role, Sprite};
use super::level::{Level, UpdateContext, Viewport};
use super::state::GameEvent;
use super::tick::PlayerInput;
use crate::audio::SoundCue;
use crate::color::Color;
use crate::tuning::Tuning;

/// Which seat (and input binding) a player uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PlayerSlot::One => Color::RED,
            PlayerSlot::Two => Color::BLUE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerSlot::One => "Player 1",
            PlayerSlot::Two => "Player 2",
        }
    }
}

/// Behavioral state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Standing,
    Moving,
    /// Recently hit something; input is ignored until the cooldown passes
    Bouncing,
    /// Mid-hop; returns to the hop origin when it ends
    Dodging,
    /// Reserved; nothing transitions here yet
    Hurting,
    /// Frozen until revived
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub slot: PlayerSlot,
    pub lives: u8,
    score: u32,
    pub state: PlayerState,
    /// Time of this player's last resolved blocking collision
    pub last_collision_at: f64,
    pub last_jump_at: f64,
    pub jump_origin: Vec2,
    /// Tick of the last player-vs-player collision this player took part in
    last_bump_at: Option<f64>,
    /// Time accumulated since input was last sampled
    input_timer: f64,
}

impl Player {
    pub fn new(slot: PlayerSlot, lives: u8) -> Self {
        Self {
            slot,
            lives,
            score: 0,
            state: PlayerState::Standing,
            last_collision_at: 0.0,
            last_jump_at: 0.0,
            jump_origin: Vec2::ZERO,
            last_bump_at: None,
            input_timer: 0.0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Apply a signed delta; the score never drops below zero
    pub fn add_score(&mut self, delta: i32) {
        let next = i64::from(self.score) + i64::from(delta);
        self.score = next.clamp(0, i64::from(u32::MAX)) as u32;
    }

    /// Restore lives and state, keeping the score
    pub fn revive(&mut self, lives: u8) {
        self.lives = lives;
        self.state = PlayerState::Standing;
    }

    /// Fresh start for a new match
    pub fn reset(&mut self, lives: u8) {
        self.revive(lives);
        self.score = 0;
        self.last_collision_at = 0.0;
        self.last_jump_at = 0.0;
        self.last_bump_at = None;
        self.input_timer = 0.0;
    }

    pub fn kill(&mut self) {
        self.lives = 0;
        self.state = PlayerState::Dead;
    }
}

/// Deferred effects on entities other than the one being updated
#[derive(Debug, Default)]
struct Aftermath {
    /// Rival to mark as bumped, and whether the rival earned the point
    rival: Option<(EntityId, bool)>,
    collected: Vec<EntityId>,
}

/// Run one tick for the player entity `id`
pub fn update(
    level: &mut Level,
    id: EntityId,
    live: &[EntityId],
    ctx: &UpdateContext<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let entity = level.entity(id);
    let Some(mut player) = entity.as_player().copied() else {
        return Ok(());
    };
    if player.state == PlayerState::Dead {
        return Ok(());
    }
    let mut sprite = entity.sprite;
    let now = ctx.time.total;
    let tuning = ctx.tuning;

    player.input_timer += ctx.time.elapsed;

    let can_collide = now - player.last_collision_at > tuning.collision_cooldown_secs
        || player.state == PlayerState::Dodging;
    if can_collide && player.state != PlayerState::Dodging {
        player.state = PlayerState::Standing;
    }

    if player.state != PlayerState::Bouncing && player.input_timer > tuning.input_interval_secs {
        let input = &ctx.inputs[player.slot.index()];
        steer(&mut player, &mut sprite, input);
        if dodge(&mut player, &mut sprite, input, now, tuning) {
            log::debug!("{} dodged", player.slot.name());
            events.push(GameEvent::Sound(level.entity(id).play(SoundCue::Jump)?));
            events.push(GameEvent::Dodged { player: id });
        }
        player.input_timer = 0.0;
    }

    wrap_to_viewport(&mut sprite, ctx.viewport);

    let mut aftermath = Aftermath::default();
    if can_collide {
        resolve_collisions(
            level,
            id,
            &mut player,
            &mut sprite,
            live,
            now,
            tuning,
            &mut aftermath,
            events,
        )?;
    }
    collect_items(level, id, &mut player, &sprite, live, &mut aftermath, events)?;

    sprite.apply_velocity();

    let entity = level.entity_mut(id);
    entity.sprite = sprite;
    entity.role = Role::Player(player);

    if let Some((rival_id, credited)) = aftermath.rival {
        if let Some(rival) = level.entity_mut(rival_id).as_player_mut() {
            rival.last_bump_at = Some(now);
            if credited {
                rival.add_score(1);
            }
        }
    }
    for item in aftermath.collected {
        let cell = level.entity(item).cell;
        level.remove_object(cell)?;
    }
    Ok(())
}

/// Directional input, one axis per sample; earlier directions win
fn steer(player: &mut Player, sprite: &mut Sprite, input: &PlayerInput) {
    if player.state == PlayerState::Dodging {
        return;
    }
    if input.left {
        player.state = PlayerState::Moving;
        sprite.move_left();
    } else if input.right {
        player.state = PlayerState::Moving;
        sprite.move_right();
    } else if input.up {
        player.state = PlayerState::Moving;
        sprite.move_up();
    } else if input.down {
        player.state = PlayerState::Moving;
        sprite.move_down();
    }
}

/// Start or finish a dodge hop. Returns true when a hop starts.
fn dodge(
    player: &mut Player,
    sprite: &mut Sprite,
    input: &PlayerInput,
    now: f64,
    tuning: &Tuning,
) -> bool {
    match player.state {
        PlayerState::Standing | PlayerState::Moving if input.jump => {
            player.state = PlayerState::Dodging;
            player.jump_origin = sprite.position;
            player.last_jump_at = now;
            sprite.velocity = Vec2::new(0.0, -sprite.speed * tuning.dodge_impulse);
            true
        }
        PlayerState::Dodging if now - player.last_jump_at > tuning.dodge_duration_secs => {
            sprite.position = player.jump_origin;
            player.state = PlayerState::Standing;
            player.last_jump_at = 0.0;
            false
        }
        _ => false,
    }
}

/// Snap to the opposite edge when the pending move would leave the screen
fn wrap_to_viewport(sprite: &mut Sprite, viewport: Viewport) {
    let bounds = sprite.bounding_box();
    let velocity = sprite.velocity;

    if bounds.right() + velocity.x > viewport.width {
        sprite.position.x = 0.0;
    } else if bounds.left() + velocity.x < 0.0 {
        sprite.position.x = viewport.width - sprite.speed;
    }
    if bounds.bottom() + velocity.y > viewport.height {
        sprite.position.y = 0.0;
    } else if bounds.top() + velocity.y < 0.0 {
        sprite.position.y = viewport.height - sprite.speed;
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_collisions(
    level: &Level,
    id: EntityId,
    player: &mut Player,
    sprite: &mut Sprite,
    live: &[EntityId],
    now: f64,
    tuning: &Tuning,
    aftermath: &mut Aftermath,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    if sprite.passability != Passability::Block {
        return Ok(());
    }

    for &other_id in live {
        if other_id == id {
            continue;
        }
        let other = level.entity(other_id);
        if other.displaced || other.sprite.passability != Passability::Block {
            continue;
        }

        let contact = axis_contact(
            &sprite.bounding_box(),
            sprite.velocity,
            &other.sprite.bounding_box(),
        );
        if !contact.any() {
            continue;
        }
        player.state = PlayerState::Bouncing;

        let factor = match (other.kind(), other.as_player()) {
            (Kind::Player, Some(rival)) => {
                score_bump(level, id, player, other_id, rival, now, aftermath, events)?;
                tuning.hit_rebound
            }
            _ => 0.0,
        };
        // The axis that did not hit is cancelled outright.
        sprite.velocity.x *= if contact.x { factor } else { 0.0 };
        sprite.velocity.y *= if contact.y { factor } else { 0.0 };

        player.last_collision_at = now;
    }
    Ok(())
}

/// Award the point for a player-vs-player collision.
///
/// The player whose previous collision is strictly more recent earns it. A
/// dodging rival cannot be scored on, and a pair already scored this tick is
/// not scored again when the rival runs its own update.
#[allow(clippy::too_many_arguments)]
fn score_bump(
    level: &Level,
    id: EntityId,
    player: &mut Player,
    rival_id: EntityId,
    rival: &Player,
    now: f64,
    aftermath: &mut Aftermath,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let already_scored = player.last_bump_at == Some(now) || rival.last_bump_at == Some(now);
    player.last_bump_at = Some(now);

    let scorer = if already_scored {
        None
    } else if player.last_collision_at > rival.last_collision_at
        && rival.state != PlayerState::Dodging
    {
        Some((id, rival_id))
    } else if rival.last_collision_at > player.last_collision_at
        && player.state != PlayerState::Dodging
    {
        Some((rival_id, id))
    } else {
        None
    };

    if let Some((scorer, target)) = scorer {
        if scorer == id {
            player.add_score(1);
        }
        log::debug!("hit: {:?} scores on {:?}", scorer, target);
        events.push(GameEvent::Sound(level.entity(id).play(SoundCue::Hit)?));
        events.push(GameEvent::PlayerHit { scorer, target });
    }
    aftermath.rival = Some((rival_id, scorer.is_some_and(|(s, _)| s == rival_id)));
    Ok(())
}

fn collect_items(
    level: &Level,
    id: EntityId,
    player: &mut Player,
    sprite: &Sprite,
    live: &[EntityId],
    aftermath: &mut Aftermath,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    for &other_id in live {
        if other_id == id {
            continue;
        }
        let other = level.entity(other_id);
        // Another player may already have taken it this tick
        if other.displaced {
            continue;
        }
        let Some(value) = other.modifier() else {
            continue;
        };
        let contact = axis_contact(
            &sprite.bounding_box(),
            sprite.velocity,
            &other.sprite.bounding_box(),
        );
        if !contact.any() {
            continue;
        }

        let cue = match value.signum() {
            1 => SoundCue::ItemScore,
            -1 => SoundCue::ItemDamage,
            _ => SoundCue::ItemCollect,
        };
        events.push(GameEvent::Sound(other.play(cue)?));
        log::debug!("{} picked up {:+}", player.slot.name(), value);

        player.add_score(value);
        aftermath.collected.push(other_id);
        events.push(GameEvent::ItemCollected {
            player: id,
            item: other_id,
            value,
        });
    }
    Ok(())
}
