//! Draw list generation
//!
//! Turns a [`MatchState`] into an ordered list of draw calls plus a window
//! title. Paint order is fixed: clear, tiles, objects, HUD, then the overlay
//! for the current phase. The presentation layer only has to execute the
//! calls in order.

use glam::Vec2;

use crate::color::Color;
use crate::sim::{MatchPhase, MatchState, PlayerSlot, Sprite, TextureId};

/// Font faces the HUD uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Label,
    Score,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Sprite {
        texture: TextureId,
        position: Vec2,
        color: Color,
    },
    Text {
        font: Font,
        text: String,
        position: Vec2,
        color: Color,
    },
}

/// Everything needed to present one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub calls: Vec<DrawCall>,
    pub title: String,
}

impl Frame {
    fn sprite(&mut self, sprite: &Sprite) {
        self.calls.push(DrawCall::Sprite {
            texture: sprite.texture.id,
            position: sprite.position,
            color: sprite.color,
        });
    }

    fn text(&mut self, font: Font, text: impl Into<String>, x: f32, y: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            font,
            text: text.into(),
            position: Vec2::new(x, y),
            color,
        });
    }

    /// Text of every text call, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

pub fn render(state: &MatchState) -> Frame {
    let mut frame = Frame {
        calls: Vec::new(),
        title: state.title.clone(),
    };
    frame.calls.push(DrawCall::Clear(Color::AZURE));

    for sprite in state.level.draw_order() {
        frame.sprite(sprite);
    }
    hud(&mut frame, state);
    overlay(&mut frame, state);
    frame
}

/// Score per seat along the bottom edge, clock in the top-left corner
fn hud(frame: &mut Frame, state: &MatchState) {
    let (w, h) = (state.viewport.width, state.viewport.height);

    frame.text(Font::Label, "Score", 10.0, h - 32.0, PlayerSlot::One.color());
    frame.text(
        Font::Score,
        state.scores.player_one.to_string(),
        70.0,
        h - 35.0,
        Color::BLACK,
    );

    frame.text(Font::Label, "Score", w - 106.0, h - 32.0, PlayerSlot::Two.color());
    frame.text(
        Font::Score,
        state.scores.player_two.to_string(),
        w - 48.0,
        h - 35.0,
        Color::BLACK,
    );

    frame.text(Font::Score, state.remaining_secs.to_string(), 10.0, 10.0, Color::BLACK);
}

fn overlay(frame: &mut Frame, state: &MatchState) {
    let center = Vec2::new(state.viewport.width, state.viewport.height) / 2.0;
    let x = center.x - 80.0;

    match state.phase {
        MatchPhase::Running => {}
        MatchPhase::MatchBeginning => {
            let seconds = state.lead_in_remaining().ceil() as u32;
            frame.text(Font::Label, "Get ready!", x, center.y - 40.0, Color::BLACK);
            frame.text(Font::Score, seconds.to_string(), center.x - 8.0, center.y, Color::BLACK);
        }
        MatchPhase::Paused => {
            frame.text(Font::Label, "Paused", x, center.y - 40.0, Color::BLACK);
        }
        MatchPhase::GameOver => {
            let verdict = match state.scores.leader() {
                Some(slot) => format!("{} wins!", slot.name()),
                None => "Draw!".to_string(),
            };
            let best = &state.high_scores;
            frame.text(Font::Label, "Time's up!", x, center.y - 60.0, Color::BLACK);
            frame.text(Font::Label, verdict, x, center.y - 30.0, Color::BLACK);
            frame.text(
                Font::Label,
                format!(
                    "High scores: {} - {}",
                    best.get(PlayerSlot::One),
                    best.get(PlayerSlot::Two)
                ),
                x,
                center.y,
                Color::BLACK,
            );
            if state.new_high_score {
                frame.text(Font::Label, "New high score!", x, center.y + 30.0, Color::RED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundBank;
    use crate::highscores::HighScores;
    use crate::sim::{MatchSetup, Scoreboard, TextureSet};
    use crate::tuning::Tuning;

    fn new_match() -> MatchState {
        let setup = MatchSetup {
            tuning: Tuning::default(),
            textures: TextureSet::uniform(32.0),
            sounds: SoundBank::sequential(),
            high_scores: HighScores::new(5, 10),
        };
        MatchState::new(setup, 0.0).unwrap()
    }

    #[test]
    fn test_paint_order() {
        let state = new_match();
        let frame = render(&state);
        let textures = TextureSet::uniform(32.0);

        assert_eq!(frame.calls[0], DrawCall::Clear(Color::AZURE));
        let cells = 20 * 15;
        let objects = state.level.live_objects().len();
        // Tiles first
        for call in &frame.calls[1..=cells] {
            assert!(
                matches!(call, DrawCall::Sprite { texture, .. } if *texture == textures.floor.id)
            );
        }
        // Then objects, none of them floor
        for call in &frame.calls[cells + 1..=cells + objects] {
            assert!(
                matches!(call, DrawCall::Sprite { texture, .. } if *texture != textures.floor.id)
            );
        }
        // Then text only
        assert!(
            frame.calls[cells + objects + 1..]
                .iter()
                .all(|call| matches!(call, DrawCall::Text { .. }))
        );
    }

    #[test]
    fn test_hud_layout() {
        let mut state = new_match();
        state.scores = Scoreboard {
            player_one: 3,
            player_two: 12,
        };
        let frame = render(&state);
        let texts: Vec<_> = frame
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text {
                    text,
                    position,
                    color,
                    ..
                } => Some((text.as_str(), *position, *color)),
                _ => None,
            })
            .collect();

        assert_eq!(texts[0], ("Score", Vec2::new(10.0, 448.0), Color::RED));
        assert_eq!(texts[1], ("3", Vec2::new(70.0, 445.0), Color::BLACK));
        assert_eq!(texts[2], ("Score", Vec2::new(534.0, 448.0), Color::BLUE));
        assert_eq!(texts[3], ("12", Vec2::new(592.0, 445.0), Color::BLACK));
        assert_eq!(texts[4], ("20", Vec2::new(10.0, 10.0), Color::BLACK));
    }

    #[test]
    fn test_overlays_follow_phase() {
        let mut state = new_match();
        assert!(render(&state).texts().any(|t| t == "Get ready!"));
        assert!(render(&state).texts().any(|t| t == "4"));

        state.phase = MatchPhase::Running;
        assert_eq!(render(&state).texts().count(), 5);

        state.phase = MatchPhase::Paused;
        assert!(render(&state).texts().any(|t| t == "Paused"));

        state.phase = MatchPhase::GameOver;
        state.scores.player_two = 1;
        let frame = render(&state);
        assert!(frame.texts().any(|t| t == "Time's up!"));
        assert!(frame.texts().any(|t| t == "Player 2 wins!"));
        assert!(frame.texts().any(|t| t == "High scores: 5 - 10"));
    }

    #[test]
    fn test_title_passes_through() {
        let mut state = new_match();
        state.title = "Paused - Time Attack!".into();
        assert_eq!(render(&state).title, "Paused - Time Attack!");
    }
}
