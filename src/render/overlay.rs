//! Shared HUD and terminal-state overlay drawing.

use super::i18n::Translate;
use super::surface::{Align, Color, Surface};
use crate::core::Vec2;

/// Draw the game-over overlay: dimmed surface, title, score and optional
/// high score, centred.
pub fn game_over(surface: &mut dyn Surface, text: &dyn Translate, title: &str, score: u32, high_score: Option<u32>) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, Color::OVERLAY);

    let cx = w / 2.0;
    let cy = h / 2.0;
    surface.text(Vec2::new(cx, cy - 30.0), title, Color::WHITE, 36.0, Align::Center);
    surface.text(
        Vec2::new(cx, cy + 10.0),
        &format!("{}: {}", text.text("score"), score),
        Color::WHITE,
        20.0,
        Align::Center,
    );
    if let Some(best) = high_score {
        surface.text(
            Vec2::new(cx, cy + 40.0),
            &format!("{}: {}", text.text("highScore"), best),
            Color::GOLD,
            20.0,
            Align::Center,
        );
    }
    surface.text(Vec2::new(cx, cy + 80.0), &text.text("resetGame"), Color::GREY, 16.0, Align::Center);
}

/// Centred banner over a dimmed surface (paused, start prompt).
pub fn banner(surface: &mut dyn Surface, message: &str) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, Color::rgba(0, 0, 0, 128));
    surface.text(Vec2::new(w / 2.0, h / 2.0), message, Color::WHITE, 28.0, Align::Center);
}

/// Top-left score line.
pub fn score_line(surface: &mut dyn Surface, text: &dyn Translate, score: u32) {
    surface.text(
        Vec2::new(12.0, 22.0),
        &format!("{}: {}", text.text("score"), score),
        Color::WHITE,
        16.0,
        Align::Left,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Dictionary, RecordingSurface};

    #[test]
    fn test_game_over_overlay_text() {
        let mut surface = RecordingSurface::new(600.0, 400.0);
        let dict = Dictionary::english();
        game_over(&mut surface, &dict, "Game Over", 120, Some(300));

        assert!(surface.contains_text("Game Over"));
        assert!(surface.contains_text("Score: 120"));
        assert!(surface.contains_text("High Score: 300"));
    }

    #[test]
    fn test_game_over_without_high_score() {
        let mut surface = RecordingSurface::new(600.0, 400.0);
        game_over(&mut surface, &Dictionary::english(), "Game Over", 5, None);
        assert!(!surface.contains_text("High Score"));
    }
}
