//! 2D drawing surface contract.
//!
//! Games redraw the whole surface every frame through the `Surface` trait.
//! A browser host backs it with a canvas context; tests use
//! `RecordingSurface`, which keeps the command list for inspection.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GOLD: Color = Color::hex(0xffd700);
    pub const GREY: Color = Color::hex(0xaaaaaa);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 191);
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A drawing surface with fixed logical pixel dimensions.
pub trait Surface {
    /// Logical `(width, height)` in pixels.
    fn size(&self) -> (f64, f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64);

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Color, line_width: f64);

    /// Straight path stroke. An empty `dash` draws a solid line.
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f64, dash: &[f64]);

    fn text(&mut self, at: Vec2, text: &str, color: Color, size: f64, align: Align);

    /// Fill the entire surface.
    fn clear(&mut self, color: Color) {
        let (w, h) = self.size();
        self.fill_rect(0.0, 0.0, w, h, color);
    }
}

/// A recorded drawing operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Color },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64 },
    FillCircle { center: Vec2, radius: f64, color: Color },
    StrokeCircle { center: Vec2, radius: f64, color: Color, line_width: f64 },
    Line { from: Vec2, to: Vec2, color: Color, line_width: f64, dash: Vec<f64> },
    Text { at: Vec2, text: String, color: Color, size: f64, align: Align },
}

/// Surface that records every command.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// True if any drawn text contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h, color, line_width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, color, line_width });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f64, dash: &[f64]) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
            dash: dash.to_vec(),
        });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Color, size: f64, align: Align) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
            size,
            align,
        });
    }
}
