//! Rendering contract and on-screen text.
//!
//! - `surface`: the `Surface` trait, colours, and a recording implementation
//! - `i18n`: the `Translate` function games use for on-screen strings
//! - `overlay`: HUD and game-over overlays shared by the games

pub mod i18n;
pub mod overlay;
pub mod surface;

pub use i18n::{Dictionary, Translate};
pub use surface::{Align, Color, DrawCommand, RecordingSurface, Surface};
