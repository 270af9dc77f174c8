//! Input translation: device events to discrete game commands.
//!
//! Games never see raw keys or client coordinates. The host converts them
//! through this module so keyboard, mouse, touch, and on-screen buttons all
//! drive the same `Command` surface.

pub mod command;
pub mod translator;

pub use command::{Command, Direction};
pub use translator::{bindings, DisplayRect, Key, PointerEvent, SurfaceScale, SwipeTracker, MIN_SWIPE_DISTANCE};
