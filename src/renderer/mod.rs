//! Terminal rendering module
//!
//! Draws into a half-block pixel frame; the platform layer prints it.

pub mod canvas;
pub mod scene;
pub mod shapes;
pub mod text;

pub use canvas::{Cell, Frame, Glyph, Rgb};
pub use scene::compose;
pub use shapes::Viewport;
