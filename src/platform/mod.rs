//! Platform layer
//!
//! Everything that touches the host: terminal I/O, frame pacing, and
//! the facts the narrative is built from.

pub mod clock;
pub mod input;
pub mod observer;
pub mod terminal;

pub use clock::FrameClock;
pub use observer::{HostObserver, SystemObserver, is_monitoring_tool_active};
pub use terminal::{Display, TerminalDisplay};
