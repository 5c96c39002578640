//! Error taxonomy
//!
//! Only display errors ever reach the frame loop. Observer and audio errors
//! are recovered where they occur and replaced with placeholders or silence.

use std::io;

use thiserror::Error;

/// Host fact lookups
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("could not resolve an address for host `{host}`")]
    AddressUnresolvable { host: String },
}

/// Ambient sound
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("ambient asset `{path}` is unavailable: {reason}")]
    AssetUnavailable { path: String, reason: String },
    #[error("no audio output available: {0}")]
    PlaybackUnavailable(String),
}

/// Terminal display
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to acquire the terminal: {0}")]
    Init(#[source] io::Error),
    #[error("terminal reports an empty surface ({cols}x{rows})")]
    EmptySurface { cols: u16, rows: u16 },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
