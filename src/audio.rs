//! Ambient audio
//!
//! One looping background track. Every failure degrades to silence: a
//! missing asset or a machine without an output device never stops play.
//! The rodio backend is compiled in with the `audio` feature.

use std::path::Path;

use crate::error::AudioError;
use crate::settings::Settings;

/// Something that can loop the ambient track
pub trait AudioPlayback {
    /// Start looping `path`; failures are swallowed (and logged)
    fn loop_ambient(&mut self, path: &Path);

    /// Whether anything is currently audible
    fn is_playing(&self) -> bool;
}

/// No-op playback
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioPlayback for SilentAudio {
    fn loop_ambient(&mut self, path: &Path) {
        log::debug!("Audio disabled; not playing {}", path.display());
    }

    fn is_playing(&self) -> bool {
        false
    }
}

#[cfg(feature = "audio")]
mod backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::AudioPlayback;
    use crate::error::AudioError;

    pub struct RodioAudio {
        // Dropping the stream silences every sink
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sink: Option<Sink>,
        volume: f32,
    }

    impl RodioAudio {
        pub fn new(volume: f32) -> Result<Self, AudioError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| AudioError::PlaybackUnavailable(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                sink: None,
                volume,
            })
        }

        fn try_loop(&mut self, path: &Path) -> Result<(), AudioError> {
            let unavailable = |reason: String| AudioError::AssetUnavailable {
                path: path.display().to_string(),
                reason,
            };
            let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
            let source = Decoder::new(BufReader::new(file)).map_err(|e| unavailable(e.to_string()))?;
            let sink = Sink::try_new(&self.handle)
                .map_err(|e| AudioError::PlaybackUnavailable(e.to_string()))?;
            sink.set_volume(self.volume);
            sink.append(source.repeat_infinite());
            sink.play();
            self.sink = Some(sink);
            Ok(())
        }
    }

    impl AudioPlayback for RodioAudio {
        fn loop_ambient(&mut self, path: &Path) {
            if let Some(old) = self.sink.take() {
                old.stop();
            }
            match self.try_loop(path) {
                Ok(()) => log::info!("Looping ambient track {}", path.display()),
                Err(e) => log::info!("Continuing without ambient audio: {e}"),
            }
        }

        fn is_playing(&self) -> bool {
            self.sink.as_ref().is_some_and(|s| !s.is_paused() && !s.empty())
        }
    }
}

#[cfg(feature = "audio")]
pub use backend::RodioAudio;

/// Best available playback for these settings
pub fn open(settings: &Settings) -> Box<dyn AudioPlayback> {
    if settings.muted {
        log::info!("Audio muted by settings");
        return Box::new(SilentAudio);
    }
    match open_device(settings.effective_volume()) {
        Ok(audio) => audio,
        Err(e) => {
            log::info!("Continuing without audio: {e}");
            Box::new(SilentAudio)
        }
    }
}

#[cfg(feature = "audio")]
fn open_device(volume: f32) -> Result<Box<dyn AudioPlayback>, AudioError> {
    Ok(Box::new(RodioAudio::new(volume)?))
}

#[cfg(not(feature = "audio"))]
fn open_device(_volume: f32) -> Result<Box<dyn AudioPlayback>, AudioError> {
    Err(AudioError::PlaybackUnavailable(
        "built without the `audio` feature".to_string(),
    ))
}
