//! Frame loop
//!
//! One synchronous pass per frame: pace, poll, step, compose, present.
//! Nothing here blocks besides the frame-rate sleep.

use crate::audio::{self, AudioPlayback};
use crate::error::DisplayError;
use crate::narrative::{LiveNarrative, NarrativeSource};
use crate::platform::{Display, FrameClock, HostObserver, TerminalDisplay};
use crate::renderer::{Frame, compose};
use crate::settings::Settings;
use crate::sim::{Flow, GameEvent, GameMachine, TickOptions};

pub struct App<D, N> {
    settings: Settings,
    display: D,
    machine: GameMachine<N>,
    audio: Box<dyn AudioPlayback>,
    frame: Frame,
}

impl App<TerminalDisplay, LiveNarrative<HostObserver>> {
    /// Acquire the terminal and start the first session
    pub fn init(settings: Settings) -> Result<Self, DisplayError> {
        let display = TerminalDisplay::open()?;
        let narrative = LiveNarrative::new(HostObserver::new());
        let audio = audio::open(&settings);
        Ok(Self::new(settings, display, narrative, audio))
    }
}

impl<D: Display, N: NarrativeSource> App<D, N> {
    pub fn new(settings: Settings, display: D, narrative: N, audio: Box<dyn AudioPlayback>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let options = TickOptions {
            glitches: settings.glitches_enabled(),
        };
        let machine = GameMachine::new(display.bounds(), seed, narrative).with_options(options);
        let (cols, rows) = display.size();
        Self {
            settings,
            display,
            machine,
            audio,
            frame: Frame::new(cols, rows),
        }
    }

    pub fn machine(&self) -> &GameMachine<N> {
        &self.machine
    }

    /// Run one frame with `dt` seconds of real elapsed time
    pub fn frame(&mut self, dt: f32) -> Result<Flow, DisplayError> {
        let input = self.display.poll()?;
        let (flow, events) = self.machine.step(&input, dt);
        if flow == Flow::Quit {
            log::info!("Quit requested");
            return Ok(Flow::Quit);
        }
        for event in &events {
            match event {
                GameEvent::Spawned { shadow_id } => log::debug!("Shadow {shadow_id} spawned"),
                GameEvent::Died { .. } => log::debug!("Death reveal started"),
            }
        }

        let (cols, rows) = self.display.size();
        self.frame.resize(cols, rows);
        compose(&mut self.frame, self.machine.session(), &self.settings);
        self.display.present(&self.frame)?;
        Ok(Flow::Continue)
    }

    /// Loop until quit or a display failure
    pub fn run(&mut self) -> Result<(), DisplayError> {
        self.audio.loop_ambient(&self.settings.ambient_path);
        let mut clock = FrameClock::new(self.settings.fps_cap);
        loop {
            let dt = clock.tick();
            if self.frame(dt)? == Flow::Quit {
                return Ok(());
            }
        }
    }
}

/// Entry point used by the binary
pub fn run() -> anyhow::Result<()> {
    let settings = Settings::load();
    let mut app = App::init(settings)?;
    app.run()?;
    Ok(())
}
