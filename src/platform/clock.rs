//! Frame-rate cap
//!
//! Like a game clock's `tick(fps)`: waits out the rest of the frame, then
//! reports how much wall time really passed since the previous tick.

use std::time::{Duration, Instant};

pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let fps = fps.clamp(10, 240);
        Self {
            frame: Duration::from_secs_f64(1.0 / fps as f64),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep until the next frame is due; returns elapsed seconds
    pub fn tick(&mut self) -> f32 {
        spin_sleep_until(self.last + self.frame);
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt.as_secs_f32()
    }
}

fn spin_sleep_until(end: Instant) {
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
