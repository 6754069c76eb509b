use instant::Instant;
use std::time::Duration;

/// Elapsed-time accounting for the render loop; paused intervals are excluded.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Delta since the previous tick (zero on the first tick after `new`).
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) if now > last => now - last,
            _ => Duration::ZERO,
        };
        self.last = Some(now);
        self.elapsed += dt;
        dt
    }

    /// Forget the last tick so the next delta does not span the pause.
    pub fn resume(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
