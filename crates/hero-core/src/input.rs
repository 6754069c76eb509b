use glam::Vec2;

/// Map a client-space coordinate to [-1, 1] per axis against the window size.
///
/// A degenerate window maps to the center.
#[inline]
pub fn normalize_client(x: f32, y: f32, window_w: f32, window_h: f32) -> Vec2 {
    if window_w > 0.0 && window_h > 0.0 {
        Vec2::new((x / window_w) * 2.0 - 1.0, (y / window_h) * 2.0 - 1.0)
    } else {
        Vec2::ZERO
    }
}

/// Pointer target plus an exponentially smoothed position chasing it.
///
/// The smoothing step is applied once per rendered frame, so the chase speed
/// follows the display refresh rate.
#[derive(Clone, Copy, Debug)]
pub struct InputSmoother {
    target: Vec2,
    smoothed: Vec2,
    sensitivity: f32,
}

impl InputSmoother {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            smoothed: Vec2::ZERO,
            sensitivity,
        }
    }

    /// Non-finite targets are dropped so the smoothed value stays finite.
    pub fn set_target(&mut self, target: Vec2) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn set_target_from_client(&mut self, x: f32, y: f32, window_w: f32, window_h: f32) {
        self.set_target(normalize_client(x, y, window_w, window_h));
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    pub fn tick(&mut self) -> Vec2 {
        self.smoothed += (self.target - self.smoothed) * self.sensitivity;
        self.smoothed
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }
}
