//! Adaptive pixel-ratio cap driven by measured frame deltas.
//!
//! A hysteresis counter rises on every janky frame and decays by one on
//! every good frame. Reaching the trip point lowers the cap by one step and
//! resets the counter. The controller never raises the cap on its own; only
//! [`AdaptiveQualityController::set_cap`] does.

use crate::constants::{CAP_FLOOR, CAP_STEP, JANK_THRESHOLD_SEC, JANK_TRIP_POINT};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityTuning {
    pub jank_threshold_sec: f32,
    pub trip_point: u32,
    pub step: f32,
    pub floor: f32,
}

impl Default for QualityTuning {
    fn default() -> Self {
        Self {
            jank_threshold_sec: JANK_THRESHOLD_SEC,
            trip_point: JANK_TRIP_POINT,
            step: CAP_STEP,
            floor: CAP_FLOOR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdaptiveQualityController {
    tuning: QualityTuning,
    cap: f32,
    jank: u32,
    reductions: u32,
}

impl AdaptiveQualityController {
    pub fn new(initial_cap: f32) -> Self {
        Self::with_tuning(initial_cap, QualityTuning::default())
    }

    pub fn with_tuning(initial_cap: f32, tuning: QualityTuning) -> Self {
        Self {
            tuning,
            cap: initial_cap,
            jank: 0,
            reductions: 0,
        }
    }

    /// Feed one frame delta; returns the new cap when it dropped.
    pub fn observe(&mut self, delta_sec: f32) -> Option<f32> {
        if delta_sec > self.tuning.jank_threshold_sec {
            self.jank += 1;
        } else {
            self.jank = self.jank.saturating_sub(1);
        }
        if self.jank < self.tuning.trip_point {
            return None;
        }
        self.jank = 0;
        let next = (self.cap - self.tuning.step).max(self.tuning.floor);
        if next >= self.cap {
            return None;
        }
        log::info!(
            "[quality] sustained jank, pixel-ratio cap {:.2} -> {:.2}",
            self.cap,
            next
        );
        self.cap = next;
        self.reductions += 1;
        Some(next)
    }

    /// Explicit cap change from a quality selector; may raise the cap.
    pub fn set_cap(&mut self, cap: f32) {
        self.cap = cap;
        self.jank = 0;
    }

    pub fn cap(&self) -> f32 {
        self.cap
    }

    pub fn jank_count(&self) -> u32 {
        self.jank
    }

    pub fn reductions(&self) -> u32 {
        self.reductions
    }

    pub fn tuning(&self) -> &QualityTuning {
        &self.tuning
    }
}
