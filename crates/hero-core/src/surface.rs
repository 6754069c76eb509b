//! Backing-buffer sizing for the drawable surface.
//!
//! The backing buffer tracks the container's CSS size times the effective
//! pixel ratio, `min(devicePixelRatio, cap)`, floored and never below one
//! pixel per axis.

/// Container measurements in CSS pixels plus the platform DPR.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerMetrics {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl ContainerMetrics {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

impl BackingSize {
    pub fn as_f32(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceResize {
    pub size: BackingSize,
    /// `false` when the computed size matched the current buffer.
    pub reallocated: bool,
}

/// Effective pixel ratio; a missing or nonsensical DPR counts as 1.
pub fn effective_ratio(device_pixel_ratio: f64, cap: f32) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    dpr.min(cap as f64)
}

fn scaled_axis(css: f64, ratio: f64) -> u32 {
    let px = (css.max(0.0) * ratio).floor();
    if px.is_finite() {
        (px as u32).max(1)
    } else {
        1
    }
}

/// Pure sizing rule used by [`SurfaceManager::resize`].
pub fn backing_size(metrics: &ContainerMetrics, cap: f32) -> BackingSize {
    let ratio = effective_ratio(metrics.device_pixel_ratio, cap);
    BackingSize {
        width: scaled_axis(metrics.css_width, ratio),
        height: scaled_axis(metrics.css_height, ratio),
    }
}

/// Owns the current backing-buffer dimensions.
#[derive(Debug, Default)]
pub struct SurfaceManager {
    current: Option<BackingSize>,
    reallocations: u32,
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the backing size; only a changed size counts as a reallocation.
    pub fn resize(&mut self, metrics: &ContainerMetrics, cap: f32) -> SurfaceResize {
        let size = backing_size(metrics, cap);
        let reallocated = self.current != Some(size);
        if reallocated {
            log::debug!(
                "[surface] backing {}x{} (css {:.0}x{:.0}, dpr {:.2}, cap {:.2})",
                size.width,
                size.height,
                metrics.css_width,
                metrics.css_height,
                metrics.device_pixel_ratio,
                cap
            );
            self.current = Some(size);
            self.reallocations += 1;
        }
        SurfaceResize { size, reallocated }
    }

    pub fn size(&self) -> Option<BackingSize> {
        self.current
    }

    pub fn reallocations(&self) -> u32 {
        self.reallocations
    }
}
