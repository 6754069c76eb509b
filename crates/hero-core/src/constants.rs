// Shared tuning constants for the hero render loop, used by web and native frontends.

// Adaptive quality
pub const JANK_THRESHOLD_SEC: f32 = 0.045; // frames slower than this (~22 fps) count as jank
pub const JANK_TRIP_POINT: u32 = 90; // net jank frames before the cap drops
pub const CAP_STEP: f32 = 0.25; // pixel-ratio cap reduction per trip
pub const CAP_FLOOR: f32 = 1.0; // automatic reductions never go below this

// Quality presets
pub const HIGH_QUALITY_CAP: f32 = 2.0;
pub const LOW_QUALITY_CAP: f32 = 1.25;
pub const HINT_DEFAULT_MEMORY_GB: f32 = 4.0; // assumed when the platform reports nothing
pub const HINT_DEFAULT_CORES: u32 = 4;
pub const HINT_STRONG_MEMORY_GB: f32 = 8.0;
pub const HINT_STRONG_CORES: u32 = 8;

// Layout
pub const DEFAULT_HEIGHT_FRACTION: f32 = 0.78; // of the viewport height
pub const MAX_HEIGHT_PX: u32 = 900;
pub const MIN_HEIGHT_PX: u32 = 420;
pub const VIEWPORT_INTERSECTION_THRESHOLD: f64 = 0.05;

// Defaults for the shader tunables, with the ranges the controls panel exposes
pub const DEFAULT_PIXEL_RATIO_CAP: f32 = 1.5;
pub const DEFAULT_BEAM_STRENGTH: f32 = 0.65;
pub const BEAM_RANGE: (f32, f32) = (0.5, 0.9);
pub const DEFAULT_LENS_STRENGTH: f32 = 0.9;
pub const LENS_RANGE: (f32, f32) = (0.6, 1.2);
pub const DEFAULT_SWIRL_SPEED: f32 = 1.0;
pub const SPEED_RANGE: (f32, f32) = (0.6, 1.6);
pub const DEFAULT_DISK_INNER: f32 = 1.25;
pub const DISK_INNER_RANGE: (f32, f32) = (1.0, 1.6);
pub const DEFAULT_DISK_OUTER: f32 = 3.20;
pub const DISK_OUTER_RANGE: (f32, f32) = (2.6, 3.8);
pub const DEFAULT_SENSITIVITY: f32 = 0.12;

// Accent
pub const DEFAULT_ACCENT_HEX: &str = "#ffd8a8";
pub const DEFAULT_ACCENT_RGB: [f32; 3] = [1.0, 0.85, 0.66]; // fallback when the hex fails to parse
