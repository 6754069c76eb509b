use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pixel-ratio cap must be positive and finite, got {0}")]
    InvalidPixelRatioCap(f32),
    #[error("disk inner radius {inner} must be smaller than outer radius {outer}")]
    DiskRadiiOrder { inner: f32, outer: f32 },
    #[error("pointer sensitivity must be in (0, 1], got {0}")]
    InvalidSensitivity(f32),
    #[error("viewport height fraction must be in (0, 1], got {0}")]
    InvalidHeightFraction(f32),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("invalid accent color {0:?}, expected #rrggbb")]
    InvalidAccent(String),
    #[error("unknown quality preset {0:?}, expected low, auto or high")]
    UnknownQuality(String),
}

/// Errors surfaced while mounting or drawing the hero.
///
/// Everything except [`HeroError::Surface`] is fatal at mount: the caller
/// keeps the static fallback and does not retry.
#[derive(Debug, Error)]
pub enum HeroError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("container {0:?} not found")]
    ContainerNotFound(String),
    #[error("no graphics context: {0}")]
    NoGraphicsContext(String),
    #[error("shader compile failed: {log}")]
    ShaderCompile { log: String },
    #[error("program link failed: {log}")]
    ProgramLink { log: String },
    #[error("surface error: {0}")]
    Surface(String),
    #[error("hero already mounted")]
    AlreadyMounted,
}

impl HeroError {
    /// Whether the error must abort the mount rather than skip a frame.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HeroError::Surface(_))
    }
}
