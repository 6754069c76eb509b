pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod hero;
pub mod input;
pub mod lifecycle;
pub mod quality;
pub mod render;
pub mod surface;
pub mod uniforms;

// Shader bundled as a string constant
pub static BLACKHOLE_WGSL: &str = include_str!("../shaders/blackhole.wgsl");

pub use clock::*;
pub use config::*;
pub use error::*;
pub use hero::*;
pub use input::*;
pub use lifecycle::*;
pub use quality::*;
pub use render::*;
pub use surface::*;
pub use uniforms::*;
