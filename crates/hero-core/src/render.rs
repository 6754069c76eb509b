use crate::error::HeroError;
use crate::surface::BackingSize;
use crate::uniforms::HeroUniforms;

/// Drawing backend behind the frame driver.
///
/// Implementations compile and link their program once at construction;
/// `draw` uploads the uniforms and issues a single full-screen triangle.
pub trait Renderer {
    /// Called only when the backing buffer was actually reallocated.
    fn resize(&mut self, size: BackingSize);

    fn draw(&mut self, uniforms: &HeroUniforms) -> Result<(), HeroError>;
}
