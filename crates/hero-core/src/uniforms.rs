/// Per-frame uniforms, laid out to match `HeroUniforms` in `blackhole.wgsl`.
///
/// `accent` is a WGSL `vec3<f32>` (16-byte aligned at offset 16) and `time`
/// fills its trailing slot. The tail padding keeps the struct size a multiple
/// of 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HeroUniforms {
    pub resolution: [f32; 2], // offset 0
    pub pointer: [f32; 2],    // offset 8, smoothed, [-1, 1]
    pub accent: [f32; 3],     // offset 16
    pub time: f32,            // offset 28
    pub beam_strength: f32,   // offset 32
    pub lens_strength: f32,   // offset 36
    pub swirl_speed: f32,     // offset 40
    pub disk_inner: f32,      // offset 44
    pub disk_outer: f32,      // offset 48
    pub _pad: [f32; 3],       // offset 52
}

pub const HERO_UNIFORMS_SIZE: u64 = std::mem::size_of::<HeroUniforms>() as u64;
