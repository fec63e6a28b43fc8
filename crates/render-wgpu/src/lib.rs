//! wgpu render backend.
//!
//! One textured cube under one camera. Construction does all the
//! one-time GPU setup (pipeline state, static buffers, shader build,
//! texture upload); [`CubeRenderer::render`] is the per-frame path.
//!
//! # Invariants
//! - The renderer never mutates the camera; input interpretation happens
//!   in the application layer.
//! - Asset failures degrade the output (untextured cube, or clear-only
//!   frames for a broken shader program) but never abort the process.

mod geometry;
mod gpu;
mod shader;
mod spin;
mod texture;

pub use gpu::{AssetPaths, CubeRenderer};
pub use shader::{ProgramStatus, ShaderError, ShaderProgram, StageSource, build_program};
pub use spin::ModelSpin;
pub use texture::load_dds_texture;
