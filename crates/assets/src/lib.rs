//! Texture container parsing.
//!
//! CPU-side only: this crate turns a DDS file into dimensions, a format
//! tag, and a payload buffer plus the byte layout of its mip chain. GPU
//! upload lives with the renderer.

pub mod dds;

pub use dds::{DdsError, DdsImage, DxtFormat, MipLevel};
