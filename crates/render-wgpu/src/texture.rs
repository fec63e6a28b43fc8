//! Compressed texture upload.
//!
//! Bridges the CPU-side DDS parser to a block-compressed `wgpu::Texture`.
//! Every failure here is non-fatal: the loader logs and returns `None`,
//! and the renderer falls back to a 1x1 white texture so the frame still
//! draws, visibly untextured.

use std::path::Path;

use cubeview_assets::{DdsImage, DxtFormat};

fn bc_format(format: DxtFormat) -> wgpu::TextureFormat {
    match format {
        DxtFormat::Dxt1 => wgpu::TextureFormat::Bc1RgbaUnorm,
        DxtFormat::Dxt3 => wgpu::TextureFormat::Bc2RgbaUnorm,
        DxtFormat::Dxt5 => wgpu::TextureFormat::Bc3RgbaUnorm,
    }
}

/// Load a DDS file and upload its mip chain.
///
/// Returns `None` (the "no texture" sentinel) when the file is missing or
/// malformed, when the format tag is unsupported, or when the device
/// lacks BC texture support. The caller continues either way.
pub fn load_dds_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Option<wgpu::Texture> {
    let image = match DdsImage::load(path) {
        Ok(image) => image,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "texture load failed");
            return None;
        }
    };

    // wgpu validates base dimensions of compressed textures against the
    // 4x4 block footprint; reject early instead of tripping that.
    if image.width == 0 || image.height == 0 || image.width % 4 != 0 || image.height % 4 != 0 {
        tracing::error!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "texture dimensions unusable for block compression"
        );
        return None;
    }
    if !device
        .features()
        .contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
    {
        tracing::warn!("device lacks BC texture compression; rendering untextured");
        return None;
    }

    let levels = image.mip_levels();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("cube_texture"),
        size: wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len().max(1) as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: bc_format(image.format),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let block_size = image.format.block_size();
    for level in &levels {
        // Zero-size tail levels and levels past a short payload have no
        // bytes to copy.
        if level.size == 0 || level.offset + level.size > image.data.len() {
            continue;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: level.level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.data[level.offset..level.offset + level.size],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(level.width.div_ceil(4) * block_size),
                rows_per_image: Some(level.height.div_ceil(4)),
            },
            wgpu::Extent3d {
                width: level.width.max(1),
                height: level.height.max(1),
                depth_or_array_layers: 1,
            },
        );
    }

    tracing::info!(
        path = %path.display(),
        mips = levels.len(),
        "texture uploaded"
    );
    // image.data drops here; only the GPU handle survives.
    Some(texture)
}

/// 1x1 white stand-in bound when no real texture could be loaded.
pub(crate) fn fallback_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("fallback_texture"),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[0xff, 0xff, 0xff, 0xff],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    texture
}
