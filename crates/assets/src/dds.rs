//! DDS container parsing.
//!
//! The format as consumed here: a 4-byte `"DDS "` magic, a 124-byte
//! header, then the raw block-compressed payload. All header fields are
//! little-endian u32. Offsets below are relative to the start of the
//! header, after the magic.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 4-byte file signature.
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// Header length in bytes, magic excluded.
pub const HEADER_LEN: usize = 124;

const HEIGHT_OFFSET: usize = 8;
const WIDTH_OFFSET: usize = 12;
const LINEAR_SIZE_OFFSET: usize = 16;
const MIP_COUNT_OFFSET: usize = 24;
const FOURCC_OFFSET: usize = 80;

/// Errors from DDS parsing. All of them are non-fatal to the renderer;
/// the caller logs and falls back to the untextured path.
#[derive(Debug, thiserror::Error)]
pub enum DdsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a DDS file (bad magic)")]
    BadMagic,
    #[error("truncated DDS header")]
    TruncatedHeader,
    #[error("unsupported compression tag {0:?}")]
    UnsupportedFourCc([u8; 4]),
}

/// The three supported block-compression formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxtFormat {
    Dxt1,
    Dxt3,
    Dxt5,
}

impl DxtFormat {
    fn from_fourcc(tag: [u8; 4]) -> Result<Self, DdsError> {
        match &tag {
            b"DXT1" => Ok(Self::Dxt1),
            b"DXT3" => Ok(Self::Dxt3),
            b"DXT5" => Ok(Self::Dxt5),
            _ => Err(DdsError::UnsupportedFourCc(tag)),
        }
    }

    /// Bytes per 4x4 block.
    pub fn block_size(self) -> u32 {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }
}

/// Byte layout of one mip level within [`DdsImage::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevel {
    pub level: u32,
    pub width: u32,
    pub height: u32,
    pub offset: usize,
    pub size: usize,
}

/// A parsed DDS container: header fields plus the concatenated mip
/// payloads. Dropped once the levels are uploaded.
#[derive(Debug, Clone)]
pub struct DdsImage {
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub format: DxtFormat,
    pub data: Vec<u8>,
}

impl DdsImage {
    /// Parse a DDS file.
    ///
    /// The payload read is sized `linear_size * 2` when the file carries
    /// a mip chain (headroom for the halving tail), else exactly
    /// `linear_size`. A file shorter than that yields a shorter buffer,
    /// not an error; [`Self::mip_levels`] callers bound-check against
    /// `data`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DdsError> {
        let mut file = File::open(path.as_ref())?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if magic != DDS_MAGIC {
            return Err(DdsError::BadMagic);
        }

        let mut header = [0u8; HEADER_LEN];
        file.read_exact(&mut header)
            .map_err(|_| DdsError::TruncatedHeader)?;

        let height = read_u32(&header, HEIGHT_OFFSET);
        let width = read_u32(&header, WIDTH_OFFSET);
        let linear_size = read_u32(&header, LINEAR_SIZE_OFFSET);
        let mip_count = read_u32(&header, MIP_COUNT_OFFSET);
        let mut fourcc = [0u8; 4];
        fourcc.copy_from_slice(&header[FOURCC_OFFSET..FOURCC_OFFSET + 4]);

        let format = DxtFormat::from_fourcc(fourcc)?;

        let buffer_size = if mip_count > 1 {
            linear_size as u64 * 2
        } else {
            linear_size as u64
        };
        let mut data = Vec::new();
        file.take(buffer_size).read_to_end(&mut data)?;

        tracing::debug!(
            width,
            height,
            mip_count,
            ?format,
            payload = data.len(),
            "parsed DDS container"
        );

        Ok(Self {
            width,
            height,
            mip_count,
            format,
            data,
        })
    }

    /// Walk the mip chain layout.
    ///
    /// Level `n` occupies `ceil(w/4) * ceil(h/4) * block_size` bytes with
    /// dimensions integer-halved per level. The walk continues while any
    /// dimension is nonzero and levels remain, so a non-square chain can
    /// emit levels whose shorter dimension has already halved to zero
    /// (and whose size is therefore zero); that matches the container's
    /// own accounting and is not guarded here.
    pub fn mip_levels(&self) -> Vec<MipLevel> {
        let block_size = self.format.block_size();
        let mut levels = Vec::new();
        let mut width = self.width;
        let mut height = self.height;
        let mut offset = 0usize;
        let mut level = 0u32;

        while level < self.mip_count && (width > 0 || height > 0) {
            let size = (width.div_ceil(4) * height.div_ceil(4) * block_size) as usize;
            levels.push(MipLevel {
                level,
                width,
                height,
                offset,
                size,
            });
            offset += size;
            width /= 2;
            height /= 2;
            level += 1;
        }

        levels
    }
}

fn read_u32(header: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(header[offset..offset + 4].try_into().expect("in-bounds"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build an in-memory DDS file with the given header fields.
    fn make_dds(
        magic: &[u8; 4],
        width: u32,
        height: u32,
        linear_size: u32,
        mip_count: u32,
        fourcc: &[u8; 4],
        payload: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(magic);
        let mut header = [0u8; HEADER_LEN];
        header[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&height.to_le_bytes());
        header[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&width.to_le_bytes());
        header[LINEAR_SIZE_OFFSET..LINEAR_SIZE_OFFSET + 4]
            .copy_from_slice(&linear_size.to_le_bytes());
        header[MIP_COUNT_OFFSET..MIP_COUNT_OFFSET + 4].copy_from_slice(&mip_count.to_le_bytes());
        header[FOURCC_OFFSET..FOURCC_OFFSET + 4].copy_from_slice(fourcc);
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(payload);
        bytes
    }

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f
    }

    #[test]
    fn single_mip_dxt1_level_size() {
        let f = write_temp(&make_dds(b"DDS ", 8, 8, 32, 1, b"DXT1", &[0u8; 32]));
        let img = DdsImage::load(f.path()).unwrap();

        assert_eq!(img.width, 8);
        assert_eq!(img.height, 8);
        assert_eq!(img.format, DxtFormat::Dxt1);
        let levels = img.mip_levels();
        assert_eq!(levels.len(), 1);
        // ceil(8/4) * ceil(8/4) * 8 bytes per block.
        assert_eq!(levels[0].size, 32);
        assert_eq!(levels[0].offset, 0);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let f = write_temp(&make_dds(b"PNG ", 8, 8, 32, 1, b"DXT1", &[0u8; 32]));
        assert!(matches!(DdsImage::load(f.path()), Err(DdsError::BadMagic)));
    }

    #[test]
    fn unknown_fourcc_is_rejected() {
        let f = write_temp(&make_dds(b"DDS ", 8, 8, 32, 1, b"ATC1", &[0u8; 32]));
        match DdsImage::load(f.path()) {
            Err(DdsError::UnsupportedFourCc(tag)) => assert_eq!(&tag, b"ATC1"),
            other => panic!("expected UnsupportedFourCc, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            DdsImage::load("/nonexistent/cube.dds"),
            Err(DdsError::Io(_))
        ));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let f = write_temp(b"DDS \x00\x00\x00");
        assert!(matches!(
            DdsImage::load(f.path()),
            Err(DdsError::TruncatedHeader)
        ));
    }

    #[test]
    fn mip_chain_offsets_halve() {
        // 16x16 DXT5, 3 mips: 16 blocks, 4 blocks, 1 block of 16 bytes.
        let linear = 16 * 16;
        let payload = vec![0u8; 2 * linear];
        let f = write_temp(&make_dds(b"DDS ", 16, 16, linear as u32, 3, b"DXT5", &payload));
        let img = DdsImage::load(f.path()).unwrap();

        let levels = img.mip_levels();
        assert_eq!(levels.len(), 3);
        assert_eq!((levels[0].size, levels[0].offset), (256, 0));
        assert_eq!((levels[1].size, levels[1].offset), (64, 256));
        assert_eq!((levels[2].size, levels[2].offset), (16, 320));
        assert_eq!((levels[2].width, levels[2].height), (4, 4));
    }

    #[test]
    fn mipmapped_payload_reads_double_headroom() {
        let payload = vec![7u8; 512];
        let f = write_temp(&make_dds(b"DDS ", 16, 16, 128, 2, b"DXT1", &payload));
        let img = DdsImage::load(f.path()).unwrap();
        // mip_count > 1 reads 2 * linear_size even though more is on disk.
        assert_eq!(img.data.len(), 256);
    }

    #[test]
    fn short_payload_is_not_an_error() {
        let f = write_temp(&make_dds(b"DDS ", 16, 16, 128, 2, b"DXT1", &[0u8; 100]));
        let img = DdsImage::load(f.path()).unwrap();
        assert_eq!(img.data.len(), 100);
    }

    #[test]
    fn chain_deeper_than_dimensions_emits_zero_size_tail() {
        // 4x4 with 4 declared mips: 4x4, 2x2, 1x1, then 0x0 stops the walk
        // at the dimension check after emitting three real levels and none
        // for level 3 (both dimensions zero).
        let f = write_temp(&make_dds(b"DDS ", 4, 4, 8, 4, b"DXT1", &[0u8; 64]));
        let img = DdsImage::load(f.path()).unwrap();
        let levels = img.mip_levels();
        assert_eq!(levels.len(), 3);
        assert_eq!((levels[2].width, levels[2].height), (1, 1));
        assert_eq!(levels[2].size, 8);
    }

    #[test]
    fn non_square_chain_keeps_walking_past_a_zero_dimension() {
        // 8x2 with 3 declared mips: 8x2, 4x1, 2x0. The last level's
        // height has halved to zero so its size is zero, but the walk
        // still emits it because the width is nonzero.
        let f = write_temp(&make_dds(b"DDS ", 8, 2, 16, 3, b"DXT1", &[0u8; 32]));
        let img = DdsImage::load(f.path()).unwrap();
        let levels = img.mip_levels();
        assert_eq!(levels.len(), 3);
        assert_eq!((levels[2].width, levels[2].height), (2, 0));
        assert_eq!(levels[2].size, 0);
    }

    #[test]
    fn block_sizes() {
        assert_eq!(DxtFormat::Dxt1.block_size(), 8);
        assert_eq!(DxtFormat::Dxt3.block_size(), 16);
        assert_eq!(DxtFormat::Dxt5.block_size(), 16);
    }
}
