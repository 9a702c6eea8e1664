//! Assembles a complete RGBA8 PNG from a filtered scanline buffer.
//!
//! Only one profile is produced: truecolor with alpha, 8 bits per channel,
//! no interlacing, all image data in a single `IDAT`.

use log::debug;

use crate::error::{Error, Result};
use crate::png::chunk::{Chunk, ChunkType, SIGNATURE};
use crate::rendering::{Artifact, Scanlines};

/// Color type code for truecolor with alpha.
pub const COLOR_TYPE_RGBA: u8 = 6;
pub const BIT_DEPTH: u8 = 8;

/// Decoded `IHDR` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl Header {
    /// Header for an RGBA8 image of the given size.
    pub fn rgba8(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            bit_depth: BIT_DEPTH,
            color_type: COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        })
    }

    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type;
        out[10] = self.compression;
        out[11] = self.filter;
        out[12] = self.interlace;
        out
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let d: &[u8; 13] = data
            .try_into()
            .map_err(|_| Error::DecodeError(format!("IHDR payload is {} bytes, expected 13", data.len())))?;
        Ok(Self {
            width: u32::from_be_bytes([d[0], d[1], d[2], d[3]]),
            height: u32::from_be_bytes([d[4], d[5], d[6], d[7]]),
            bit_depth: d[8],
            color_type: d[9],
            compression: d[10],
            filter: d[11],
            interlace: d[12],
        })
    }
}

/// The 13-byte `IHDR` payload for an RGBA8 image.
pub fn header_payload(width: u32, height: u32) -> Result<[u8; 13]> {
    Ok(Header::rgba8(width, height)?.to_bytes())
}

/// Produces a zlib-wrapped deflate stream.
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// miniz_oxide-backed zlib compressor. Level 0 emits stored blocks.
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    level: u8,
}

impl ZlibCompressor {
    pub const MAX_LEVEL: u8 = 10;

    pub fn new(level: u8) -> Result<Self> {
        if level > Self::MAX_LEVEL {
            return Err(Error::ConfigError(format!(
                "compression level {} out of range 0..={}",
                level,
                Self::MAX_LEVEL
            )));
        }
        Ok(Self { level })
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(miniz_oxide::deflate::compress_to_vec_zlib(data, self.level))
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    /// zlib level, 0 (stored) through 10
    pub compression_level: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { compression_level: 6 }
    }
}

/// Build a complete artifact from a raw scanline buffer.
///
/// The buffer must be `height * (1 + 4 * width)` bytes. Output is assembled
/// into a local buffer and only returned once every chunk is built, so a
/// compression failure never yields a partial file.
pub fn encode_artifact<C: Compressor>(
    width: u32,
    height: u32,
    raw: &[u8],
    compressor: &C,
) -> Result<Vec<u8>> {
    let header = Header::rgba8(width, height)?;
    let expected = Scanlines::expected_len(width, height);
    if raw.len() != expected {
        return Err(Error::BufferSizeMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let compressed = compressor.compress(raw)?;

    let mut out = Vec::with_capacity(SIGNATURE.len() + 3 * 12 + 13 + compressed.len());
    out.extend_from_slice(&SIGNATURE);
    Chunk::new(ChunkType::IHDR, header.to_bytes().to_vec()).write_to(&mut out)?;
    let idat_len = compressed.len();
    Chunk::new(ChunkType::IDAT, compressed).write_to(&mut out)?;
    Chunk::new(ChunkType::IEND, Vec::new()).write_to(&mut out)?;

    debug!(
        "encoded {}x{}: {} raw bytes -> {} IDAT bytes, {} total",
        width,
        height,
        raw.len(),
        idat_len,
        out.len()
    );
    Ok(out)
}

/// Encoder bound to a particular compressor.
#[derive(Debug, Clone)]
pub struct PngEncoder<C = ZlibCompressor> {
    compressor: C,
}

impl PngEncoder<ZlibCompressor> {
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        Ok(Self {
            compressor: ZlibCompressor::new(config.compression_level)?,
        })
    }
}

impl<C: Compressor> PngEncoder<C> {
    pub fn with_compressor(compressor: C) -> Self {
        Self { compressor }
    }

    pub fn encode(&self, scanlines: &Scanlines) -> Result<Artifact> {
        let png_data = encode_artifact(
            scanlines.width,
            scanlines.height,
            &scanlines.data,
            &self.compressor,
        )?;
        Ok(Artifact {
            width: scanlines.width,
            height: scanlines.height,
            png_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::chunk::read_chunks;

    struct FailingCompressor;

    impl Compressor for FailingCompressor {
        fn compress(&self, _data: &[u8]) -> Result<Vec<u8>> {
            Err(Error::CompressionError("out of memory".into()))
        }
    }

    #[test]
    fn header_payload_layout() {
        let p = header_payload(300, 2).unwrap();
        assert_eq!(p, [0u8, 0, 1, 44, 0, 0, 0, 2, 8, 6, 0, 0, 0]);
    }

    #[test]
    fn header_rejects_zero_dimensions() {
        assert!(matches!(
            header_payload(0, 5),
            Err(Error::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(header_payload(5, 0).is_err());
    }

    #[test]
    fn header_parse_inverts_to_bytes() {
        let h = Header::rgba8(17, 9).unwrap();
        assert_eq!(Header::parse(&h.to_bytes()).unwrap(), h);
        assert!(Header::parse(&[0; 12]).is_err());
    }

    #[test]
    fn artifact_chunk_order() {
        let raw = vec![0u8; 2 * (1 + 4 * 3)];
        let bytes = encode_artifact(3, 2, &raw, &ZlibCompressor::default()).unwrap();
        assert_eq!(&bytes[..8], &SIGNATURE);
        let kinds: Vec<_> = read_chunks(&bytes).unwrap().into_iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChunkType::IHDR, ChunkType::IDAT, ChunkType::IEND]);
    }

    #[test]
    fn idat_inflates_to_raw() {
        let raw: Vec<u8> = (0..(4 * (1 + 4 * 4))).map(|i| (i * 7) as u8).collect();
        for level in [0, 1, 6, 10] {
            let c = ZlibCompressor::new(level).unwrap();
            let bytes = encode_artifact(4, 4, &raw, &c).unwrap();
            let chunks = read_chunks(&bytes).unwrap();
            let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(&chunks[1].data).unwrap();
            assert_eq!(inflated, raw);
        }
    }

    #[test]
    fn buffer_length_is_checked() {
        let err = encode_artifact(2, 2, &[0u8; 17], &ZlibCompressor::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch { expected: 18, actual: 17 }
        ));
    }

    #[test]
    fn compression_failure_yields_nothing() {
        let raw = vec![0u8; 1 + 4];
        let res = encode_artifact(1, 1, &raw, &FailingCompressor);
        assert!(matches!(res, Err(Error::CompressionError(_))));
    }

    #[test]
    fn level_out_of_range() {
        assert!(ZlibCompressor::new(11).is_err());
        assert!(PngEncoder::new(&EncoderConfig { compression_level: 42 }).is_err());
    }
}
