//! Rendering: pixels, scanline buffers, shapes and scenes

pub mod layout;
pub mod paint;
pub mod raster;
pub mod shape;

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use paint::{Background, Layer, Scene};
pub use raster::rasterize;
pub use shape::{inside, Rect};

/// One RGBA8 pixel. Serializes as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba(0, 0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba(r, g, b, 255)
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.0, self.1, self.2, self.3]
    }

    /// Linear interpolation at `t = num / den`, rounded to nearest. `num` is
    /// clamped to `den`.
    pub fn lerp(self, other: Rgba, num: u32, den: u32) -> Rgba {
        if den == 0 {
            return self;
        }
        let (num, den) = (num.min(den) as u64, den as u64);
        let mix = |a: u8, b: u8| -> u8 {
            let (a, b) = (a as u64, b as u64);
            ((a * (den - num) + b * num + den / 2) / den) as u8
        };
        Rgba(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }
}

/// Filtered scanlines ready for compression: each row is a `0` filter byte
/// followed by `width` RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanlines {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Scanlines {
    pub fn stride(width: u32) -> usize {
        1 + 4 * width as usize
    }

    pub fn expected_len(width: u32, height: u32) -> usize {
        Self::stride(width) * height as usize
    }

    /// Row `y` including its leading filter byte.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = Self::stride(self.width);
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let i = 1 + 4 * x as usize;
        Some(Rgba(row[i], row[i + 1], row[i + 2], row[i + 3]))
    }

    /// Hex SHA-256 of the raw scanline bytes.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.data))
    }
}

/// A finished PNG file held in memory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Artifact {
    /// Hex SHA-256 of the encoded bytes.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }

    /// Write to `path` through a sibling temporary file and a rename, so a
    /// failed write never leaves a truncated PNG behind.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);
        let res = fs::write(tmp, &self.png_data).and_then(|_| fs::rename(tmp, path));
        if res.is_err() {
            let _ = fs::remove_file(tmp);
        }
        res
    }
}
