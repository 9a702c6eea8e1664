//! IconForge
//!
//! A from-scratch PNG writer paired with a small procedural rasterizer for
//! generating icons. No image library is involved: pixels come from a
//! per-pixel color function, are laid out as filtered scanlines, deflated,
//! and framed into `IHDR`/`IDAT`/`IEND` chunks with their CRCs.
//!
//! # Features
//!
//! - **Checksum**: bitwise CRC-32 (`checksum`)
//! - **Container**: chunk framing, header block, single-`IDAT` RGBA8 files (`png`)
//! - **Rendering**: rounded-rectangle hit testing, layered scenes and the
//!   scanline rasterizer (`rendering`)
//!
//! # Example
//!
//! ```
//! use iconforge::png::{EncoderConfig, PngEncoder};
//! use iconforge::rendering::{rasterize, Rgba};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanlines = rasterize(4, 4, |_, _| Rgba(255, 0, 0, 255));
//! let encoder = PngEncoder::new(&EncoderConfig::default())?;
//! let artifact = encoder.encode(&scanlines)?;
//! assert_eq!(&artifact.png_data[..8], b"\x89PNG\r\n\x1a\n");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod checksum;
pub mod error;
pub mod png;
pub mod rendering;

pub use error::{Error, Result};
pub use png::{EncoderConfig, PngEncoder};
pub use rendering::{Artifact, Rgba, Scanlines, Scene};

/// Configuration for a batch of icons
///
/// Defaults produce the common desktop icon sizes at zlib level 6.
///
/// # Examples
///
/// ```
/// let cfg = iconforge::IconConfig::default();
/// assert!(cfg.sizes.contains(&256));
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Square edge lengths to generate
    pub sizes: Vec<u32>,
    /// zlib level, 0 (stored) through 10
    pub compression_level: u8,
    /// Output files are named `<file_prefix>-<size>.png`
    pub file_prefix: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: vec![16, 32, 48, 64, 128, 256],
            compression_level: 6,
            file_prefix: "icon".to_string(),
        }
    }
}

impl IconConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::ConfigError("no sizes requested".into()));
        }
        if let Some(bad) = self.sizes.iter().find(|&&s| s == 0) {
            return Err(Error::ConfigError(format!("invalid icon size {}", bad)));
        }
        if self.compression_level > png::ZlibCompressor::MAX_LEVEL {
            return Err(Error::ConfigError(format!(
                "compression level {} out of range 0..={}",
                self.compression_level,
                png::ZlibCompressor::MAX_LEVEL
            )));
        }
        if self.file_prefix.is_empty() || self.file_prefix.contains(['/', '\\']) {
            return Err(Error::ConfigError(format!("invalid file prefix {:?}", self.file_prefix)));
        }
        Ok(())
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            compression_level: self.compression_level,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: IconConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn file_name(&self, size: u32) -> String {
        format!("{}-{}.png", self.file_prefix, size)
    }
}

/// Rasterize and encode one scene.
pub fn render_icon(scene: &Scene, config: &EncoderConfig) -> Result<Artifact> {
    let encoder = PngEncoder::new(config)?;
    encoder.encode(&scene.rasterize())
}

/// Render every configured size, one independent result per size.
/// `scene_for_size` supplies the scene for each size. A failure only
/// affects its own size; configuration errors are reported up front.
pub fn render_each<'a, F>(
    config: &'a IconConfig,
    scene_for_size: F,
) -> Result<impl Iterator<Item = (u32, Result<Artifact>)> + 'a>
where
    F: Fn(u32) -> Scene + 'a,
{
    config.validate()?;
    let encoder = PngEncoder::new(&config.encoder_config())?;
    Ok(config.sizes.iter().map(move |&size| {
        let scene = scene_for_size(size);
        (size, encoder.encode(&scene.rasterize()))
    }))
}

/// Render every configured size; the first failure aborts the batch.
pub fn render_icons<F>(config: &IconConfig, scene_for_size: F) -> Result<Vec<(u32, Artifact)>>
where
    F: Fn(u32) -> Scene,
{
    render_each(config, scene_for_size)?
        .map(|(size, res)| res.map(|a| (size, a)))
        .collect()
}
