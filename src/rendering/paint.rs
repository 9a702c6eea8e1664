//! Layered scenes: a closed set of shapes over a background

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rendering::raster::rasterize;
use crate::rendering::shape::{inside, Rect};
use crate::rendering::{Rgba, Scanlines};

/// A paintable shape with a fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Rect {
        rect: Rect,
        color: Rgba,
    },
    RoundedRect {
        rect: Rect,
        radius: u32,
        color: Rgba,
    },
}

impl Layer {
    /// Rounded rectangle with its radius clamped to half the shorter side.
    pub fn rounded(rect: Rect, radius: u32, color: Rgba) -> Self {
        Layer::RoundedRect {
            rect,
            radius: radius.min(rect.max_radius()),
            color,
        }
    }

    /// The layer's color if it covers `(x, y)`.
    pub fn hit(&self, x: i32, y: i32) -> Option<Rgba> {
        match *self {
            Layer::Rect { rect, color } => rect.contains(x, y).then_some(color),
            Layer::RoundedRect { rect, radius, color } => {
                inside(x, y, rect.x, rect.y, rect.width, rect.height, radius).then_some(color)
            }
        }
    }

    /// Clamp an oversized corner radius in place; returns whether it changed.
    fn clamp_radius(&mut self) -> bool {
        match self {
            Layer::RoundedRect { rect, radius, .. } if *radius > rect.max_radius() => {
                *radius = rect.max_radius();
                true
            }
            _ => false,
        }
    }
}

/// What shows through where no layer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    Solid { color: Rgba },
    /// Linear blend from `top` (row 0) to `bottom` (last row).
    VerticalGradient { top: Rgba, bottom: Rgba },
}

impl Background {
    pub fn color_at(&self, y: u32, height: u32) -> Rgba {
        match *self {
            Background::Solid { color } => color,
            Background::VerticalGradient { top, bottom } => {
                top.lerp(bottom, y.min(height.saturating_sub(1)), height.saturating_sub(1))
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid { color: Rgba::TRANSPARENT }
    }
}

/// An ordered stack of layers. `layers[0]` is the top-most: the first layer
/// that covers a pixel decides its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Background) -> Self {
        Self { width, height, background, layers: Vec::new() }
    }

    /// Push a layer beneath the existing ones.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        let (px, py) = (x as i32, y as i32);
        self.layers
            .iter()
            .find_map(|layer| layer.hit(px, py))
            .unwrap_or_else(|| self.background.color_at(y, self.height))
    }

    pub fn rasterize(&self) -> Scanlines {
        rasterize(self.width, self.height, |x, y| self.color_at(x, y))
    }

    /// Parse a scene from JSON, clamping oversized radii.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json_str_reporting(s).map(|(scene, _)| scene)
    }

    /// Like `from_json_str`, also returning the indices of layers whose
    /// corner radius was clamped.
    pub fn from_json_str_reporting(s: &str) -> Result<(Self, Vec<usize>)> {
        let mut scene: Scene = serde_json::from_str(s)?;
        if scene.width == 0 || scene.height == 0 {
            return Err(Error::InvalidDimensions { width: scene.width, height: scene.height });
        }
        let mut clamped = Vec::new();
        for (i, layer) in scene.layers.iter_mut().enumerate() {
            if layer.clamp_radius() {
                warn!("layer {}: corner radius clamped to half the shorter side", i);
                clamped.push(i);
            }
        }
        Ok((scene, clamped))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_reporting(path).map(|(scene, _)| scene)
    }

    pub fn load_reporting(path: impl AsRef<Path>) -> Result<(Self, Vec<usize>)> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str_reporting(&text)
    }

    /// Rescale all geometry to a `size`-square canvas. Used to reuse one
    /// scene description across icon sizes.
    pub fn scaled_to(&self, size: u32) -> Scene {
        let sx = |v: i64| (v * size as i64 / self.width.max(1) as i64) as i32;
        let sy = |v: i64| (v * size as i64 / self.height.max(1) as i64) as i32;
        let scale_rect = |r: Rect| {
            let x = sx(r.x as i64);
            let y = sy(r.y as i64);
            let right = sx(r.x as i64 + r.width as i64);
            let bottom = sy(r.y as i64 + r.height as i64);
            Rect::new(x, y, (right - x).max(0) as u32, (bottom - y).max(0) as u32)
        };
        let min_side = self.width.min(self.height).max(1) as u64;
        let layers = self
            .layers
            .iter()
            .map(|layer| match *layer {
                Layer::Rect { rect, color } => Layer::Rect { rect: scale_rect(rect), color },
                Layer::RoundedRect { rect, radius, color } => {
                    let radius = (radius as u64 * size as u64 / min_side) as u32;
                    Layer::rounded(scale_rect(rect), radius, color)
                }
            })
            .collect();
        Scene { width: size, height: size, background: self.background, layers }
    }
}
