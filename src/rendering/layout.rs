//! Built-in icon design, laid out on a 256px reference canvas

use crate::rendering::paint::{Background, Layer, Scene};
use crate::rendering::shape::Rect;
use crate::rendering::Rgba;

pub const REFERENCE_SIZE: u32 = 256;

pub const SKY_TOP: Rgba = Rgba::opaque(44, 92, 200);
pub const SKY_BOTTOM: Rgba = Rgba::opaque(24, 44, 120);
pub const CARD: Rgba = Rgba::opaque(248, 250, 252);
pub const SHADOW: Rgba = Rgba(0, 0, 0, 64);
pub const ACCENT: Rgba = Rgba::opaque(255, 196, 0);
pub const RULE: Rgba = Rgba::opaque(190, 200, 215);

/// The reference design: a card with a drop shadow, two text rules and an
/// accent bar, over a vertical gradient. Layers are listed top-most first.
pub fn reference_scene() -> Scene {
    Scene::new(
        REFERENCE_SIZE,
        REFERENCE_SIZE,
        Background::VerticalGradient { top: SKY_TOP, bottom: SKY_BOTTOM },
    )
    .with_layer(Layer::rounded(Rect::new(80, 164, 96, 20), 10, ACCENT))
    .with_layer(Layer::rounded(Rect::new(80, 84, 96, 12), 6, RULE))
    .with_layer(Layer::rounded(Rect::new(80, 112, 72, 12), 6, RULE))
    .with_layer(Layer::rounded(Rect::new(56, 48, 144, 160), 24, CARD))
    .with_layer(Layer::rounded(Rect::new(64, 58, 144, 160), 24, SHADOW))
}

/// The reference design scaled to a `size`-square canvas.
pub fn default_icon(size: u32) -> Scene {
    if size == REFERENCE_SIZE {
        return reference_scene();
    }
    reference_scene().scaled_to(size)
}
