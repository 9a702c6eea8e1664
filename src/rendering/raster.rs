//! Rasterizer: per-pixel color function to filtered scanlines

use crate::rendering::{Rgba, Scanlines};

/// Evaluate `color_at` once per pixel, row-major from the top-left, and lay
/// the results out as scanlines with filter type `None`.
///
/// Channels are `u8`, so out-of-range values cannot reach the buffer. A zero
/// dimension yields an empty buffer; the encoder rejects it later.
pub fn rasterize<F>(width: u32, height: u32, mut color_at: F) -> Scanlines
where
    F: FnMut(u32, u32) -> Rgba,
{
    let mut data = Vec::with_capacity(Scanlines::expected_len(width, height));
    for y in 0..height {
        data.push(0); // filter: None
        for x in 0..width {
            data.extend_from_slice(&color_at(x, y).to_bytes());
        }
    }
    Scanlines { width, height, data }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_stride() {
        let s = rasterize(3, 2, |x, y| Rgba(x as u8, y as u8, 7, 255));
        assert_eq!(s.data.len(), 2 * (1 + 4 * 3));
        assert_eq!(
            s.row(1).unwrap(),
            &[0u8, 0, 1, 7, 255, 1, 1, 7, 255, 2, 1, 7, 255]
        );
        assert_eq!(s.pixel(2, 0), Some(Rgba(2, 0, 7, 255)));
        assert_eq!(s.pixel(3, 0), None);
        assert!(s.row(2).is_none());
    }

    #[test]
    fn calls_color_fn_once_per_pixel_in_order() {
        let mut seen = Vec::new();
        rasterize(2, 2, |x, y| {
            seen.push((x, y));
            Rgba::TRANSPARENT
        });
        assert_eq!(seen, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn idempotent() {
        let f = |x: u32, y: u32| Rgba((x * y) as u8, x as u8, y as u8, 200);
        assert_eq!(rasterize(9, 5, f), rasterize(9, 5, f));
    }

    #[test]
    fn zero_sized() {
        assert_eq!(rasterize(0, 4, |_, _| Rgba::TRANSPARENT).data, vec![0u8; 4]);
        assert!(rasterize(4, 0, |_, _| Rgba::TRANSPARENT).data.is_empty());
    }
}
