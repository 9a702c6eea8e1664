use iconforge::rendering::layout::default_icon;
use iconforge::rendering::{rasterize, Rgba};

#[test]
fn smoke_rasterize_default_icon() {
    let s = default_icon(64).rasterize();
    assert_eq!(s.width, 64);
    assert_eq!(s.height, 64);
    assert_eq!(s.data.len(), 64 * (1 + 4 * 64));
    for y in 0..64 {
        assert_eq!(s.row(y).unwrap()[0], 0, "row {} filter byte", y);
    }
}

#[test]
fn smoke_rasterize_twice_is_identical() {
    let f = |x: u32, y: u32| Rgba((x ^ y) as u8, (x + y) as u8, 40, 255);
    assert_eq!(rasterize(31, 17, f).data, rasterize(31, 17, f).data);
}
