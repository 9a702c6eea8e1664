use std::fs;
use std::path::PathBuf;

use iconforge::rendering::layout::default_icon;
use iconforge::{render_icon, EncoderConfig};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

#[test]
fn golden_default_icon_matches_digest() {
    // Digest of the raw scanlines, so the golden does not depend on the
    // deflate implementation's output
    let scanlines = default_icon(64).rasterize();
    assert_eq!(scanlines.data.len(), 64 * (1 + 4 * 64));
    let digest = scanlines.digest();

    let expected_path = golden_path("default_icon_64.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "missing golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(digest, exp.trim());
}

#[test]
fn golden_default_icon_encodes_same_pixels() {
    let scene = default_icon(64);
    let artifact = render_icon(&scene, &EncoderConfig::default()).unwrap();
    let chunks = iconforge::png::read_chunks(&artifact.png_data).unwrap();
    let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(&chunks[1].data).unwrap();
    assert_eq!(inflated, scene.rasterize().data);
}

#[test]
fn raw_pixels_are_stable_across_levels() {
    // The pixel stream must not depend on the compression level
    let scene = default_icon(48);
    let a = render_icon(&scene, &EncoderConfig { compression_level: 0 }).unwrap();
    let b = render_icon(&scene, &EncoderConfig { compression_level: 9 }).unwrap();
    let inflate = |png: &[u8]| {
        let chunks = iconforge::png::read_chunks(png).unwrap();
        miniz_oxide::inflate::decompress_to_vec_zlib(&chunks[1].data).unwrap()
    };
    assert_eq!(inflate(&a.png_data), inflate(&b.png_data));
    assert_eq!(inflate(&a.png_data), scene.rasterize().data);
}
