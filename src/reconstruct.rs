use image::RgbImage;
use palette::Srgb;

/// Rebuild the full-resolution raster from per-pixel labels and the palette.
///
/// Labels are consumed in the same row-major order the pixel array was
/// flattened in, so width and height keep their original meaning. Normalized
/// channels are scaled back to 8-bit with round-to-nearest.
pub fn rebuild_image(labels: &[u32], palette: &[[f32; 3]], width: u32, height: u32) -> RgbImage {
    // Convert each palette entry once; pixels only need a lookup.
    let palette_rgb8: Vec<[u8; 3]> = palette.iter().map(|&c| denormalize(c)).collect();

    let mut raw = Vec::with_capacity(labels.len() * 3);
    for &label in labels {
        raw.extend_from_slice(&palette_rgb8[label as usize]);
    }

    RgbImage::from_raw(width, height, raw)
        .expect("label count matches image dimensions")
}

/// Map a normalized color back to 8-bit channels.
pub(crate) fn denormalize(color: [f32; 3]) -> [u8; 3] {
    let rgb: Srgb<u8> = Srgb::new(color[0], color[1], color[2]).into_format();
    [rgb.red, rgb.green, rgb.blue]
}
