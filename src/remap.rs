use crate::pixels::PixelArray;

/// Label every pixel of the full image with its nearest palette entry.
///
/// This is a full pass over all `width * height` pixels, regardless of which
/// of them were sampled during fitting, under the same squared Euclidean
/// metric the fit used.
pub fn map_to_palette(pixels: &PixelArray, palette: &[[f32; 3]]) -> Vec<u32> {
    pixels
        .colors()
        .iter()
        .map(|color| nearest_entry(color, palette) as u32)
        .collect()
}

/// Index of the palette entry closest to `color`. Ties go to the lower
/// index: the scan only replaces the best match on a strictly smaller
/// distance.
pub(crate) fn nearest_entry(color: &[f32; 3], palette: &[[f32; 3]]) -> usize {
    let mut best = 0usize;
    let mut best_dist = f32::INFINITY;
    for (idx, entry) in palette.iter().enumerate() {
        let dist = distance_squared(color, entry);
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}

pub(crate) fn distance_squared(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
