use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::pixels::PixelArray;

/// Upper bound on the number of pixels used to fit the palette.
pub const SAMPLE_CAP: usize = 1000;

/// Draw up to [`SAMPLE_CAP`] pixel colors uniformly at random, without
/// replacement and without regard to spatial position.
///
/// The generator is seeded explicitly, so the same image and seed always
/// select the same pixels. Images smaller than the cap are returned whole
/// (shuffled, which does not matter downstream).
pub fn sample_colors(pixels: &PixelArray, seed: u64) -> Vec<[f32; 3]> {
    let colors = pixels.colors();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut indices: Vec<usize> = (0..colors.len()).collect();
    indices.shuffle(&mut rng);
    indices.truncate(SAMPLE_CAP.min(colors.len()));

    indices.into_iter().map(|i| colors[i]).collect()
}
