use std::collections::HashSet;

use image::{Rgb, RgbImage};
use image_quantizer_wasm::{PixelArray, QuantizeConfig, QuantizeError, quantize};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        Rgb([r, g, 128])
    })
}

fn four_color_tile(width: u32, height: u32) -> RgbImage {
    let colors = [
        Rgb([255, 0, 0]),
        Rgb([0, 255, 0]),
        Rgb([0, 0, 255]),
        Rgb([255, 255, 0]),
    ];
    RgbImage::from_fn(width, height, |x, y| {
        colors[((y * width + x) % 4) as usize]
    })
}

fn distinct_colors(img: &RgbImage) -> usize {
    img.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
}

#[test]
fn output_dimensions_match_input() {
    let img = gradient(32, 20);
    let pixels = PixelArray::from_rgb8(&img);

    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(8)).unwrap();
    assert_eq!(quantized.width(), 32);
    assert_eq!(quantized.height(), 20);
    assert_eq!(quantized.labels().len(), 32 * 20);

    let out = quantized.to_image();
    assert_eq!((out.width(), out.height()), (32, 20));
}

#[test]
fn distinct_output_colors_bounded_by_k() {
    let img = gradient(16, 16);
    let pixels = PixelArray::from_rgb8(&img);

    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(8)).unwrap();
    assert_eq!(quantized.palette().len(), 8);
    assert!(quantized.labels().iter().all(|&l| l < 8));
    assert!(distinct_colors(&quantized.to_image()) <= 8);
}

#[test]
fn fixed_seed_is_byte_identical() {
    let img = gradient(24, 24);
    let pixels = PixelArray::from_rgb8(&img);
    let config = QuantizeConfig::new().num_colors(6).random_seed(42);

    let a = quantize(&pixels, &config).unwrap();
    let b = quantize(&pixels, &config).unwrap();

    assert_eq!(a.palette(), b.palette());
    assert_eq!(a.to_image().into_raw(), b.to_image().into_raw());
}

#[test]
fn single_color_budget_collapses_to_sample_mean() {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([40, 0, 0]));
    img.put_pixel(1, 0, Rgb([60, 0, 0]));
    img.put_pixel(0, 1, Rgb([40, 0, 0]));
    img.put_pixel(1, 1, Rgb([60, 0, 0]));
    let pixels = PixelArray::from_rgb8(&img);

    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(1)).unwrap();
    let out = quantized.to_image();

    for pixel in out.pixels() {
        assert_eq!(pixel.0, [50, 0, 0]);
    }
}

#[test]
fn palette_covering_all_colors_is_lossless() {
    let img = four_color_tile(8, 8);
    let pixels = PixelArray::from_rgb8(&img);

    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(4)).unwrap();
    assert_eq!(quantized.to_image().into_raw(), img.into_raw());
}

#[test]
fn extra_palette_slots_do_not_degrade() {
    let img = four_color_tile(8, 8);
    let pixels = PixelArray::from_rgb8(&img);

    // More clusters than distinct colors: the surplus centroids stay empty
    // and the reproduction is still exact.
    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(7)).unwrap();
    assert_eq!(quantized.palette().len(), 7);
    assert_eq!(quantized.to_image().into_raw(), img.into_raw());
}

#[test]
fn requantizing_quantized_image_is_stable() {
    let config = QuantizeConfig::new().num_colors(8).random_seed(3);

    let img = gradient(16, 16);
    let first = quantize(&PixelArray::from_rgb8(&img), &config)
        .unwrap()
        .to_image();

    // The first pass leaves at most 8 distinct colors, so a second pass with
    // the same budget reproduces it exactly.
    let second = quantize(&PixelArray::from_rgb8(&first), &config)
        .unwrap()
        .to_image();

    assert_eq!(second.into_raw(), first.into_raw());
}

#[test]
fn two_by_two_scenario_builds_full_palette() {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([0, 255, 0]));
    img.put_pixel(1, 1, Rgb([0, 0, 255]));
    let pixels = PixelArray::from_rgb8(&img);

    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(3)).unwrap();

    let palette = quantized.palette_rgb8();
    assert_eq!(palette.len(), 3);
    for target in [[255, 0, 0], [0, 255, 0], [0, 0, 255]] {
        assert!(
            palette.contains(&target),
            "palette {palette:?} is missing {target:?}"
        );
    }

    // Both red pixels share one palette entry.
    let labels = quantized.labels();
    assert_eq!(labels[0], labels[1]);
}

#[test]
fn non_square_image_is_not_transposed() {
    let img = RgbImage::from_fn(3, 2, |x, y| Rgb([(y * 3 + x) as u8 * 40, 0, 0]));
    let pixels = PixelArray::from_rgb8(&img);

    // Six distinct colors and six clusters: exact reproduction, so any
    // width/height swap would show up as shuffled pixels.
    let quantized = quantize(&pixels, &QuantizeConfig::new().num_colors(6)).unwrap();
    let out = quantized.to_image();

    assert_eq!((out.width(), out.height()), (3, 2));
    for (x, y, pixel) in img.enumerate_pixels() {
        assert_eq!(out.get_pixel(x, y), pixel);
    }
}

#[test]
fn zero_colors_raises_invalid_parameter() {
    let pixels = PixelArray::from_rgb8(&gradient(4, 4));
    let err = quantize(&pixels, &QuantizeConfig::new().num_colors(0)).unwrap_err();
    assert!(matches!(err, QuantizeError::InvalidColorCount(0)));
}
