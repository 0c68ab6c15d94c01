//! Color quantization for images: fit a small palette to a random pixel
//! sample with k-means, then remap every pixel to its nearest palette entry.
//!
//! The pipeline is a strictly linear sequence (sample, fit, remap, rebuild)
//! with no state shared between calls. Given the same input, palette size,
//! and seed it produces byte-identical output.

pub mod error;
pub mod kmeans;
pub mod pixels;
pub mod reconstruct;
pub mod remap;
pub mod sampler;

pub use error::QuantizeError;
pub use pixels::PixelArray;
pub use sampler::SAMPLE_CAP;

use image::{DynamicImage, ImageFormat, RgbImage};
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

#[cfg(feature = "native-bin")]
use anyhow::{Context, Result};

/// Palette size used when the caller does not specify one.
pub const DEFAULT_NUM_COLORS: usize = 64;

// ------------------------------------------------------------
// Configuration
// ------------------------------------------------------------

/// Options recognized by the quantization pipeline.
///
/// `num_colors` and `random_seed` form the external configuration surface;
/// the iteration cap and tolerance bound the centroid-refinement loop.
#[derive(Debug, Clone)]
pub struct QuantizeConfig {
    /// Palette size K. Every output pixel is one of these colors.
    pub num_colors: usize,
    /// Seed for pixel sampling and centroid initialization.
    pub random_seed: u64,
    /// Upper bound on k-means refinement passes.
    pub max_iterations: usize,
    /// Largest centroid movement still treated as converged.
    pub tolerance: f32,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            num_colors: DEFAULT_NUM_COLORS,
            random_seed: 0,
            max_iterations: 20,
            tolerance: 1e-4,
        }
    }
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_colors(mut self, k: usize) -> Self {
        self.num_colors = k;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = cap;
        self
    }

    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

// ------------------------------------------------------------
// Pipeline
// ------------------------------------------------------------

/// Output of the pipeline: the fitted palette plus one label per pixel.
#[derive(Debug)]
pub struct Quantized {
    width: u32,
    height: u32,
    palette: Vec<[f32; 3]>,
    labels: Vec<u32>,
}

impl Quantized {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The fitted palette in normalized channel space.
    pub fn palette(&self) -> &[[f32; 3]] {
        &self.palette
    }

    /// Palette index assigned to each pixel, row-major.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Palette entries scaled back to 8-bit channels.
    pub fn palette_rgb8(&self) -> Vec<[u8; 3]> {
        self.palette
            .iter()
            .map(|&c| reconstruct::denormalize(c))
            .collect()
    }

    /// Palette entries as upper-case `RRGGBB` hex strings.
    pub fn palette_hex(&self) -> Vec<String> {
        self.palette_rgb8()
            .iter()
            .map(|c| format!("{:02X}{:02X}{:02X}", c[0], c[1], c[2]))
            .collect()
    }

    /// Rebuild the quantized 8-bit RGB raster.
    pub fn to_image(&self) -> RgbImage {
        reconstruct::rebuild_image(&self.labels, &self.palette, self.width, self.height)
    }
}

/// Run the full pipeline over a decoded pixel array.
///
/// Sampling, fitting, and remapping are pure over the input and the seed in
/// `config`, so repeated calls yield identical results.
pub fn quantize(pixels: &PixelArray, config: &QuantizeConfig) -> Result<Quantized, QuantizeError> {
    let palette = fit_palette(pixels, config)?;
    let labels = remap::map_to_palette(pixels, &palette);

    Ok(Quantized {
        width: pixels.width(),
        height: pixels.height(),
        palette,
        labels,
    })
}

/// Sample the image and fit the palette without remapping every pixel.
pub fn fit_palette(
    pixels: &PixelArray,
    config: &QuantizeConfig,
) -> Result<Vec<[f32; 3]>, QuantizeError> {
    validate(pixels, config)?;

    let sample = sampler::sample_colors(pixels, config.random_seed);
    let fit = kmeans::fit(
        &sample,
        config.num_colors,
        config.random_seed,
        config.max_iterations,
        config.tolerance,
    );

    Ok(fit.centroids)
}

fn validate(pixels: &PixelArray, config: &QuantizeConfig) -> Result<(), QuantizeError> {
    if config.num_colors == 0 {
        return Err(QuantizeError::InvalidColorCount(0));
    }
    if pixels.is_empty() {
        return Err(QuantizeError::ZeroDimension);
    }
    Ok(())
}

// ------------------------------------------------------------
// wasm surface
// ------------------------------------------------------------

/// Quantize an encoded image and return `{ image, palette }`.
///
/// `image` is a PNG-encoded `Uint8Array` with the input's dimensions;
/// `palette` is an array of `RRGGBB` hex strings. Omitted options fall back
/// to 64 colors and seed 0.
#[wasm_bindgen]
pub fn quantize_image(
    input: Vec<u8>,
    num_colors: Option<u32>,
    random_seed: Option<u32>,
) -> Result<Object, JsValue> {
    let config = QuantizeConfig::new()
        .num_colors(num_colors.unwrap_or(DEFAULT_NUM_COLORS as u32) as usize)
        .random_seed(random_seed.unwrap_or(0) as u64);

    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;
    let pixels = PixelArray::from_rgb8(&img.to_rgb8());

    let quantized = quantize(&pixels, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        DynamicImage::ImageRgb8(quantized.to_image())
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| JsValue::from_str(&format!("PNG encode error: {e}")))?;
    }

    let img_js = Uint8Array::from(buf.as_slice());
    let palette_js = Array::new();
    for hex in quantized.palette_hex() {
        palette_js.push(&JsValue::from_str(&hex));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &img_js)?;
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;

    Ok(result)
}

// ------------------------------------------------------------
// Native byte-level wrappers
// ------------------------------------------------------------

/// Quantize an encoded image, returning PNG bytes plus the palette as hex
/// strings.
///
/// Decoding converts to RGB first, so alpha dropping and grayscale expansion
/// happen before the pipeline sees the pixels. Output is always PNG to avoid
/// losing data.
#[cfg(feature = "native-bin")]
pub fn quantize_bytes(input: &[u8], config: &QuantizeConfig) -> Result<(Vec<u8>, Vec<String>)> {
    let img = image::load_from_memory(input)?;
    let pixels = PixelArray::from_rgb8(&img.to_rgb8());

    let quantized = quantize(&pixels, config).context("quantization failed")?;

    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        DynamicImage::ImageRgb8(quantized.to_image()).write_to(&mut cursor, ImageFormat::Png)?;
    }

    Ok((buf, quantized.palette_hex()))
}

/// Fit a palette to an encoded image without producing a raster.
#[cfg(feature = "native-bin")]
pub fn extract_palette_bytes(input: &[u8], config: &QuantizeConfig) -> Result<Vec<String>> {
    let img = image::load_from_memory(input)?;
    let pixels = PixelArray::from_rgb8(&img.to_rgb8());

    let palette = fit_palette(&pixels, config).context("palette fit failed")?;

    Ok(palette
        .iter()
        .map(|&c| {
            let [r, g, b] = reconstruct::denormalize(c);
            format!("{r:02X}{g:02X}{b:02X}")
        })
        .collect())
}
