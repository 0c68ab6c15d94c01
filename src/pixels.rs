use image::RgbImage;
use palette::Srgb;

use crate::error::QuantizeError;

/// Row-major sequence of normalized RGB triples decoded from a source image.
///
/// Channel values live in `[0.0, 1.0]`. The buffer always holds exactly
/// `width * height` triples.
#[derive(Debug, Clone)]
pub struct PixelArray {
    width: u32,
    height: u32,
    data: Vec<[f32; 3]>,
}

impl PixelArray {
    /// Normalize an 8-bit RGB image into the `[0.0, 1.0]` channel space.
    ///
    /// Alpha dropping and grayscale expansion are decode-side concerns and
    /// must happen before this point (e.g. via `DynamicImage::to_rgb8`).
    pub fn from_rgb8(img: &RgbImage) -> Self {
        let data = img
            .pixels()
            .map(|p| {
                let rgb: Srgb<f32> = Srgb::<u8>::new(p[0], p[1], p[2]).into_format();
                [rgb.red, rgb.green, rgb.blue]
            })
            .collect();

        Self {
            width: img.width(),
            height: img.height(),
            data,
        }
    }

    /// Build a pixel array from an interleaved channel buffer already in
    /// normalized `[0.0, 1.0]` space.
    ///
    /// `channels` must be exactly 3 and `buf` must hold
    /// `width * height * channels` components.
    pub fn from_interleaved(
        buf: &[f32],
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<Self, QuantizeError> {
        if channels != 3 {
            return Err(QuantizeError::ChannelMismatch(channels));
        }
        if buf.len() != width as usize * height as usize * 3 {
            return Err(QuantizeError::DimensionMismatch {
                len: buf.len(),
                width,
                height,
            });
        }

        let data = buf.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels, `width * height`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The normalized color triples in row-major order.
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.data
    }
}
