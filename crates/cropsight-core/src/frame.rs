use image::RgbImage;
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::MetricError;

/// A single color video frame.
/// Pixel values are 8-bit RGB, shape = (height, width, channel), origin top-left.
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array3<u8>,
}

impl Frame {
    pub fn new(data: Array3<u8>) -> Self {
        Self { data }
    }

    /// Frame of a single color, handy for calibration and tests.
    pub fn filled(height: usize, width: usize, rgb: [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, c)| {
            rgb[c.min(COLOR_CHANNEL_COUNT - 1)]
        });
        Self { data }
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array3::from_shape_fn((h as usize, w as usize, COLOR_CHANNEL_COUNT), |(r, c, ch)| {
            img.get_pixel(c as u32, r as u32).0[ch]
        });
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Reject frames the extractors cannot measure.
    pub fn validate(&self) -> Result<(), MetricError> {
        if self.channels() != COLOR_CHANNEL_COUNT {
            return Err(MetricError::ChannelCount {
                channels: self.channels(),
            });
        }
        if self.width() == 0 || self.height() == 0 {
            return Err(MetricError::EmptyFrame {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}
