use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// One pixel in 8-bit HSV: hue in [0, 180), saturation and value in [0, 255].
///
/// Hue is halved degrees so it fits a byte, the same layout OpenCV produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let r = rgb[0] as f32;
        let g = rgb[1] as f32;
        let b = rgb[2] as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

        let mut hue_deg = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        if hue_deg < 0.0 {
            hue_deg += 360.0;
        }

        // 360 degrees wraps back to hue 0.
        let h = ((hue_deg / 2.0).round() as u32 % 180) as u8;

        Self {
            h,
            s: s.round().clamp(0.0, 255.0) as u8,
            v: max as u8,
        }
    }
}

/// Inclusive HSV interval. A pixel is inside when every component is within
/// its lower and upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&px.h)
            && (self.lower[1]..=self.upper[1]).contains(&px.s)
            && (self.lower[2]..=self.upper[2]).contains(&px.v)
    }
}

/// Convert every pixel of a frame to HSV.
pub fn hsv_plane(frame: &Frame) -> Array2<Hsv> {
    let (h, w, _) = frame.data.dim();
    Array2::from_shape_fn((h, w), |(row, col)| Hsv::from_rgb(frame.pixel(row, col)))
}

/// Fraction of pixels inside `range`.
pub fn fraction_in_range(hsv: &Array2<Hsv>, range: &HsvRange) -> f64 {
    if hsv.is_empty() {
        return 0.0;
    }
    let inside = hsv.iter().filter(|&&px| range.contains(px)).count();
    inside as f64 / hsv.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Hsv::from_rgb([255, 0, 0]), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb([0, 255, 0]), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb([0, 0, 255]), Hsv { h: 120, s: 255, v: 255 });
    }

    #[test]
    fn gray_has_no_saturation() {
        let px = Hsv::from_rgb([128, 128, 128]);
        assert_eq!(px.s, 0);
        assert_eq!(px.v, 128);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = HsvRange::new([35, 50, 50], [85, 255, 255]);
        assert!(range.contains(Hsv { h: 35, s: 50, v: 50 }));
        assert!(range.contains(Hsv { h: 85, s: 255, v: 255 }));
        assert!(!range.contains(Hsv { h: 34, s: 200, v: 200 }));
    }
}
