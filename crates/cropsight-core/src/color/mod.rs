pub mod hsv;

use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::Frame;

/// Compute the grayscale plane of a frame using ITU-R BT.601 weights.
///
/// Values stay on the 0..255 scale of the source pixels.
pub fn luminance(frame: &Frame) -> Array2<f32> {
    let (h, w, _) = frame.data.dim();
    let mut data = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            data[[row, col]] = LUMINANCE_R * frame.data[[row, col, 0]] as f32
                + LUMINANCE_G * frame.data[[row, col, 1]] as f32
                + LUMINANCE_B * frame.data[[row, col, 2]] as f32;
        }
    }

    data
}

/// Mean and standard deviation of a plane.
pub fn mean_stddev(data: &Array2<f32>) -> (f64, f64) {
    let n = data.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let sum: f64 = data.iter().map(|&v| v as f64).sum();
    let mean = sum / n;
    let var: f64 = data.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
