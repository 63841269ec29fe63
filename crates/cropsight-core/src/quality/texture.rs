use ndarray::Array2;

use crate::consts::{TEXTURE_BLUR_SIGMA, TEXTURE_BLUR_SIZE};
use crate::filters::gaussian_blur::gaussian_blur_array;

/// Variance of |gray - blur5x5(gray)|, a proxy for fine surface detail.
pub fn texture_variance_array(gray: &Array2<f32>) -> f64 {
    if gray.is_empty() {
        return 0.0;
    }
    let blurred = gaussian_blur_array(gray, TEXTURE_BLUR_SIGMA, TEXTURE_BLUR_SIZE);

    let n = gray.len() as f64;
    let diffs: Vec<f64> = gray
        .iter()
        .zip(blurred.iter())
        .map(|(&g, &b)| (g - b).abs() as f64)
        .collect();
    let mean = diffs.iter().sum::<f64>() / n;
    diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n
}
