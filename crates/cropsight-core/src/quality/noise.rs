use ndarray::Array2;

use crate::filters::median::median3_array;

/// Mean |gray - median3x3(gray)|.
pub fn noise_level_array(gray: &Array2<f32>) -> f64 {
    if gray.is_empty() {
        return 0.0;
    }
    let filtered = median3_array(gray);
    let sum: f64 = gray
        .iter()
        .zip(filtered.iter())
        .map(|(&g, &m)| (g - m).abs() as f64)
        .sum();
    sum / gray.len() as f64
}
