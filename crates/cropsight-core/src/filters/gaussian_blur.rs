use ndarray::Array2;

use super::{clamp_index, map_pixels};

/// Apply a `size` x `size` Gaussian blur using separable 1D convolution.
///
/// `size` must be odd. Borders replicate the edge pixel.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32, size: usize) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma, size / 2);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(sigma: f32, radius: usize) -> Vec<f32> {
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    map_pixels(h, w, |row, col| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_col = clamp_index(col as isize + ki as isize - radius as isize, w);
            sum += data[[row, src_col]] * kv;
        }
        sum
    })
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    map_pixels(h, w, |row, col| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_row = clamp_index(row as isize + ki as isize - radius as isize, h);
            sum += data[[src_row, col]] * kv;
        }
        sum
    })
}
