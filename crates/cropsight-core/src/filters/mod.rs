pub mod gaussian_blur;
pub mod median;

use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Evaluate `pixel(row, col)` for every position of an `h` x `w` plane,
/// splitting rows across the Rayon pool when the plane is large enough.
pub(crate) fn map_pixels<F>(h: usize, w: usize, pixel: F) -> Array2<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| (0..w).map(|col| pixel(row, col)).collect())
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| pixel(row, col))
    }
}

/// Clamp a signed index into `0..len` (replicate border).
#[inline]
pub(crate) fn clamp_index(idx: isize, len: usize) -> usize {
    idx.clamp(0, len as isize - 1) as usize
}
