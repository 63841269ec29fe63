use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::consts::SPECTRAL_WINDOW_HALF;

/// Mean log-magnitude of the centred spectrum inside a window around DC.
///
/// The spectrum is shifted so DC sits at (h/2, w/2); the window spans
/// `SPECTRAL_WINDOW_HALF` bins on each side, clipped to the plane.
pub fn spectral_focus_array(gray: &Array2<f32>) -> f64 {
    let (h, w) = gray.dim();
    if h == 0 || w == 0 {
        return 0.0;
    }

    let spectrum = fft2d(gray);

    let cy = h / 2;
    let cx = w / 2;
    let row_lo = cy.saturating_sub(SPECTRAL_WINDOW_HALF);
    let row_hi = (cy + SPECTRAL_WINDOW_HALF).min(h);
    let col_lo = cx.saturating_sub(SPECTRAL_WINDOW_HALF);
    let col_hi = (cx + SPECTRAL_WINDOW_HALF).min(w);

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for row in row_lo..row_hi {
        let src_row = shifted_index(row, h);
        for col in col_lo..col_hi {
            let src_col = shifted_index(col, w);
            sum += (spectrum[[src_row, src_col]].norm() + 1.0).ln();
            count += 1;
        }
    }

    sum / count as f64
}

/// Source index feeding position `k` of an fft-shifted axis of length `n`.
#[inline]
fn shifted_index(k: usize, n: usize) -> usize {
    (k + n - n / 2) % n
}

/// 2D FFT: row-wise FFT, then column-wise FFT.
fn fft2d(data: &Array2<f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v as f64, 0.0));

    // Row-wise FFT
    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| result[[row, c]]).collect();
        fft_row.process(&mut row_data);
        for (col, v) in row_data.into_iter().enumerate() {
            result[[row, col]] = v;
        }
    }

    // Column-wise FFT
    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| result[[r, col]]).collect();
        fft_col.process(&mut col_data);
        for (row, v) in col_data.into_iter().enumerate() {
            result[[row, col]] = v;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_matches_even_and_odd_layouts() {
        // fftshift([0,1,2,3]) == [2,3,0,1]
        let even: Vec<usize> = (0..4).map(|k| shifted_index(k, 4)).collect();
        assert_eq!(even, vec![2, 3, 0, 1]);
        // fftshift([0,1,2,3,4]) == [3,4,0,1,2]
        let odd: Vec<usize> = (0..5).map(|k| shifted_index(k, 5)).collect();
        assert_eq!(odd, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn constant_plane_only_has_dc_energy() {
        let plane = Array2::<f32>::from_elem((8, 8), 1.0);
        let spectrum = fft2d(&plane);
        assert!((spectrum[[0, 0]].re - 64.0).abs() < 1e-9);
        assert!(spectrum[[1, 1]].norm() < 1e-9);
    }
}
