use ndarray::Array2;

/// Sobel response at an interior pixel.
///
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///   Gy = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
#[inline]
fn sobel_at(data: &Array2<f32>, row: usize, col: usize) -> f64 {
    let gx = -data[[row - 1, col - 1]] as f64 + data[[row - 1, col + 1]] as f64
        - 2.0 * data[[row, col - 1]] as f64
        + 2.0 * data[[row, col + 1]] as f64
        - data[[row + 1, col - 1]] as f64
        + data[[row + 1, col + 1]] as f64;

    let gy = -data[[row - 1, col - 1]] as f64
        - 2.0 * data[[row - 1, col]] as f64
        - data[[row - 1, col + 1]] as f64
        + data[[row + 1, col - 1]] as f64
        + 2.0 * data[[row + 1, col]] as f64
        + data[[row + 1, col + 1]] as f64;

    (gx * gx + gy * gy).sqrt()
}

/// Mean Sobel gradient magnitude over interior pixels. Higher = sharper.
pub fn gradient_score_array(data: &Array2<f32>) -> f64 {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let count = ((h - 2) * (w - 2)) as f64;

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            sum += sobel_at(data, row, col);
        }
    }

    sum / count
}
