use ndarray::Array2;

use super::{clamp_index, map_pixels};

/// 3x3 median filter. Borders replicate the edge pixel.
pub fn median3_array(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();

    map_pixels(h, w, |row, col| {
        let mut window = [0.0f32; 9];
        let mut i = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                let r = clamp_index(row as isize + dr, h);
                let c = clamp_index(col as isize + dc, w);
                window[i] = data[[r, c]];
                i += 1;
            }
        }
        window.sort_unstable_by(|a, b| a.total_cmp(b));
        window[4]
    })
}
