//! Fixture data for radiator integration tests.

use ndarray::Array2;
use radiator::linspace;

/// A damped oscillation polyline with `n` points on `[0, 4pi]`.
pub fn damped_wave(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x = linspace(0.0, 4.0 * std::f64::consts::PI, n);
    let y = x
        .iter()
        .map(|&v| (-v / 8.0).exp() * v.sin())
        .collect();
    (x, y)
}

/// A radially symmetric 2D field spanning several decades, strictly positive.
pub fn radial_field(rows: usize, cols: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let y = r as f64 / (rows - 1).max(1) as f64 - 0.5;
        let x = c as f64 / (cols - 1).max(1) as f64 - 0.5;
        let r2 = x * x + y * y;
        (10.0 * (-8.0 * r2).exp()).max(0.011) as f32
    })
}
