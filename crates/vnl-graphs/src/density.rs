//! Gaussian kernel density estimate for the histogram overlay

use serde::Serialize;

/// Number of points the density curve is evaluated on
pub const DENSITY_GRID_POINTS: usize = 200;

/// One point of a density curve, already scaled to histogram counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    /// Evaluation point
    pub x: f64,
    /// Scaled density at `x`
    pub y: f64,
}

/// Scott's rule: `sigma * n^(-1/5)` with the sample standard deviation.
///
/// Returns `None` when fewer than two samples exist or all samples are equal.
pub fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean = samples.iter().sum::<f64>() / n_f;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
    let sigma = variance.sqrt();

    if sigma > 0.0 && sigma.is_finite() {
        Some(sigma * n_f.powf(-0.2))
    } else {
        None
    }
}

/// Evaluate a Gaussian KDE of `samples` on `points` evenly spaced positions
/// across `[lower, upper]`, multiplying the density by `scale`.
///
/// With `scale = n * bin_width` the curve lines up with a count histogram.
pub fn gaussian_kde(
    samples: &[f64],
    lower: f64,
    upper: f64,
    points: usize,
    scale: f64,
) -> Vec<DensityPoint> {
    let Some(bandwidth) = scott_bandwidth(samples) else {
        return Vec::new();
    };
    if points < 2 || upper <= lower {
        return Vec::new();
    }

    let n = samples.len() as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (upper - lower) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = lower + step * i as f64;
            let sum: f64 = samples
                .iter()
                .map(|s| {
                    let z = (x - s) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            DensityPoint {
                x,
                y: sum * norm * scale,
            }
        })
        .collect()
}
