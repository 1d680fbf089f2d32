//! Gaussian kernel density estimate

use std::f64::consts::PI;

use crate::utils::std_dev;

/// Scott's rule bandwidth `sigma * n^(-1/5)`
///
/// `None` with fewer than two values or zero spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let present: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    let sigma = std_dev(&present)?;
    if sigma <= 0.0 || !sigma.is_finite() {
        return None;
    }
    Some(sigma * (values.len() as f64).powf(-0.2))
}

/// Gaussian KDE of `values` evaluated at each point of `grid`
///
/// Returns `None` when no bandwidth can be chosen.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let h = scott_bandwidth(values)?;
    let norm = values.len() as f64 * h * (2.0 * PI).sqrt();
    Some(
        grid.iter()
            .map(|&x| {
                values
                    .iter()
                    .map(|&v| {
                        let u = (x - v) / h;
                        (-0.5 * u * u).exp()
                    })
                    .sum::<f64>()
                    / norm
            })
            .collect(),
    )
}
