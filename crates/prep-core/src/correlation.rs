//! Pearson correlation over pairwise-complete observations

use crate::{Error, Result};

/// Pearson correlation coefficient of two aligned columns
///
/// Rows where either value is missing or NaN are dropped before computing.
/// Returns `Ok(None)` when fewer than two complete pairs remain or either
/// side has zero variance.
///
/// # Examples
///
/// ```rust
/// use prep_core::correlation::pearson;
///
/// let x = [Some(1.0), Some(2.0), Some(3.0)];
/// let y = [Some(2.0), Some(4.0), Some(6.0)];
/// let r = pearson(&x, &y).unwrap().unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Result<Option<f64>> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "pearson"));
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return Ok(None);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Ok(None);
    }
    // Clamp rounding noise so perfectly collinear data stays in [-1, 1]
    Ok(Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)))
}
