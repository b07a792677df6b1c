use crate::descriptive::mean;

/// Pearson correlation coefficient between two paired samples.
///
/// Pairs are taken positionally; extra values in the longer slice are ignored.
///
/// # Returns
///
/// * `Some(r)` with `r` in `[-1, 1]`
/// * `None` if fewer than two pairs exist or either sample has zero variance
///
/// # Examples
///
/// ```
/// use gamesales_stats::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
/// ```
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs.iter().copied())?;
    let mean_y = mean(ys.iter().copied())?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
