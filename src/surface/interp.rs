/// Interpolate a vol (percent) at an arbitrary expiry from per-tenor vols.
///
/// - Exact matches (within 1e-10) return stored values directly.
/// - Before the first tenor / after the last: flat-vol extrapolation.
/// - Between tenors: linear interpolation in total variance σ²T.
///
/// `tenors` must be non-empty, strictly increasing, and the same length as `vols`.
pub(crate) fn interpolate_total_variance(tenors: &[f64], vols: &[f64], expiry: f64) -> f64 {
    let n = tenors.len();

    for (i, &t) in tenors.iter().enumerate() {
        if (expiry - t).abs() < 1e-10 {
            return vols[i];
        }
    }

    if expiry < tenors[0] {
        return vols[0];
    }

    if expiry > tenors[n - 1] {
        return vols[n - 1];
    }

    let right = tenors.partition_point(|&t| t < expiry);
    let left = right - 1;
    let alpha = (expiry - tenors[left]) / (tenors[right] - tenors[left]);
    let w_left = vols[left] * vols[left] * tenors[left];
    let w_right = vols[right] * vols[right] * tenors[right];
    let w = (1.0 - alpha) * w_left + alpha * w_right;
    (w / expiry).sqrt()
}
