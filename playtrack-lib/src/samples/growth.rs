/// Percentage change from `previous` to `current`.
///
/// Returns `0.0` when there is no baseline, either because `previous` is absent or because
/// it is zero. The result is negative for a decline and may exceed `100.0`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
pub fn growth(current: u64, previous: Option<u64>) -> f64 {
    match previous {
        None | Some(0) => 0.0,
        Some(previous) => {
            let current = current as f64;
            let previous = previous as f64;
            ((current - previous) / previous) * 100.0
        }
    }
}
