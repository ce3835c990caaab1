//! Small numeric helpers shared by the scorers.

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Every score uses this rounding rule rather than Rust's
/// half-away-from-zero `f64::round`.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to one decimal place with [`round_half_up`].
#[inline]
pub fn round_tenths(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// Arithmetic mean; `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}
