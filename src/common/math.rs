use fixed::types::I32F32;

/// Normalizes `value` into the range spanned by `min` and `max`.
///
/// # Arguments
/// - `value`: The value to normalize.
/// - `min`: The lower end of the range.
/// - `max`: The upper end of the range.
///
/// # Returns
/// - `Some(ratio)` with `ratio == 0` at `min` and `ratio == 1` at `max`, exactly.
/// - `None` if `min` and `max` coincide (the range has no width to divide by).
pub fn normalize_fixed32(value: I32F32, min: I32F32, max: I32F32) -> Option<I32F32> {
    let span = max.saturating_sub(min);
    if span == I32F32::ZERO {
        None
    } else {
        value.saturating_sub(min).checked_div(span)
    }
}

/// Linearly interpolates between `from` and `to` at `ratio`.
///
/// `ratio == 0` yields `from` and `ratio == 1` yields `to` bit for bit, which keeps
/// interpolated tables exact at their breakpoints.
///
/// # Arguments
/// - `from`: The value at `ratio == 0`.
/// - `to`: The value at `ratio == 1`.
/// - `ratio`: The position between both values, usually in `[0, 1]`.
pub fn lerp_fixed32(from: I32F32, to: I32F32, ratio: I32F32) -> I32F32 {
    from.saturating_add(ratio.saturating_mul(to.saturating_sub(from)))
}
