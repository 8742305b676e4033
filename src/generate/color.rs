use crate::foundation::core::Gray;

/// Fraction of full intensity lost between the first and last stripe.
pub const GRAY_FADE: f64 = 0.8;

/// Linear fade from white at stripe 0 to `1 - GRAY_FADE` at stripe `count - 1`.
///
/// `count` must be at least 2; the result is clamped into `[0, 1]` for any index.
pub fn stripe_gray(index: usize, count: usize) -> Gray {
    let denom = count.saturating_sub(1).max(1) as f64;
    Gray::clamped(1.0 - (index as f64 / denom) * GRAY_FADE)
}
