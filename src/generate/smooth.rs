/// Centered moving average with a window clipped at the edges.
///
/// Sample `i` averages `values[lo..hi]` with `lo = max(0, i - window/2)` and
/// `hi = min(n, i + window/2 + 1)`. Edge samples therefore average fewer neighbors instead of
/// padding. The output has the same length as the input for every window, and windows of 0 or
/// 1 return the input unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            let span = &values[lo..hi];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/generate/smooth.rs"]
mod tests;
