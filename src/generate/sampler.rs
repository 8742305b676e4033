use crate::foundation::error::{StripeError, StripeResult};

/// Evenly spaced x positions shared by every stripe of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    xs: Vec<f64>,
}

impl SampleGrid {
    /// `steps` positions over `[x0, x1]`, both endpoints included.
    pub fn new(steps: usize, x0: f64, x1: f64) -> StripeResult<Self> {
        if steps < 2 {
            return Err(StripeError::validation(format!(
                "sample grid needs at least 2 steps (got {steps})"
            )));
        }
        if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
            return Err(StripeError::validation(format!(
                "sample grid extent must be finite and increasing (got {x0}..{x1})"
            )));
        }

        let last = steps - 1;
        let dx = (x1 - x0) / last as f64;
        let xs = (0..steps)
            .map(|k| if k == last { x1 } else { x0 + k as f64 * dx })
            .collect();
        Ok(Self { xs })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/sampler.rs"]
mod tests;
