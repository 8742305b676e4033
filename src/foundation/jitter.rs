use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of the uniform draws that perturb each stripe.
///
/// This is the only non-deterministic input of a run. Swap it for a seeded or scripted
/// implementation to make generation reproducible.
pub trait JitterSource {
    /// Uniform sample in `[lo, hi]`. Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// [`JitterSource`] backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RandJitter<R>(pub R);

impl RandJitter<StdRng> {
    /// Deterministic source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> JitterSource for RandJitter<R> {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return lo;
        }
        self.0.random_range(lo..=hi)
    }
}

/// Always returns the same offset from the middle of the requested range, clamped into it.
///
/// `bias = -1.0` pins every draw to `lo`, `1.0` to `hi`, `0.0` to the midpoint.
#[derive(Clone, Copy, Debug)]
pub struct FixedJitter {
    pub bias: f64,
}

impl JitterSource for FixedJitter {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return lo;
        }
        let mid = 0.5 * (lo + hi);
        let half = 0.5 * (hi - lo);
        (mid + self.bias.clamp(-1.0, 1.0) * half).clamp(lo, hi)
    }
}
