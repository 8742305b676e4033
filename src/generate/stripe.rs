use crate::config::StripeConfig;
use crate::foundation::core::{Gray, Point};
use crate::foundation::error::{StripeError, StripeResult};
use crate::foundation::jitter::JitterSource;
use crate::generate::color::stripe_gray;
use crate::generate::sampler::SampleGrid;
use crate::generate::smooth::moving_average;

/// Jitter added per stripe index before the cap applies.
pub const JITTER_PER_STRIPE: f64 = 0.1;
/// Jitter cap as a fraction of the nominal spacing.
pub const MAX_JITTER_FRACTION: f64 = 0.8;
/// Minimum gap to the previous stripe is `spacing - MIN_GAP_SLACK * spacing`.
pub const MIN_GAP_SLACK: f64 = 0.1;

/// Run-wide constants derived from the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripeLayout {
    pub count: usize,
    pub spacing: f64,
    pub max_jitter: f64,
    /// y of the flat seed row, which is stripe 0.
    pub seed_y: f64,
    pub smoothing_window: usize,
}

impl StripeLayout {
    pub fn new(cfg: &StripeConfig) -> StripeResult<Self> {
        cfg.validate()?;
        let spacing = cfg.extent.height() / (cfg.stripes - 1) as f64;
        Ok(Self {
            count: cfg.stripes,
            spacing,
            max_jitter: MAX_JITTER_FRACTION * spacing,
            seed_y: cfg.extent.y1,
            smoothing_window: cfg.smoothing_window,
        })
    }

    /// Half-width of the uniform perturbation for stripe `index`.
    pub fn amplitude(&self, index: usize) -> f64 {
        (index as f64 * JITTER_PER_STRIPE).min(self.max_jitter)
    }

    /// Highest y a raw point may take given the previous stripe's y at the same sample.
    pub fn ceiling(&self, prev_y: f64) -> f64 {
        prev_y - self.spacing + MIN_GAP_SLACK * self.spacing
    }

    /// Draw one raw row below `prev`, capped so no point comes closer than the minimum gap.
    pub fn jitter_row<J>(&self, index: usize, prev: &[f64], jitter: &mut J) -> Vec<f64>
    where
        J: JitterSource + ?Sized,
    {
        let amp = self.amplitude(index);
        prev.iter()
            .map(|&p| {
                let y = p - self.spacing + jitter.uniform(-amp, amp);
                y.min(self.ceiling(p))
            })
            .collect()
    }

    /// Stripe 0: the flat seed row, drawn as is.
    pub fn seed_stripe(&self, samples: usize) -> Stripe {
        let row = vec![self.seed_y; samples];
        Stripe {
            index: 0,
            raw: row.clone(),
            ys: row,
            gray: stripe_gray(0, self.count),
        }
    }

    /// One fold step for `index >= 1`: raw row below `prev`, then smoothing.
    pub fn next_stripe<J>(&self, index: usize, prev: &[f64], jitter: &mut J) -> Stripe
    where
        J: JitterSource + ?Sized,
    {
        let raw = self.jitter_row(index, prev, jitter);
        let ys = moving_average(&raw, self.smoothing_window);
        Stripe {
            index,
            raw,
            ys,
            gray: stripe_gray(index, self.count),
        }
    }
}

/// One generated stripe.
#[derive(Clone, Debug, PartialEq)]
pub struct Stripe {
    pub index: usize,
    /// Row after the minimum-gap cap, before smoothing.
    pub raw: Vec<f64>,
    /// Smoothed row; this is what gets drawn and what the next stripe derives from.
    pub ys: Vec<f64>,
    pub gray: Gray,
}

impl Stripe {
    pub fn to_polyline(&self, grid: &SampleGrid) -> StripeResult<Polyline> {
        if grid.len() != self.ys.len() {
            return Err(StripeError::render(format!(
                "stripe {} has {} samples but the grid has {}",
                self.index,
                self.ys.len(),
                grid.len()
            )));
        }
        Ok(Polyline {
            index: self.index,
            points: grid
                .xs()
                .iter()
                .zip(&self.ys)
                .map(|(&x, &y)| Point::new(x, y))
                .collect(),
            gray: self.gray,
        })
    }
}

/// What sinks consume: world-space points plus the stripe's gray.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub index: usize,
    pub points: Vec<Point>,
    pub gray: Gray,
}

/// Lazily folds over stripe index, each step consuming only the previous smoothed row.
pub struct StripeChain<'a, J: JitterSource + ?Sized> {
    layout: StripeLayout,
    jitter: &'a mut J,
    samples: usize,
    prev: Vec<f64>,
    next_index: usize,
}

impl<'a, J: JitterSource + ?Sized> StripeChain<'a, J> {
    pub fn new(layout: StripeLayout, grid: &SampleGrid, jitter: &'a mut J) -> Self {
        Self {
            layout,
            jitter,
            samples: grid.len(),
            prev: Vec::new(),
            next_index: 0,
        }
    }
}

impl<J: JitterSource + ?Sized> Iterator for StripeChain<'_, J> {
    type Item = Stripe;

    fn next(&mut self) -> Option<Stripe> {
        if self.next_index >= self.layout.count {
            return None;
        }
        let stripe = if self.next_index == 0 {
            self.layout.seed_stripe(self.samples)
        } else {
            self.layout
                .next_stripe(self.next_index, &self.prev, &mut *self.jitter)
        };
        self.prev = stripe.ys.clone();
        self.next_index += 1;
        Some(stripe)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.count - self.next_index;
        (left, Some(left))
    }
}

impl<J: JitterSource + ?Sized> ExactSizeIterator for StripeChain<'_, J> {}

/// Generate every stripe of a run eagerly.
pub fn generate_stripes<J>(cfg: &StripeConfig, jitter: &mut J) -> StripeResult<Vec<Stripe>>
where
    J: JitterSource + ?Sized,
{
    let layout = StripeLayout::new(cfg)?;
    let grid = SampleGrid::new(cfg.steps, cfg.extent.x0, cfg.extent.x1)?;
    Ok(StripeChain::new(layout, &grid, jitter).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/stripe.rs"]
mod tests;
