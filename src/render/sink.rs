use crate::foundation::core::Rect;
use crate::foundation::error::{StripeError, StripeResult};
use crate::generate::stripe::Polyline;

/// Configuration provided to a [`StripeSink`] before the first stripe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Total stripes the run will push.
    pub stripes: usize,
    /// Points per stripe.
    pub samples: usize,
    /// World rectangle the points live in (y up).
    pub extent: Rect,
}

/// Consumer of generated stripes.
///
/// Ordering contract: `push_stripe` is called in strictly increasing stripe index order, between
/// one `begin` and one `end`.
pub trait StripeSink {
    /// Called once before any stripe is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StripeResult<()>;
    /// Push one stripe in index order.
    fn push_stripe(&mut self, line: &Polyline) -> StripeResult<()>;
    /// Called once after the last stripe.
    fn end(&mut self) -> StripeResult<()>;
}

/// Sink that keeps every pushed stripe in memory. Useful for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    lines: Vec<Polyline>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl StripeSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StripeResult<()> {
        self.cfg = Some(cfg);
        self.lines.clear();
        self.ended = false;
        Ok(())
    }

    fn push_stripe(&mut self, line: &Polyline) -> StripeResult<()> {
        if self.cfg.is_none() {
            return Err(StripeError::render("in-memory sink not started"));
        }
        self.lines.push(line.clone());
        Ok(())
    }

    fn end(&mut self) -> StripeResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Check the ordering contract shared by all sinks.
pub(crate) fn check_order(last: Option<usize>, line: &Polyline) -> StripeResult<()> {
    if let Some(last) = last
        && line.index <= last
    {
        return Err(StripeError::render(format!(
            "stripe {} pushed after stripe {last}",
            line.index
        )));
    }
    Ok(())
}
