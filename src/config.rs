use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Rect;
use crate::foundation::error::{StripeError, StripeResult};

/// Parameters of one generation run.
///
/// Defaults reproduce the reference artwork: 300 stripes of 300 samples each over a 400x400
/// world centered on the origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripeConfig {
    /// Number of stripes `L`.
    pub stripes: usize,
    /// Samples per stripe.
    pub steps: usize,
    /// World rectangle, y up. Stripes span `x0..=x1`; the seed row sits at `y1`.
    pub extent: Rect,
    /// Moving-average window applied to every raw row. Must be odd.
    pub smoothing_window: usize,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            stripes: 300,
            steps: 300,
            extent: Rect::new(-200.0, -200.0, 200.0, 200.0),
            smoothing_window: 7,
        }
    }
}

impl StripeConfig {
    pub fn validate(&self) -> StripeResult<()> {
        if self.stripes < 2 {
            return Err(StripeError::validation(format!(
                "stripe count must be >= 2 (got {})",
                self.stripes
            )));
        }
        if self.steps < 2 {
            return Err(StripeError::validation(format!(
                "sample count must be >= 2 (got {})",
                self.steps
            )));
        }
        let e = self.extent;
        if ![e.x0, e.y0, e.x1, e.y1].iter().all(|v| v.is_finite()) {
            return Err(StripeError::validation("extent must be finite"));
        }
        if e.x1 <= e.x0 || e.y1 <= e.y0 {
            return Err(StripeError::validation(
                "extent must have positive width and height",
            ));
        }
        if self.smoothing_window == 0 || self.smoothing_window.is_multiple_of(2) {
            return Err(StripeError::validation(format!(
                "smoothing window must be odd (got {})",
                self.smoothing_window
            )));
        }
        Ok(())
    }
}

/// Fixed artifact names, rooted at a caller-chosen directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub document: PathBuf,
    pub snapshot: PathBuf,
    pub raster: PathBuf,
}

impl OutputPaths {
    pub const DOCUMENT_NAME: &'static str = "smooth_jittered_stripes.svg";
    pub const SNAPSHOT_NAME: &'static str = "smooth_jittered_stripes_canvas.svg";
    pub const RASTER_NAME: &'static str = "smooth_jittered_stripes.tiff";

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            document: dir.join(Self::DOCUMENT_NAME),
            snapshot: dir.join(Self::SNAPSHOT_NAME),
            raster: dir.join(Self::RASTER_NAME),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> StripeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
