use std::path::PathBuf;
use std::time::Duration;

use crate::config::{OutputPaths, StripeConfig};
use crate::foundation::error::StripeResult;
use crate::foundation::jitter::JitterSource;
use crate::generate::sampler::SampleGrid;
use crate::generate::stripe::{StripeChain, StripeLayout};
use crate::render::canvas::{AnimatedCanvasSink, Canvas, CanvasConfig};
use crate::render::document::SvgDocumentSink;
use crate::render::raster::{RasterConverter, RasterOutcome, export_raster};
use crate::render::sink::{SinkConfig, StripeSink};

/// Per-point delay used by the animated canvas unless overridden.
pub const DEFAULT_PACING: Duration = Duration::from_micros(200);

/// Options for [`run`].
#[derive(Clone, Debug)]
pub struct RunOpts {
    pub config: StripeConfig,
    /// Canvas appearance. Its world rectangle is replaced by `config.extent`.
    pub canvas: CanvasConfig,
    pub outputs: OutputPaths,
    pub pacing: Option<Duration>,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            config: StripeConfig::default(),
            canvas: CanvasConfig::default(),
            outputs: OutputPaths::default(),
            pacing: Some(DEFAULT_PACING),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub stripes: usize,
    pub document: PathBuf,
    pub snapshot: PathBuf,
    pub raster: RasterOutcome,
}

/// Generate every stripe and feed it to all `sinks` in index order.
///
/// Returns the number of stripes pushed.
pub fn render_stripes<J>(
    cfg: &StripeConfig,
    jitter: &mut J,
    sinks: &mut [&mut dyn StripeSink],
) -> StripeResult<usize>
where
    J: JitterSource + ?Sized,
{
    let layout = StripeLayout::new(cfg)?;
    let grid = SampleGrid::new(cfg.steps, cfg.extent.x0, cfg.extent.x1)?;
    tracing::debug!(
        stripes = layout.count,
        samples = grid.len(),
        spacing = layout.spacing,
        max_jitter = layout.max_jitter,
        "generating stripes"
    );

    let sink_cfg = SinkConfig {
        stripes: layout.count,
        samples: grid.len(),
        extent: cfg.extent,
    };
    for sink in sinks.iter_mut() {
        sink.begin(sink_cfg)?;
    }

    let mut pushed = 0usize;
    for stripe in StripeChain::new(layout, &grid, jitter) {
        let line = stripe.to_polyline(&grid)?;
        for sink in sinks.iter_mut() {
            sink.push_stripe(&line)?;
        }
        pushed += 1;
    }

    for sink in sinks.iter_mut() {
        sink.end()?;
    }
    Ok(pushed)
}

/// One complete run: canvas animation, SVG document, canvas snapshot, optional raster.
///
/// The canvas lives for the duration of this call. `on_finish` sees it after every output has
/// been written and before it is torn down.
#[tracing::instrument(
    skip_all,
    fields(stripes = opts.config.stripes, steps = opts.config.steps)
)]
pub fn run<J, F>(
    opts: &RunOpts,
    jitter: &mut J,
    raster: Option<&dyn RasterConverter>,
    on_finish: F,
) -> StripeResult<RunReport>
where
    J: JitterSource + ?Sized,
    F: FnOnce(&Canvas),
{
    opts.config.validate()?;

    let mut canvas = Canvas::open(CanvasConfig {
        world: opts.config.extent,
        ..opts.canvas.clone()
    })?;
    let mut document = SvgDocumentSink::new(&opts.outputs.document);

    let stripes = {
        let mut animated = AnimatedCanvasSink::new(&mut canvas, opts.pacing);
        let mut sinks: [&mut dyn StripeSink; 2] = [&mut animated, &mut document];
        render_stripes(&opts.config, jitter, &mut sinks)?
    };

    canvas.write_snapshot(&opts.outputs.snapshot)?;
    let raster = export_raster(raster, &opts.outputs.snapshot, &opts.outputs.raster);

    on_finish(&canvas);
    drop(canvas);

    Ok(RunReport {
        stripes,
        document: opts.outputs.document.clone(),
        snapshot: opts.outputs.snapshot.clone(),
        raster,
    })
}
