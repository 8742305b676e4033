//! jitterstripes draws a stack of jittered, smoothed horizontal stripes.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `steps` evenly spaced x positions shared by every stripe ([`SampleGrid`]).
//! 2. **Generate**: a fold over stripe index ([`StripeChain`]). Each stripe is the previous one
//!    moved down by one spacing, perturbed by bounded uniform jitter, capped so it never comes
//!    closer than 90% of the spacing, then smoothed with a clipped moving average.
//! 3. **Color**: a linear white-to-dark-gray fade over stripe index ([`stripe_gray`]).
//! 4. **Sink**: every stripe is pushed, in order, to each [`StripeSink`]: an animated
//!    [`Canvas`] and an SVG document. The canvas is then snapshotted to SVG and, when a
//!    [`RasterConverter`] is available, converted to TIFF.
//!
//! Randomness only enters through [`JitterSource`], so a seeded source makes a run reproducible.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod generate;
mod pipeline;
mod render;

pub use config::{OutputPaths, StripeConfig};
pub use foundation::core::{Affine, Gray, Point, Rect, y_flip_affine};
pub use foundation::error::{StripeError, StripeResult};
pub use foundation::jitter::{FixedJitter, JitterSource, RandJitter};
pub use generate::color::{GRAY_FADE, stripe_gray};
pub use generate::sampler::SampleGrid;
pub use generate::smooth::moving_average;
pub use generate::stripe::{
    JITTER_PER_STRIPE, MAX_JITTER_FRACTION, MIN_GAP_SLACK, Polyline, Stripe, StripeChain,
    StripeLayout, generate_stripes,
};
pub use pipeline::{DEFAULT_PACING, RunOpts, RunReport, render_stripes, run};
pub use render::canvas::{AnimatedCanvasSink, Canvas, CanvasConfig, PenStroke};
pub use render::document::{DOCUMENT_STROKE_WIDTH, SvgDocumentSink};
#[cfg(feature = "raster")]
pub use render::raster::ResvgTiffConverter;
pub use render::raster::{RasterConverter, RasterOutcome, detect_raster_converter, export_raster};
pub use render::sink::{InMemorySink, SinkConfig, StripeSink};
