use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::ensure_parent_dir;
use crate::foundation::core::{Affine, Point, Rect, y_flip_affine};
use crate::foundation::error::{StripeError, StripeResult};
use crate::generate::stripe::Polyline;
use crate::render::sink::{SinkConfig, StripeSink, check_order};

/// Stroke width of every document polyline.
pub const DOCUMENT_STROKE_WIDTH: f64 = 2.0;

/// Collects every stripe and writes one static SVG document at `end`.
///
/// The document is as large as the world extent. Points are mapped with the world's top-left
/// corner at the document origin and y flipped, which for the default extent is
/// `(x, y) -> (x + 200, 200 - y)`.
///
/// Coordinates are written rounded to three decimal places, so the persisted document is a
/// lossy copy of the world-space points.
#[derive(Debug)]
pub struct SvgDocumentSink {
    path: PathBuf,
    size: (f64, f64),
    transform: Affine,
    body: String,
    last: Option<usize>,
    lines: usize,
    started: bool,
}

impl SvgDocumentSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (0.0, 0.0),
            transform: Affine::IDENTITY,
            body: String::new(),
            last: None,
            lines: 0,
            started: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// The complete document as it would be written right now.
    pub fn document(&self) -> String {
        let (w, h) = (fmt_num(self.size.0), fmt_num(self.size.1));
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" baseProfile=\"tiny\" version=\"1.2\" \
             width=\"{w}\" height=\"{h}\">\n"
        ));
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl StripeSink for SvgDocumentSink {
    fn begin(&mut self, cfg: SinkConfig) -> StripeResult<()> {
        let size = (cfg.extent.width(), cfg.extent.height());
        if !(size.0 > 0.0 && size.1 > 0.0) {
            return Err(StripeError::validation(
                "document extent must have positive width and height",
            ));
        }
        self.size = size;
        self.transform = y_flip_affine(cfg.extent, Rect::new(0.0, 0.0, size.0, size.1));
        self.body.clear();
        self.body.reserve(cfg.stripes.saturating_mul(cfg.samples * 16 + 80));
        self.last = None;
        self.lines = 0;
        self.started = true;
        Ok(())
    }

    fn push_stripe(&mut self, line: &Polyline) -> StripeResult<()> {
        if !self.started {
            return Err(StripeError::render("svg document sink not started"));
        }
        check_order(self.last, line)?;

        self.body.push_str("<polyline points=\"");
        let t = self.transform;
        push_points(&mut self.body, line.points.iter().map(|&p| t * p));
        self.body.push_str(&format!(
            "\" stroke=\"{}\" fill=\"none\" stroke-width=\"{}\"/>\n",
            line.gray.to_hex(),
            fmt_num(DOCUMENT_STROKE_WIDTH)
        ));

        self.last = Some(line.index);
        self.lines += 1;
        Ok(())
    }

    fn end(&mut self) -> StripeResult<()> {
        if !self.started {
            return Err(StripeError::export("svg document sink ended before begin"));
        }
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, self.document())
            .with_context(|| format!("write svg document '{}'", self.path.display()))?;
        tracing::info!(path = %self.path.display(), lines = self.lines, "svg document written");
        Ok(())
    }
}

/// Compact decimal: three places at most, no trailing zeros, no negative zero.
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub(crate) fn push_points(out: &mut String, points: impl Iterator<Item = Point>) {
    for (i, p) in points.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&fmt_num(p.x));
        out.push(',');
        out.push_str(&fmt_num(p.y));
    }
}

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/document.rs"]
mod tests;
