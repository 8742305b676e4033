use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::config::ensure_parent_dir;
use crate::foundation::core::{Affine, Gray, Point, Rect, y_flip_affine};
use crate::foundation::error::{StripeError, StripeResult};
use crate::generate::stripe::Polyline;
use crate::render::document::{escape_text, fmt_num, push_points};
use crate::render::sink::{SinkConfig, StripeSink, check_order};

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    pub title: String,
    pub width_px: u32,
    pub height_px: u32,
    /// World rectangle mapped onto the pixel area, y up.
    pub world: Rect,
    pub background: Gray,
    pub pen_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "Smooth Jittered Stripes".to_string(),
            width_px: 400,
            height_px: 400,
            world: Rect::new(-200.0, -200.0, 200.0, 200.0),
            background: Gray::BLACK,
            pen_width: 1.0,
        }
    }
}

/// One continuous pen-down run, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PenStroke {
    pub color: Gray,
    pub width: f64,
    pub points: Vec<Point>,
}

/// Persistent drawing surface driven by a pen.
///
/// Records everything drawn as a display list of [`PenStroke`]s so the final state can be
/// exported with [`Canvas::snapshot_svg`]. Opening and dropping a canvas brackets one run.
#[derive(Debug)]
pub struct Canvas {
    cfg: CanvasConfig,
    to_px: Affine,
    strokes: Vec<PenStroke>,
    pen_color: Gray,
    pen_is_down: bool,
    pos: Point,
    updates: u64,
}

impl Canvas {
    pub fn open(cfg: CanvasConfig) -> StripeResult<Self> {
        if cfg.width_px == 0 || cfg.height_px == 0 {
            return Err(StripeError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        let w = cfg.world;
        if ![w.x0, w.y0, w.x1, w.y1].iter().all(|v| v.is_finite())
            || w.width() <= 0.0
            || w.height() <= 0.0
        {
            return Err(StripeError::validation(
                "canvas world rectangle must be finite and non-empty",
            ));
        }
        if !(cfg.pen_width.is_finite() && cfg.pen_width > 0.0) {
            return Err(StripeError::validation("canvas pen width must be positive"));
        }

        let px = Rect::new(0.0, 0.0, f64::from(cfg.width_px), f64::from(cfg.height_px));
        let to_px = y_flip_affine(cfg.world, px);
        tracing::debug!(
            title = %cfg.title,
            width = cfg.width_px,
            height = cfg.height_px,
            "canvas opened"
        );
        Ok(Self {
            to_px,
            strokes: Vec::new(),
            pen_color: Gray::WHITE,
            pen_is_down: false,
            pos: Point::ORIGIN,
            updates: 0,
            cfg,
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.cfg
    }

    pub fn set_pen_color(&mut self, color: Gray) {
        self.pen_color = color;
    }

    pub fn pen_up(&mut self) {
        self.pen_is_down = false;
    }

    /// Lower the pen at the current position, starting a new stroke.
    pub fn pen_down(&mut self) {
        if self.pen_is_down {
            return;
        }
        self.pen_is_down = true;
        self.strokes.push(PenStroke {
            color: self.pen_color,
            width: self.cfg.pen_width,
            points: vec![self.pos],
        });
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_is_down
    }

    /// Move the pen to a world-space point, drawing when the pen is down.
    pub fn goto(&mut self, p: Point) {
        self.pos = p;
        if !self.pen_is_down {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut()
            && stroke.points.last() != Some(&p)
        {
            stroke.points.push(p);
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Present the current state. Headless, so this only counts refreshes.
    pub fn update(&mut self) {
        self.updates += 1;
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn strokes(&self) -> &[PenStroke] {
        &self.strokes
    }

    /// World to pixel coordinates (y down, origin top-left).
    pub fn to_pixels(&self, p: Point) -> Point {
        self.to_px * p
    }

    /// Serialize the display list in pixel coordinates over the background.
    pub fn snapshot_svg(&self) -> String {
        let (w, h) = (self.cfg.width_px, self.cfg.height_px);
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
             width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        ));
        out.push_str(&format!("<title>{}</title>\n", escape_text(&self.cfg.title)));
        out.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>\n",
            self.cfg.background.to_hex()
        ));
        for stroke in self.strokes.iter().filter(|s| s.points.len() >= 2) {
            out.push_str("<polyline points=\"");
            push_points(&mut out, stroke.points.iter().map(|&p| self.to_pixels(p)));
            out.push_str(&format!(
                "\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" \
                 stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
                stroke.color.to_hex(),
                fmt_num(stroke.width)
            ));
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_snapshot(&self, path: &Path) -> StripeResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, self.snapshot_svg())
            .with_context(|| format!("write canvas snapshot '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "canvas snapshot written");
        Ok(())
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        tracing::debug!(
            title = %self.cfg.title,
            strokes = self.strokes.len(),
            updates = self.updates,
            "canvas closed"
        );
    }
}

/// Draws each stripe onto a [`Canvas`] point by point, refreshing after every move.
pub struct AnimatedCanvasSink<'a> {
    canvas: &'a mut Canvas,
    pacing: Option<Duration>,
    last: Option<usize>,
    points_drawn: u64,
}

impl<'a> AnimatedCanvasSink<'a> {
    /// `pacing` is slept after every point; `None` or zero draws as fast as possible.
    pub fn new(canvas: &'a mut Canvas, pacing: Option<Duration>) -> Self {
        Self {
            canvas,
            pacing: pacing.filter(|d| !d.is_zero()),
            last: None,
            points_drawn: 0,
        }
    }

    pub fn points_drawn(&self) -> u64 {
        self.points_drawn
    }
}

impl StripeSink for AnimatedCanvasSink<'_> {
    fn begin(&mut self, cfg: SinkConfig) -> StripeResult<()> {
        tracing::debug!(
            stripes = cfg.stripes,
            samples = cfg.samples,
            paced = self.pacing.is_some(),
            "animated canvas sink started"
        );
        self.last = None;
        self.points_drawn = 0;
        Ok(())
    }

    fn push_stripe(&mut self, line: &Polyline) -> StripeResult<()> {
        check_order(self.last, line)?;
        let Some(&first) = line.points.first() else {
            return Err(StripeError::render(format!(
                "stripe {} has no points",
                line.index
            )));
        };

        self.canvas.set_pen_color(line.gray);
        self.canvas.pen_up();
        self.canvas.goto(first);
        self.canvas.pen_down();
        for &p in &line.points {
            self.canvas.goto(p);
            self.canvas.update();
            self.points_drawn += 1;
            if let Some(d) = self.pacing {
                std::thread::sleep(d);
            }
        }
        self.canvas.pen_up();

        self.last = Some(line.index);
        Ok(())
    }

    fn end(&mut self) -> StripeResult<()> {
        tracing::debug!(
            points = self.points_drawn,
            updates = self.canvas.updates(),
            "animated canvas sink finished"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
