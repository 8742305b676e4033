use std::path::{Path, PathBuf};

use crate::foundation::error::StripeResult;

/// Converts a vector snapshot on disk into a raster image on disk.
pub trait RasterConverter {
    /// Short name for logs.
    fn name(&self) -> &'static str;
    fn convert(&self, src: &Path, dst: &Path) -> StripeResult<()>;
}

/// What happened to the optional raster output of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterOutcome {
    Written(PathBuf),
    /// No converter was available; nothing was attempted.
    Unavailable,
    /// The converter ran and failed; holds the error detail.
    Failed(String),
}

impl RasterOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// The converter compiled into this build, if any.
#[cfg(feature = "raster")]
pub fn detect_raster_converter() -> Option<Box<dyn RasterConverter>> {
    Some(Box::new(ResvgTiffConverter::default()))
}

/// The converter compiled into this build, if any.
#[cfg(not(feature = "raster"))]
pub fn detect_raster_converter() -> Option<Box<dyn RasterConverter>> {
    None
}

/// Run the optional raster step. Never fails the run: problems become an outcome and a log line.
pub fn export_raster(
    converter: Option<&dyn RasterConverter>,
    src: &Path,
    dst: &Path,
) -> RasterOutcome {
    let Some(converter) = converter else {
        tracing::warn!(
            dst = %dst.display(),
            "no raster converter available, skipping raster export"
        );
        return RasterOutcome::Unavailable;
    };

    match converter.convert(src, dst) {
        Ok(()) => {
            tracing::info!(path = %dst.display(), converter = converter.name(), "raster written");
            RasterOutcome::Written(dst.to_path_buf())
        }
        Err(e) => {
            let detail = format!("{e:#}");
            tracing::error!(converter = converter.name(), error = %detail, "raster conversion failed");
            RasterOutcome::Failed(detail)
        }
    }
}

#[cfg(feature = "raster")]
pub use resvg_tiff::ResvgTiffConverter;

#[cfg(feature = "raster")]
mod resvg_tiff {
    use std::path::Path;

    use anyhow::Context as _;

    use super::RasterConverter;
    use crate::config::ensure_parent_dir;
    use crate::foundation::error::{StripeError, StripeResult};

    const MAX_DIM: u32 = 16_384;

    /// Rasterizes an SVG with resvg and encodes it as TIFF.
    #[derive(Clone, Copy, Debug)]
    pub struct ResvgTiffConverter {
        /// Pixels per SVG user unit.
        pub scale: f32,
    }

    impl Default for ResvgTiffConverter {
        fn default() -> Self {
            Self { scale: 1.0 }
        }
    }

    impl ResvgTiffConverter {
        /// Rasterize SVG bytes into straight-alpha RGBA8.
        pub fn rasterize(&self, svg: &[u8]) -> StripeResult<image::RgbaImage> {
            if !(self.scale.is_finite() && self.scale > 0.0) {
                return Err(StripeError::validation("raster scale must be positive"));
            }

            let opts = usvg::Options::default();
            let tree = usvg::Tree::from_data(svg, &opts).context("parse snapshot svg")?;
            let size = tree.size();
            let width = to_px(size.width() * self.scale)?;
            let height = to_px(size.height() * self.scale)?;

            let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
                .ok_or_else(|| StripeError::export("failed to allocate raster pixmap"))?;
            let sx = width as f32 / size.width();
            let sy = height as f32 / size.height();
            resvg::render(
                &tree,
                resvg::tiny_skia::Transform::from_scale(sx, sy),
                &mut pixmap.as_mut(),
            );

            let mut rgba = Vec::with_capacity(pixmap.data().len());
            for px in pixmap.pixels() {
                let c = px.demultiply();
                rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
            image::RgbaImage::from_raw(width, height, rgba)
                .ok_or_else(|| StripeError::export("raster buffer size mismatch"))
        }
    }

    impl RasterConverter for ResvgTiffConverter {
        fn name(&self) -> &'static str {
            "resvg-tiff"
        }

        fn convert(&self, src: &Path, dst: &Path) -> StripeResult<()> {
            let bytes =
                std::fs::read(src).with_context(|| format!("read snapshot '{}'", src.display()))?;
            let img = self.rasterize(&bytes)?;
            ensure_parent_dir(dst)?;
            img.save_with_format(dst, image::ImageFormat::Tiff)
                .with_context(|| format!("write tiff '{}'", dst.display()))?;
            Ok(())
        }
    }

    fn to_px(v: f32) -> StripeResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(StripeError::export("snapshot has invalid width/height"));
        }
        let px = (v.ceil() as u32).max(1);
        if px > MAX_DIM {
            return Err(StripeError::export(format!(
                "raster size too large: {px} (max {MAX_DIM})"
            )));
        }
        Ok(px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
