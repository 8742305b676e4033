use super::*;
use crate::foundation::error::StripeError;

struct Broken;

impl RasterConverter for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn convert(&self, _src: &Path, _dst: &Path) -> StripeResult<()> {
        Err(StripeError::export("decoder exploded"))
    }
}

#[test]
fn missing_converter_is_reported_not_raised() {
    let out = export_raster(
        None,
        Path::new("target/unit_raster/in.svg"),
        Path::new("target/unit_raster/out.tiff"),
    );
    assert_eq!(out, RasterOutcome::Unavailable);
    assert!(!out.is_written());
}

#[test]
fn converter_failure_keeps_detail() {
    let out = export_raster(
        Some(&Broken),
        Path::new("in.svg"),
        Path::new("out.tiff"),
    );
    match out {
        RasterOutcome::Failed(detail) => assert!(detail.contains("decoder exploded")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[cfg(feature = "raster")]
mod resvg_tiff {
    use super::*;

    const SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
<rect x="0" y="0" width="8" height="4" fill="#000000"/>
<rect x="0" y="0" width="4" height="4" fill="#ffffff"/>
</svg>"##;

    #[test]
    fn build_detects_converter() {
        let conv = detect_raster_converter().unwrap();
        assert_eq!(conv.name(), "resvg-tiff");
    }

    #[test]
    fn rasterize_matches_svg_size_and_pixels() {
        let img = ResvgTiffConverter::default().rasterize(SVG).unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(6, 2).0, [0, 0, 0, 255]);

        let big = ResvgTiffConverter { scale: 2.0 }.rasterize(SVG).unwrap();
        assert_eq!(big.dimensions(), (16, 8));
    }

    #[test]
    fn convert_writes_a_readable_tiff() {
        let dir = std::path::PathBuf::from("target").join("unit_raster");
        std::fs::create_dir_all(&dir).unwrap();
        let src = dir.join("in.svg");
        let dst = dir.join("out.tiff");
        std::fs::write(&src, SVG).unwrap();
        let _ = std::fs::remove_file(&dst);

        let out = export_raster(Some(&ResvgTiffConverter::default()), &src, &dst);
        assert_eq!(out, RasterOutcome::Written(dst.clone()));

        let bytes = std::fs::read(&dst).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Tiff
        );
    }

    #[test]
    fn unreadable_or_invalid_snapshot_fails() {
        let dir = std::path::PathBuf::from("target").join("unit_raster");
        std::fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("bad.svg");
        std::fs::write(&bad, b"<svg").unwrap();

        let conv = ResvgTiffConverter::default();
        assert!(conv.convert(&bad, &dir.join("bad.tiff")).is_err());
        assert!(
            conv.convert(&dir.join("missing.svg"), &dir.join("missing.tiff"))
                .is_err()
        );
        assert!(ResvgTiffConverter { scale: 0.0 }.rasterize(SVG).is_err());
    }
}
