use super::*;

fn line(index: usize, points: &[(f64, f64)], gray: f64) -> Polyline {
    Polyline {
        index,
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        gray: Gray(gray),
    }
}

fn sink_cfg() -> SinkConfig {
    SinkConfig {
        stripes: 2,
        samples: 3,
        extent: Rect::new(-200.0, -200.0, 200.0, 200.0),
    }
}

#[test]
fn open_rejects_degenerate_config() {
    let zero = CanvasConfig {
        width_px: 0,
        ..CanvasConfig::default()
    };
    assert!(matches!(
        Canvas::open(zero).unwrap_err(),
        StripeError::Validation(_)
    ));

    let flat = CanvasConfig {
        world: Rect::new(0.0, 0.0, 10.0, 0.0),
        ..CanvasConfig::default()
    };
    assert!(Canvas::open(flat).is_err());

    let no_pen = CanvasConfig {
        pen_width: 0.0,
        ..CanvasConfig::default()
    };
    assert!(Canvas::open(no_pen).is_err());
}

#[test]
fn pen_up_moves_do_not_draw() {
    let mut c = Canvas::open(CanvasConfig::default()).unwrap();
    c.goto(Point::new(10.0, 10.0));
    assert!(c.strokes().is_empty());

    c.pen_down();
    c.goto(Point::new(20.0, 10.0));
    c.goto(Point::new(20.0, 10.0));
    c.pen_up();
    c.goto(Point::new(0.0, 0.0));

    assert_eq!(c.strokes().len(), 1);
    assert_eq!(
        c.strokes()[0].points,
        vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]
    );
    assert_eq!(c.position(), Point::new(0.0, 0.0));
}

#[test]
fn world_maps_to_top_left_pixels() {
    let c = Canvas::open(CanvasConfig {
        width_px: 800,
        height_px: 400,
        ..CanvasConfig::default()
    })
    .unwrap();
    assert_eq!(c.to_pixels(Point::new(-200.0, 200.0)), Point::new(0.0, 0.0));
    assert_eq!(c.to_pixels(Point::new(200.0, -200.0)), Point::new(800.0, 400.0));
    assert_eq!(c.to_pixels(Point::new(0.0, 0.0)), Point::new(400.0, 200.0));
}

#[test]
fn animated_sink_draws_one_stroke_per_stripe() {
    let mut canvas = Canvas::open(CanvasConfig::default()).unwrap();
    {
        let mut sink = AnimatedCanvasSink::new(&mut canvas, Some(Duration::ZERO));
        sink.begin(sink_cfg()).unwrap();
        sink.push_stripe(&line(0, &[(-200.0, 200.0), (0.0, 200.0), (200.0, 200.0)], 1.0))
            .unwrap();
        sink.push_stripe(&line(1, &[(-200.0, -200.0), (0.0, -190.0), (200.0, -200.0)], 0.2))
            .unwrap();
        sink.end().unwrap();
        assert_eq!(sink.points_drawn(), 6);
    }

    assert_eq!(canvas.strokes().len(), 2);
    assert_eq!(canvas.strokes()[0].points.len(), 3);
    assert_eq!(canvas.strokes()[0].color, Gray(1.0));
    assert_eq!(canvas.strokes()[1].color, Gray(0.2));
    assert_eq!(canvas.strokes()[1].width, 1.0);
    assert_eq!(canvas.updates(), 6);
    assert!(!canvas.is_pen_down());
}

#[test]
fn animated_sink_rejects_out_of_order_and_empty_stripes() {
    let mut canvas = Canvas::open(CanvasConfig::default()).unwrap();
    let mut sink = AnimatedCanvasSink::new(&mut canvas, None);
    sink.begin(sink_cfg()).unwrap();
    sink.push_stripe(&line(1, &[(0.0, 0.0), (1.0, 0.0)], 1.0))
        .unwrap();
    assert!(matches!(
        sink.push_stripe(&line(1, &[(0.0, 0.0)], 1.0)).unwrap_err(),
        StripeError::Render(_)
    ));
    assert!(sink.push_stripe(&line(2, &[], 1.0)).is_err());
}

#[test]
fn snapshot_has_background_and_pixel_space_strokes() {
    let mut canvas = Canvas::open(CanvasConfig::default()).unwrap();
    canvas.set_pen_color(Gray(0.2));
    canvas.goto(Point::new(-200.0, 0.0));
    canvas.pen_down();
    canvas.goto(Point::new(200.0, 0.0));
    canvas.pen_up();
    // A dot with no length is left out of the snapshot.
    canvas.pen_down();
    canvas.pen_up();

    let svg = canvas.snapshot_svg();
    assert!(svg.contains("width=\"400\" height=\"400\""));
    assert!(svg.contains("fill=\"#000000\""));
    assert!(svg.contains("<title>Smooth Jittered Stripes</title>"));
    assert!(svg.contains("points=\"0,200 400,200\""));
    assert!(svg.contains("stroke=\"#333333\""));
    assert_eq!(svg.matches("<polyline").count(), 1);
}

#[test]
fn snapshot_escapes_title() {
    let canvas = Canvas::open(CanvasConfig {
        title: "a <b> & c".to_string(),
        ..CanvasConfig::default()
    })
    .unwrap();
    assert!(
        canvas
            .snapshot_svg()
            .contains("<title>a &lt;b&gt; &amp; c</title>")
    );
}

#[test]
fn write_snapshot_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_canvas")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("snap.svg");

    let canvas = Canvas::open(CanvasConfig::default()).unwrap();
    canvas.write_snapshot(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.trim_end().ends_with("</svg>"));
}
