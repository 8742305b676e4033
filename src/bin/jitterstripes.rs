use std::io::{BufRead as _, IsTerminal as _};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;

/// Draw smooth jittered stripes and save them as SVG (plus a TIFF when supported).
#[derive(Parser, Debug)]
#[command(name = "jitterstripes", version)]
struct Cli {
    /// Directory the fixed-name artifacts are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for a reproducible drawing.
    #[arg(long)]
    seed: Option<u64>,

    /// Delay after each drawn point, in microseconds (0 disables pacing).
    #[arg(long, default_value_t = 200)]
    pace_us: u64,

    /// Exit as soon as the outputs are written instead of waiting for Enter.
    #[arg(long)]
    no_wait: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = jitterstripes::RunOpts {
        outputs: jitterstripes::OutputPaths::in_dir(&cli.out_dir),
        pacing: Some(Duration::from_micros(cli.pace_us)),
        ..jitterstripes::RunOpts::default()
    };

    let mut jitter = match cli.seed {
        Some(seed) => jitterstripes::RandJitter::seeded(seed),
        None => jitterstripes::RandJitter::from_entropy(),
    };
    let raster = jitterstripes::detect_raster_converter();
    let wait = !cli.no_wait && std::io::stdin().is_terminal();

    let report = jitterstripes::run(&opts, &mut jitter, raster.as_deref(), |canvas| {
        if wait {
            wait_for_dismissal(canvas);
        }
    })?;

    eprintln!("wrote {}", report.document.display());
    eprintln!("wrote {}", report.snapshot.display());
    match &report.raster {
        jitterstripes::RasterOutcome::Written(path) => eprintln!("wrote {}", path.display()),
        jitterstripes::RasterOutcome::Unavailable => {
            eprintln!("raster export unavailable in this build, TIFF conversion skipped")
        }
        jitterstripes::RasterOutcome::Failed(detail) => {
            eprintln!("TIFF conversion failed: {detail}")
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn wait_for_dismissal(canvas: &jitterstripes::Canvas) {
    eprintln!(
        "{}: {} strokes drawn, press Enter to close",
        canvas.config().title,
        canvas.strokes().len()
    );
    let mut line = String::new();
    if let Err(e) = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read dismissal from stdin")
    {
        tracing::warn!(error = %format!("{e:#}"), "closing canvas without dismissal");
    }
}
