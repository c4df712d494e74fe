//! `dartcam`: score a dart position on a calibrated board.
//!
//! Single-hit mode (`--x/--y`) prints only the DartHit JSON so the output
//! can be piped straight to another tool. `--print-tests` runs the eight
//! cardinal probes and, when an image is given, saves the warped image and
//! its overlay.

use clap::{Parser, ValueEnum};
use dartcam::board::{sanity_points, DartcamConfig, RingCalibration, ScoreReport};
use dartcam::{DartHit, DartcamError, ScoreResult, Session};
use nalgebra::Point2;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

const HIT_SOURCE: &str = "camera";

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dartcam", version, about = "Score darts on a rectified dartboard")]
struct Cli {
    /// Session config (JSON). Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ring calibration (rings.json); overrides the config's `rings`.
    #[arg(long)]
    rings: Option<PathBuf>,

    /// Board image; overrides the config's `image_path`.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Directory for warped/overlay PNGs; overrides the config's `output_dir`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Dart x coordinate (rectified pixels unless --image-coords).
    #[arg(long, requires = "y", allow_negative_numbers = true)]
    x: Option<f64>,

    /// Dart y coordinate (rectified pixels unless --image-coords).
    #[arg(long, requires = "x", allow_negative_numbers = true)]
    y: Option<f64>,

    /// Interpret --x/--y as original-image pixels.
    #[arg(long)]
    image_coords: bool,

    /// Run the inner/outer single sanity probes.
    #[arg(long)]
    print_tests: bool,

    /// Skip writing warped/overlay PNG files.
    #[arg(long)]
    no_save: bool,

    /// Also write the scored point as a JSON report.
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Dartcam(#[from] DartcamError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("provide --x and --y, or run with --print-tests")]
    MissingPoint,
    #[cfg(not(feature = "image"))]
    #[error("rendering needs the `image` feature")]
    ImageSupportDisabled,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn load_config(cli: &Cli) -> Result<DartcamConfig, DartcamError> {
    let mut cfg = match &cli.config {
        Some(path) => DartcamConfig::load_json(path)?,
        None => DartcamConfig::default(),
    };
    if let Some(path) = &cli.rings {
        cfg.rings = RingCalibration::load_json(path)?;
    }
    if let Some(path) = &cli.image {
        cfg.image_path = Some(path.display().to_string());
    }
    if let Some(dir) = &cli.out_dir {
        cfg.output_dir = Some(dir.display().to_string());
    }
    Ok(cfg)
}

fn hit_for(
    result: &ScoreResult,
    image: Option<&str>,
    warped_size: u32,
    point: Point2<f64>,
) -> DartHit {
    let image_name = image.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.to_owned())
    });
    DartHit::from_score(result, HIT_SOURCE, now_millis())
        .with_confidence(1.0)
        .with_meta(serde_json::json!({
            "image": image_name,
            "warped_size": warped_size,
            "point": { "x": point.x, "y": point.y },
            "ring": result.ring,
            "code": result.code,
        }))
}

#[cfg(feature = "image")]
fn open_image(cfg: &DartcamConfig) -> Result<Option<::image::GrayImage>, DartcamError> {
    cfg.image_path
        .as_deref()
        .map(|p| dartcam::render::load_gray(Path::new(p)))
        .transpose()
}

#[cfg(feature = "image")]
fn render(
    cfg: &DartcamConfig,
    img: Option<&::image::GrayImage>,
    session: &Session,
) -> Result<(), CliError> {
    let Some(img) = img else {
        log::warn!("no image given; skipping warped/overlay output");
        return Ok(());
    };
    let out = dartcam::render::render_to_dir(
        img,
        session.frame(),
        session.board(),
        &cfg.output_dir(),
    )?;
    println!("Saved: {}", out.warped.display());
    println!("Saved: {}", out.overlay.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = load_config(&cli)?;

    #[cfg(feature = "image")]
    let img = open_image(&cfg)?;
    #[cfg(feature = "image")]
    let image_size = img.as_ref().map(|i| i.dimensions());
    #[cfg(not(feature = "image"))]
    let image_size: Option<(u32, u32)> = None;

    let session = Session::from_config(&cfg, image_size)?;
    let size = session.frame().size;

    if cli.print_tests {
        if !cli.no_save {
            #[cfg(feature = "image")]
            render(&cfg, img.as_ref(), &session)?;
            #[cfg(not(feature = "image"))]
            if cfg.image_path.is_some() {
                return Err(CliError::ImageSupportDisabled);
            }
        }

        println!("=== Angle->Number sanity checks ===");
        for probe in sanity_points(session.board()) {
            let res = session.score_rectified(probe.point)?;
            let hit = hit_for(&res, cfg.image_path.as_deref(), size, probe.point);
            println!(
                "{:26} at ({},{}) -> {} [{}] ({} pts)",
                probe.label, probe.point.x, probe.point.y, res.code, res.ring, res.points
            );
            println!("DartHit: {}", serde_json::to_string_pretty(&hit)?);
        }
        println!("==================================");
        return Ok(());
    }

    let (Some(x), Some(y)) = (cli.x, cli.y) else {
        return Err(CliError::MissingPoint);
    };
    let point = Point2::new(x, y);
    let (rectified_point, result) = if cli.image_coords {
        session.score_image_point(point)?
    } else {
        (point, session.score_rectified(point)?)
    };

    let hit = hit_for(&result, cfg.image_path.as_deref(), size, rectified_point);
    println!("{}", serde_json::to_string_pretty(&hit)?);

    if let Some(path) = &cli.report {
        let report = ScoreReport {
            point,
            rectified_point,
            result,
            hit,
        };
        report.write_json(path).map_err(DartcamError::from)?;
    }
    Ok(())
}

fn init_logging(level: log::LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        log::set_max_level(level);
        dartcam::core::init_tracing(level, false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_millis()
            .format_target(true);
        if let Err(err) = builder.try_init() {
            eprintln!("logger init failed: {err}");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
