use dartcam::board::DartcamConfig;
use dartcam::Session;
use nalgebra::Point2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(x), Some(y)) = (args.next(), args.next()) else {
        eprintln!("Usage: score_point <x> <y> [config.json]");
        return Ok(());
    };

    let cfg = match args.next() {
        Some(path) => DartcamConfig::load_json(path)?,
        None => DartcamConfig::default(),
    };
    let session = Session::from_config(&cfg, None)?;
    let result = session.score_rectified(Point2::new(x.parse()?, y.parse()?))?;
    println!("{} [{}] {} pts", result.code, result.ring, result.points);
    Ok(())
}
