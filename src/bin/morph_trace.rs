use bar_morph::api::{ChartController, ChartControllerConfig, FrameClock, ManualClock};
use bar_morph::core::{ChartData, ChartMode, Series, Viewport};
use bar_morph::render::FrameSnapshot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: morph_trace [--seed <u64>] [--series <n>] [--categories <n>] \
[--width <px>] [--height <px>] [--step-ms <ms>] [--output <path>]";

#[derive(Debug)]
struct CliArgs {
    seed: u64,
    series: usize,
    categories: usize,
    width: f64,
    height: f64,
    step_ms: f64,
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TraceFile {
    seed: u64,
    data: ChartData,
    frames: Vec<FrameSnapshot>,
}

fn main() {
    let _ = bar_morph::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let data = bumps_data(args.seed, args.series, args.categories);

    let clock = ManualClock::new(0.0);
    let config = ChartControllerConfig::new(Viewport::new(args.width, args.height));
    let duration_ms = config.transition.duration_ms;
    let mut controller =
        ChartController::new(config, clock.clone()).map_err(|err| err.to_string())?;
    controller.set_data(data.clone());

    let mut frames = vec![controller.snapshot(clock.now_ms())];
    controller.set_mode(ChartMode::Grouped);
    let start_ms = clock.now_ms();
    while clock.now_ms() < start_ms + duration_ms {
        clock.advance(args.step_ms);
        controller.tick(clock.now_ms());
        frames.push(controller.snapshot(clock.now_ms()));
    }
    controller.dispose();

    let trace = TraceFile {
        seed: args.seed,
        data,
        frames,
    };
    let json = serde_json::to_string_pretty(&trace)
        .map_err(|err| format!("failed to serialize trace: {err}"))?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

/// Sum of a few random gaussian bumps per series, one value per category.
fn bumps_data(seed: u64, series_count: usize, category_count: usize) -> ChartData {
    let mut rng = StdRng::seed_from_u64(seed);
    let categories: Vec<String> = (0..category_count)
        .map(|index| format!("C{:02}", index + 1))
        .collect();
    let series = (0..series_count)
        .map(|index| {
            let values = bumps(&mut rng, category_count);
            Series::new(format!("S{}", index + 1), values)
        })
        .collect();
    ChartData::new(categories, series)
}

fn bumps(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let mut values = vec![0.0; len];
    for _ in 0..5 {
        bump(rng, &mut values);
    }
    values
}

fn bump(rng: &mut StdRng, values: &mut [f64]) {
    let len = values.len().max(1) as f64;
    let height = 1.0 / (0.1 + rng.r#gen::<f64>());
    let center = 2.0 * rng.r#gen::<f64>() - 0.5;
    let sharpness = 10.0 / (0.1 + rng.r#gen::<f64>());
    for (index, value) in values.iter_mut().enumerate() {
        let w = (index as f64 / len - center) * sharpness;
        *value += height * (-w * w).exp();
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        seed: 7,
        series: 3,
        categories: 12,
        width: 360.0,
        height: 240.0,
        step_ms: 100.0,
        output: None,
    };

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--seed" => parsed.seed = parse_number(&value("--seed")?, "--seed")?,
            "--series" => parsed.series = parse_number(&value("--series")?, "--series")?,
            "--categories" => {
                parsed.categories = parse_number(&value("--categories")?, "--categories")?;
            }
            "--width" => parsed.width = parse_number(&value("--width")?, "--width")?,
            "--height" => parsed.height = parse_number(&value("--height")?, "--height")?,
            "--step-ms" => parsed.step_ms = parse_number(&value("--step-ms")?, "--step-ms")?,
            "--output" => parsed.output = Some(PathBuf::from(value("--output")?)),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    if !parsed.step_ms.is_finite() || parsed.step_ms <= 0.0 {
        return Err("--step-ms must be > 0".to_owned());
    }
    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value `{raw}` for {name}"))
}
