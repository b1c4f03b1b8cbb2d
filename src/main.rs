//! Moving Circles entry point
//!
//! Runs the simulation headless at a fixed frame rate and reports stats.
//!
//! Usage: `moving-circles [settings.json] [--frames N] [--dump]`

use std::path::PathBuf;

use moving_circles::Settings;
use moving_circles::consts::FRAME_DT;
use moving_circles::renderer::instances;
use moving_circles::sim::{FrameInput, FrameStats, Simulation, tick};

struct Args {
    settings: Option<PathBuf>,
    frames: u64,
    dump: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        settings: None,
        frames: 600,
        dump: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a value")?;
                args.frames = value
                    .parse()
                    .map_err(|e| format!("bad --frames value {:?}: {}", value, e))?;
            }
            "--dump" => args.dump = true,
            "-h" | "--help" => {
                return Err("usage: moving-circles [settings.json] [--frames N] [--dump]".into());
            }
            _ if args.settings.is_none() => args.settings = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {:?}", arg)),
        }
    }

    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("Moving Circles starting (seed {})", settings.seed);

    let mut sim = Simulation::new(&settings);
    let input = FrameInput::default();
    let mut max_overlapping = 0;
    let mut last = FrameStats::default();

    for frame in 1..=args.frames {
        last = tick(&mut sim, &input, frame as f64 * FRAME_DT);
        max_overlapping = max_overlapping.max(last.overlapping);
    }

    log::info!(
        "Ran {} frames: {} circles, peak overlapping {}, final energy {:.4}",
        last.frame,
        last.circles,
        max_overlapping,
        last.kinetic_energy
    );

    if args.dump {
        match serde_json::to_string_pretty(&sim) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize simulation: {}", e),
        }
    } else {
        println!(
            "{} circles after {} frames ({} instance bytes per frame)",
            sim.circles.len(),
            last.frame,
            std::mem::size_of_val(instances(&sim.circles).as_slice())
        );
    }
}
