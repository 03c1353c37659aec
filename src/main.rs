use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use log::{error, info};
use rand::Rng;

use freefall_simulation::*;

fn parse_args() -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let height = match args.next() {
        Some(raw) => raw.parse::<f64>()?,
        None => DEFAULT_HEIGHT_METERS,
    };
    let body = match args.next() {
        Some(name) => CelestialBody::from_name(&name)
            .ok_or_else(|| format!("unknown body '{}'", name))?,
        None => CelestialBody::Earth,
    };
    let atmosphere = match args.next() {
        Some(name) => {
            Atmosphere::from_name(&name).ok_or_else(|| format!("unknown atmosphere '{}'", name))?
        }
        None => Atmosphere::Vacuum,
    };

    // Heights beyond the canvas are capped, the same way the drag handle caps them.
    let height = CanvasScale::default().clamp_height(height);
    info!("Dropping on {} through {:?}", body, atmosphere);
    Ok(SimulationConfig::from_presets(height, body, atmosphere))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = parse_args()?;
    let mut engine = FreefallEngine::new(config)?;

    let telemetry = Rc::new(RefCell::new(Telemetry::new()));
    engine.add_observer(Rc::clone(&telemetry));

    engine.start()?;

    let scale = CanvasScale::default();
    let mut rng = rand::thread_rng();

    while let Some(interval_ms) = engine.driver().interval_ms() {
        // Real schedulers fire late; elapsed time is re-derived from the clock.
        let jitter_ms = rng.gen_range(0..=interval_ms / 5);
        thread::sleep(Duration::from_millis(interval_ms + jitter_ms));

        match engine.tick(TIME_STEP) {
            TickOutcome::Advanced(frame) | TickOutcome::Landed(frame) => {
                println!(
                    "Elapsed: {:.2}s  Velocity: {:.2} m/s  Height: {:.2} m  Ball y: {:.0}px",
                    frame.elapsed_seconds,
                    frame.velocity,
                    frame.position,
                    scale.ball_y(frame.position)
                );
            }
            TickOutcome::Skipped => {
                error!("Driver armed while engine is {}", engine.phase());
                break;
            }
        }
    }

    println!("{}", telemetry.borrow().summary());

    Ok(())
}
