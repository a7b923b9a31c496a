//! Native CLI driver: load an element registry and settings file from disk,
//! run a fixed number of physics ticks, and report basic stats. Exists for
//! local testing and scripting outside the wasm host.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sandcore_engine::domain::registry::ElementRegistry;
use sandcore_engine::domain::settings::Settings;
use sandcore_engine::simulation::engine::Engine;

#[derive(Parser, Debug)]
#[command(name = "sandcore", about = "Run the falling-sand physics core headlessly")]
struct Args {
    /// Path to elements.data
    #[arg(long)]
    elements: PathBuf,

    /// Path to settings.data
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of physics ticks to run
    #[arg(long, default_value_t = 100)]
    ticks: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let registry = match ElementRegistry::load(&args.elements) {
        Ok(registry) => registry,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    log::info!(
        "loaded {} elements, grid {}x{}",
        registry.len(),
        settings.engine_width,
        settings.engine_height
    );

    let physics_interval = settings.physics_interval_ms;
    let mut engine = Engine::new(settings, registry);
    engine.start();

    // tick(now) only advances when accumulator >= physics_interval; stepping
    // by exactly one interval per call keeps the driver deterministic and
    // one tick per call.
    let mut now = 0.0f64;
    for _ in 0..args.ticks {
        now += physics_interval;
        engine.tick(now);
    }

    log::info!("ran {} ticks ({} physics steps)", args.ticks, engine.tick_count());
    ExitCode::SUCCESS
}
