//! Evolves flappy-bird brains in a headless world.
//!
//! Usage: `trainer [config.ron]`, or `trainer --example`
//! to print the default configuration. A config with a
//! `load_path` replays a saved brain, or seeds training
//! from it when `derive` is set.

mod config;
mod trainer;
mod world;

use config::TrainerConfig;
use trainer::{Trainer, TrainerError};

use flapevo::SimpleRng;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--example") {
        match TrainerConfig::example() {
            Ok(example) => println!("{}", example),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = run(args.get(1).map(String::as_str)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config_path: Option<&str>) -> Result<(), TrainerError> {
    let config = match config_path {
        Some(path) => TrainerConfig::load(path)?,
        None => TrainerConfig::default(),
    };
    match (&config.load_path, config.derive) {
        (Some(path), false) => log::info!("replaying brain from {}", path.display()),
        _ => log::info!(
            "training {} organisms for {} generations",
            config.population.size,
            config.max_generations
        ),
    }
    match config.seed {
        Some(seed) => Trainer::new(config, SimpleRng::seeded(seed))?.run(),
        None => Trainer::new(config, SimpleRng::from_entropy())?.run(),
    }
}
