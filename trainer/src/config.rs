use flapevo::PopulationConfig;
use flapevo_nn::{ActivationType, NetworkConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Ron(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Geometry and physics of the headless world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Downward acceleration per tick.
    pub gravity: f64,
    /// Upward velocity set by a jump.
    pub jump_strength: f64,
    /// Side of a bird's square body.
    pub bird_size: f64,
    pub pipe_width: f64,
    pub gap_min: f64,
    pub gap_max: f64,
    /// Fraction of the world's width pipes scroll
    /// per tick.
    pub scroll_fraction: f64,
}

impl Default for WorldConfig {
    fn default() -> WorldConfig {
        WorldConfig {
            width: 1000.0,
            height: 700.0,
            gravity: 0.3,
            jump_strength: 5.0,
            bird_size: 20.0,
            pipe_width: 50.0,
            gap_min: 130.0,
            gap_max: 130.0,
            scroll_fraction: 0.002,
        }
    }
}

impl WorldConfig {
    /// Checks that pipes can be generated and birds fit
    /// in the world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("bird_size", self.bird_size),
            ("pipe_width", self.pipe_width),
            ("gap_min", self.gap_min),
            ("scroll_fraction", self.scroll_fraction),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, found {}",
                    name, value
                )));
            }
        }
        if self.gap_max < self.gap_min {
            return Err(ConfigError::Invalid(format!(
                "gap_max ({}) is smaller than gap_min ({})",
                self.gap_max, self.gap_min
            )));
        }
        // Openings are drawn from [0.1·height, 0.9·height − gap).
        if self.gap_max >= 0.8 * self.height {
            return Err(ConfigError::Invalid(format!(
                "gap_max ({}) leaves no room for pipes in a world {} high",
                self.gap_max, self.height
            )));
        }
        Ok(())
    }
}

/// Configuration of a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub population: PopulationConfig,
    pub network: NetworkConfig,
    pub world: WorldConfig,
    /// Seed of the run's random source. Runs without
    /// a seed draw one from entropy.
    pub seed: Option<u64>,
    pub max_generations: usize,
    /// Ticks after which a generation is ended even
    /// if organisms are still alive.
    pub max_ticks: usize,
    /// Where to persist the champion's brain whenever
    /// it improves.
    pub champion_path: Option<PathBuf>,
    /// A persisted brain to replay alone instead of
    /// training.
    pub load_path: Option<PathBuf>,
    /// Seed the first generation with the loaded brain
    /// and mutated clones of it, then train.
    pub derive: bool,
}

impl Default for TrainerConfig {
    fn default() -> TrainerConfig {
        TrainerConfig {
            population: PopulationConfig {
                size: NonZeroUsize::new(1000).unwrap_or(NonZeroUsize::MIN),
                mutation_rate: 0.05,
                survival_threshold: 270.0,
            },
            network: NetworkConfig::new(vec![4, 3, 2], ActivationType::Sigmoid),
            world: WorldConfig::default(),
            seed: None,
            max_generations: 100,
            max_ticks: 20_000,
            champion_path: None,
            load_path: None,
            derive: false,
        }
    }
}

impl TrainerConfig {
    /// Reads and validates a RON configuration file.
    /// Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<TrainerConfig, ConfigError> {
        let config: TrainerConfig = ron::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default configuration as pretty RON.
    pub fn example() -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            &TrainerConfig::default(),
            ron::ser::PrettyConfig::new(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        let sizes = &self.network.layer_sizes;
        if sizes.first() != Some(&4) || sizes.last() != Some(&2) {
            return Err(ConfigError::Invalid(format!(
                "networks need 4 inputs and 2 outputs, found layer sizes {:?}",
                sizes
            )));
        }
        if !(0.0..=1.0).contains(&self.population.mutation_rate) {
            return Err(ConfigError::Invalid(format!(
                "mutation_rate must lie in [0, 1], found {}",
                self.population.mutation_rate
            )));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be positive".into()));
        }
        if self.derive && self.load_path.is_none() {
            return Err(ConfigError::Invalid("derive needs a load_path".into()));
        }
        Ok(())
    }
}
