use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of organisms spawned each generation.
    pub size: NonZeroUsize,
    /// Per-element chance that an offspring's
    /// inherited parameters are replaced.
    pub mutation_rate: f64,
    /// Score the best organism of a generation must
    /// exceed for the generation to reproduce. Below
    /// it, the population restarts from scratch.
    pub survival_threshold: f64,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use flapevo::PopulationConfig;
    ///
    /// let cfg = PopulationConfig {
    ///     // Specify some values here...
    ///     mutation_rate: 0.05,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(cfg.size.get(), 1);
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: match NonZeroUsize::new(1) {
                Some(size) => size,
                None => unreachable!(),
            },
            mutation_rate: 0.0,
            survival_threshold: 0.0,
        }
    }
}
