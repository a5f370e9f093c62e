use super::{Organism, Population};

use crate::genome::Genome;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the population's champion.
    Champion,
    /// Clones no organisms.
    NoOrganisms,
}

/// A snapshot of a population, taken at the end of
/// a generation.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub generation_number: usize,
    pub live_count: usize,
    pub archive_count: usize,
    pub high_score: f64,
    pub score_stats: Option<Stats>,
    pub champion: Option<Organism<G>>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tlive_count: {:?}\n\
            \tarchive_count: {:?}\n\
            \thigh_score: {:?}\n\
            \tscore_stats: {:?}\n\
            }}",
            self.generation_number,
            self.live_count,
            self.archive_count,
            self.high_score,
            self.score_stats,
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use flapevo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied()).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert!(Stats::from(std::iter::empty()).is_none());
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Option<Stats> {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return None;
        }
        data.sort_unstable_by(f64::total_cmp);
        let mid = data.len() / 2;
        let sum: f64 = data.iter().sum();
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: sum / data.len() as f64,
            median,
        })
    }
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Genome> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use flapevo_nn::NeuralNetwork as G;
    /// use flapevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::NoOrganisms);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Stores a snapshot of a population. Scores are
    /// gathered from both archived and live organisms,
    /// so this is best called once the generation is over
    /// but before it is advanced.
    ///
    /// # Examples
    /// ```
    /// # use flapevo_nn::{ActivationType, NetworkConfig, NeuralNetwork as G};
    /// use flapevo::{Population, PopulationConfig, SimpleRng};
    /// use flapevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = EvolutionLogger::<G>::new(ReportingLevel::Champion);
    /// # let genetic_config = NetworkConfig::new(vec![2, 1], ActivationType::Tanh);
    /// let mut rng = SimpleRng::seeded(3);
    /// let population =
    ///     Population::new(PopulationConfig::zero(), genetic_config, &mut rng).unwrap();
    ///
    /// // Do something with the population...
    /// // Then log a snapshot.
    /// logger.log(&population);
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log<C>(&mut self, population: &Population<C, G>)
    where
        G: Genome<Config = C>,
    {
        let snapshot = Log {
            generation_number: population.generation(),
            live_count: population.live().len(),
            archive_count: population.archive().len(),
            high_score: population.high_score(),
            score_stats: Stats::from(
                population
                    .archive()
                    .iter()
                    .chain(population.live())
                    .map(Organism::score),
            ),
            champion: match self.reporting_level {
                ReportingLevel::Champion => population.champion().cloned(),
                ReportingLevel::NoOrganisms => None,
            },
        };
        log::info!("{}", snapshot);
        self.logs.push(snapshot);
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot.
    pub fn latest(&self) -> Option<&Log<G>> {
        self.logs.last()
    }
}
