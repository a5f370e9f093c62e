//! A generational neuroevolution engine.
//!
//! Organisms are ticked by an external environment, which
//! records their scores and deaths. Once a generation is over,
//! fitness is normalized from the squared scores, two parents
//! are drawn by roulette-wheel selection, and the next generation
//! is bred from them by crossover and mutation. Generations whose
//! best organism fails to pass a survival threshold are thrown
//! away, and the population restarts from scratch.
//!
//! The engine is agnostic of the genome representation, which is
//! supplied through the [`Genome`] trait. A fixed-topology
//! feed-forward neural network genome is provided by the
//! `flapevo-nn` crate.
//!
//! Every stochastic operation draws from an injected
//! [`RandomSource`], so runs can be seeded and replayed.
//!
//! # Example usage
//! ```
//! use flapevo::{Population, PopulationConfig, SimpleRng};
//! use flapevo_nn::{ActivationType, NetworkConfig, NeuralNetwork};
//! use std::num::NonZeroUsize;
//!
//! let mut rng = SimpleRng::seeded(2021);
//! let mut population = Population::<_, NeuralNetwork>::new(
//!     PopulationConfig {
//!         size: NonZeroUsize::new(50).unwrap(),
//!         mutation_rate: 0.05,
//!         survival_threshold: 1.0,
//!     },
//!     NetworkConfig::new(vec![2, 3, 2], ActivationType::Sigmoid),
//!     &mut rng,
//! )
//! .unwrap();
//!
//! for _ in 0..10 {
//!     // Reward organisms that tell positive from negative inputs.
//!     for organism in population.live_mut() {
//!         let mut score = 0.0;
//!         for (input, expected) in [([1.0, -1.0], 0), ([-1.0, 1.0], 1)] {
//!             if organism.decide(&input).unwrap() == expected {
//!                 score += 1.0;
//!             }
//!         }
//!         organism.record_score(score);
//!         organism.mark_dead();
//!     }
//!     population.retire_dead();
//!     population.evolve(&mut rng).unwrap();
//! }
//! assert!(population.high_score() >= 1.0);
//! ```

mod genome;
mod populations;
mod rng;

pub use genome::*;
pub use populations::*;
pub use rng::*;
