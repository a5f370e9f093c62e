//! # FlapEvo-NN
//! A neural network implementation of the [`flapevo`] crate's `Genome` trait.
//!
//! Provides a [`NeuralNetwork`] type usable in `flapevo` `Population`s: a dense
//! feed-forward network with a fixed topology, where evolution acts on the
//! weights and biases only. Trained networks can be persisted in a compact
//! binary format (see [`NeuralNetwork::serialize`]) or through `serde`.
//!
//! # Example usage: Evolution of a sign classifier
//! ```
//! use flapevo::{Population, PopulationConfig, SimpleRng};
//! use flapevo_nn::{ActivationType, NetworkConfig, NeuralNetwork};
//! use serde_json;
//! use std::num::NonZeroUsize;
//!
//! fn evaluate(network: &NeuralNetwork) -> f64 {
//!     let cases = [
//!         ([1.0, 0.5], 0),
//!         ([0.25, 1.0], 0),
//!         ([-1.0, -0.5], 1),
//!         ([-0.25, -1.0], 1),
//!     ];
//!     cases
//!         .iter()
//!         .filter(|(input, expected)| {
//!             let outputs = network.process(input).unwrap();
//!             let decision = if outputs[1] > outputs[0] { 1 } else { 0 };
//!             decision == *expected
//!         })
//!         .count() as f64
//! }
//!
//! fn main() {
//!     let mut rng = SimpleRng::seeded(42);
//!     let population_config = PopulationConfig {
//!         size: NonZeroUsize::new(100).unwrap(),
//!         mutation_rate: 0.1,
//!         survival_threshold: 2.0,
//!     };
//!     let network_config = NetworkConfig::new(vec![2, 4, 2], ActivationType::Tanh);
//!
//!     let mut population = Population::new(population_config, network_config, &mut rng).unwrap();
//!     for _ in 0..50 {
//!         for organism in population.live_mut() {
//!             let score = evaluate(organism.brain());
//!             organism.record_score(score);
//!             organism.mark_dead();
//!         }
//!         population.retire_dead();
//!         population.evolve(&mut rng).unwrap();
//!         if population.high_score() == 4.0 {
//!             let champion = population.champion().unwrap();
//!             println!("Solution found!: {}", serde_json::to_string(champion).unwrap());
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod networks;

pub use networks::{ActivationType, NetworkConfig, NetworkError, NeuralNetwork};
