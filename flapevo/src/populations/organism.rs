use crate::{Genome, RandomSource};

use serde::{Deserialize, Serialize};

/// An evolvable agent, owning exactly one genome.
///
/// Organisms carry no positional or geometric
/// state: whatever body the environment simulates
/// for them is kept alongside, not inside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organism<G> {
    brain: G,
    score: f64,
    fitness: f64,
    alive: bool,
}

impl<G: Genome> Organism<G> {
    /// Creates a living organism with a freshly
    /// randomized brain.
    ///
    /// # Errors
    /// Returns the genome's error if `config` is invalid.
    pub fn new_random<R>(config: &G::Config, rng: &mut R) -> Result<Organism<G>, G::Error>
    where
        R: RandomSource + ?Sized,
    {
        G::new_random(config, rng).map(Organism::from_brain)
    }

    /// Wraps an existing brain in a newborn organism.
    pub fn from_brain(brain: G) -> Organism<G> {
        Organism {
            brain,
            score: 0.0,
            fitness: 0.0,
            alive: true,
        }
    }

    /// Creates the offspring of two parents: their brains
    /// are crossed over, and the result mutated with
    /// the given rate.
    ///
    /// # Errors
    /// Returns the genome's error if the parents'
    /// brains are incompatible.
    pub fn from_parents<R>(
        parent1: &Organism<G>,
        parent2: &Organism<G>,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<Organism<G>, G::Error>
    where
        R: RandomSource + ?Sized,
    {
        let mut brain = parent1.brain.crossover(&parent2.brain, rng)?;
        brain.mutate(mutation_rate, rng);
        Ok(Organism::from_brain(brain))
    }

    /// Creates a mutated copy of a single parent.
    pub fn mutated_clone<R>(parent: &Organism<G>, mutation_rate: f64, rng: &mut R) -> Organism<G>
    where
        R: RandomSource + ?Sized,
    {
        let mut brain = parent.brain.clone();
        brain.mutate(mutation_rate, rng);
        Organism::from_brain(brain)
    }

    /// Returns the index of the brain's strongest output
    /// for the given sensor readings. Ties resolve to the
    /// highest index, so index 0 wins only when strictly
    /// greater than every other output.
    ///
    /// # Errors
    /// Returns the genome's error if the inputs can't be
    /// processed (e.g., wrong arity).
    pub fn decide(&self, inputs: &[f64]) -> Result<usize, G::Error> {
        let outputs = self.brain.activate(inputs)?;
        let mut best = 0;
        for (i, output) in outputs.iter().enumerate().skip(1) {
            if *output >= outputs[best] {
                best = i;
            }
        }
        Ok(best)
    }

    /// Marks the organism as dead. Calling it
    /// again has no effect.
    pub fn mark_dead(&mut self) {
        self.alive = false;
    }

    /// Returns whether the organism is alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Records the organism's current score. Scores never
    /// decrease within a generation, so lower values
    /// are ignored.
    pub fn record_score(&mut self, score: f64) {
        if score > self.score {
            self.score = score;
        }
    }

    /// Returns the organism's score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the organism's normalized fitness.
    /// Only meaningful after fitness normalization.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Returns the organism's brain.
    pub fn brain(&self) -> &G {
        &self.brain
    }

    /// Consumes the organism, returning its brain.
    pub fn into_brain(self) -> G {
        self.brain
    }

    /// Brings the organism back for a new generation.
    pub(crate) fn revive(&mut self) {
        self.alive = true;
        self.score = 0.0;
        self.fitness = 0.0;
    }
}
