use crate::RandomSource;

/// An interface for genomes that can be evolved
/// by a [`Population`].
///
/// A genome is the heritable "brain" of an organism:
/// it maps a sensor vector to a vector of outputs,
/// and can be randomized, recombined and mutated.
///
/// [`Population`]: crate::Population
pub trait Genome: Clone {
    type Config;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns a freshly randomized genome.
    ///
    /// # Errors
    /// Implementations should return an error if the
    /// configuration cannot describe a valid genome.
    fn new_random<R>(config: &Self::Config, rng: &mut R) -> Result<Self, Self::Error>
    where
        R: RandomSource + ?Sized;

    /// Combines two genomes into a "child" genome,
    /// leaving both parents untouched.
    fn crossover<R>(&self, other: &Self, rng: &mut R) -> Result<Self, Self::Error>
    where
        R: RandomSource + ?Sized;

    /// Mutates the genome in place. Each heritable
    /// element should be replaced with probability `rate`.
    fn mutate<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: RandomSource + ?Sized;

    /// Computes the genome's outputs for the given inputs.
    /// Must be a pure function of the genome and `inputs`.
    fn activate(&self, inputs: &[f64]) -> Result<Vec<f64>, Self::Error>;

    /// Returns whether the genome has the shape `config`
    /// describes, and so can be crossed over with genomes
    /// built from it.
    fn is_compatible(&self, config: &Self::Config) -> bool;
}
