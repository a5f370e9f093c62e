//! A Population is the collection of organisms
//! taking part in the current generation, plus an
//! archive of those whose participation has ended.
//!
//! Generations cycle through three phases:
//! - **Active**: the environment ticks the live organisms,
//!   moving the dead ones to the archive.
//! - **Evaluating**: once every organism is archived (or the
//!   caller forces it), fitness is normalized from scores.
//! - **Reproducing**: two parents are drawn by roulette-wheel
//!   selection, and the next generation bred from them.
mod config;
mod errors;
pub mod logging;
mod organism;

use crate::{Genome, RandomSource};
pub use config::PopulationConfig;
pub use errors::PopulationError;
pub use organism::Organism;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// The outcome of a generation transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The next generation was bred from the archive.
    Evolved,
    /// No organism passed the survival threshold (or the
    /// archive was degenerate), so the population was
    /// reinitialized from scratch.
    Restarted,
}

/// A population of organisms.
///
/// Deserialized populations are checked to start from
/// generation 1 or later, to hold only dead organisms in
/// the archive, and to hold only genomes compatible with
/// the genetic configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "UncheckedPopulation<C, G>",
    bound(deserialize = "C: Deserialize<'de>, G: Genome<Config = C> + Deserialize<'de>")
)]
pub struct Population<C, G> {
    live: Vec<Organism<G>>,
    archive: Vec<Organism<G>>,
    generation: usize,
    champion: Option<Organism<G>>,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, G> Population<C, G>
where
    G: Genome<Config = C>,
{
    /// Creates a new population of randomized organisms
    /// using the passed configurations.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// # Errors
    /// Returns an error if the genome can't be built from
    /// `genetic_config`.
    ///
    /// # Examples
    /// ```
    /// use flapevo::{Population, PopulationConfig, SimpleRng};
    /// use flapevo_nn::{ActivationType, NetworkConfig, NeuralNetwork};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = SimpleRng::seeded(0);
    /// let population = Population::<_, NeuralNetwork>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(10).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     NetworkConfig::new(vec![4, 3, 2], ActivationType::Sigmoid),
    ///     &mut rng,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(population.live().len(), 10);
    /// assert_eq!(population.generation(), 1);
    /// ```
    pub fn new<R>(
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Result<Population<C, G>, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        let live = Self::random_organisms(
            population_config.size.get(),
            &genetic_config,
            rng,
        )?;
        Ok(Population {
            live,
            archive: vec![],
            generation: 1,
            champion: None,
            population_config,
            genetic_config,
        })
    }

    fn random_organisms<R>(
        count: usize,
        genetic_config: &C,
        rng: &mut R,
    ) -> Result<Vec<Organism<G>>, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        (0..count)
            .map(|_| {
                Organism::<G>::new_random(genetic_config, rng).map_err(PopulationError::genome)
            })
            .collect()
    }

    /// Returns the organisms taking part in the
    /// current generation.
    pub fn live(&self) -> &[Organism<G>] {
        &self.live
    }

    /// Returns the live organisms mutably, so the
    /// environment can record scores and deaths.
    pub fn live_mut(&mut self) -> &mut [Organism<G>] {
        &mut self.live
    }

    /// Returns the organisms that have finished the
    /// current generation, in order of arrival.
    pub fn archive(&self) -> &[Organism<G>] {
        &self.archive
    }

    /// Returns the current generation number.
    /// Starts at 1.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns whether every organism of the current
    /// generation has been archived.
    pub fn is_extinct(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns the best-scoring organism archived so far,
    /// across all generations.
    pub fn champion(&self) -> Option<&Organism<G>> {
        self.champion.as_ref()
    }

    /// Returns the champion's score, or 0 if there is none.
    pub fn high_score(&self) -> f64 {
        self.champion.as_ref().map_or(0.0, Organism::score)
    }

    /// Forgets the current champion.
    pub fn reset_champion(&mut self) {
        self.champion = None;
    }

    /// Returns the population configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the genetic configuration.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }

    /// Returns the highest score among archived and
    /// live organisms.
    pub fn best_score(&self) -> f64 {
        self.archive
            .iter()
            .chain(&self.live)
            .map(Organism::score)
            .fold(0.0, f64::max)
    }

    /// Marks the live organism at `index` as dead and
    /// moves it to the archive. The relative order of
    /// the remaining live organisms is preserved.
    ///
    /// # Errors
    /// Returns an error if there is no live organism
    /// at `index`.
    pub fn record_death(&mut self, index: usize) -> Result<(), PopulationError> {
        if index >= self.live.len() {
            return Err(PopulationError::NoSuchOrganism {
                index,
                live: self.live.len(),
            });
        }
        let mut organism = self.live.remove(index);
        organism.mark_dead();
        self.archive.push(organism);
        Ok(())
    }

    /// Moves every live organism marked as dead to the
    /// archive, preserving the relative order of both
    /// the survivors and the dead. Returns the number
    /// of organisms archived.
    pub fn retire_dead(&mut self) -> usize {
        let before = self.archive.len();
        let (alive, dead): (Vec<_>, Vec<_>) =
            self.live.drain(..).partition(Organism::is_alive);
        self.live = alive;
        self.archive.extend(dead);
        self.archive.len() - before
    }

    /// Ends the current generation early, archiving
    /// every organism still alive.
    pub fn end_generation(&mut self) {
        for mut organism in self.live.drain(..) {
            organism.mark_dead();
            self.archive.push(organism);
        }
    }

    /// Assigns each archived organism a fitness
    /// proportional to the square of its score, such
    /// that all fitnesses add up to 1.
    ///
    /// # Errors
    /// Returns [`PopulationError::DegenerateFitness`] if the
    /// archive is empty or every score is 0.
    pub fn normalize_fitness(&mut self) -> Result<(), PopulationError> {
        let sum: f64 = self.archive.iter().map(|o| o.score().powi(2)).sum();
        if self.archive.is_empty() || sum == 0.0 || !sum.is_finite() {
            return Err(PopulationError::DegenerateFitness);
        }
        for organism in &mut self.archive {
            let fitness = organism.score().powi(2) / sum;
            organism.set_fitness(fitness);
        }
        Ok(())
    }

    /// Picks an archived organism with probability
    /// proportional to its fitness (roulette-wheel
    /// selection). The organism stays in the archive,
    /// and may be picked again.
    ///
    /// Fitness must have been normalized beforehand.
    ///
    /// # Errors
    /// Returns an error if the archive is empty.
    pub fn select_parent<R>(&self, rng: &mut R) -> Result<&Organism<G>, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        let index = self.select_parent_index(rng)?;
        Ok(&self.archive[index])
    }

    fn select_parent_index<R>(&self, rng: &mut R) -> Result<usize, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        if self.archive.is_empty() {
            return Err(PopulationError::EmptyArchive);
        }
        let mut remaining = rng.next_unit();
        for (i, organism) in self.archive.iter().enumerate() {
            remaining -= organism.fitness();
            if remaining <= 0.0 {
                return Ok(i);
            }
        }
        // Rounding can leave a sliver past the last organism.
        Ok(self.archive.len() - 1)
    }

    /// Replaces the live organisms with `target_size` offspring
    /// of two parents selected from the archive, then clears
    /// the archive.
    ///
    /// Both parents are selected once, independently, so they
    /// may be the same organism. Offspring are mutated
    /// independently.
    ///
    /// # Errors
    /// Returns an error if the archive is empty, or if the
    /// parents' genomes can't be crossed over. The population
    /// is left untouched in that case.
    pub fn reproduce<R>(&mut self, target_size: usize, rng: &mut R) -> Result<(), PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        let parent1 = self.select_parent_index(rng)?;
        let parent2 = self.select_parent_index(rng)?;
        debug!(
            "selected parents #{} (score {}) and #{} (score {})",
            parent1,
            self.archive[parent1].score(),
            parent2,
            self.archive[parent2].score(),
        );
        let (parent1, parent2) = (&self.archive[parent1], &self.archive[parent2]);
        let mutation_rate = self.population_config.mutation_rate;
        let offspring = (0..target_size)
            .map(|_| Organism::from_parents(parent1, parent2, mutation_rate, rng))
            .collect::<Result<Vec<_>, _>>()
            .map_err(PopulationError::genome)?;
        self.live = offspring;
        self.archive.clear();
        Ok(())
    }

    /// Transitions to the next generation.
    ///
    /// Organisms still alive are archived first. If `best_score`
    /// exceeds `survival_threshold`, fitness is normalized and
    /// `target_size` offspring are bred from the archive.
    /// Otherwise the archive is discarded and the population
    /// restarts at generation 1 with freshly randomized
    /// organisms. A degenerate archive also triggers a restart.
    ///
    /// # Errors
    /// Returns an error if a genome operation fails.
    ///
    /// # Examples
    /// ```
    /// use flapevo::{Population, PopulationConfig, SimpleRng, Transition};
    /// use flapevo_nn::{ActivationType, NetworkConfig, NeuralNetwork};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = SimpleRng::seeded(0);
    /// let mut population = Population::<_, NeuralNetwork>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(4).unwrap(),
    ///         mutation_rate: 0.05,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     NetworkConfig::new(vec![4, 3, 2], ActivationType::Sigmoid),
    ///     &mut rng,
    /// )
    /// .unwrap();
    ///
    /// for (i, organism) in population.live_mut().iter_mut().enumerate() {
    ///     organism.record_score(100.0 * i as f64);
    ///     organism.mark_dead();
    /// }
    /// population.retire_dead();
    ///
    /// let best = population.best_score();
    /// let transition = population.advance_generation(4, 270.0, best, &mut rng).unwrap();
    /// assert_eq!(transition, Transition::Evolved);
    /// assert_eq!(population.generation(), 2);
    /// ```
    pub fn advance_generation<R>(
        &mut self,
        target_size: usize,
        survival_threshold: f64,
        best_score: f64,
        rng: &mut R,
    ) -> Result<Transition, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        self.end_generation();
        self.update_champion();

        if best_score > survival_threshold {
            match self.normalize_fitness() {
                Ok(()) => {
                    self.reproduce(target_size, rng)?;
                    self.generation += 1;
                    info!(
                        "generation {} bred {} offspring (best score {})",
                        self.generation, target_size, best_score
                    );
                    return Ok(Transition::Evolved);
                }
                Err(PopulationError::DegenerateFitness) => {
                    warn!("degenerate archive despite best score {}", best_score);
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "best score {} did not exceed {}, restarting from scratch",
            best_score, survival_threshold
        );
        self.restart(target_size, rng)?;
        Ok(Transition::Restarted)
    }

    /// Ends the current generation and transitions to the
    /// next one using the configured size and survival
    /// threshold, and the best score of the generation.
    ///
    /// # Errors
    /// Returns an error if a genome operation fails.
    pub fn evolve<R>(&mut self, rng: &mut R) -> Result<Transition, PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        let best_score = self.best_score();
        self.advance_generation(
            self.population_config.size.get(),
            self.population_config.survival_threshold,
            best_score,
            rng,
        )
    }

    /// Resets the population to generation 1 with
    /// `target_size` randomized organisms, discarding
    /// the archive. The champion is kept.
    ///
    /// # Errors
    /// Returns an error if the genome can't be built from
    /// the genetic configuration.
    pub fn restart<R>(&mut self, target_size: usize, rng: &mut R) -> Result<(), PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        let live = Self::random_organisms(target_size, &self.genetic_config, rng)?;
        self.live = live;
        self.archive.clear();
        self.generation = 1;
        Ok(())
    }

    /// Replaces the current generation with `organism` itself
    /// (revived, with its score reset) and enough mutated
    /// clones of it to fill the configured size.
    ///
    /// The generation number is left unchanged.
    ///
    /// # Errors
    /// Returns [`PopulationError::IncompatibleGenome`] if the
    /// organism's genome doesn't match the genetic configuration.
    /// The population is left untouched in that case.
    pub fn derive_from<R>(
        &mut self,
        organism: &Organism<G>,
        rng: &mut R,
    ) -> Result<(), PopulationError>
    where
        R: RandomSource + ?Sized,
    {
        if !organism.brain().is_compatible(&self.genetic_config) {
            return Err(PopulationError::IncompatibleGenome("ancestor".to_string()));
        }
        let size = self.population_config.size.get();
        let mutation_rate = self.population_config.mutation_rate;
        let mut seed = organism.clone();
        seed.revive();
        let mut live = Vec::with_capacity(size);
        live.extend((1..size).map(|_| Organism::mutated_clone(&seed, mutation_rate, rng)));
        live.insert(0, seed);
        self.live = live;
        self.archive.clear();
        debug!("derived {} organisms from a single ancestor", size);
        Ok(())
    }

    /// Keeps a copy of the best archived organism if it
    /// beats the current champion.
    fn update_champion(&mut self) {
        let best = self.archive.iter().fold(None, |best: Option<&Organism<G>>, o| match best {
            Some(b) if b.score() >= o.score() => Some(b),
            _ => Some(o),
        });
        if let Some(best) = best {
            if best.score() > self.high_score() {
                debug!("new champion with score {}", best.score());
                self.champion = Some(best.clone());
            }
        }
    }
}

/// Deserialization mirror of [`Population`], checked
/// before conversion.
#[derive(Deserialize)]
struct UncheckedPopulation<C, G> {
    live: Vec<Organism<G>>,
    archive: Vec<Organism<G>>,
    generation: usize,
    champion: Option<Organism<G>>,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, G> TryFrom<UncheckedPopulation<C, G>> for Population<C, G>
where
    G: Genome<Config = C>,
{
    type Error = PopulationError;

    fn try_from(unchecked: UncheckedPopulation<C, G>) -> Result<Population<C, G>, PopulationError> {
        if unchecked.generation == 0 {
            return Err(PopulationError::ZeroGeneration);
        }
        if let Some(index) = unchecked.archive.iter().position(Organism::is_alive) {
            return Err(PopulationError::LiveInArchive(index));
        }
        let config = &unchecked.genetic_config;
        let incompatible = |organism: &Organism<G>| !organism.brain().is_compatible(config);
        if let Some(index) = unchecked.live.iter().position(incompatible) {
            let name = format!("live organism #{}", index);
            return Err(PopulationError::IncompatibleGenome(name));
        }
        if let Some(index) = unchecked.archive.iter().position(incompatible) {
            let name = format!("archived organism #{}", index);
            return Err(PopulationError::IncompatibleGenome(name));
        }
        if unchecked.champion.as_ref().map_or(false, incompatible) {
            return Err(PopulationError::IncompatibleGenome("champion".to_string()));
        }
        Ok(Population {
            live: unchecked.live,
            archive: unchecked.archive,
            generation: unchecked.generation,
            champion: unchecked.champion,
            population_config: unchecked.population_config,
            genetic_config: unchecked.genetic_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::organism::tests::Gains;
    use super::*;
    use crate::{ScriptedSource, SimpleRng};

    use std::num::NonZeroUsize;

    fn config(size: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            mutation_rate: 0.05,
            survival_threshold: 270.0,
        }
    }

    fn population(size: usize) -> Population<usize, Gains> {
        Population::new(config(size), 3, &mut SimpleRng::seeded(11)).unwrap()
    }

    /// A population whose archive holds organisms
    /// with the given scores, in order.
    fn archived(scores: &[f64]) -> Population<usize, Gains> {
        let mut population = population(scores.len());
        for (organism, score) in population.live_mut().iter_mut().zip(scores) {
            organism.record_score(*score);
        }
        population.end_generation();
        population
    }

    #[test]
    fn new() {
        let population = population(25);
        assert_eq!(population.live().len(), 25);
        assert!(population.archive().is_empty());
        assert_eq!(population.generation(), 1);
        assert!(population.live().iter().all(Organism::is_alive));
        assert!(population.champion().is_none());
    }

    #[test]
    fn new_with_invalid_genetic_config() {
        let result = Population::<usize, Gains>::new(config(5), 0, &mut SimpleRng::seeded(0));
        assert!(matches!(result, Err(PopulationError::Genome(_))));
    }

    #[test]
    fn record_death() {
        let mut population = population(3);
        let second = population.live()[1].clone();
        population.record_death(1).unwrap();
        assert_eq!(population.live().len(), 2);
        assert_eq!(population.archive().len(), 1);
        assert_eq!(population.archive()[0].brain(), second.brain());
        assert!(!population.archive()[0].is_alive());
        assert!(matches!(
            population.record_death(2),
            Err(PopulationError::NoSuchOrganism { index: 2, live: 2 })
        ));
    }

    #[test]
    fn retire_dead_preserves_order() {
        let mut population = population(5);
        let brains: Vec<_> = population.live().iter().map(|o| o.brain().clone()).collect();
        population.live_mut()[3].mark_dead();
        population.live_mut()[0].mark_dead();
        assert_eq!(population.retire_dead(), 2);
        assert_eq!(population.live().len(), 3);
        assert_eq!(population.archive()[0].brain(), &brains[0]);
        assert_eq!(population.archive()[1].brain(), &brains[3]);
        assert_eq!(population.live()[0].brain(), &brains[1]);
        assert_eq!(population.live()[2].brain(), &brains[4]);
        assert_eq!(population.retire_dead(), 0);
    }

    #[test]
    fn end_generation_archives_everyone() {
        let mut population = population(4);
        population.end_generation();
        assert!(population.is_extinct());
        assert_eq!(population.archive().len(), 4);
        assert!(population.archive().iter().all(|o| !o.is_alive()));
    }

    #[test]
    fn normalize_fitness_sums_to_one() {
        let mut population = archived(&[3.0, 0.0, 17.0, 250.0, 1.0, 99.5]);
        population.normalize_fitness().unwrap();
        let sum: f64 = population.archive().iter().map(Organism::fitness).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(population
            .archive()
            .iter()
            .all(|o| (0.0..=1.0).contains(&o.fitness())));
    }

    #[test]
    fn normalize_fitness_is_quadratic() {
        let mut population = archived(&[10.0, 90.0]);
        population.normalize_fitness().unwrap();
        assert!((population.archive()[0].fitness() - 100.0 / 8200.0).abs() < 1e-12);
        assert!((population.archive()[1].fitness() - 8100.0 / 8200.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_fitness_degenerate() {
        let mut population = archived(&[0.0, 0.0, 0.0]);
        assert!(matches!(
            population.normalize_fitness(),
            Err(PopulationError::DegenerateFitness)
        ));
        let mut empty = self::population(2);
        assert!(matches!(
            empty.normalize_fitness(),
            Err(PopulationError::DegenerateFitness)
        ));
    }

    #[test]
    fn select_parent_follows_fitness() {
        let mut population = archived(&[10.0, 90.0]);
        population.normalize_fitness().unwrap();
        let first = population.archive()[0].brain().clone();
        let second = population.archive()[1].brain().clone();

        let mut rng = ScriptedSource::new(vec![0.5]);
        assert_eq!(population.select_parent(&mut rng).unwrap().brain(), &second);
        let mut rng = ScriptedSource::new(vec![0.01]);
        assert_eq!(population.select_parent(&mut rng).unwrap().brain(), &first);
    }

    #[test]
    fn select_parent_never_fails() {
        let mut population = archived(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        population.normalize_fitness().unwrap();
        let just_under_one = 1.0 - f64::EPSILON / 2.0;
        for r in [0.0, 0.25, 0.5, 0.999_999, just_under_one] {
            let mut rng = ScriptedSource::new(vec![r]);
            assert!(population.select_parent(&mut rng).is_ok());
        }
        let mut rng = ScriptedSource::new(vec![0.0]);
        assert_eq!(
            population.select_parent(&mut rng).unwrap().brain(),
            population.archive()[0].brain()
        );
    }

    #[test]
    fn select_parent_clamps_to_last() {
        let mut population = archived(&[1.0, 1.0]);
        // Short of 1.0 by more than rounding error.
        for organism in &mut population.archive {
            organism.set_fitness(0.4);
        }
        let mut rng = ScriptedSource::new(vec![0.9]);
        assert_eq!(
            population.select_parent(&mut rng).unwrap().brain(),
            population.archive()[1].brain()
        );
    }

    #[test]
    fn select_parent_on_empty_archive() {
        let population = population(2);
        let mut rng = ScriptedSource::new(vec![0.5]);
        assert!(matches!(
            population.select_parent(&mut rng),
            Err(PopulationError::EmptyArchive)
        ));
    }

    #[test]
    fn reproduce() {
        let mut population = archived(&[300.0, 500.0, 10.0]);
        population.normalize_fitness().unwrap();
        population.reproduce(7, &mut SimpleRng::seeded(5)).unwrap();
        assert_eq!(population.live().len(), 7);
        assert!(population.archive().is_empty());
        assert!(population
            .live()
            .iter()
            .all(|o| o.is_alive() && o.score() == 0.0 && o.brain().0.len() == 3));
    }

    #[test]
    fn reproduce_same_parent_twice() {
        let mut population = archived(&[0.0, 42.0, 0.0]);
        population.population_config.mutation_rate = 0.0;
        population.normalize_fitness().unwrap();
        let parent = population.archive()[1].brain().clone();
        population.reproduce(5, &mut SimpleRng::seeded(8)).unwrap();
        assert!(population.live().iter().all(|o| o.brain() == &parent));
    }

    #[test]
    fn advance_generation_evolves() {
        let mut population = archived(&[100.0, 300.0, 50.0]);
        let transition = population
            .advance_generation(6, 270.0, 300.0, &mut SimpleRng::seeded(1))
            .unwrap();
        assert_eq!(transition, Transition::Evolved);
        assert_eq!(population.generation(), 2);
        assert_eq!(population.live().len(), 6);
        assert!(population.archive().is_empty());
        assert_eq!(population.high_score(), 300.0);
    }

    #[test]
    fn advance_generation_restarts_below_threshold() {
        let mut population = archived(&[100.0, 200.0]);
        population.generation = 9;
        let ancestors: Vec<_> = population.archive().iter().map(|o| o.brain().clone()).collect();
        let transition = population
            .advance_generation(5, 270.0, 270.0, &mut SimpleRng::seeded(2))
            .unwrap();
        assert_eq!(transition, Transition::Restarted);
        assert_eq!(population.generation(), 1);
        assert_eq!(population.live().len(), 5);
        assert!(population.archive().is_empty());
        assert!(population
            .live()
            .iter()
            .all(|o| !ancestors.contains(o.brain())));
        // The best organism is still remembered.
        assert_eq!(population.high_score(), 200.0);
    }

    #[test]
    fn advance_generation_restarts_on_degenerate_archive() {
        let mut population = archived(&[0.0, 0.0]);
        let transition = population
            .advance_generation(3, -1.0, 0.0, &mut SimpleRng::seeded(3))
            .unwrap();
        assert_eq!(transition, Transition::Restarted);
        assert_eq!(population.live().len(), 3);
    }

    #[test]
    fn advance_generation_archives_survivors() {
        let mut population = population(4);
        population.live_mut()[2].record_score(400.0);
        let transition = population.evolve(&mut SimpleRng::seeded(4)).unwrap();
        assert_eq!(transition, Transition::Evolved);
        assert_eq!(population.live().len(), 4);
        assert_eq!(population.high_score(), 400.0);
    }

    #[test]
    fn champion_only_improves() {
        let mut population = archived(&[500.0]);
        population.evolve(&mut SimpleRng::seeded(6)).unwrap();
        population.live_mut()[0].record_score(300.0);
        population.evolve(&mut SimpleRng::seeded(6)).unwrap();
        assert_eq!(population.high_score(), 500.0);
        population.reset_champion();
        assert!(population.champion().is_none());
        assert_eq!(population.high_score(), 0.0);
    }

    #[test]
    fn derive_from() {
        let mut population = archived(&[1000.0, 20.0]);
        population.generation = 4;
        let mut ancestor = population.archive()[0].clone();
        ancestor.record_score(1000.0);
        population.derive_from(&ancestor, &mut SimpleRng::seeded(12)).unwrap();
        assert_eq!(population.live().len(), 2);
        assert!(population.archive().is_empty());
        assert_eq!(population.generation(), 4);
        assert_eq!(population.live()[0].brain(), ancestor.brain());
        assert!(population.live()[0].is_alive());
        assert_eq!(population.live()[0].score(), 0.0);
    }

    #[test]
    fn derive_from_rejects_incompatible_ancestors() {
        let mut population = population(3);
        let before = population.live().to_vec();
        let stranger = Organism::from_brain(Gains(vec![1.0, 2.0]));
        assert!(matches!(
            population.derive_from(&stranger, &mut SimpleRng::seeded(1)),
            Err(PopulationError::IncompatibleGenome(_))
        ));
        assert_eq!(population.live(), &before[..]);
    }

    fn unchecked(population: &Population<usize, Gains>) -> UncheckedPopulation<usize, Gains> {
        UncheckedPopulation {
            live: population.live.clone(),
            archive: population.archive.clone(),
            generation: population.generation,
            champion: population.champion.clone(),
            population_config: population.population_config.clone(),
            genetic_config: population.genetic_config,
        }
    }

    #[test]
    fn restoring_accepts_consistent_state() {
        let mut population = archived(&[300.0, 10.0]);
        population.evolve(&mut SimpleRng::seeded(2)).unwrap();
        population.record_death(0).unwrap();
        let restored = Population::try_from(unchecked(&population)).unwrap();
        assert_eq!(restored.generation(), 2);
        assert_eq!(restored.live(), population.live());
        assert_eq!(restored.archive(), population.archive());
        assert_eq!(restored.high_score(), 300.0);
    }

    #[test]
    fn restoring_rejects_generation_zero() {
        let mut state = unchecked(&population(2));
        state.generation = 0;
        assert!(matches!(
            Population::try_from(state),
            Err(PopulationError::ZeroGeneration)
        ));
    }

    #[test]
    fn restoring_rejects_living_archived_organisms() {
        let mut state = unchecked(&population(2));
        state.archive.push(Organism::from_brain(Gains(vec![1.0; 3])));
        assert!(matches!(
            Population::try_from(state),
            Err(PopulationError::LiveInArchive(0))
        ));
    }

    #[test]
    fn restoring_rejects_incompatible_genomes() {
        let mut state = unchecked(&population(2));
        state.live[1] = Organism::from_brain(Gains(vec![1.0]));
        assert!(matches!(
            Population::try_from(state),
            Err(PopulationError::IncompatibleGenome(name)) if name == "live organism #1"
        ));

        let mut state = unchecked(&population(2));
        state.champion = Some(Organism::from_brain(Gains(vec![1.0; 4])));
        assert!(matches!(
            Population::try_from(state),
            Err(PopulationError::IncompatibleGenome(name)) if name == "champion"
        ));
    }
}
