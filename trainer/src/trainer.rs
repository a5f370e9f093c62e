use crate::config::{ConfigError, TrainerConfig};
use crate::world::{Body, World, JUMP};

use flapevo::logging::{EvolutionLogger, ReportingLevel};
use flapevo::{Organism, Population, PopulationError, RandomSource, Transition};
use flapevo_nn::{NetworkConfig, NetworkError, NeuralNetwork};

use log::{info, trace};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Population(#[from] PopulationError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// The outcome of a single generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationReport {
    /// Number of the generation that was played.
    pub generation: usize,
    /// Ticks survived by the generation's best organism.
    pub score: f64,
    pub transition: Transition,
}

/// Drives a population through the headless world,
/// one generation at a time.
pub struct Trainer<R> {
    config: TrainerConfig,
    population: Population<NetworkConfig, NeuralNetwork>,
    // Aligned with `population.live()`.
    bodies: Vec<Body>,
    world: World,
    logger: EvolutionLogger<NeuralNetwork>,
    rng: R,
}

impl<R: RandomSource> Trainer<R> {
    pub fn new(config: TrainerConfig, mut rng: R) -> Result<Trainer<R>, TrainerError> {
        config.validate()?;
        let population =
            Population::new(config.population.clone(), config.network.clone(), &mut rng)?;
        let world = World::new(config.world.clone(), &mut rng);
        let bodies = vec![Body::new(&config.world); population.live().len()];
        Ok(Trainer {
            config,
            population,
            bodies,
            world,
            logger: EvolutionLogger::new(ReportingLevel::NoOrganisms),
            rng,
        })
    }

    pub fn population(&self) -> &Population<NetworkConfig, NeuralNetwork> {
        &self.population
    }

    pub fn logger(&self) -> &EvolutionLogger<NeuralNetwork> {
        &self.logger
    }

    /// Plays one tick for every live organism: the world
    /// scrolls, bodies fall and score, colliding ones die,
    /// and the survivors decide whether to jump. Returns
    /// whether any organism is still alive.
    pub fn step(&mut self) -> Result<bool, TrainerError> {
        self.world.advance(&mut self.rng);
        let score = self.world.ticks() as f64;
        let gravity = self.config.world.gravity;
        for (organism, body) in self.population.live_mut().iter_mut().zip(&mut self.bodies) {
            body.fall(gravity);
            organism.record_score(score);
            if self.world.collides(body) {
                organism.mark_dead();
            }
        }

        let mut alive = self.population.live().iter().map(Organism::is_alive);
        self.bodies.retain(|_| alive.next().unwrap_or(false));
        let died = self.population.retire_dead();
        if died > 0 {
            trace!("{} organisms died at tick {}", died, self.world.ticks());
        }

        let world = &self.world;
        let decisions = self
            .population
            .live()
            .par_iter()
            .zip(self.bodies.par_iter())
            .map(|(organism, body)| organism.decide(&world.sensors(body)))
            .collect::<Result<Vec<_>, _>>()?;
        let strength = self.config.world.jump_strength;
        for (body, decision) in self.bodies.iter_mut().zip(decisions) {
            if decision == JUMP {
                body.jump(strength);
            }
        }
        Ok(!self.population.is_extinct())
    }

    /// Plays the current generation until every organism has
    /// died or the tick cap is reached, then breeds the next one.
    pub fn run_generation(&mut self) -> Result<GenerationReport, TrainerError> {
        let generation = self.population.generation();
        while self.step()? {
            if self.world.ticks() >= self.config.max_ticks {
                info!("generation {} reached the tick cap", generation);
                break;
            }
        }
        self.logger.log(&self.population);
        let score = self.population.best_score();
        let transition = self.population.evolve(&mut self.rng)?;
        self.reset_world();
        Ok(GenerationReport {
            generation,
            score,
            transition,
        })
    }

    /// Evaluates a copy of the champion alone in a fresh world
    /// until it dies or the tick cap is reached, leaving the
    /// population untouched. Returns the replay's score, or
    /// `None` if there is no champion yet.
    pub fn replay_champion(&mut self) -> Result<Option<f64>, TrainerError> {
        let brain = match self.population.champion() {
            Some(champion) => champion.brain().clone(),
            None => return Ok(None),
        };
        self.replay(brain).map(Some)
    }

    /// Evaluates a single brain alone in a fresh world until
    /// it dies or the tick cap is reached, leaving the
    /// population untouched. Returns the replay's score.
    pub fn replay(&mut self, brain: NeuralNetwork) -> Result<f64, TrainerError> {
        let organism = Organism::from_brain(brain);
        let mut world = World::new(self.config.world.clone(), &mut self.rng);
        let mut body = Body::new(world.config());
        while world.ticks() < self.config.max_ticks {
            world.advance(&mut self.rng);
            body.fall(self.config.world.gravity);
            if world.collides(&body) {
                break;
            }
            if organism.decide(&world.sensors(&body))? == JUMP {
                body.jump(self.config.world.jump_strength);
            }
        }
        Ok(world.ticks() as f64)
    }

    /// Replaces the current generation with `brain` and
    /// mutated clones of it, in a fresh world.
    ///
    /// # Errors
    /// Returns an error if the brain doesn't match the
    /// configured network.
    pub fn derive_from(&mut self, brain: NeuralNetwork) -> Result<(), TrainerError> {
        self.population.derive_from(&Organism::from_brain(brain), &mut self.rng)?;
        self.reset_world();
        Ok(())
    }

    /// Trains for the configured number of generations,
    /// saving the champion's brain whenever it improves.
    ///
    /// With a `load_path`, the persisted brain is either
    /// replayed alone, without training, or used to seed
    /// the first generation when `derive` is set.
    pub fn run(&mut self) -> Result<(), TrainerError> {
        if let Some(path) = self.config.load_path.clone() {
            let brain = NeuralNetwork::read_from(&path)?;
            if !self.config.derive {
                let score = self.replay(brain)?;
                info!("brain from {} replayed with score {}", path.display(), score);
                return Ok(());
            }
            self.derive_from(brain)?;
            info!("derived generation {} from {}", self.population.generation(), path.display());
        }

        let mut saved_score = self.population.high_score();
        for _ in 0..self.config.max_generations {
            let report = self.run_generation()?;
            info!(
                "generation {}: score {} ({:?}), high score {}",
                report.generation,
                report.score,
                report.transition,
                self.population.high_score()
            );
            if self.population.high_score() > saved_score {
                saved_score = self.population.high_score();
                if let (Some(path), Some(champion)) =
                    (&self.config.champion_path, self.population.champion())
                {
                    champion.brain().write_to(path)?;
                    info!("saved champion (score {}) to {}", saved_score, path.display());
                }
            }
        }
        if let Some(score) = self.replay_champion()? {
            info!("champion replay scored {}", score);
        }
        Ok(())
    }

    fn reset_world(&mut self) {
        self.world = World::new(self.config.world.clone(), &mut self.rng);
        self.bodies = vec![Body::new(&self.config.world); self.population.live().len()];
    }
}
