use thiserror::Error;

/// Errors raised while driving a population
/// through its generational cycle.
#[derive(Debug, Error)]
pub enum PopulationError {
    /// The archive was empty, or every archived
    /// score was 0, so fitness can't be normalized.
    #[error("attempted fitness normalization on degenerate population")]
    DegenerateFitness,
    /// Parent selection was attempted with no
    /// archived organisms to choose from.
    #[error("attempted parent selection on empty archive")]
    EmptyArchive,
    /// No live organism exists at the given index.
    #[error("no live organism at index {index} (population holds {live})")]
    NoSuchOrganism { index: usize, live: usize },
    /// A restored population claimed generation 0.
    #[error("generations are numbered from 1, found 0")]
    ZeroGeneration,
    /// An archived organism is still marked alive.
    #[error("archived organism #{0} is still alive")]
    LiveInArchive(usize),
    /// A genome doesn't match the population's
    /// genetic configuration.
    #[error("{0} genome doesn't match the genetic configuration")]
    IncompatibleGenome(String),
    /// The genome implementation failed.
    #[error("genome operation failed: {0}")]
    Genome(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PopulationError {
    pub(crate) fn genome<E>(error: E) -> PopulationError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PopulationError::Genome(Box::new(error))
    }
}
