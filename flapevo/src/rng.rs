//! Sources of randomness for every stochastic operator.
//!
//! All operators take a `&mut R` where `R: RandomSource`,
//! instead of reaching for a thread-local generator, so
//! that runs can be seeded and tests can script the exact
//! sequence of draws.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform random generator over `[0, 1)`.
///
/// Only [`next_unit`] needs to be implemented; the
/// remaining methods are derived from it.
///
/// [`next_unit`]: RandomSource::next_unit
pub trait RandomSource {
    /// Returns a uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns `true` with probability `chance`.
    ///
    /// A `chance` of 0 never succeeds and a chance
    /// of 1 always does.
    fn gen_bool(&mut self, chance: f64) -> bool {
        self.next_unit() < chance
    }

    /// Returns the outcome of a fair coin flip.
    fn coin_flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    /// Returns a uniform sample in `[low, high)`.
    ///
    /// # Examples
    /// ```
    /// use flapevo::{RandomSource, SimpleRng};
    ///
    /// let mut rng = SimpleRng::seeded(7);
    /// let x = rng.gen_range(-1.0, 1.0);
    /// assert!((-1.0..1.0).contains(&x));
    /// ```
    fn gen_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Simple wrapper for a `T: Rng`, needed for
/// dependency inversion between the engine and
/// whichever generator the caller prefers.
#[derive(Clone, Debug)]
pub struct SimpleRng<T: Rng>(T);

impl<T: Rng> SimpleRng<T> {
    pub fn new(rng: T) -> SimpleRng<T> {
        SimpleRng(rng)
    }
}

impl SimpleRng<StdRng> {
    /// Returns a reproducible generator.
    ///
    /// # Examples
    /// ```
    /// use flapevo::{RandomSource, SimpleRng};
    ///
    /// let mut a = SimpleRng::seeded(42);
    /// let mut b = SimpleRng::seeded(42);
    /// assert_eq!(a.next_unit(), b.next_unit());
    /// ```
    pub fn seeded(seed: u64) -> SimpleRng<StdRng> {
        SimpleRng(StdRng::seed_from_u64(seed))
    }

    /// Returns a generator seeded from OS entropy.
    pub fn from_entropy() -> SimpleRng<StdRng> {
        SimpleRng(StdRng::from_entropy())
    }
}

impl<T: Rng> RandomSource for SimpleRng<T> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// A source that replays a fixed sequence of
/// values, cycling back to the start once exhausted.
///
/// Values are clamped into `[0, 1)` so that a script
/// can never break the [`RandomSource`] contract.
///
/// # Examples
/// ```
/// use flapevo::{RandomSource, ScriptedSource};
///
/// let mut rng = ScriptedSource::new(vec![0.5, 0.01]);
/// assert_eq!(rng.next_unit(), 0.5);
/// assert_eq!(rng.next_unit(), 0.01);
/// assert_eq!(rng.next_unit(), 0.5);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source replaying `values`. An empty
    /// script always yields 0.
    pub fn new(values: Vec<f64>) -> ScriptedSource {
        ScriptedSource { values, cursor: 0 }
    }

    /// Returns the number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON / 2.0)
    }
}
