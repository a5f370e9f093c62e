mod activation;
mod codec;
mod config;
mod errors;

pub use activation::*;
pub use codec::{FORMAT_VERSION, MAGIC};
pub use config::*;
pub use errors::*;

use flapevo::{Genome, RandomSource};

use serde::{Deserialize, Serialize};

/// Bound of the uniform range `[-WEIGHT_BOUND, WEIGHT_BOUND)`
/// from which weights and biases are drawn, both on
/// randomization and on mutation.
pub const WEIGHT_BOUND: f64 = 1.0;

/// A dense fully-connected feed-forward neural network.
///
/// The network is described by its layer sizes, from
/// input to output. Each transition between consecutive
/// layers `l → l+1` holds a `sizes[l+1] × sizes[l]` weight
/// matrix (row-major, one row per receiving neuron) and a
/// bias vector of length `sizes[l+1]`. Every non-input layer
/// applies the network's activation type.
///
/// Networks are immutable under inference: [`process`]
/// takes `&self` and keeps no state between calls.
///
/// [`process`]: NeuralNetwork::process
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedNetwork")]
pub struct NeuralNetwork {
    layer_sizes: Vec<usize>,
    activation: ActivationType,
    transitions: Vec<Transition>,
}

/// Parameters of a single layer transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Transition {
    weights: Vec<f64>,
    biases: Vec<f64>,
}

impl Transition {
    fn zeroed(inputs: usize, outputs: usize) -> Transition {
        Transition {
            weights: vec![0.0; inputs * outputs],
            biases: vec![0.0; outputs],
        }
    }

    fn feed(&self, inputs: &[f64], activation: ActivationType) -> Vec<f64> {
        let function = activation.function().function;
        self.biases
            .iter()
            .zip(self.weights.chunks_exact(inputs.len()))
            .map(|(bias, row)| {
                let sum: f64 = row.iter().zip(inputs).map(|(w, x)| w * x).sum();
                function(sum + bias)
            })
            .collect()
    }

    fn parameters_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.weights.iter_mut().chain(self.biases.iter_mut())
    }
}

impl NeuralNetwork {
    /// Creates a network with the given layer sizes
    /// and every weight and bias set to 0.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidTopology`] if fewer
    /// than two layers are given, any layer is empty, or
    /// the parameter count overflows a `usize`.
    ///
    /// # Examples
    /// ```
    /// use flapevo_nn::{ActivationType, NeuralNetwork};
    ///
    /// let network = NeuralNetwork::new(&[4, 3, 2], ActivationType::Sigmoid).unwrap();
    /// assert_eq!(network.weights(0).unwrap().len(), 12);
    /// assert_eq!(network.biases(1).unwrap().len(), 2);
    ///
    /// assert!(NeuralNetwork::new(&[4], ActivationType::Sigmoid).is_err());
    /// assert!(NeuralNetwork::new(&[4, 0, 2], ActivationType::Sigmoid).is_err());
    /// ```
    pub fn new(
        layer_sizes: &[usize],
        activation: ActivationType,
    ) -> Result<NeuralNetwork, NetworkError> {
        check_topology(layer_sizes)?;
        Ok(NeuralNetwork {
            layer_sizes: layer_sizes.to_vec(),
            activation,
            transitions: layer_sizes
                .windows(2)
                .map(|pair| Transition::zeroed(pair[0], pair[1]))
                .collect(),
        })
    }

    /// Creates a network as described by `config`, with
    /// every weight and bias drawn uniformly from
    /// `[-WEIGHT_BOUND, WEIGHT_BOUND)`.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidTopology`] if the
    /// configured layer sizes are invalid.
    ///
    /// # Examples
    /// ```
    /// use flapevo::SimpleRng;
    /// use flapevo_nn::{NetworkConfig, NeuralNetwork};
    ///
    /// let mut rng = SimpleRng::seeded(11);
    /// let network = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
    /// assert_eq!(network.input_count(), 4);
    /// assert_eq!(network.output_count(), 2);
    /// ```
    pub fn random<R>(config: &NetworkConfig, rng: &mut R) -> Result<NeuralNetwork, NetworkError>
    where
        R: RandomSource + ?Sized,
    {
        let mut network = NeuralNetwork::new(&config.layer_sizes, config.activation)?;
        network.randomize_all(rng);
        Ok(network)
    }

    /// Redraws every weight and bias uniformly from
    /// `[-WEIGHT_BOUND, WEIGHT_BOUND)`.
    pub fn randomize_all<R>(&mut self, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        for parameter in self.transitions.iter_mut().flat_map(Transition::parameters_mut) {
            *parameter = rng.gen_range(-WEIGHT_BOUND, WEIGHT_BOUND);
        }
    }

    /// Runs a forward pass, returning one value
    /// per output neuron.
    ///
    /// # Errors
    /// Returns [`NetworkError::Dimension`] if `inputs`
    /// doesn't hold exactly one value per input neuron.
    ///
    /// # Examples
    /// ```
    /// use flapevo_nn::{ActivationType, NeuralNetwork};
    ///
    /// // All-zero parameters put every sigmoid at its midpoint.
    /// let network = NeuralNetwork::new(&[2, 3, 1], ActivationType::Sigmoid).unwrap();
    /// assert_eq!(network.process(&[0.7, -2.0]).unwrap(), vec![0.5]);
    /// assert!(network.process(&[0.7]).is_err());
    /// ```
    pub fn process(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        if inputs.len() != self.input_count() {
            return Err(NetworkError::Dimension {
                expected: self.input_count(),
                found: inputs.len(),
            });
        }
        let mut values = inputs.to_vec();
        for transition in &self.transitions {
            values = transition.feed(&values, self.activation);
        }
        Ok(values)
    }

    /// Independently replaces each weight, with probability
    /// `rate`, by a fresh draw from `[-WEIGHT_BOUND, WEIGHT_BOUND)`.
    /// A rate of 0 leaves the network unchanged.
    pub fn mutate_weights<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        for weight in self.transitions.iter_mut().flat_map(|t| t.weights.iter_mut()) {
            if rng.gen_bool(rate) {
                *weight = rng.gen_range(-WEIGHT_BOUND, WEIGHT_BOUND);
            }
        }
    }

    /// Independently replaces each bias, with probability
    /// `rate`, by a fresh draw from `[-WEIGHT_BOUND, WEIGHT_BOUND)`.
    /// A rate of 0 leaves the network unchanged.
    pub fn mutate_biases<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        for bias in self.transitions.iter_mut().flat_map(|t| t.biases.iter_mut()) {
            if rng.gen_bool(rate) {
                *bias = rng.gen_range(-WEIGHT_BOUND, WEIGHT_BOUND);
            }
        }
    }

    /// Returns a child network where every weight and bias is
    /// taken from either `self` or `other` by an independent
    /// fair coin flip. The child inherits `self`'s activation
    /// type; both parents are left untouched.
    ///
    /// # Errors
    /// Returns [`NetworkError::TopologyMismatch`] if the
    /// parents' layer sizes differ.
    ///
    /// # Examples
    /// ```
    /// use flapevo::SimpleRng;
    /// use flapevo_nn::{ActivationType, NeuralNetwork};
    ///
    /// let mut rng = SimpleRng::seeded(5);
    /// let a = NeuralNetwork::new(&[2, 2], ActivationType::Tanh).unwrap();
    /// let b = NeuralNetwork::new(&[2, 3], ActivationType::Tanh).unwrap();
    /// assert!(a.crossover(&a.clone(), &mut rng).is_ok());
    /// assert!(a.crossover(&b, &mut rng).is_err());
    /// ```
    pub fn crossover<R>(
        &self,
        other: &NeuralNetwork,
        rng: &mut R,
    ) -> Result<NeuralNetwork, NetworkError>
    where
        R: RandomSource + ?Sized,
    {
        if self.layer_sizes != other.layer_sizes {
            return Err(NetworkError::TopologyMismatch {
                expected: self.layer_sizes.clone(),
                found: other.layer_sizes.clone(),
            });
        }
        let mut pick = |a: &[f64], b: &[f64]| -> Vec<f64> {
            a.iter()
                .zip(b)
                .map(|(a, b)| if rng.coin_flip() { *a } else { *b })
                .collect()
        };
        let transitions = self
            .transitions
            .iter()
            .zip(&other.transitions)
            .map(|(a, b)| Transition {
                weights: pick(&a.weights, &b.weights),
                biases: pick(&a.biases, &b.biases),
            })
            .collect();
        Ok(NeuralNetwork {
            layer_sizes: self.layer_sizes.clone(),
            activation: self.activation,
            transitions,
        })
    }

    /// Returns the neuron count of every layer,
    /// from input to output.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Returns the activation type of the non-input layers.
    pub fn activation(&self) -> ActivationType {
        self.activation
    }

    pub fn input_count(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_count(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Returns the number of layer transitions,
    /// i.e., one less than the number of layers.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the row-major weight matrix of
    /// transition `index`, if it exists.
    pub fn weights(&self, index: usize) -> Option<&[f64]> {
        self.transitions.get(index).map(|t| t.weights.as_slice())
    }

    /// Returns the bias vector of transition
    /// `index`, if it exists.
    pub fn biases(&self, index: usize) -> Option<&[f64]> {
        self.transitions.get(index).map(|t| t.biases.as_slice())
    }

    /// Overwrites the parameters of transition `index`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NoSuchTransition`] if the
    /// transition doesn't exist, or [`NetworkError::Dimension`]
    /// if either slice has the wrong length. The network is
    /// left unchanged on error.
    ///
    /// # Examples
    /// ```
    /// use flapevo_nn::{ActivationType, NeuralNetwork};
    ///
    /// let mut network = NeuralNetwork::new(&[2, 1], ActivationType::Identity).unwrap();
    /// network.set_transition(0, &[2.0, -1.0], &[0.5]).unwrap();
    /// assert_eq!(network.process(&[1.0, 1.0]).unwrap(), vec![1.5]);
    /// ```
    pub fn set_transition(
        &mut self,
        index: usize,
        weights: &[f64],
        biases: &[f64],
    ) -> Result<(), NetworkError> {
        let count = self.transitions.len();
        let transition = self
            .transitions
            .get_mut(index)
            .ok_or(NetworkError::NoSuchTransition { index, count })?;
        for (expected, found) in [
            (transition.weights.len(), weights.len()),
            (transition.biases.len(), biases.len()),
        ] {
            if expected != found {
                return Err(NetworkError::Dimension { expected, found });
            }
        }
        transition.weights.copy_from_slice(weights);
        transition.biases.copy_from_slice(biases);
        Ok(())
    }

    /// Iterates over every weight and bias, transition by
    /// transition, weights before biases.
    pub(crate) fn parameters(&self) -> impl Iterator<Item = f64> + '_ {
        self.transitions
            .iter()
            .flat_map(|t| t.weights.iter().chain(t.biases.iter()))
            .copied()
    }

    /// Builds a network from a flat parameter sequence in
    /// the order produced by [`parameters`]. The caller
    /// guarantees the topology is valid and the sequence
    /// holds exactly the right number of values.
    ///
    /// [`parameters`]: NeuralNetwork::parameters
    pub(crate) fn from_parameters(
        layer_sizes: Vec<usize>,
        activation: ActivationType,
        mut parameters: impl Iterator<Item = f64>,
    ) -> NeuralNetwork {
        let transitions = layer_sizes
            .windows(2)
            .map(|pair| Transition {
                weights: parameters.by_ref().take(pair[0] * pair[1]).collect(),
                biases: parameters.by_ref().take(pair[1]).collect(),
            })
            .collect();
        NeuralNetwork {
            layer_sizes,
            activation,
            transitions,
        }
    }
}

impl Genome for NeuralNetwork {
    type Config = NetworkConfig;
    type Error = NetworkError;

    fn new_random<R>(config: &NetworkConfig, rng: &mut R) -> Result<NeuralNetwork, NetworkError>
    where
        R: RandomSource + ?Sized,
    {
        NeuralNetwork::random(config, rng)
    }

    fn crossover<R>(
        &self,
        other: &NeuralNetwork,
        rng: &mut R,
    ) -> Result<NeuralNetwork, NetworkError>
    where
        R: RandomSource + ?Sized,
    {
        NeuralNetwork::crossover(self, other, rng)
    }

    /// Mutates weights, then biases, with the same rate.
    fn mutate<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        self.mutate_weights(rate, rng);
        self.mutate_biases(rate, rng);
    }

    fn activate(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.process(inputs)
    }

    fn is_compatible(&self, config: &NetworkConfig) -> bool {
        self.layer_sizes == config.layer_sizes && self.activation == config.activation
    }
}

/// Returns the total number of weights and biases of a
/// network with the given layer sizes, or `None` if it
/// overflows a `usize`.
pub(crate) fn parameter_count(layer_sizes: &[usize]) -> Option<usize> {
    layer_sizes.windows(2).try_fold(0usize, |total, pair| {
        pair[0]
            .checked_mul(pair[1])
            .and_then(|weights| weights.checked_add(pair[1]))
            .and_then(|count| total.checked_add(count))
    })
}

/// Checks that the layer sizes describe a network
/// that can be built and persisted.
pub(crate) fn check_topology(layer_sizes: &[usize]) -> Result<(), NetworkError> {
    let fits = |n: usize| u32::try_from(n).is_ok();
    if layer_sizes.len() < 2
        || !fits(layer_sizes.len())
        || layer_sizes.iter().any(|&size| size == 0 || !fits(size))
        || parameter_count(layer_sizes).is_none()
    {
        return Err(NetworkError::InvalidTopology(layer_sizes.to_vec()));
    }
    Ok(())
}

/// Deserialization mirror of [`NeuralNetwork`], whose
/// dimensions are validated against the supplied
/// parameters before conversion.
#[derive(Deserialize)]
struct UncheckedNetwork {
    layer_sizes: Vec<usize>,
    activation: ActivationType,
    transitions: Vec<Transition>,
}

impl TryFrom<UncheckedNetwork> for NeuralNetwork {
    type Error = NetworkError;

    fn try_from(unchecked: UncheckedNetwork) -> Result<NeuralNetwork, NetworkError> {
        let UncheckedNetwork {
            layer_sizes,
            activation,
            transitions,
        } = unchecked;
        check_topology(&layer_sizes)?;
        if transitions.len() != layer_sizes.len() - 1 {
            return Err(NetworkError::Dimension {
                expected: layer_sizes.len() - 1,
                found: transitions.len(),
            });
        }
        for (pair, transition) in layer_sizes.windows(2).zip(&transitions) {
            // The parameter count was checked not to overflow.
            for (expected, found) in [
                (pair[0] * pair[1], transition.weights.len()),
                (pair[1], transition.biases.len()),
            ] {
                if expected != found {
                    return Err(NetworkError::Dimension { expected, found });
                }
            }
        }
        Ok(NeuralNetwork {
            layer_sizes,
            activation,
            transitions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flapevo::{ScriptedSource, SimpleRng};

    fn sample_network() -> NeuralNetwork {
        let mut network = NeuralNetwork::new(&[2, 2, 1], ActivationType::Identity).unwrap();
        network
            .set_transition(0, &[1.0, 2.0, -1.0, 0.5], &[0.0, 1.0])
            .unwrap();
        network.set_transition(1, &[1.0, 1.0], &[-0.5]).unwrap();
        network
    }

    #[test]
    fn new_has_expected_shapes() {
        let network = NeuralNetwork::new(&[4, 3, 2], ActivationType::Sigmoid).unwrap();
        assert_eq!(network.layer_sizes(), &[4, 3, 2]);
        assert_eq!(network.transition_count(), 2);
        assert_eq!(network.weights(0).unwrap().len(), 3 * 4);
        assert_eq!(network.biases(0).unwrap().len(), 3);
        assert_eq!(network.weights(1).unwrap().len(), 2 * 3);
        assert_eq!(network.biases(1).unwrap().len(), 2);
        assert!(network.weights(2).is_none());
        assert!(network.parameters().all(|p| p == 0.0));
    }

    #[test]
    fn new_rejects_invalid_topologies() {
        for sizes in [&[][..], &[3][..], &[0, 2][..], &[2, 0][..], &[2, 3, 0][..]] {
            assert!(matches!(
                NeuralNetwork::new(sizes, ActivationType::Tanh),
                Err(NetworkError::InvalidTopology(_))
            ));
        }
    }

    #[test]
    fn new_rejects_overflowing_parameter_counts() {
        let huge = u32::MAX as usize;
        assert_eq!(parameter_count(&[huge, huge, huge]), None);
        assert!(matches!(
            NeuralNetwork::new(&[huge, huge, huge], ActivationType::Sigmoid),
            Err(NetworkError::InvalidTopology(_))
        ));
        assert_eq!(parameter_count(&[4, 3, 2]), Some(3 * 4 + 3 + 2 * 3 + 2));
    }

    #[test]
    fn process_computes_affine_layers() {
        let network = sample_network();
        // Hidden: [1·1 + 2·2 + 0, -1·1 + 0.5·2 + 1] = [5, 1]
        // Output: 5 + 1 - 0.5
        assert_eq!(network.process(&[1.0, 2.0]).unwrap(), vec![5.5]);
    }

    #[test]
    fn process_applies_activation_per_layer() {
        let mut network = NeuralNetwork::new(&[1, 1, 1], ActivationType::ReLU).unwrap();
        network.set_transition(0, &[-1.0], &[0.0]).unwrap();
        network.set_transition(1, &[1.0], &[0.25]).unwrap();
        assert_eq!(network.process(&[3.0]).unwrap(), vec![0.25]);
        assert_eq!(network.process(&[-3.0]).unwrap(), vec![3.25]);
    }

    #[test]
    fn process_rejects_wrong_arity() {
        let network = sample_network();
        assert!(matches!(
            network.process(&[1.0, 2.0, 3.0]),
            Err(NetworkError::Dimension {
                expected: 2,
                found: 3
            })
        ));
        assert!(network.process(&[]).is_err());
    }

    #[test]
    fn process_is_pure() {
        let mut rng = SimpleRng::seeded(17);
        let network = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
        let inputs = [0.3, 0.7, 0.55, -0.2];
        let first = network.process(&inputs).unwrap();
        for _ in 0..5 {
            assert_eq!(network.process(&inputs).unwrap(), first);
        }
    }

    #[test]
    fn randomize_all_stays_in_bounds() {
        let mut rng = SimpleRng::seeded(3);
        let mut network = NeuralNetwork::new(&[6, 8, 4], ActivationType::Tanh).unwrap();
        network.randomize_all(&mut rng);
        assert!(network
            .parameters()
            .all(|p| (-WEIGHT_BOUND..WEIGHT_BOUND).contains(&p)));
        assert!(network.parameters().any(|p| p != 0.0));
    }

    #[test]
    fn clones_are_independent() {
        let mut rng = SimpleRng::seeded(15);
        let original = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        for inputs in [[0.0; 4], [1.0, -1.0, 0.5, 0.25], [-3.0, 2.0, 0.9, 7.5]] {
            assert_eq!(copy.process(&inputs).unwrap(), original.process(&inputs).unwrap());
        }
        copy.mutate_weights(1.0, &mut rng);
        copy.mutate_biases(1.0, &mut rng);
        assert_ne!(copy, original);
        assert_eq!(original.layer_sizes(), copy.layer_sizes());
    }

    #[test]
    fn zero_rate_mutation_is_a_no_op() {
        let mut rng = SimpleRng::seeded(8);
        let original = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
        let mut mutated = original.clone();
        mutated.mutate_weights(0.0, &mut rng);
        mutated.mutate_biases(0.0, &mut rng);
        assert_eq!(mutated, original);
    }

    #[test]
    fn full_rate_mutation_replaces_everything() {
        let mut network = sample_network();
        // Every gen_bool succeeds, every redraw lands on 0.
        let mut rng = ScriptedSource::new(vec![0.0, 0.5]);
        network.mutate_weights(1.0, &mut rng);
        assert!(network.weights(0).unwrap().iter().all(|w| *w == 0.0));
        assert!(network.weights(1).unwrap().iter().all(|w| *w == 0.0));
        assert_eq!(network.biases(0).unwrap(), &[0.0, 1.0]);

        network.mutate_biases(1.0, &mut rng);
        assert!(network.parameters().all(|p| p == 0.0));
    }

    #[test]
    fn mutation_preserves_shape() {
        let mut rng = SimpleRng::seeded(21);
        let mut network = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
        Genome::mutate(&mut network, 0.5, &mut rng);
        assert_eq!(network.layer_sizes(), &[4, 3, 2]);
        assert_eq!(network.parameters().count(), 3 * 4 + 3 + 2 * 3 + 2);
    }

    #[test]
    fn crossover_takes_each_gene_from_a_parent() {
        let mut rng = SimpleRng::seeded(4);
        let config = NetworkConfig::new(vec![3, 5, 2], ActivationType::Gaussian);
        let a = NeuralNetwork::random(&config, &mut rng).unwrap();
        let b = NeuralNetwork::random(&config, &mut rng).unwrap();
        let (a_before, b_before) = (a.clone(), b.clone());

        let child = a.crossover(&b, &mut rng).unwrap();
        assert_eq!(child.layer_sizes(), a.layer_sizes());
        for ((c, x), y) in child.parameters().zip(a.parameters()).zip(b.parameters()) {
            assert!(c == x || c == y);
        }
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn crossover_follows_coin_flips() {
        let a = NeuralNetwork::new(&[1, 2], ActivationType::Identity).unwrap();
        let mut b = a.clone();
        b.set_transition(0, &[1.0, 1.0], &[1.0, 1.0]).unwrap();
        // Heads, tails, heads, tails.
        let mut rng = ScriptedSource::new(vec![0.2, 0.8]);
        let child = a.crossover(&b, &mut rng).unwrap();
        assert_eq!(child.weights(0).unwrap(), &[0.0, 1.0]);
        assert_eq!(child.biases(0).unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn crossover_of_identical_parents_is_identity() {
        let mut rng = SimpleRng::seeded(9);
        let a = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
        assert_eq!(a.crossover(&a.clone(), &mut rng).unwrap(), a);
    }

    #[test]
    fn crossover_rejects_mismatched_topologies() {
        let mut rng = SimpleRng::seeded(1);
        let a = NeuralNetwork::new(&[4, 3, 2], ActivationType::Sigmoid).unwrap();
        let b = NeuralNetwork::new(&[4, 4, 2], ActivationType::Sigmoid).unwrap();
        assert!(matches!(
            a.crossover(&b, &mut rng),
            Err(NetworkError::TopologyMismatch { .. })
        ));
    }

    #[test]
    fn set_transition_validates_dimensions() {
        let mut network = sample_network();
        let before = network.clone();
        assert!(matches!(
            network.set_transition(2, &[], &[]),
            Err(NetworkError::NoSuchTransition { index: 2, count: 2 })
        ));
        assert!(matches!(
            network.set_transition(1, &[1.0], &[0.0]),
            Err(NetworkError::Dimension {
                expected: 2,
                found: 1
            })
        ));
        assert!(network.set_transition(1, &[1.0, 1.0], &[]).is_err());
        assert_eq!(network, before);
    }

    #[test]
    fn serde_rejects_inconsistent_dimensions() {
        let json = r#"{
            "layer_sizes": [2, 1],
            "activation": "Identity",
            "transitions": [{ "weights": [1.0], "biases": [0.0] }]
        }"#;
        assert!(serde_json::from_str::<NeuralNetwork>(json).is_err());

        let json = r#"{
            "layer_sizes": [2, 1],
            "activation": "Identity",
            "transitions": []
        }"#;
        assert!(serde_json::from_str::<NeuralNetwork>(json).is_err());

        let network = sample_network();
        let text = serde_json::to_string(&network).unwrap();
        assert_eq!(serde_json::from_str::<NeuralNetwork>(&text).unwrap(), network);
    }

    #[test]
    fn serde_rejects_huge_sizes_without_allocating() {
        let json = r#"{
            "layer_sizes": [4294967295, 4294967295],
            "activation": "Sigmoid",
            "transitions": []
        }"#;
        assert!(serde_json::from_str::<NeuralNetwork>(json).is_err());

        let json = r#"{
            "layer_sizes": [4294967295, 4294967295],
            "activation": "Sigmoid",
            "transitions": [{ "weights": [], "biases": [] }]
        }"#;
        assert!(serde_json::from_str::<NeuralNetwork>(json).is_err());
    }

    #[test]
    fn tied_relu_outputs_do_not_pick_the_first_action() {
        let mut network = NeuralNetwork::new(&[4, 2], ActivationType::ReLU).unwrap();
        network.set_transition(0, &[0.0; 8], &[-0.5, -0.3]).unwrap();
        let inputs = [0.4, 0.6, 0.5, 0.1];
        assert_eq!(network.process(&inputs).unwrap(), vec![0.0, 0.0]);
        assert_eq!(flapevo::Organism::from_brain(network).decide(&inputs).unwrap(), 1);
    }
}
