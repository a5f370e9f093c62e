use crate::networks::ActivationType;

use serde::{Deserialize, Serialize};

/// Configuration data for network generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Neuron count of each layer, from the input
    /// layer to the output layer. At least two
    /// non-empty layers are required.
    pub layer_sizes: Vec<usize>,
    /// Activation type of every non-input layer.
    pub activation: ActivationType,
}

impl NetworkConfig {
    /// Returns a configuration with the specified
    /// layer sizes and activation.
    pub fn new(layer_sizes: Vec<usize>, activation: ActivationType) -> NetworkConfig {
        NetworkConfig {
            layer_sizes,
            activation,
        }
    }

    /// Returns a configuration with no layers and
    /// sigmoid activation. Not a valid configuration
    /// on its own; meant for filling in the fields
    /// left unspecified.
    ///
    /// # Examples
    /// ```
    /// use flapevo_nn::{NetworkConfig, NeuralNetwork};
    /// use flapevo::SimpleRng;
    ///
    /// let config = NetworkConfig {
    ///     layer_sizes: vec![3, 1],
    ///     ..NetworkConfig::zero()
    /// };
    /// assert!(NeuralNetwork::random(&config, &mut SimpleRng::seeded(0)).is_ok());
    /// assert!(NeuralNetwork::random(&NetworkConfig::zero(), &mut SimpleRng::seeded(0)).is_err());
    /// ```
    pub const fn zero() -> NetworkConfig {
        NetworkConfig {
            layer_sizes: Vec::new(),
            activation: ActivationType::Sigmoid,
        }
    }
}

impl Default for NetworkConfig {
    /// Four sensors, three hidden neurons and two
    /// competing actions, with sigmoid activation.
    fn default() -> NetworkConfig {
        NetworkConfig::new(vec![4, 3, 2], ActivationType::Sigmoid)
    }
}
