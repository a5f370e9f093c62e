use serde::{Deserialize, Serialize};

use std::f64::consts::PI;

/// An ActivationType identifies the nonlinearity
/// applied by every non-input layer of a network.
///
/// Each variant has a stable one-byte identifier,
/// used by the binary network format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActivationType {
    // 1 / (1 + exp(-x))
    Sigmoid = 0,
    // tanh(x)
    Tanh = 1,
    // max(0, x)
    ReLU = 2,
    // x
    Identity = 3,
    // exp(-x²)
    Gaussian = 4,
    // sin(πx)
    Sinusoidal = 5,
}

/// A nonlinearity paired with its derivative.
///
/// Evolution only ever runs networks forward, so
/// the derivative is never used by this crate; it is
/// carried for callers that need it.
#[derive(Clone, Copy)]
pub struct ActivationFunction {
    pub function: fn(f64) -> f64,
    pub derivative: fn(f64) -> f64,
}

impl ActivationType {
    /// Every activation type, in identifier order.
    pub const ALL: [ActivationType; 6] = [
        ActivationType::Sigmoid,
        ActivationType::Tanh,
        ActivationType::ReLU,
        ActivationType::Identity,
        ActivationType::Gaussian,
        ActivationType::Sinusoidal,
    ];

    /// Returns the type's stable identifier.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Returns the type with the given identifier, if any.
    ///
    /// # Examples
    /// ```
    /// use flapevo_nn::ActivationType;
    ///
    /// assert_eq!(ActivationType::from_id(1), Some(ActivationType::Tanh));
    /// assert_eq!(ActivationType::from_id(200), None);
    /// ```
    pub fn from_id(id: u8) -> Option<ActivationType> {
        Self::ALL.get(id as usize).copied()
    }

    /// Returns the function and derivative pair.
    pub fn function(self) -> ActivationFunction {
        match self {
            ActivationType::Sigmoid => ActivationFunction {
                function: sigmoid,
                derivative: |x| sigmoid(x) * (1.0 - sigmoid(x)),
            },
            ActivationType::Tanh => ActivationFunction {
                function: f64::tanh,
                derivative: |x| 1.0 - x.tanh().powi(2),
            },
            ActivationType::ReLU => ActivationFunction {
                function: |x| x.max(0.0),
                derivative: |x| if x > 0.0 { 1.0 } else { 0.0 },
            },
            ActivationType::Identity => ActivationFunction {
                function: |x| x,
                derivative: |_| 1.0,
            },
            ActivationType::Gaussian => ActivationFunction {
                function: |x| (-x.powi(2)).exp(),
                derivative: |x| -2.0 * x * (-x.powi(2)).exp(),
            },
            ActivationType::Sinusoidal => ActivationFunction {
                function: |x| (PI * x).sin(),
                derivative: |x| PI * (PI * x).cos(),
            },
        }
    }

    /// Applies the nonlinearity to `x`.
    pub fn apply(self, x: f64) -> f64 {
        (self.function().function)(x)
    }

    /// Evaluates the nonlinearity's derivative at `x`.
    pub fn derivative(self, x: f64) -> f64 {
        (self.function().derivative)(x)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
