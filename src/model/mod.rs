//! Regression model used for price inference.
//!
//! The trained network is a stack of fully connected layers, each computing
//! `activation(x · kernel + bias)` with `kernel` shaped `[in, out]`, the same
//! layout a Keras `Dense` layer stores. Weights live in a safetensors file:
//!
//! - `dense_{i}.kernel`: `[in, out]`, F32
//! - `dense_{i}.bias`: `[out]`, F32
//! - metadata `activations`: comma separated, one per layer (`relu,relu,linear`)
//!
//! # Example
//!
//! ```no_run
//! use envios::model::{load_network, Regressor};
//! use ndarray::Array2;
//!
//! let model = load_network("modelo_envios.safetensors")?;
//! let x = Array2::<f32>::zeros((1, model.input_dim()));
//! let y = model.predict(x.view())?;
//! println!("price = {}", y[[0, 0]]);
//! # Ok::<(), envios::Error>(())
//! ```

mod load;
mod save;

pub use load::load_network;
pub use save::save_network;

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2};
use std::fmt;
use std::str::FromStr;

/// A model mapping a batch of feature rows to a batch of scalar outputs.
///
/// Implementations must be callable concurrently from many requests.
pub trait Regressor: Send + Sync {
    /// Number of features each input row must carry.
    fn input_dim(&self) -> usize;

    /// Run inference on `[batch, input_dim]`, returning `[batch, 1]`.
    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Array2<f32>>;
}

/// Element-wise activation applied after a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Elu,
    Softplus,
}

impl Activation {
    fn apply(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::Relu => x.max(0.0),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
            Self::Elu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp_m1()
                }
            }
            Self::Softplus => x.exp().ln_1p(),
        }
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "identity" | "none" => Ok(Self::Linear),
            "relu" => Ok(Self::Relu),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "elu" => Ok(Self::Elu),
            "softplus" => Ok(Self::Softplus),
            other => Err(Error::InvalidModel(format!("unsupported activation '{other}'"))),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Elu => "elu",
            Self::Softplus => "softplus",
        };
        f.write_str(name)
    }
}

/// One fully connected layer.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    kernel: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    /// Build a layer, checking that `bias` matches the kernel's output width.
    pub fn new(kernel: Array2<f32>, bias: Array1<f32>, activation: Activation) -> Result<Self> {
        if kernel.ncols() != bias.len() {
            return Err(Error::InvalidModel(format!(
                "bias has {} units but kernel produces {}",
                bias.len(),
                kernel.ncols()
            )));
        }
        Ok(Self { kernel, bias, activation })
    }

    pub fn input_dim(&self) -> usize {
        self.kernel.nrows()
    }

    pub fn output_dim(&self) -> usize {
        self.kernel.ncols()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn kernel(&self) -> &Array2<f32> {
        &self.kernel
    }

    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        let mut out = x.dot(&self.kernel) + &self.bias;
        let activation = self.activation;
        out.mapv_inplace(|v| activation.apply(v));
        out
    }
}

/// Feed-forward regression network with a single output unit.
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    name: String,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Assemble a network, validating that layer shapes chain and end in one output.
    pub fn new(name: impl Into<String>, layers: Vec<DenseLayer>) -> Result<Self> {
        let Some(last) = layers.last() else {
            return Err(Error::InvalidModel("network has no layers".to_string()));
        };
        if last.output_dim() != 1 {
            return Err(Error::InvalidModel(format!(
                "final layer must have 1 output unit, found {}",
                last.output_dim()
            )));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_dim() != pair[1].input_dim() {
                return Err(Error::InvalidModel(format!(
                    "layer {} outputs {} units but layer {} expects {}",
                    i,
                    pair[0].output_dim(),
                    i + 1,
                    pair[1].input_dim()
                )));
            }
        }
        Ok(Self { name: name.into(), layers })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Total number of weights and biases.
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(|l| l.kernel.len() + l.bias.len()).sum()
    }
}

impl Regressor for DenseNetwork {
    fn input_dim(&self) -> usize {
        // new() guarantees at least one layer
        self.layers.first().map_or(0, DenseLayer::input_dim)
    }

    fn predict(&self, batch: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        if batch.ncols() != self.input_dim() {
            return Err(Error::ShapeMismatch {
                expected: vec![batch.nrows(), self.input_dim()],
                actual: batch.shape().to_vec(),
            });
        }
        let mut x = batch.to_owned();
        for layer in &self.layers {
            x = layer.forward(x.view());
        }
        Ok(x)
    }
}
