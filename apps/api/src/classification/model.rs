//! Dense feed-forward classifier evaluated in pure Rust.
//!
//! Artifact format: `{"layers": [{"weights": [[..]; in], "bias": [..; out], "activation": "relu"}]}`,
//! weights laid out input-major (`weights[i][j]` connects input `i` to output `j`),
//! the same orientation Keras `Dense.get_weights()` exports.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to fetch artifact: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("artifact shape mismatch: {0}")]
    Shape(String),

    #[error("class index {index} has no label")]
    UnknownClass { index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => {
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let mut sum = 0.0;
                for v in values.iter_mut() {
                    *v = (*v - max).exp();
                    sum += *v;
                }
                if sum > 0.0 {
                    values.iter_mut().for_each(|v| *v /= sum);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn input_len(&self) -> usize {
        self.weights.len()
    }

    fn output_len(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut output = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (out, w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
        self.activation.apply(&mut output);
        output
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenseModel {
    pub layers: Vec<DenseLayer>,
}

impl DenseModel {
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Checks that layers chain together and that the model consumes
    /// `input_len` features and emits `classes` scores.
    pub fn validate(&self, input_len: usize, classes: usize) -> Result<(), ModelError> {
        let first = self
            .layers
            .first()
            .ok_or_else(|| ModelError::Shape("model has no layers".to_string()))?;
        if first.input_len() != input_len {
            return Err(ModelError::Shape(format!(
                "model expects {} inputs, tokenizer produces {input_len}",
                first.input_len()
            )));
        }

        let mut expected_in = input_len;
        for (n, layer) in self.layers.iter().enumerate() {
            if layer.input_len() != expected_in {
                return Err(ModelError::Shape(format!(
                    "layer {n} takes {} inputs, previous layer emits {expected_in}",
                    layer.input_len()
                )));
            }
            if let Some(row) = layer
                .weights
                .iter()
                .find(|row| row.len() != layer.output_len())
            {
                return Err(ModelError::Shape(format!(
                    "layer {n} has a weight row of width {}, bias width {}",
                    row.len(),
                    layer.output_len()
                )));
            }
            expected_in = layer.output_len();
        }

        if expected_in != classes {
            return Err(ModelError::Shape(format!(
                "model emits {expected_in} classes, {classes} labels configured"
            )));
        }
        Ok(())
    }

    pub fn predict(&self, input: &[f32]) -> Vec<f32> {
        self.layers
            .iter()
            .fold(input.to_vec(), |activations, layer| layer.forward(&activations))
    }
}

/// Index of the highest score. NaN scores never win.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
