//! Move-scoring traits.
//!
//! A `MoveScorer` consumes an `Observation` and returns one score per legal
//! move. Trained models live outside this crate; `LinearScorer` loads
//! exported weights from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::encoder::{Observation, X_FEATURE_SIZE};
use crate::error::{EngineError, Result};

/// Flat tensor with a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor (e.g., [moves, features]).
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Scores every legal move of an observation. Higher is better.
pub trait MoveScorer: Send + Sync {
    /// One score per row of `obs.x_batch`.
    fn score(&self, obs: &Observation) -> Vec<f32>;
}

/// Scores every move the same (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct UniformScorer;

impl MoveScorer for UniformScorer {
    fn score(&self, obs: &Observation) -> Vec<f32> {
        vec![0.0; obs.move_count()]
    }
}

/// Dot product of each 169-float row with a weight vector, plus a bias.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScorer {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

impl LinearScorer {
    pub fn new(weights: Vec<f32>, bias: f32) -> Result<Self> {
        if weights.len() != X_FEATURE_SIZE {
            return Err(EngineError::InvalidModel(format!(
                "linear scorer needs {} weights, got {}",
                X_FEATURE_SIZE,
                weights.len()
            )));
        }
        Ok(Self { weights, bias })
    }

    /// Load `{"weights": [...], "bias": ...}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let parsed: LinearScorer = serde_json::from_str(&text)?;
        Self::new(parsed.weights, parsed.bias)
    }
}

impl MoveScorer for LinearScorer {
    fn score(&self, obs: &Observation) -> Vec<f32> {
        (0..obs.move_count())
            .map(|i| {
                obs.row(i)
                    .iter()
                    .zip(&self.weights)
                    .map(|(x, w)| x * w)
                    .sum::<f32>()
                    + self.bias
            })
            .collect()
    }
}
