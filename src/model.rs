//! The final modal model and its serialized record.

use serde::{Deserialize, Serialize};

use crate::modes::Mode;
use crate::types::{FREQUENCY_DECIMALS, GAIN_DECIMALS};

/// Round half to even at `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Ordered, immutable set of synthesis-ready modes for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalModel {
    num_dofs: usize,
    modes: Vec<Mode>,
}

impl ModalModel {
    /// Every mode's gain vector must have length `num_dofs`.
    pub fn new(num_dofs: usize, modes: Vec<Mode>) -> Self {
        debug_assert!(modes.iter().all(|m| m.gains.len() == num_dofs));
        Self { num_dofs, modes }
    }

    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }

    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// True when no mode survived culling and aggregation.
    pub fn is_degenerate(&self) -> bool {
        self.modes.is_empty()
    }

    /// Package the model for transport.
    ///
    /// Frequencies are rounded to 3 decimals and gains to 7; decay rates keep
    /// full precision. Gains are flattened DOF-major: every mode's gain for
    /// DOF 0, then every mode's gain for DOF 1, and so on.
    pub fn to_record(&self) -> ModelRecord {
        let freqs = self
            .modes
            .iter()
            .map(|m| round_to(m.frequency_hz, FREQUENCY_DECIMALS))
            .collect();
        let decays = self.modes.iter().map(|m| m.decay_rate).collect();

        let mut gains = Vec::with_capacity(self.num_dofs * self.modes.len());
        for dof in 0..self.num_dofs {
            gains.extend(self.modes.iter().map(|m| round_to(m.gains[dof], GAIN_DECIMALS)));
        }

        ModelRecord {
            vertices: self.num_dofs,
            modes: self.modes.len(),
            freqs,
            decays,
            gains,
            id: None,
        }
    }
}

/// Serialized modal model as exchanged with synthesis clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Number of degrees of freedom (3 per mesh vertex).
    pub vertices: usize,
    /// Number of modes.
    pub modes: usize,
    pub freqs: Vec<f64>,
    pub decays: Vec<f64>,
    /// DOF-major flattened gain matrix (`vertices × modes`).
    pub gains: Vec<f64>,
    /// Opaque caller-supplied tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ModelRecord {
    /// Attach the caller's identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Gain of `mode` at degree of freedom `dof`.
    pub fn gain(&self, dof: usize, mode: usize) -> Option<f64> {
        if dof >= self.vertices || mode >= self.modes {
            return None;
        }
        self.gains.get(dof * self.modes + mode).copied()
    }

    /// Gains of one mode across all degrees of freedom.
    pub fn mode_shape(&self, mode: usize) -> Option<Vec<f64>> {
        if mode >= self.modes {
            return None;
        }
        (0..self.vertices).map(|dof| self.gain(dof, mode)).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
