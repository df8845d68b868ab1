//! Error types for modal-sound.
//!
//! Input errors describe a malformed mesh, material, or configuration.
//! Numeric errors describe a failure inside the eigen-decomposition.
//! A mesh that yields no audible modes is not an error; see
//! [`ModalModel::is_degenerate`](crate::ModalModel::is_degenerate).

use thiserror::Error;

/// Result type alias using [`ModalError`].
pub type Result<T> = std::result::Result<T, ModalError>;

/// Errors that can occur while building a modal model.
#[derive(Error, Debug)]
pub enum ModalError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {vertex}, but mesh has {num_vertices} vertices")]
    IndexOutOfRange {
        /// The triangle index.
        triangle: usize,
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A material scalar that must be strictly positive is not.
    #[error("material parameter {name} must be positive, got {value}")]
    NonPositiveMaterial {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A flat vertex array whose length is not a multiple of three.
    #[error("flat vertex array has length {len}, expected a multiple of 3")]
    MalformedVertices {
        /// Length of the flat array.
        len: usize,
    },

    /// A flat triangle array whose length is not a multiple of three.
    #[error("flat triangle array has length {len}, expected a multiple of 3")]
    MalformedTriangles {
        /// Length of the flat array.
        len: usize,
    },

    /// Fewer vertices than a single triangle needs.
    #[error("mesh has {count} vertices, at least 3 are required")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// Analysis configuration is inconsistent.
    #[error("invalid analysis configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// The mass matrix is not positive definite (e.g. an isolated vertex).
    #[error("mass matrix is not positive definite")]
    SingularMass,

    /// The eigensolver failed to converge or produced non-finite values.
    #[error("eigensolver did not converge")]
    NoConvergence,

    /// NaN or infinity detected in an intermediate result.
    #[error("non-finite value encountered in {stage}")]
    NonFinite {
        /// Pipeline stage that produced the value.
        stage: &'static str,
    },

    /// Malformed JSON at the request boundary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModalError {
    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ModalError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True for errors caused by malformed caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ModalError::IndexOutOfRange { .. }
                | ModalError::NonPositiveMaterial { .. }
                | ModalError::MalformedVertices { .. }
                | ModalError::MalformedTriangles { .. }
                | ModalError::TooFewVertices { .. }
                | ModalError::InvalidConfig { .. }
                | ModalError::Json(_)
        )
    }

    /// True for failures of the numeric pipeline on valid input.
    pub fn is_numeric_error(&self) -> bool {
        matches!(
            self,
            ModalError::SingularMass | ModalError::NoConvergence | ModalError::NonFinite { .. }
        )
    }
}
