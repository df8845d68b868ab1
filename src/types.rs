//! Type aliases, constants, and defaults for the modal-sound library.

use nalgebra::SMatrix;

// Local spring block for one edge (two nodes × three translational DOF)
pub type Matrix6 = SMatrix<f64, 6, 6>;

// Core constants
pub const DOF_PER_NODE: usize = 3;
pub const MIN_VERTICES: usize = 3;

/// Lower audible-band limit (Hz), exclusive.
pub const DEFAULT_MIN_FREQUENCY_HZ: f64 = 20.0;

/// Upper audible-band limit (Hz), exclusive.
pub const DEFAULT_MAX_FREQUENCY_HZ: f64 = 22_000.0;

/// Merge-threshold curve control points `(frequency_hz, threshold_hz)`.
/// Approximates auditory critical-band width.
pub const DEFAULT_MERGE_CURVE: [(f64, f64); 3] = [(15.0, 3.0), (2000.0, 45.0), (8000.0, 90.0)];

/// Default convergence tolerance handed to the symmetric eigensolver.
pub const DEFAULT_EIGEN_EPS: f64 = f64::EPSILON;

/// Maximum eigensolver iterations; 0 means iterate until converged.
pub const DEFAULT_EIGEN_MAX_ITER: usize = 0;

/// Gain magnitude at or below which a merged mode counts as silent.
pub const ZERO_GAIN_TOL: f64 = 0.0;

/// Decimal places kept for frequencies in the serialized model.
pub const FREQUENCY_DECIMALS: i32 = 3;

/// Decimal places kept for gains in the serialized model.
pub const GAIN_DECIMALS: i32 = 7;

/// Tolerance used when checking symmetry of assembled matrices.
pub const SYMMETRY_TOL: f64 = 1e-9;
