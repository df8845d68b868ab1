//! # modal-sound
//!
//! Builds modal sound models from triangulated shell meshes.
//!
//! A mesh and its material become a spring-mass system: a lumped mass
//! matrix from triangle areas and a stiffness matrix from one spring per
//! triangle edge. The generalized eigenproblem `K·v = λ·M·v` gives the
//! undamped modes. Rayleigh-style damping turns each eigenvalue into a
//! complex natural frequency. Modes outside the audible band are culled, and
//! modes within one critical band of each other are merged.
//!
//! ```
//! use modal_sound::{compute_modal_model, generate_plate_mesh, AnalysisConfig, Material};
//!
//! let mesh = generate_plate_mesh(0.3, 0.2, 4, 3);
//! let model = compute_modal_model(&mesh, &Material::aluminum_sheet(), &AnalysisConfig::default())
//!     .unwrap();
//!
//! for mode in model.modes() {
//!     println!("{:.1} Hz, decay {:.3}", mode.frequency_hz, mode.decay_rate);
//! }
//! let record = model.to_record().with_id("plate");
//! assert_eq!(record.vertices, mesh.num_dofs());
//! ```

pub mod assembly;
pub mod config;
pub mod element;
pub mod error;
pub mod material;
pub mod mesh;
pub mod model;
pub mod modes;
pub mod pipeline;
pub mod request;
pub mod solver;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use assembly::{
    assemble_mass, assemble_stiffness_dense, assemble_stiffness_sparse, MassMatrix, StiffnessMatrix,
};
pub use config::{AnalysisConfig, AudibleBand, EigenSettings, MergeCurve};
pub use element::{edge_lengths, edge_spring_block, heron_area, triangle_areas};
pub use error::{ModalError, Result};
pub use material::Material;
pub use mesh::{generate_plate_mesh, Edge, TriMesh};
pub use model::{round_to, ModalModel, ModelRecord};
pub use modes::{
    aggregate_modes, apply_damping, complex_natural_frequency, cull_to_band, DampedMode, Mode,
};
pub use pipeline::{compute_modal_model, compute_model_json, compute_model_record};
pub use request::{flatten_vertices, MeshRecord, ModelRequest, Point, TriangleRecord, VertexRecord};
pub use solver::{solve_generalized, solve_lumped, EigenDecomposition};
pub use types::*;
