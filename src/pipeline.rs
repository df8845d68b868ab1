//! End-to-end modal analysis: (mesh, material) → modal model.
//!
//! Every call builds its own intermediate matrices and mode lists, so calls
//! may run concurrently without sharing state. The eigen-decomposition
//! dominates the cost and blocks until complete.

use crate::assembly::{assemble_mass, assemble_stiffness_sparse};
use crate::config::AnalysisConfig;
use crate::element::triangle_areas;
use crate::error::{ModalError, Result};
use crate::material::Material;
use crate::mesh::TriMesh;
use crate::model::{ModalModel, ModelRecord};
use crate::modes::{aggregate_modes, apply_damping, cull_to_band};
use crate::request::ModelRequest;
use crate::solver::solve_lumped;
use crate::types::MIN_VERTICES;

/// Compute the modal model of a triangulated shell.
///
/// # Arguments
/// * `mesh` - Triangle mesh; every vertex must belong to at least one triangle
/// * `material` - Elastic, inertial, and damping parameters
/// * `config` - Band limits, merge curve, and eigensolver settings
///
/// # Returns
/// The aggregated modes, ascending in frequency. A model with no modes is a
/// valid result (see [`ModalModel::is_degenerate`]).
///
/// # Errors
/// Input errors for bad indices, material, or configuration; `SingularMass`
/// for isolated vertices; `NoConvergence` / `NonFinite` for numeric failure.
pub fn compute_modal_model(
    mesh: &TriMesh,
    material: &Material,
    config: &AnalysisConfig,
) -> Result<ModalModel> {
    config.validate()?;
    material.validate()?;
    if mesh.num_vertices() < MIN_VERTICES {
        return Err(ModalError::TooFewVertices {
            count: mesh.num_vertices(),
        });
    }

    let gdof = mesh.num_dofs();
    let edges = mesh.connectivity_map()?;
    let isolated = mesh.isolated_vertices();
    if !isolated.is_empty() {
        log::warn!("vertices {:?} belong to no triangle and carry no mass", isolated);
        return Err(ModalError::SingularMass);
    }
    let areas = triangle_areas(mesh);
    if areas.iter().any(|a| !a.is_finite()) {
        return Err(ModalError::NonFinite {
            stage: "triangle areas",
        });
    }

    let m = assemble_mass(mesh, &areas, material.areal_density());
    let k = assemble_stiffness_sparse(gdof, &edges, material.edge_stiffness());
    log::debug!(
        "assembled {} dof: {} triangles, {} stiffness entries, total mass {:.6e}",
        gdof,
        mesh.triangles.len(),
        k.nnz(),
        m.total_mass()
    );

    let eig = solve_lumped(&k, &m, &config.eigen)?;
    log::debug!("eigen-decomposition produced {} eigenpairs", eig.len());

    let damped = apply_damping(&eig, material.visco, material.fluid);
    let audible = cull_to_band(damped, &config.band);
    log::debug!(
        "{} of {} modes inside ({}, {}) Hz",
        audible.len(),
        eig.len(),
        config.band.min_hz,
        config.band.max_hz
    );

    let merged = aggregate_modes(&audible, &config.curve, config.zero_gain_tol);
    log::debug!("aggregated {} modes into {}", audible.len(), merged.len());

    let model = ModalModel::new(gdof, merged);
    if model.is_degenerate() {
        log::warn!("no audible modes for {} dof mesh", gdof);
    } else {
        log::info!(
            "modal model: {} modes, {:.3}–{:.3} Hz",
            model.num_modes(),
            model.modes()[0].frequency_hz,
            model.modes()[model.num_modes() - 1].frequency_hz
        );
    }
    Ok(model)
}

/// Compute and serialize a model for a decoded request, tagging it with `id`.
pub fn compute_model_record(
    request: &ModelRequest,
    config: &AnalysisConfig,
    id: Option<&str>,
) -> Result<ModelRecord> {
    let mesh = request.mesh.to_mesh()?;
    let record = compute_modal_model(&mesh, &request.material, config)?.to_record();
    Ok(match id {
        Some(id) => record.with_id(id),
        None => record,
    })
}

/// JSON request in, JSON model record out.
pub fn compute_model_json(json: &str, config: &AnalysisConfig, id: Option<&str>) -> Result<String> {
    let request = ModelRequest::from_json(json)?;
    let record = compute_model_record(&request, config, id)?;
    Ok(record.to_json()?)
}
