//! Global mass and stiffness assembly for the spring-mass shell model.
//!
//! The mass matrix is lumped (diagonal) and stored as its diagonal. The
//! stiffness matrix is stamped edge by edge into sparse or dense storage.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::element::edge_spring_block;
use crate::mesh::{Edge, TriMesh};
use crate::types::DOF_PER_NODE;

/// Lumped mass matrix, stored as its diagonal (length `gdof`).
#[derive(Debug, Clone, PartialEq)]
pub struct MassMatrix {
    pub diagonal: DVector<f64>,
}

impl MassMatrix {
    pub fn num_dofs(&self) -> usize {
        self.diagonal.len()
    }

    /// Sum of the diagonal divided by 3 (each node's mass appears once per DOF).
    pub fn total_mass(&self) -> f64 {
        self.diagonal.sum() / DOF_PER_NODE as f64
    }

    /// Node indices whose mass is zero (not referenced by any triangle).
    pub fn massless_nodes(&self) -> Vec<usize> {
        self.diagonal
            .iter()
            .step_by(DOF_PER_NODE)
            .enumerate()
            .filter(|(_, &m)| m <= 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.diagonal)
    }
}

/// Global stiffness matrix in compressed sparse row form.
pub type StiffnessMatrix = CsrMatrix<f64>;

/// DOF indices `[3n, 3n+1, 3n+2, 3m, 3m+1, 3m+2]` for an edge `(n, m)`.
#[inline]
fn edge_dof_map(edge: &Edge) -> [usize; 6] {
    let (a, b) = *edge;
    [3 * a, 3 * a + 1, 3 * a + 2, 3 * b, 3 * b + 1, 3 * b + 2]
}

/// Lumped mass: each vertex receives `ρ · t · Σ(incident triangle areas)`,
/// replicated over its three translational DOF.
///
/// `areas` must be in triangle order. An isolated vertex yields a zero
/// block; that is a valid (singular) result.
pub fn assemble_mass(mesh: &TriMesh, areas: &[f64], areal_density: f64) -> MassMatrix {
    let mut incident_area = vec![0.0; mesh.num_vertices()];
    for (tri, &area) in mesh.triangles.iter().zip(areas) {
        for &n in tri {
            incident_area[n] += area;
        }
    }

    let diagonal = DVector::from_fn(mesh.num_dofs(), |dof, _| {
        areal_density * incident_area[dof / DOF_PER_NODE]
    });
    MassMatrix { diagonal }
}

/// Sparse stiffness assembly: one 6×6 spring block per edge occurrence.
///
/// Duplicate triplets from shared edges are summed by the COO → CSR conversion.
pub fn assemble_stiffness_sparse(num_dofs: usize, edges: &[[Edge; 3]], k: f64) -> StiffnessMatrix {
    let local = edge_spring_block(k);
    let mut coo = CooMatrix::new(num_dofs, num_dofs);

    for edge in edges.iter().flatten() {
        let dof_map = edge_dof_map(edge);
        for i in 0..6 {
            for j in 0..6 {
                let val = local[(i, j)];
                if val != 0.0 {
                    coo.push(dof_map[i], dof_map[j], val);
                }
            }
        }
    }

    CsrMatrix::from(&coo)
}

/// Dense assembly variant used for small problems and cross-checks.
pub fn assemble_stiffness_dense(num_dofs: usize, edges: &[[Edge; 3]], k: f64) -> DMatrix<f64> {
    let local = edge_spring_block(k);
    let mut mat = DMatrix::<f64>::zeros(num_dofs, num_dofs);

    for edge in edges.iter().flatten() {
        let dof_map = edge_dof_map(edge);
        for i in 0..6 {
            for j in 0..6 {
                mat[(dof_map[i], dof_map[j])] += local[(i, j)];
            }
        }
    }

    mat
}
