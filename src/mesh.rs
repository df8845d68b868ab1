//! Triangle shell mesh representation, connectivity, and plate generation.
//!
//! This module provides the `TriMesh` struct, the per-triangle edge
//! connectivity consumed by the stiffness assembler, and a generator for flat
//! rectangular plates.

use nalgebra::Vector3;

use crate::error::{ModalError, Result};
use crate::types::{DOF_PER_NODE, MIN_VERTICES};

/// Undirected edge between two vertex indices, in triangle winding order.
pub type Edge = (usize, usize);

/// Triangulated shell mesh.
#[derive(Debug, Clone)]
pub struct TriMesh {
    pub vertices: Vec<Vector3<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriMesh {
    pub fn new(vertices: Vec<Vector3<f64>>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Build a mesh from a flat `[x0, y0, z0, x1, ...]` array.
    ///
    /// Fails if the array length is not a multiple of three or fewer than
    /// three vertices are present. Triangle indices are checked later, by
    /// [`TriMesh::connectivity_map`].
    pub fn from_flat(vertices: &[f64], triangles: Vec<[usize; 3]>) -> Result<Self> {
        if vertices.len() % DOF_PER_NODE != 0 {
            return Err(ModalError::MalformedVertices {
                len: vertices.len(),
            });
        }
        let points: Vec<Vector3<f64>> = vertices
            .chunks_exact(DOF_PER_NODE)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        if points.len() < MIN_VERTICES {
            return Err(ModalError::TooFewVertices {
                count: points.len(),
            });
        }
        Ok(Self::new(points, triangles))
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Total degrees of freedom (3 per vertex).
    pub fn num_dofs(&self) -> usize {
        self.vertices.len() * DOF_PER_NODE
    }

    /// Flat `[x0, y0, z0, x1, ...]` copy of the vertex positions.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    /// Per-triangle edges `(n0,n1), (n1,n2), (n2,n0)`, preserving triangle order.
    ///
    /// Shared edges appear once per triangle that contains them.
    pub fn connectivity_map(&self) -> Result<Vec<[Edge; 3]>> {
        let num_vertices = self.vertices.len();
        self.triangles
            .iter()
            .enumerate()
            .map(|(triangle, &[n0, n1, n2])| {
                if let Some(&vertex) = [n0, n1, n2].iter().find(|&&n| n >= num_vertices) {
                    return Err(ModalError::IndexOutOfRange {
                        triangle,
                        vertex,
                        num_vertices,
                    });
                }
                Ok([(n0, n1), (n1, n2), (n2, n0)])
            })
            .collect()
    }

    /// Indices of vertices not referenced by any triangle.
    pub fn isolated_vertices(&self) -> Vec<usize> {
        let mut referenced = vec![false; self.vertices.len()];
        for tri in &self.triangles {
            for &n in tri {
                if let Some(flag) = referenced.get_mut(n) {
                    *flag = true;
                }
            }
        }
        referenced
            .iter()
            .enumerate()
            .filter(|(_, &r)| !r)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Generate a flat rectangular plate in the z = 0 plane.
///
/// The plate spans `[0, width] × [0, height]` with `nx × ny` quads, each split
/// into two triangles along its diagonal. Node index = `ix * (ny + 1) + iy`.
pub fn generate_plate_mesh(width: f64, height: f64, nx: usize, ny: usize) -> TriMesh {
    assert!(nx > 0 && ny > 0, "plate needs at least one cell per side");
    let dx = width / nx as f64;
    let dy = height / ny as f64;
    let nny = ny + 1;

    let node_idx = |ix: usize, iy: usize| -> usize { ix * nny + iy };

    let mut vertices = Vec::with_capacity((nx + 1) * nny);
    for ix in 0..=nx {
        for iy in 0..=ny {
            vertices.push(Vector3::new(ix as f64 * dx, iy as f64 * dy, 0.0));
        }
    }

    let mut triangles = Vec::with_capacity(2 * nx * ny);
    for ix in 0..nx {
        for iy in 0..ny {
            let n0 = node_idx(ix, iy);
            let n1 = node_idx(ix + 1, iy);
            let n2 = node_idx(ix + 1, iy + 1);
            let n3 = node_idx(ix, iy + 1);
            triangles.push([n0, n1, n2]);
            triangles.push([n0, n2, n3]);
        }
    }

    TriMesh::new(vertices, triangles)
}
