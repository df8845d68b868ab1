//! Request records supplied by the hosting service.
//!
//! Vertices arrive either as a flat `[x0, y0, z0, ...]` array or as an array
//! of `{x, y, z}` objects; triangles either flat or as index triples.
//! [`flatten_vertices`] is the single conversion to the flat form.

use serde::{Deserialize, Serialize};

use crate::error::{ModalError, Result};
use crate::material::Material;
use crate::mesh::TriMesh;

/// Vertex position as sent by object-oriented clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Vertex positions in either accepted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexRecord {
    Flat(Vec<f64>),
    Points(Vec<Point>),
}

/// Triangle indices in either accepted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriangleRecord {
    Flat(Vec<usize>),
    Nested(Vec<[usize; 3]>),
}

/// Flatten vertex positions to `[x0, y0, z0, x1, ...]`.
///
/// A flat record is returned as is; its length is checked by [`TriMesh::from_flat`].
pub fn flatten_vertices(vertices: &VertexRecord) -> Vec<f64> {
    match vertices {
        VertexRecord::Flat(flat) => flat.clone(),
        VertexRecord::Points(points) => points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
    }
}

impl TriangleRecord {
    /// Index triples in triangle order.
    pub fn to_triples(&self) -> Result<Vec<[usize; 3]>> {
        match self {
            TriangleRecord::Nested(triples) => Ok(triples.clone()),
            TriangleRecord::Flat(flat) => {
                if flat.len() % 3 != 0 {
                    return Err(ModalError::MalformedTriangles { len: flat.len() });
                }
                Ok(flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
            }
        }
    }
}

/// Mesh part of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    pub triangles: TriangleRecord,
    pub vertices: VertexRecord,
}

impl MeshRecord {
    pub fn to_mesh(&self) -> Result<TriMesh> {
        let flat = flatten_vertices(&self.vertices);
        TriMesh::from_flat(&flat, self.triangles.to_triples()?)
    }
}

impl From<&TriMesh> for MeshRecord {
    fn from(mesh: &TriMesh) -> Self {
        Self {
            triangles: TriangleRecord::Nested(mesh.triangles.clone()),
            vertices: VertexRecord::Flat(mesh.flat_vertices()),
        }
    }
}

/// A complete modal-model request: mesh plus material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub mesh: MeshRecord,
    pub material: Material,
}

impl ModelRequest {
    pub fn new(mesh: &TriMesh, material: Material) -> Self {
        Self {
            mesh: MeshRecord::from(mesh),
            material,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
