//! Per-triangle quantities: edge lengths, areas, and the edge spring block.
//!
//! ## Parallelization
//!
//! When the `parallel` feature is enabled, triangle areas are evaluated with
//! Rayon. Results are identical to the sequential path.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mesh::TriMesh;
use crate::types::Matrix6;

/// Triangle area from its three side lengths.
///
/// Sides are sorted so that `a ≥ b ≥ c` and the area is evaluated as
/// `√[(a+(b+c))(c−(a−b))(c+(a−b))(a+(b−c))] / 4`, the cancellation-safe
/// form of Heron's formula. Collinear triangles give zero, never NaN.
pub fn heron_area(sides: [f64; 3]) -> f64 {
    let mut s = sides;
    s.sort_by(|x, y| y.total_cmp(x));
    let [a, b, c] = s;
    let h = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
    // Rounding can push a degenerate product slightly negative
    h.max(0.0).sqrt() / 4.0
}

/// Side lengths of one triangle, in edge order `(n0,n1), (n1,n2), (n2,n0)`.
#[inline]
pub fn edge_lengths(mesh: &TriMesh, triangle: &[usize; 3]) -> [f64; 3] {
    let [n0, n1, n2] = *triangle;
    let v = &mesh.vertices;
    [
        (v[n0] - v[n1]).norm(),
        (v[n1] - v[n2]).norm(),
        (v[n2] - v[n0]).norm(),
    ]
}

/// Area of every triangle, sequentially.
#[cfg_attr(feature = "parallel", allow(dead_code))]
fn triangle_areas_sequential(mesh: &TriMesh) -> Vec<f64> {
    mesh.triangles
        .iter()
        .map(|tri| heron_area(edge_lengths(mesh, tri)))
        .collect()
}

/// Area of every triangle, in parallel using Rayon.
#[cfg(feature = "parallel")]
fn triangle_areas_parallel(mesh: &TriMesh) -> Vec<f64> {
    mesh.triangles
        .par_iter()
        .map(|tri| heron_area(edge_lengths(mesh, tri)))
        .collect()
}

/// Area of every triangle, in triangle order.
///
/// Indices must already be validated (see [`TriMesh::connectivity_map`]).
pub fn triangle_areas(mesh: &TriMesh) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        triangle_areas_parallel(mesh)
    }
    #[cfg(not(feature = "parallel"))]
    {
        triangle_areas_sequential(mesh)
    }
}

/// 6×6 spring block for one edge: `+k·I₃` on the diagonal sub-blocks and
/// `−k·I₃` on the cross sub-blocks.
pub fn edge_spring_block(k: f64) -> Matrix6 {
    let mut block = Matrix6::zeros();
    for i in 0..3 {
        block[(i, i)] = k;
        block[(i + 3, i + 3)] = k;
        block[(i, i + 3)] = -k;
        block[(i + 3, i)] = -k;
    }
    block
}
