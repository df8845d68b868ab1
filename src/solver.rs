//! Generalized symmetric eigensolver for modal analysis.
//!
//! Solves `K·v = λ·M·v` by Cholesky reduction to a standard symmetric
//! problem: with `M = L·Lᵀ`, `A = L⁻¹·K·L⁻ᵀ` shares the eigenvalues and
//! `v = L⁻ᵀ·y` recovers M-orthonormal eigenvectors.

use nalgebra::linalg::SymmetricEigen;
use nalgebra::{DMatrix, DVector};

use crate::assembly::{MassMatrix, StiffnessMatrix};
use crate::config::EigenSettings;
use crate::error::{ModalError, Result};

/// Eigenvalues (ascending) and matching eigenvectors (one per column).
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    pub eigenvalues: DVector<f64>,
    pub eigenvectors: DMatrix<f64>,
}

impl EigenDecomposition {
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

fn ensure_finite(mat: &DMatrix<f64>, stage: &'static str) -> Result<()> {
    if mat.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ModalError::NonFinite { stage })
    }
}

/// Solve `K·v = λ·M·v` for symmetric `K` and symmetric positive definite `M`.
///
/// Returns every eigenpair, sorted by ascending eigenvalue, with eigenvectors
/// normalized so that `Vᵀ·M·V = I`.
///
/// # Errors
/// * `InvalidConfig` if `K` and `M` are not square matrices of equal size
/// * `NonFinite` if either input holds NaN or infinity
/// * `SingularMass` if `M` is not positive definite
/// * `NoConvergence` if the eigensolver fails or yields non-finite values
pub fn solve_generalized(
    k: &DMatrix<f64>,
    m: &DMatrix<f64>,
    settings: &EigenSettings,
) -> Result<EigenDecomposition> {
    let n = k.nrows();
    if !k.is_square() || k.shape() != m.shape() {
        return Err(ModalError::invalid_config(format!(
            "K is {:?} and M is {:?}, both must be the same square shape",
            k.shape(),
            m.shape()
        )));
    }

    ensure_finite(k, "stiffness matrix")?;
    ensure_finite(m, "mass matrix")?;

    let chol = m.clone().cholesky().ok_or(ModalError::SingularMass)?;
    let l_inv = chol
        .l()
        .solve_lower_triangular(&DMatrix::identity(n, n))
        .ok_or(ModalError::SingularMass)?;

    let a = &l_inv * k * l_inv.transpose();
    let a = 0.5 * (&a + a.transpose());

    let eig = SymmetricEigen::try_new(a, settings.eps, settings.max_iterations)
        .ok_or(ModalError::NoConvergence)?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| eig.eigenvalues[i].total_cmp(&eig.eigenvalues[j]));

    let eigenvalues = DVector::from_iterator(n, order.iter().map(|&i| eig.eigenvalues[i]));
    let mut y = DMatrix::zeros(n, n);
    for (col, &i) in order.iter().enumerate() {
        y.set_column(col, &eig.eigenvectors.column(i));
    }
    let eigenvectors = l_inv.transpose() * y;

    if !eigenvalues.iter().all(|v| v.is_finite()) || !eigenvectors.iter().all(|v| v.is_finite()) {
        return Err(ModalError::NoConvergence);
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}

/// Solve the generalized problem for assembled sparse stiffness and lumped mass.
///
/// Massless nodes are reported as `SingularMass` before any factorization.
pub fn solve_lumped(
    k: &StiffnessMatrix,
    m: &MassMatrix,
    settings: &EigenSettings,
) -> Result<EigenDecomposition> {
    let massless = m.massless_nodes();
    if !massless.is_empty() {
        log::debug!("{} massless node(s), first: {}", massless.len(), massless[0]);
        return Err(ModalError::SingularMass);
    }
    // Dense decomposition is required here: every mode in the audible band is wanted
    let k_dense = DMatrix::from(k);
    solve_generalized(&k_dense, &m.to_dense(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{assemble_mass, assemble_stiffness_sparse};
    use crate::element::triangle_areas;
    use crate::mesh::{generate_plate_mesh, TriMesh};
    use nalgebra::Vector3;

    const EIG_TOL: f64 = 1e-9;

    fn unit_triangle() -> TriMesh {
        TriMesh::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn assemble(mesh: &TriMesh) -> (StiffnessMatrix, MassMatrix) {
        let edges = mesh.connectivity_map().unwrap();
        let areas = triangle_areas(mesh);
        (
            assemble_stiffness_sparse(mesh.num_dofs(), &edges, 1.0),
            assemble_mass(mesh, &areas, 1.0),
        )
    }

    #[test]
    fn single_triangle_has_three_rigid_body_modes() {
        let mesh = unit_triangle();
        let (k, m) = assemble(&mesh);
        for &d in m.diagonal.iter() {
            assert!((d - 0.5).abs() < EIG_TOL);
        }

        let eig = solve_lumped(&k, &m, &EigenSettings::default()).unwrap();
        assert_eq!(eig.len(), 9);
        for i in 0..3 {
            assert!(eig.eigenvalues[i].abs() < EIG_TOL, "λ{} = {}", i, eig.eigenvalues[i]);
        }
        // Triangle graph Laplacian has eigenvalue 3, divided by nodal mass 0.5
        for i in 3..9 {
            assert!((eig.eigenvalues[i] - 6.0).abs() < EIG_TOL);
        }
    }

    #[test]
    fn eigenpairs_satisfy_generalized_problem() {
        let mesh = generate_plate_mesh(1.0, 0.7, 3, 2);
        let (k, m) = assemble(&mesh);
        let eig = solve_lumped(&k, &m, &EigenSettings::default()).unwrap();

        let k_dense = DMatrix::from(&k);
        let m_dense = m.to_dense();
        let v = &eig.eigenvectors;

        let residual = &k_dense * v - &m_dense * v * DMatrix::from_diagonal(&eig.eigenvalues);
        assert!(residual.abs().max() < 1e-8);

        let gram = v.transpose() * &m_dense * v;
        let identity = DMatrix::<f64>::identity(v.ncols(), v.ncols());
        assert!((gram - identity).abs().max() < 1e-8);

        for pair in eig.eigenvalues.as_slice().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(eig.eigenvalues.iter().all(|&l| l > -EIG_TOL));
    }

    #[test]
    fn non_diagonal_mass_is_handled() {
        let k = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]);
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
        let eig = solve_generalized(&k, &m, &EigenSettings::default()).unwrap();

        for (i, &lambda) in eig.eigenvalues.iter().enumerate() {
            let v = eig.eigenvectors.column(i);
            let r = &k * v - lambda * (&m * v);
            assert!(r.norm() < 1e-10);
        }
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let k = DMatrix::<f64>::identity(3, 3);
        let m = DMatrix::<f64>::identity(2, 2);
        let err = solve_generalized(&k, &m, &EigenSettings::default()).unwrap_err();
        assert!(matches!(err, ModalError::InvalidConfig { .. }));

        let rect = DMatrix::<f64>::zeros(3, 2);
        assert!(solve_generalized(&rect, &rect, &EigenSettings::default()).is_err());
    }

    #[test]
    fn isolated_vertex_is_singular_mass() {
        let mut mesh = unit_triangle();
        mesh.vertices.push(Vector3::new(5.0, 5.0, 5.0));
        let (k, m) = assemble(&mesh);
        assert!(matches!(
            solve_lumped(&k, &m, &EigenSettings::default()),
            Err(ModalError::SingularMass)
        ));
        assert!(matches!(
            solve_generalized(&DMatrix::from(&k), &m.to_dense(), &EigenSettings::default()),
            Err(ModalError::SingularMass)
        ));
    }

    #[test]
    fn nan_input_is_rejected() {
        let k = DMatrix::from_row_slice(2, 2, &[1.0, f64::NAN, f64::NAN, 1.0]);
        let m = DMatrix::<f64>::identity(2, 2);
        assert!(matches!(
            solve_generalized(&k, &m, &EigenSettings::default()),
            Err(ModalError::NonFinite { .. })
        ));
    }
}
