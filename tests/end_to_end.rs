use modal_sound::{
    aggregate_modes, apply_damping, assemble_mass, assemble_stiffness_sparse, compute_modal_model,
    cull_to_band, generate_plate_mesh, solve_lumped, triangle_areas, AnalysisConfig, EigenSettings,
    Material, ModalError, TriMesh,
};
use nalgebra::{DVector, Vector3};

const EIG_TOL: f64 = 1e-9;

fn unit_triangle() -> TriMesh {
    TriMesh::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![[0, 1, 2]]).unwrap()
}

#[test]
fn unit_triangle_reproduces_reference_matrices() {
    let mesh = unit_triangle();
    let material = Material::new(1.0, 1.0, 1.0, 0.0, 0.0);
    let areas = triangle_areas(&mesh);
    assert!((areas[0] - 0.5).abs() < EIG_TOL);
    assert!((material.edge_stiffness() - 1.0).abs() < EIG_TOL);

    let edges = mesh.connectivity_map().unwrap();
    let k = assemble_stiffness_sparse(mesh.num_dofs(), &edges, material.edge_stiffness());
    let m = assemble_mass(&mesh, &areas, material.areal_density());
    assert_eq!(m.num_dofs(), 9);
    assert!(m.diagonal.iter().all(|&d| (d - 0.5).abs() < EIG_TOL));

    let eig = solve_lumped(&k, &m, &EigenSettings::default()).unwrap();
    let rigid = eig.eigenvalues.iter().filter(|l| l.abs() < EIG_TOL).count();
    assert!(rigid >= 3);
}

#[test]
fn undamped_modes_oscillate_without_decay() {
    let mesh = generate_plate_mesh(0.3, 0.2, 3, 2);
    let material = Material::aluminum_sheet().with_damping(0.0, 0.0);
    let edges = mesh.connectivity_map().unwrap();
    let areas = triangle_areas(&mesh);
    let k = assemble_stiffness_sparse(mesh.num_dofs(), &edges, material.edge_stiffness());
    let m = assemble_mass(&mesh, &areas, material.areal_density());
    let eig = solve_lumped(&k, &m, &EigenSettings::default()).unwrap();

    let damped = apply_damping(&eig, material.visco, material.fluid);
    for (mode, &lambda) in damped.iter().zip(eig.eigenvalues.iter()) {
        if lambda > 0.0 {
            assert_eq!(mode.decay_rate(), 0.0);
            let expected = (4.0 * lambda).sqrt() / 2.0;
            assert!((mode.angular_frequency() - expected).abs() <= 1e-9 * expected);
        }
    }
}

#[test]
fn aggregation_redistributes_but_never_loses_gain() {
    let mesh = generate_plate_mesh(0.3, 0.2, 4, 3);
    let material = Material::aluminum_sheet();
    let config = AnalysisConfig::default();

    let edges = mesh.connectivity_map().unwrap();
    let areas = triangle_areas(&mesh);
    let k = assemble_stiffness_sparse(mesh.num_dofs(), &edges, material.edge_stiffness());
    let m = assemble_mass(&mesh, &areas, material.areal_density());
    let eig = solve_lumped(&k, &m, &config.eigen).unwrap();
    let audible = cull_to_band(apply_damping(&eig, material.visco, material.fluid), &config.band);
    assert!(audible.iter().all(|m| m.frequency_hz > 20.0 && m.frequency_hz < 22_000.0));

    let merged = aggregate_modes(&audible, &config.curve, config.zero_gain_tol);
    for pair in merged.windows(2) {
        assert!(pair[0].frequency_hz < pair[1].frequency_hz);
    }

    let total = |modes: &[modal_sound::Mode]| {
        modes
            .iter()
            .fold(DVector::zeros(mesh.num_dofs()), |acc: DVector<f64>, m| acc + &m.gains)
    };
    assert!((total(&audible) - total(&merged)).amax() < 1e-9);

    let model = compute_modal_model(&mesh, &material, &config).unwrap();
    assert_eq!(model.num_modes(), merged.len());
}

#[test]
fn unreferenced_vertex_is_singular_mass() {
    let mesh = TriMesh::new(
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let result = compute_modal_model(&mesh, &Material::glass_pane(), &AnalysisConfig::default());
    assert!(matches!(result, Err(ModalError::SingularMass)));
}

#[test]
fn out_of_range_triangle_is_input_error() {
    let mesh = TriMesh::new(
        vec![Vector3::zeros(), Vector3::x(), Vector3::y()],
        vec![[0, 1, 5]],
    );
    let err = compute_modal_model(&mesh, &Material::glass_pane(), &AnalysisConfig::default())
        .unwrap_err();
    assert!(matches!(err, ModalError::IndexOutOfRange { vertex: 5, .. }));
    assert!(err.is_input_error());
}

#[test]
fn serialized_model_rounds_at_the_end() {
    let mesh = generate_plate_mesh(0.3, 0.2, 4, 3);
    let model = compute_modal_model(&mesh, &Material::aluminum_sheet(), &AnalysisConfig::default())
        .unwrap();
    let record = model.to_record().with_id("plate-4x3");

    assert_eq!(record.vertices, mesh.num_dofs());
    assert_eq!(record.modes, model.num_modes());
    assert_eq!(record.gains.len(), record.vertices * record.modes);
    for (rounded, mode) in record.freqs.iter().zip(model.modes()) {
        assert!((rounded - mode.frequency_hz).abs() <= 5e-4 + 1e-9);
        assert_eq!(*rounded, (mode.frequency_hz * 1e3).round_ties_even() / 1e3);
    }
    for (decay, mode) in record.decays.iter().zip(model.modes()) {
        assert_eq!(*decay, mode.decay_rate);
    }
    for dof in 0..record.vertices {
        for (j, mode) in model.modes().iter().enumerate() {
            let g = record.gain(dof, j).unwrap();
            assert!((g - mode.gains[dof]).abs() <= 5e-8 + 1e-12);
        }
    }
}
