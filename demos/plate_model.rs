/// Example computing a modal sound model for a small aluminium plate.
///
/// This example shows how to:
/// 1. Generate a triangulated plate
/// 2. Run the modal pipeline with default analysis settings
/// 3. Export the model record as JSON for a synthesis client
///
/// Run with `RUST_LOG=debug` to see per-stage diagnostics.

use modal_sound::{
    compute_modal_model, generate_plate_mesh, AnalysisConfig, Material, ModalError,
};

fn main() -> Result<(), ModalError> {
    env_logger::init();

    println!("=== Modal Model for a Plate ===\n");

    let width = 0.3;
    let height = 0.2;
    let (nx, ny) = (6, 4);
    let material = Material::aluminum_sheet();

    println!("Plate configuration:");
    println!("  Size: {:.0} × {:.0} mm", width * 1000.0, height * 1000.0);
    println!("  Grid: {} × {} cells", nx, ny);
    println!("  Thickness: {:.1} mm", material.thickness * 1000.0);
    println!();

    let mesh = generate_plate_mesh(width, height, nx, ny);
    println!(
        "Mesh: {} vertices, {} triangles, {} DOF",
        mesh.num_vertices(),
        mesh.triangles.len(),
        mesh.num_dofs()
    );

    let config = AnalysisConfig::load_or_default("analysis.json");
    let model = compute_modal_model(&mesh, &material, &config)?;

    if model.is_degenerate() {
        println!("No audible modes.");
        return Ok(());
    }

    println!("\n{:>4}  {:>12}  {:>10}", "mode", "freq (Hz)", "decay");
    for (i, mode) in model.modes().iter().enumerate() {
        println!("{:>4}  {:>12.3}  {:>10.3}", i + 1, mode.frequency_hz, mode.decay_rate);
    }

    let record = model.to_record().with_id("aluminium-plate");
    let json = record.to_json()?;
    println!("\nModel record: {} bytes of JSON", json.len());

    Ok(())
}
