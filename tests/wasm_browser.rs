//! WASM Browser Tests
//!
//! These tests run in a real browser environment using wasm-pack test.
//!
//! Run with:
//!   wasm-pack test --headless --chrome
//!   wasm-pack test --node

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use modal_sound::wasm::{compute_modal_model, estimate_memory_usage, is_mesh_size_safe};
use modal_sound::{generate_plate_mesh, Material, ModelRecord, ModelRequest};

/// Small plate round trip through the JSON bindings.
#[wasm_bindgen_test]
fn test_modal_model_from_json() {
    let mesh = generate_plate_mesh(0.3, 0.2, 4, 3);
    let request = ModelRequest::new(&mesh, Material::aluminum_sheet());
    let json = request.to_json().expect("request should serialize");

    let out = compute_modal_model(&json, Some("wasm".to_string())).expect("model should compute");
    let record: ModelRecord = serde_json::from_str(&out).expect("record should parse");

    assert_eq!(record.id.as_deref(), Some("wasm"));
    assert_eq!(record.vertices, mesh.num_dofs());
    assert!(record.modes > 0);
}

/// Malformed input surfaces as a JS error, not a panic.
#[wasm_bindgen_test]
fn test_invalid_request_is_error() {
    assert!(compute_modal_model("{\"mesh\": 1}", None).is_err());
}

#[wasm_bindgen_test]
fn test_memory_estimate_limits() {
    assert!(is_mesh_size_safe(500));
    assert!(!is_mesh_size_safe(2_000));
    assert!(estimate_memory_usage(10) > estimate_memory_usage(5));
}
