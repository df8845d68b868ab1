//! WASM bindings for browser integration.
//!
//! This module provides JavaScript-friendly wrappers around the modal
//! pipeline. Requests and models cross the boundary as JSON strings.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

use crate::config::AnalysisConfig;
use crate::pipeline::compute_model_json;
use crate::types::DOF_PER_NODE;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: crate::ModalError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Compute a modal model with default analysis settings.
///
/// # Arguments
/// * `request_json` - `{"mesh": {"triangles": [...], "vertices": [...]}, "material": {...}}`
/// * `id` - Opaque tag copied into the returned record
///
/// # Returns
/// JSON model record `{vertices, modes, freqs, decays, gains, id}`
#[wasm_bindgen]
pub fn compute_modal_model(request_json: &str, id: Option<String>) -> Result<String, JsValue> {
    compute_model_json(request_json, &AnalysisConfig::default(), id.as_deref()).map_err(to_js_error)
}

/// Compute a modal model with a JSON analysis configuration.
///
/// Fields missing from `config_json` keep their defaults.
#[wasm_bindgen]
pub fn compute_modal_model_with_config(
    request_json: &str,
    config_json: &str,
    id: Option<String>,
) -> Result<String, JsValue> {
    let config = AnalysisConfig::from_json(config_json).map_err(to_js_error)?;
    compute_model_json(request_json, &config, id.as_deref()).map_err(to_js_error)
}

/// Get memory usage estimate for a mesh with `num_vertices` vertices.
///
/// # Returns
/// Estimated memory usage in bytes
#[wasm_bindgen]
pub fn estimate_memory_usage(num_vertices: usize) -> usize {
    let dof = num_vertices * DOF_PER_NODE;

    // Rough estimate:
    // - Vertices: 3 f64 per vertex = 24 bytes
    // - Dense K, reduced A, L⁻¹ and eigenvectors: 4 × dof² f64
    let vertex_mem = num_vertices * 24;
    let matrix_mem = 4 * dof * dof * 8;

    vertex_mem + matrix_mem
}

/// Check if a mesh size is safe for browser memory limits.
///
/// # Returns
/// true if the estimated memory usage is under 512MB
#[wasm_bindgen]
pub fn is_mesh_size_safe(num_vertices: usize) -> bool {
    let mem = estimate_memory_usage(num_vertices);
    mem < 512 * 1024 * 1024 // 512 MB limit
}
