//! Material parameters for the spring-mass shell model.

use serde::{Deserialize, Serialize};

use crate::error::{ModalError, Result};

/// Material properties of a thin shell.
///
/// Field names follow the request record consumed at the service boundary
/// (`youngs`, `density`, `thickness`, `visco`, `fluid`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Young's modulus (Pa)
    pub youngs: f64,
    /// Density (kg/m³)
    pub density: f64,
    /// Shell thickness (m)
    pub thickness: f64,
    /// Viscoelastic (stiffness-proportional) damping coefficient γ
    pub visco: f64,
    /// Fluid (constant) damping coefficient η
    pub fluid: f64,
}

impl Material {
    pub fn new(youngs: f64, density: f64, thickness: f64, visco: f64, fluid: f64) -> Self {
        Self {
            youngs,
            density,
            thickness,
            visco,
            fluid,
        }
    }

    /// Same material with damping replaced.
    pub fn with_damping(mut self, visco: f64, fluid: f64) -> Self {
        self.visco = visco;
        self.fluid = fluid;
        self
    }

    /// Per-edge spring constant `k = E · t`.
    pub fn edge_stiffness(&self) -> f64 {
        self.youngs * self.thickness
    }

    /// Mass per unit area `ρ · t`.
    pub fn areal_density(&self) -> f64 {
        self.density * self.thickness
    }

    /// Check that modulus, density and thickness are positive and damping is finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("youngs", self.youngs),
            ("density", self.density),
            ("thickness", self.thickness),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModalError::NonPositiveMaterial { name, value });
            }
        }
        if !self.visco.is_finite() || !self.fluid.is_finite() {
            return Err(ModalError::NonFinite { stage: "material" });
        }
        Ok(())
    }

    /// Aluminium sheet, 1 mm, lightly damped.
    pub fn aluminum_sheet() -> Self {
        Self::new(68.9e9, 2700.0, 0.001, 1e-7, 2.0)
    }

    /// Glass pane, 3 mm.
    pub fn glass_pane() -> Self {
        Self::new(62.0e9, 2500.0, 0.003, 5e-8, 4.0)
    }

    /// Wooden board, 10 mm, strongly damped.
    pub fn wood_board() -> Self {
        Self::new(12.0e9, 640.0, 0.01, 1e-6, 20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for material in [
            Material::aluminum_sheet(),
            Material::glass_pane(),
            Material::wood_board(),
        ] {
            assert!(material.validate().is_ok(), "{:?}", material);
        }
    }

    #[test]
    fn zero_thickness_is_rejected() {
        let material = Material::new(1.0, 1.0, 0.0, 0.0, 0.0);
        match material.validate() {
            Err(ModalError::NonPositiveMaterial { name, .. }) => assert_eq!(name, "thickness"),
            other => panic!("expected NonPositiveMaterial, got {:?}", other),
        }
    }

    #[test]
    fn nan_damping_is_rejected() {
        let material = Material::new(1.0, 1.0, 1.0, f64::NAN, 0.0);
        assert!(matches!(
            material.validate(),
            Err(ModalError::NonFinite { stage: "material" })
        ));
    }

    #[test]
    fn deserializes_request_field_names() {
        let json = r#"{"youngs": 2.0, "density": 3.0, "thickness": 0.5, "visco": 0.1, "fluid": 0.2}"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material, Material::new(2.0, 3.0, 0.5, 0.1, 0.2));
        assert!((material.edge_stiffness() - 1.0).abs() < 1e-12);
        assert!((material.areal_density() - 1.5).abs() < 1e-12);
    }
}
