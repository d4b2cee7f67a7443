//! Materials, section properties and surface properties.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Material family. Drives the material type code in the external model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Steel,
    Concrete,
    Aluminium,
    ColdFormed,
    Timber,
    Rebar,
    Tendon,
    Other,
}

/// Isotropic material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub kind: MaterialKind,
    /// Young's modulus
    pub youngs_modulus: f64,
    pub poissons_ratio: f64,
    pub thermal_expansion: f64,
    /// Mass density
    pub density: f64,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Material {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            youngs_modulus: 0.0,
            poissons_ratio: 0.0,
            thermal_expansion: 0.0,
            density: 0.0,
        }
    }

    /// Set elastic constants (builder pattern)
    pub fn with_elastic(mut self, youngs_modulus: f64, poissons_ratio: f64, thermal_expansion: f64) -> Self {
        self.youngs_modulus = youngs_modulus;
        self.poissons_ratio = poissons_ratio;
        self.thermal_expansion = thermal_expansion;
        self
    }

    /// Set mass density (builder pattern)
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }
}

/// Stiffness modifiers attached to a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionModifier {
    pub area: f64,
    pub asy: f64,
    pub asz: f64,
    pub j: f64,
    pub iy: f64,
    pub iz: f64,
}

impl Default for SectionModifier {
    fn default() -> Self {
        SectionModifier {
            area: 1.0,
            asy: 1.0,
            asz: 1.0,
            j: 1.0,
            iy: 1.0,
            iz: 1.0,
        }
    }
}

/// Bar cross-section described by its general properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionProperty {
    pub id: Uuid,
    pub name: String,
    pub material: Option<Uuid>,
    /// Overall depth and width, used for display in the external model
    pub depth: f64,
    pub width: f64,
    pub area: f64,
    pub asy: f64,
    pub asz: f64,
    pub j: f64,
    pub iy: f64,
    pub iz: f64,
    pub modifiers: Option<SectionModifier>,
}

impl SectionProperty {
    pub fn new(name: impl Into<String>, material: Option<Uuid>) -> Self {
        SectionProperty {
            id: Uuid::new_v4(),
            name: name.into(),
            material,
            depth: 0.0,
            width: 0.0,
            area: 0.0,
            asy: 0.0,
            asz: 0.0,
            j: 0.0,
            iy: 0.0,
            iz: 0.0,
            modifiers: None,
        }
    }

    /// Set overall dimensions (builder pattern)
    pub fn with_dimensions(mut self, depth: f64, width: f64) -> Self {
        self.depth = depth;
        self.width = width;
        self
    }

    /// Set area and inertia values (builder pattern)
    pub fn with_properties(mut self, area: f64, iy: f64, iz: f64, j: f64) -> Self {
        self.area = area;
        self.iy = iy;
        self.iz = iz;
        self.j = j;
        self
    }

    /// Set shear areas (builder pattern)
    pub fn with_shear_areas(mut self, asy: f64, asz: f64) -> Self {
        self.asy = asy;
        self.asz = asz;
        self
    }

    /// Attach stiffness modifiers (builder pattern)
    pub fn with_modifiers(mut self, modifiers: SectionModifier) -> Self {
        self.modifiers = Some(modifiers);
        self
    }
}

/// Constant-thickness shell property for panels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceProperty {
    pub id: Uuid,
    pub name: String,
    pub material: Option<Uuid>,
    pub thickness: f64,
}

impl SurfaceProperty {
    pub fn new(name: impl Into<String>, material: Option<Uuid>, thickness: f64) -> Self {
        SurfaceProperty {
            id: Uuid::new_v4(),
            name: name.into(),
            material,
            thickness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let section = SectionProperty::new("W10x12", None)
            .with_properties(0.00228, 2.2e-5, 9.2e-7, 2.3e-8)
            .with_modifiers(SectionModifier { iy: 0.5, ..Default::default() });
        assert_eq!(section.area, 0.00228);
        assert_eq!(section.modifiers.map(|m| m.iy), Some(0.5));
        assert_eq!(section.modifiers.map(|m| m.area), Some(1.0));
    }
}
