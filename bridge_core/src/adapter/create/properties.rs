use crate::adapter::{convert, Adapter};
use crate::api::AnalysisModel;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::properties::{Material, SectionProperty, SurfaceProperty};
use crate::model::Model;
use crate::registry::ExternalId;

impl<A: AnalysisModel> Adapter<A> {
    pub fn create_material(&mut self, material: &Material) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("Material", material.id, &material.name) {
            return Ok(existing);
        }

        let name = self
            .api
            .add_material(&material.name, convert::material_type(material.kind))
            .map_err(|status| BridgeError::external_create("Material", &material.name, status.to_string()))?;

        self.note_rename("Material", &material.name, &name);
        let external = self.annotate("Material", material.id, name, None);
        self.set_material(material, &external.id);
        Ok(external)
    }

    pub fn set_material(&mut self, material: &Material, name: &str) -> bool {
        let elastic = self.api.set_material_isotropic(
            name,
            material.youngs_modulus,
            material.poissons_ratio,
            material.thermal_expansion,
        );
        let mut all_set = self.check_property("Isotropic properties", "Material", name, elastic);

        let mass = self.api.set_material_mass(name, material.density);
        all_set &= self.check_property("Density", "Material", name, mass);
        all_set
    }

    /// Create a general frame section.
    ///
    /// The section is defined under its own name; a section without a
    /// material is passed through and left to the external application to reject.
    pub fn create_section(&mut self, model: &Model, section: &SectionProperty) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("SectionProperty", section.id, &section.name) {
            return Ok(existing);
        }

        let material = match section.material {
            Some(id) => self.external_name(id).ok_or_else(|| {
                let material_name = model.material(id).map_or_else(|| id.to_string(), |m| m.name.clone());
                BridgeError::validation(
                    "SectionProperty",
                    &section.name,
                    format!("material {} has not been pushed", material_name),
                )
            })?,
            None => String::new(),
        };

        self.api
            .set_frame_section_general(
                &section.name,
                &material,
                section.depth,
                section.width,
                section.area,
                section.asz,
                section.asy,
                section.j,
                section.iz,
                section.iy,
            )
            .map_err(|status| BridgeError::external_create("SectionProperty", &section.name, status.to_string()))?;

        Ok(self.annotate("SectionProperty", section.id, section.name.clone(), None))
    }

    pub fn create_surface_property(&mut self, model: &Model, property: &SurfaceProperty) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("SurfaceProperty", property.id, &property.name) {
            return Ok(existing);
        }

        let material = match property.material {
            Some(id) => self.external_name(id).ok_or_else(|| {
                let material_name = model.material(id).map_or_else(|| id.to_string(), |m| m.name.clone());
                BridgeError::validation(
                    "SurfaceProperty",
                    &property.name,
                    format!("material {} has not been pushed", material_name),
                )
            })?,
            None => String::new(),
        };

        self.api
            .set_area_shell(&property.name, &material, property.thickness)
            .map_err(|status| BridgeError::external_create("SurfaceProperty", &property.name, status.to_string()))?;

        Ok(self.annotate("SurfaceProperty", property.id, property.name.clone(), None))
    }
}
