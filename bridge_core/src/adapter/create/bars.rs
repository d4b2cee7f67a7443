use crate::adapter::{convert, operation, Adapter};
use crate::api::AnalysisModel;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::elements::Bar;
use crate::model::Model;
use crate::registry::ExternalId;
use crate::units::Degrees;

impl<A: AnalysisModel> Adapter<A> {
    /// Create a frame between the bar's two pushed nodes.
    ///
    /// The frame is created with the configured placeholder section; the
    /// real section is assigned by [`Adapter::set_bar`].
    pub fn create_bar(&mut self, model: &Model, bar: &Bar) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("Bar", bar.id, &bar.name) {
            return Ok(existing);
        }

        let (Some(start), Some(end)) = (bar.start, bar.end) else {
            return Err(BridgeError::validation("Bar", &bar.name, "its nodes are missing"));
        };

        let (Some(start_name), Some(end_name)) = (self.external_name(start), self.external_name(end)) else {
            return Err(BridgeError::validation(
                "Bar",
                &bar.name,
                "its nodes were not found in the external model",
            ));
        };

        let section = self.config.default_frame_section.clone();
        let name = self
            .api
            .add_frame(&start_name, &end_name, &section, &bar.name)
            .map_err(|status| BridgeError::external_create("Bar", &bar.name, status.to_string()))?;

        self.note_rename("Bar", &bar.name, &name);
        let guid = self.api.frame_guid(&name);
        let external = self.annotate("Bar", bar.id, name, Some(guid));

        self.set_bar(model, bar, &external.id);
        Ok(external)
    }

    /// Apply every bar property group in turn.
    ///
    /// Groups are independent: a failed call is reported as a warning and
    /// the next group still runs.
    pub fn set_bar(&mut self, model: &Model, bar: &Bar, name: &str) -> bool {
        let mut all_set = true;
        let section = bar.section.and_then(|id| model.section(id));

        if let Some(section_id) = bar.section {
            match self.external_name(section_id) {
                Some(section_name) => {
                    let result = self.api.set_frame_section(name, &section_name);
                    all_set &= self.check_property("SectionProperty", "Bar", name, result);
                }
                None => {
                    self.diagnostics.warning(
                        &operation("set", "Bar"),
                        Some(name),
                        "section property has not been pushed; the frame keeps its placeholder section",
                    );
                    all_set = false;
                }
            }
        }

        if !bar.orientation_angle.is_zero() {
            let degrees = Degrees::from(bar.orientation_angle);
            let result = self.api.set_frame_local_axes(name, degrees.value());
            all_set &= self.check_property("Orientation angle", "Bar", name, result);
        }

        if let Some(release) = &bar.release {
            match convert::frame_releases(release) {
                Some(releases) => {
                    let result = self.api.set_frame_releases(name, &releases);
                    all_set &= self.check_property("Release", "Bar", name, result);
                }
                None => {
                    let warning = BridgeError::property_warning(
                        "Release (axial or torsional release at both ends is unstable)",
                        "Bar",
                        name,
                    );
                    self.diagnostics.record(&operation("set", "Bar"), &warning);
                    all_set = false;
                }
            }
        }

        if let Some(offset) = &bar.offset {
            if let (Some(start), Some(end)) = (offset.start, offset.end) {
                let result = self.api.set_frame_end_length_offset(name, false, -start.x, end.x, 1.0);
                all_set &= self.check_property("Length offset", "Bar", name, result);
            }
        }

        all_set &= self.assign_groups("Bar", name, &bar.tags, A::set_frame_group);

        if let Some(mesh) = &bar.auto_mesh {
            let result = self.api.set_frame_auto_mesh(
                name,
                mesh.auto_mesh,
                mesh.at_points,
                mesh.at_lines,
                mesh.num_segments,
                mesh.max_length,
            );
            all_set &= self.check_property("AutoMesh", "Bar", name, result);
        }

        if let Some(procedure) = bar.design_procedure {
            let code = if procedure.derives_from_material() {
                convert::DESIGN_FROM_MATERIAL
            } else {
                convert::DESIGN_NONE
            };
            let result = self.api.set_frame_design_procedure(name, code);
            if self.check_property("DesignProcedure", "Bar", name, result) {
                let message = if code == convert::DESIGN_FROM_MATERIAL {
                    format!("Bar {} ({}) designs from its material", bar.name, name)
                } else {
                    format!("Bar {} ({}) has no design procedure", bar.name, name)
                };
                self.diagnostics.note(&operation("set", "Bar"), Some(name), message);
            } else {
                all_set = false;
            }
        }

        let (start_offset, end_offset) = bar.offset.map_or((None, None), |o| (o.start, o.end));
        let result = self.api.set_frame_insertion_point(
            name,
            bar.insertion_point.code(),
            false,
            bar.modify_stiffness_insertion_point,
            convert::insertion_offset(start_offset),
            convert::insertion_offset(end_offset),
        );
        all_set &= self.check_property("Insertion point and perpendicular offset", "Bar", name, result);

        if let Some(modifiers) = section.and_then(|s| s.modifiers.as_ref()) {
            let result = self.api.set_frame_modifiers(name, convert::section_modifiers(modifiers));
            all_set &= self.check_property("Section property modifiers", "Bar", name, result);
        }

        all_set
    }
}
