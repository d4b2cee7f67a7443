use crate::adapter::{operation, Adapter};
use crate::api::AnalysisModel;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::elements::Panel;
use crate::model::geometry::Point;
use crate::model::Model;
use crate::registry::ExternalId;

/// Corner coordinates of an outline, without a repeated closing point
fn corners(outline: &[Point]) -> Vec<[f64; 3]> {
    let mut points = outline;
    if points.len() > 1 && points.first() == points.last() {
        points = &points[..points.len() - 1];
    }
    points.iter().map(|p| [p.x, p.y, p.z]).collect()
}

impl<A: AnalysisModel> Adapter<A> {
    pub fn create_panel(&mut self, model: &Model, panel: &Panel) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("Panel", panel.id, &panel.name) {
            return Ok(existing);
        }

        let corners = corners(&panel.outline);
        if corners.len() < 3 {
            return Err(BridgeError::validation(
                "Panel",
                &panel.name,
                format!("outline has {} distinct points, at least 3 are needed", corners.len()),
            ));
        }

        let property = self.config.default_area_property.clone();
        let name = self
            .api
            .add_area(&corners, &property, &panel.name)
            .map_err(|status| BridgeError::external_create("Panel", &panel.name, status.to_string()))?;

        self.note_rename("Panel", &panel.name, &name);
        let guid = self.api.area_guid(&name);
        let external = self.annotate("Panel", panel.id, name, Some(guid));

        self.set_panel(model, panel, &external.id);
        Ok(external)
    }

    /// Surface property and group tags
    pub fn set_panel(&mut self, model: &Model, panel: &Panel, name: &str) -> bool {
        let mut all_set = true;

        if let Some(property_id) = panel.property {
            match self.external_name(property_id) {
                Some(property) => {
                    let result = self.api.set_area_property(name, &property);
                    all_set &= self.check_property("SurfaceProperty", "Panel", name, result);
                }
                None => {
                    let label = model
                        .surface_property(property_id)
                        .map_or_else(|| property_id.to_string(), |p| p.name.clone());
                    self.diagnostics.warning(
                        &operation("set", "Panel"),
                        Some(name),
                        format!("surface property {} has not been pushed", label),
                    );
                    all_set = false;
                }
            }
        }

        if !panel.openings.is_empty() {
            self.diagnostics.warning(
                &operation("set", "Panel"),
                Some(name),
                format!("{} opening(s) ignored; openings are not supported", panel.openings.len()),
            );
        }

        all_set &= self.assign_groups("Panel", name, &panel.tags, A::set_area_group);
        all_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::memory::InMemoryModel;
    use crate::model::geometry::point;

    fn square() -> Vec<Point> {
        vec![
            point(0.0, 0.0, 0.0),
            point(4.0, 0.0, 0.0),
            point(4.0, 4.0, 0.0),
            point(0.0, 4.0, 0.0),
        ]
    }

    #[test]
    fn test_closed_outline_drops_repeated_point() {
        let mut outline = square();
        outline.push(point(0.0, 0.0, 0.0));
        assert_eq!(corners(&outline).len(), 4);
    }

    #[test]
    fn test_degenerate_panel_rejected() {
        let model = Model::new("Engineer");
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let panel = Panel::new("P1", vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)]);

        let err = adapter.create_panel(&model, &panel).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION");
        assert_eq!(adapter.api().call_count("add_area"), 0);
    }

    #[test]
    fn test_panel_without_property_keeps_placeholder() {
        let model = Model::new("Engineer");
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let external = adapter.create_panel(&model, &Panel::new("Roof", square())).unwrap();

        assert_eq!(adapter.api().area_property(&external.id).unwrap(), "None");
        assert!(adapter.diagnostics().is_empty());
    }
}
