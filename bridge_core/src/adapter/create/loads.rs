//! Load dispatch.
//!
//! Each [`Load`] variant maps onto one family of external load calls. A
//! load whose case has not been pushed is rejected as a whole; a target
//! element without an external id, or a call that fails for one element,
//! is reported and the remaining targets still receive the load.

use uuid::Uuid;

use crate::adapter::{convert, operation, Adapter};
use crate::api::{AnalysisModel, ApiStatus, CoordinateSystem, FrameDistributedLoad};
use crate::errors::{BridgeError, BridgeResult};
use crate::model::elements::{Bar, Node, Panel};
use crate::model::loads::{
    AreaTemperatureLoad, AreaUniformlyDistributedLoad, BarUniformlyDistributedLoad, BarVaryingDistributedLoad,
    ContourLoad, GeometricalLineLoad, GravityLoad, Load, LoadTarget, PointDisplacement, PointLoad,
};
use crate::model::Model;

/// Span and coordinate settings shared by the calls on one frame
struct FrameSpan {
    directions: [i32; 3],
    dist1: f64,
    dist2: f64,
    relative: bool,
    csys: CoordinateSystem,
}

/// Start and end values of a distributed load, one per direction
struct FrameValues {
    force_a: [f64; 3],
    force_b: [f64; 3],
    moment_a: [f64; 3],
    moment_b: [f64; 3],
}

impl<A: AnalysisModel> Adapter<A> {
    /// Apply a load to every element it targets.
    ///
    /// Returns the number of targets that received the load.
    pub fn apply_load(&mut self, model: &Model, load: &Load) -> BridgeResult<usize> {
        match load {
            Load::Point(l) => self.apply_point_load(l),
            Load::PointDisplacement(l) => self.apply_point_displacement(l),
            Load::BarUniform(l) => self.apply_bar_uniform_load(l),
            Load::BarVarying(l) => {
                self.apply_bar_varying_load(l, |id| model.bar(id).and_then(|bar| model.bar_length(bar)))
            }
            Load::AreaUniform(l) => self.apply_area_uniform_load(l),
            Load::AreaTemperature(l) => self.apply_area_temperature_load(l),
            Load::Contour(l) => self.apply_contour_load(model, l),
            Load::GeometricalLine(l) => self.apply_geometrical_line_load(model, l),
            Load::Gravity(l) => self.apply_gravity_load(l),
        }
    }

    /// Load pattern of a load's case
    fn load_pattern(&self, kind: &str, load_name: &str, loadcase: Uuid) -> BridgeResult<String> {
        self.external_name(loadcase)
            .ok_or_else(|| BridgeError::validation(kind, load_name, "its loadcase has not been pushed"))
    }

    /// External names of the targets that have been pushed
    fn load_targets(&mut self, kind: &str, target: &LoadTarget) -> Vec<String> {
        let mut names = Vec::with_capacity(target.objects.len());
        for id in &target.objects {
            match self.external_name(*id) {
                Some(name) => names.push(name),
                None => {
                    let error = BridgeError::external_create(
                        kind,
                        &target.name,
                        format!("target {} has no external id", id),
                    );
                    self.diagnostics.record(&operation("apply", kind), &error);
                }
            }
        }
        names
    }

    fn report_load_call(&mut self, kind: &str, load_name: &str, element: &str, status: ApiStatus) {
        let error = BridgeError::external_create(kind, load_name, format!("{} on {}", status, element));
        self.diagnostics.record(&operation("apply", kind), &error);
    }

    pub fn apply_point_load(&mut self, load: &PointLoad) -> BridgeResult<usize> {
        let kind = "Point Load";
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let values = convert::six_values(load.force, load.moment);
        let csys = convert::csys(load.axis);
        let replace = self.config.replace_loads;

        let mut applied = 0;
        for node in self.load_targets(kind, &load.target) {
            match self.api.set_point_load_force(&node, &pattern, values, replace, csys) {
                Ok(()) => applied += 1,
                Err(status) => self.report_load_call(kind, &load.target.name, &node, status),
            }
        }
        Ok(applied)
    }

    pub fn apply_point_displacement(&mut self, load: &PointDisplacement) -> BridgeResult<usize> {
        let kind = "Point Displacement";
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let values = convert::six_values(load.translation, load.rotation);
        let csys = convert::csys(load.axis);
        let replace = self.config.replace_loads;

        let mut applied = 0;
        for node in self.load_targets(kind, &load.target) {
            match self.api.set_point_load_displacement(&node, &pattern, values, replace, csys) {
                Ok(()) => applied += 1,
                Err(status) => self.report_load_call(kind, &load.target.name, &node, status),
            }
        }
        Ok(applied)
    }

    /// Force then moment call per direction; only the first call on a frame replaces
    fn distribute_on_frame(
        &mut self,
        kind: &str,
        load_name: &str,
        frame: &str,
        pattern: &str,
        span: &FrameSpan,
        values: &FrameValues,
    ) -> bool {
        let mut replace = self.config.replace_loads;
        let mut all_applied = true;

        for i in 0..3 {
            let calls = [
                (convert::FRAME_FORCE, values.force_a[i], values.force_b[i]),
                (convert::FRAME_MOMENT, values.moment_a[i], values.moment_b[i]),
            ];
            for (load_kind, value1, value2) in calls {
                let call = FrameDistributedLoad {
                    frame: frame.to_string(),
                    pattern: pattern.to_string(),
                    load_kind,
                    direction: span.directions[i],
                    dist1: span.dist1,
                    dist2: span.dist2,
                    value1,
                    value2,
                    csys: span.csys,
                    relative: span.relative,
                    replace,
                };
                replace = false;
                if let Err(status) = self.api.set_frame_load_distributed(&call) {
                    self.report_load_call(kind, load_name, &format!("{} direction {}", frame, span.directions[i]), status);
                    all_applied = false;
                }
            }
        }
        all_applied
    }

    pub fn apply_bar_uniform_load(&mut self, load: &BarUniformlyDistributedLoad) -> BridgeResult<usize> {
        let kind = "Bar Uniform Load";
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let directions = convert::frame_directions(load.axis);
        let force = convert::frame_components(load.force, load.axis);
        let moment = convert::frame_components(load.moment, load.axis);
        let span = FrameSpan {
            directions,
            dist1: 0.0,
            dist2: 1.0,
            relative: true,
            csys: convert::csys(load.axis),
        };
        let values = FrameValues {
            force_a: force,
            force_b: force,
            moment_a: moment,
            moment_b: moment,
        };

        let mut applied = 0;
        for frame in self.load_targets(kind, &load.target) {
            if self.distribute_on_frame(kind, &load.target.name, &frame, &pattern, &span, &values) {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Apply a varying load with absolute distances.
    ///
    /// The load runs from `distance_from_a` to `length - distance_from_b`
    /// on each bar, so every target's length must be known.
    fn apply_bar_varying_load(
        &mut self,
        load: &BarVaryingDistributedLoad,
        length_of: impl Fn(Uuid) -> Option<f64>,
    ) -> BridgeResult<usize> {
        let kind = "Bar Varying Load";
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let directions = convert::frame_directions(load.axis);
        let values = FrameValues {
            force_a: convert::frame_components(load.force_a, load.axis),
            force_b: convert::frame_components(load.force_b, load.axis),
            moment_a: convert::frame_components(load.moment_a, load.axis),
            moment_b: convert::frame_components(load.moment_b, load.axis),
        };

        let mut applied = 0;
        for id in &load.target.objects {
            let Some(frame) = self.external_name(*id) else {
                let error = BridgeError::external_create(kind, &load.target.name, format!("target {} has no external id", id));
                self.diagnostics.record(&operation("apply", kind), &error);
                continue;
            };
            let Some(length) = length_of(*id) else {
                self.diagnostics.error(
                    &operation("apply", kind),
                    Some(&load.target.name),
                    format!("length of bar {} is unknown", frame),
                );
                continue;
            };

            let span = FrameSpan {
                directions,
                dist1: load.distance_from_a,
                dist2: length - load.distance_from_b,
                relative: false,
                csys: convert::csys(load.axis),
            };
            if self.distribute_on_frame(kind, &load.target.name, &frame, &pattern, &span, &values) {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Uniform pressure on panels, one call per nonzero component.
    ///
    /// Panels without a shell property carry no stiffness, so their load is
    /// transferred straight to the surrounding frames.
    pub fn apply_area_uniform_load(&mut self, load: &AreaUniformlyDistributedLoad) -> BridgeResult<usize> {
        let kind = "Area Uniform Load";
        let op = operation("apply", kind);
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let directions = convert::area_directions(load.axis, load.projected);
        let values = load.pressure.to_array();
        let csys = convert::csys(load.axis);
        let distribution = self.config.area_load_distribution.code();

        let mut applied = 0;
        for area in self.load_targets(kind, &load.target) {
            let property = match self.api.area_property(&area) {
                Ok(property) => property,
                Err(status) => {
                    self.report_load_call(kind, &load.target.name, &area, status);
                    continue;
                }
            };
            let to_frame = property == "None";

            let mut replace = self.config.replace_loads;
            let mut all_applied = true;
            for (value, direction) in values.iter().zip(directions) {
                if *value == 0.0 {
                    continue;
                }
                let result = if to_frame {
                    self.api
                        .set_area_load_uniform_to_frame(&area, &pattern, *value, direction, distribution, replace, csys)
                } else {
                    self.api.set_area_load_uniform(&area, &pattern, *value, direction, replace, csys)
                };
                replace = false;
                if result.is_err() {
                    self.diagnostics.warning(
                        &op,
                        Some(&area),
                        format!("could not assign an area load in direction {}", direction),
                    );
                    all_applied = false;
                }
            }
            if all_applied {
                applied += 1;
            }
        }
        Ok(applied)
    }

    pub fn apply_area_temperature_load(&mut self, load: &AreaTemperatureLoad) -> BridgeResult<usize> {
        let kind = "Area Temperature Load";
        let pattern = self.load_pattern(kind, &load.target.name, load.target.loadcase)?;
        let replace = self.config.replace_loads;

        let mut applied = 0;
        for area in self.load_targets(kind, &load.target) {
            let result = self.api.set_area_load_temperature(
                &area,
                &pattern,
                convert::UNIFORM_TEMPERATURE,
                load.temperature_change,
                replace,
            );
            match result {
                Ok(()) => applied += 1,
                Err(status) => self.report_load_call(kind, &load.target.name, &area, status),
            }
        }

        self.diagnostics.note(
            &operation("apply", kind),
            Some(&load.target.name),
            "only uniform temperature changes are applied; temperature gradients are not supported",
        );
        Ok(applied)
    }

    /// Materialize the contour as a helper panel and load it
    pub fn apply_contour_load(&mut self, model: &Model, load: &ContourLoad) -> BridgeResult<usize> {
        let kind = "Contour Load";
        self.load_pattern(kind, &load.name, load.loadcase)?;

        let panel = Panel::new(load.name.clone(), load.contour.clone());
        let external = self.create_panel(model, &panel)?;
        self.track_helper("Panel", panel.id, &external.id, &load.name);

        let area_load = AreaUniformlyDistributedLoad {
            target: LoadTarget::new(load.name.clone(), load.loadcase, vec![panel.id]),
            pressure: load.force,
            axis: load.axis,
            projected: load.projected,
        };
        self.apply_area_uniform_load(&area_load)
    }

    /// Materialize the line as two helper nodes and a helper bar, then load
    /// the whole bar
    pub fn apply_geometrical_line_load(&mut self, model: &Model, load: &GeometricalLineLoad) -> BridgeResult<usize> {
        let kind = "Geometrical Line Load";
        self.load_pattern(kind, &load.name, load.loadcase)?;

        let start = Node::new("", load.location.start);
        let end = Node::new("", load.location.end);
        for node in [&start, &end] {
            let external = self.create_node(node)?;
            self.track_helper("Node", node.id, &external.id, &load.name);
        }

        let bar = Bar::new("", start.id, end.id);
        let external = self.create_bar(model, &bar)?;
        self.track_helper("Bar", bar.id, &external.id, &load.name);

        let bar_load = BarVaryingDistributedLoad {
            target: LoadTarget::new(load.name.clone(), load.loadcase, vec![bar.id]),
            distance_from_a: 0.0,
            force_a: load.force_a,
            moment_a: load.moment_a,
            distance_from_b: 0.0,
            force_b: load.force_b,
            moment_b: load.moment_b,
            axis: load.axis,
            projected: load.projected,
        };
        let length = load.location.length();
        self.apply_bar_varying_load(&bar_load, |_| Some(length))
    }

    /// Gravity becomes the self-weight multiplier of the load pattern
    pub fn apply_gravity_load(&mut self, load: &GravityLoad) -> BridgeResult<usize> {
        let kind = "Gravity Load";
        let op = operation("apply", kind);
        let pattern = self.load_pattern(kind, &load.name, load.loadcase)?;

        let direction = load.direction;
        if direction.x != 0.0 || direction.y != 0.0 {
            return Err(BridgeError::domain(
                kind,
                format!(
                    "gravity can only act in the global Z direction, got ({}, {}, {})",
                    direction.x, direction.y, direction.z
                ),
            ));
        }

        let multiplier = -direction.z;
        match self.api.self_weight_multiplier(&pattern) {
            Ok(existing) if existing != 0.0 => self.diagnostics.warning(
                &op,
                Some(&load.name),
                format!(
                    "self weight of loadcase {} is overwritten: previous value {}, new value {}",
                    pattern, existing, multiplier
                ),
            ),
            Ok(_) => {}
            Err(status) => self.diagnostics.warning(
                &op,
                Some(&load.name),
                format!("existing self weight of {} could not be read: {}", pattern, status),
            ),
        }

        self.api
            .set_self_weight_multiplier(&pattern, multiplier)
            .map_err(|status| BridgeError::external_create(kind, &load.name, status.to_string()))?;

        self.diagnostics.note(
            &op,
            Some(&load.name),
            "gravity is applied through the loadcase self weight and acts on every object; one gravity load per loadcase",
        );
        Ok(1)
    }
}
