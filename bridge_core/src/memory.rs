//! # In-Memory Analysis Model
//!
//! A complete in-process implementation of [`AnalysisModel`]. It follows the
//! external application's observable rules closely enough to dry-run a push:
//!
//! - requested names that are empty or already taken are replaced by the
//!   next free integer name;
//! - group assignment fails until the group exists;
//! - objects still referenced by others cannot be deleted;
//! - load calls with `replace` clear earlier loads of the same pattern.
//!
//! Every mutating call is appended to a journal before it runs, and any call
//! can be made to fail with [`InMemoryModel::fail_on`] or
//! [`InMemoryModel::fail_on_name`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{
    AnalysisModel, ApiResult, ApiStatus, BaseReactions, ComboCaseKind, CoordinateSystem, FrameDistributedLoad,
    FrameReleases, ModalMassRatios, ObjectCategory,
};

/// Group every object belongs to implicitly
pub const ALL_GROUP: &str = "ALL";

/// Placeholder property names accepted without a definition
const NO_PROPERTY: [&str; 2] = ["None", "Default"];

// ============================================================================
// Object tables
// ============================================================================

/// Named objects in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Table<T> {
    entries: Vec<(String, T)>,
    last_auto: usize,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            entries: Vec::new(),
            last_auto: 0,
        }
    }
}

impl<T> Table<T> {
    /// Insert under the requested name, or the next free integer name when
    /// the request is empty or taken. Returns the name used.
    fn insert(&mut self, requested: &str, value: T) -> String {
        let name = if requested.trim().is_empty() || self.contains(requested) {
            self.next_auto_name()
        } else {
            requested.to_string()
        };
        self.entries.push((name.clone(), value));
        name
    }

    /// Insert or overwrite under exactly this name
    fn upsert(&mut self, name: &str, value: T) {
        match self.get_mut(name) {
            Some(existing) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    fn next_auto_name(&mut self) -> String {
        loop {
            self.last_auto += 1;
            let candidate = self.last_auto.to_string();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoadRecord {
    pub pattern: String,
    pub values: [f64; 6],
    pub csys: CoordinateSystem,
    pub displacement: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub guid: String,
    pub coordinates: [f64; 3],
    pub restraint: [bool; 6],
    pub springs: Option<[f64; 6]>,
    pub groups: Vec<String>,
    pub loads: Vec<PointLoadRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndOffsetRecord {
    pub auto_offset: bool,
    pub length1: f64,
    pub length2: f64,
    pub rigid_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoMeshRecord {
    pub auto_mesh: bool,
    pub at_points: bool,
    pub at_lines: bool,
    pub num_segments: i32,
    pub max_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsertionRecord {
    pub cardinal_point: i32,
    pub mirror: bool,
    pub stiffness_transform: bool,
    pub offset1: [f64; 3],
    pub offset2: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub guid: String,
    pub start: String,
    pub end: String,
    pub section: String,
    pub local_axis_degrees: f64,
    pub releases: Option<FrameReleases>,
    pub end_offset: Option<EndOffsetRecord>,
    pub groups: Vec<String>,
    pub auto_mesh: Option<AutoMeshRecord>,
    pub design_procedure: Option<i32>,
    pub insertion: Option<InsertionRecord>,
    pub modifiers: Option<[f64; 8]>,
    pub loads: Vec<FrameDistributedLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AreaLoadRecord {
    Uniform {
        pattern: String,
        value: f64,
        direction: i32,
        csys: CoordinateSystem,
    },
    UniformToFrame {
        pattern: String,
        value: f64,
        direction: i32,
        distribution: i32,
        csys: CoordinateSystem,
    },
    Temperature {
        pattern: String,
        load_type: i32,
        value: f64,
    },
}

impl AreaLoadRecord {
    pub fn pattern(&self) -> &str {
        match self {
            AreaLoadRecord::Uniform { pattern, .. }
            | AreaLoadRecord::UniformToFrame { pattern, .. }
            | AreaLoadRecord::Temperature { pattern, .. } => pattern,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaRecord {
    pub guid: String,
    pub corners: Vec<[f64; 3]>,
    pub property: String,
    pub groups: Vec<String>,
    pub loads: Vec<AreaLoadRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub guid: String,
    pub primary: String,
    pub secondary: String,
    pub property: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub material_type: i32,
    pub youngs_modulus: f64,
    pub poissons_ratio: f64,
    pub thermal_expansion: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    pub material: String,
    pub depth: f64,
    pub width: f64,
    pub area: f64,
    pub as2: f64,
    pub as3: f64,
    pub torsion: f64,
    pub i22: f64,
    pub i33: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellRecord {
    pub material: String,
    pub thickness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRecord {
    pub nature: i32,
    pub self_weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    pub loads: Vec<(String, String, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationRecord {
    pub combo_type: i32,
    pub cases: Vec<(ComboCaseKind, String, f64)>,
}

/// Injected failure: every call of `operation` (optionally only for one
/// object name) returns a nonzero status
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FailureRule {
    operation: String,
    name: Option<String>,
}

// ============================================================================
// Model
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryModel {
    points: Table<PointRecord>,
    frames: Table<FrameRecord>,
    areas: Table<AreaRecord>,
    links: Table<LinkRecord>,
    link_properties: Table<[bool; 6]>,
    materials: Table<MaterialRecord>,
    sections: Table<SectionRecord>,
    shells: Table<ShellRecord>,
    patterns: Table<PatternRecord>,
    cases: Table<CaseRecord>,
    combinations: Table<CombinationRecord>,
    groups: Vec<String>,
    selected_cases: Vec<String>,
    selected_combinations: Vec<String>,
    reactions: BaseReactions,
    modal: ModalMassRatios,
    failures: Vec<FailureRule>,
    journal: Vec<String>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        InMemoryModel {
            groups: vec![ALL_GROUP.to_string()],
            ..Default::default()
        }
    }

    /// Make every call of `operation` fail
    pub fn fail_on(&mut self, operation: &str) {
        self.failures.push(FailureRule {
            operation: operation.to_string(),
            name: None,
        });
    }

    /// Make calls of `operation` addressing `name` fail
    pub fn fail_on_name(&mut self, operation: &str, name: &str) {
        self.failures.push(FailureRule {
            operation: operation.to_string(),
            name: Some(name.to_string()),
        });
    }

    /// Remove all injected failures
    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Set the rows returned by the base reaction query
    pub fn set_base_reactions(&mut self, reactions: BaseReactions) {
        self.reactions = reactions;
    }

    /// Set the rows returned by the modal mass ratio query
    pub fn set_modal_mass_ratios(&mut self, modal: ModalMassRatios) {
        self.modal = modal;
    }

    /// Mutating calls in the order they were issued, as `operation(name)`
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    /// Number of journaled calls of one operation
    pub fn call_count(&self, operation: &str) -> usize {
        let prefix = format!("{}(", operation);
        self.journal.iter().filter(|c| c.starts_with(&prefix)).count()
    }

    pub fn point(&self, name: &str) -> Option<&PointRecord> {
        self.points.get(name)
    }

    pub fn frame(&self, name: &str) -> Option<&FrameRecord> {
        self.frames.get(name)
    }

    pub fn area(&self, name: &str) -> Option<&AreaRecord> {
        self.areas.get(name)
    }

    pub fn link(&self, name: &str) -> Option<&LinkRecord> {
        self.links.get(name)
    }

    pub fn link_property(&self, name: &str) -> Option<&[bool; 6]> {
        self.link_properties.get(name)
    }

    pub fn material(&self, name: &str) -> Option<&MaterialRecord> {
        self.materials.get(name)
    }

    pub fn section(&self, name: &str) -> Option<&SectionRecord> {
        self.sections.get(name)
    }

    pub fn shell(&self, name: &str) -> Option<&ShellRecord> {
        self.shells.get(name)
    }

    pub fn load_pattern(&self, name: &str) -> Option<&PatternRecord> {
        self.patterns.get(name)
    }

    pub fn analysis_case(&self, name: &str) -> Option<&CaseRecord> {
        self.cases.get(name)
    }

    pub fn combination(&self, name: &str) -> Option<&CombinationRecord> {
        self.combinations.get(name)
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn selected_cases(&self) -> &[String] {
        &self.selected_cases
    }

    pub fn selected_combinations(&self) -> &[String] {
        &self.selected_combinations
    }

    /// Total number of objects across all categories
    pub fn object_count(&self) -> usize {
        self.points.len()
            + self.frames.len()
            + self.areas.len()
            + self.links.len()
            + self.link_properties.len()
            + self.materials.len()
            + self.sections.len()
            + self.shells.len()
            + self.patterns.len()
            + self.cases.len()
            + self.combinations.len()
    }

    fn fails(&self, operation: &str, name: &str) -> bool {
        self.failures
            .iter()
            .any(|rule| rule.operation == operation && rule.name.as_deref().map_or(true, |n| n == name))
    }

    /// Journal a mutating call, then apply failure rules
    fn enter(&mut self, operation: &str, name: &str) -> ApiResult<()> {
        self.journal.push(format!("{}({})", operation, name));
        self.query(operation, name)
    }

    /// Apply failure rules to a read-only call
    fn query(&self, operation: &str, name: &str) -> ApiResult<()> {
        if self.fails(operation, name) {
            Err(ApiStatus::FAILED)
        } else {
            Ok(())
        }
    }

    fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    fn new_guid() -> String {
        Uuid::new_v4().to_string()
    }

    fn frame_mut(&mut self, name: &str) -> ApiResult<&mut FrameRecord> {
        self.frames.get_mut(name).ok_or(ApiStatus::FAILED)
    }

    fn point_mut(&mut self, name: &str) -> ApiResult<&mut PointRecord> {
        self.points.get_mut(name).ok_or(ApiStatus::FAILED)
    }

    fn area_mut(&mut self, name: &str) -> ApiResult<&mut AreaRecord> {
        self.areas.get_mut(name).ok_or(ApiStatus::FAILED)
    }

    fn require_pattern(&self, pattern: &str) -> ApiResult<()> {
        if self.patterns.contains(pattern) {
            Ok(())
        } else {
            Err(ApiStatus::FAILED)
        }
    }

    fn is_output_selected(&self, case: &str) -> bool {
        self.selected_cases.iter().any(|c| c == case) || self.selected_combinations.iter().any(|c| c == case)
    }

    fn point_in_use(&self, name: &str) -> bool {
        self.frames.values().any(|f| f.start == name || f.end == name)
            || self.links.values().any(|l| l.primary == name || l.secondary == name)
    }

    #[allow(clippy::too_many_arguments)]
    fn point_load(
        &mut self,
        operation: &str,
        name: &str,
        pattern: &str,
        values: [f64; 6],
        replace: bool,
        csys: CoordinateSystem,
        displacement: bool,
    ) -> ApiResult<()> {
        self.enter(operation, name)?;
        self.require_pattern(pattern)?;
        let point = self.point_mut(name)?;
        if replace {
            point
                .loads
                .retain(|l| !(l.pattern == pattern && l.displacement == displacement));
        }
        point.loads.push(PointLoadRecord {
            pattern: pattern.to_string(),
            values,
            csys,
            displacement,
        });
        Ok(())
    }

    fn area_load(&mut self, operation: &str, name: &str, replace: bool, load: AreaLoadRecord) -> ApiResult<()> {
        self.enter(operation, name)?;
        self.require_pattern(load.pattern())?;
        let area = self.area_mut(name)?;
        if replace {
            area.loads.retain(|l| l.pattern() != load.pattern());
        }
        area.loads.push(load);
        Ok(())
    }
}

/// Keep the entries of `values` at `indices`, skipping indices past the end
fn pick<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().filter_map(|&i| values.get(i).cloned()).collect()
}

impl AnalysisModel for InMemoryModel {
    fn add_point(&mut self, x: f64, y: f64, z: f64, user_name: &str) -> ApiResult<String> {
        self.enter("add_point", user_name)?;
        let record = PointRecord {
            guid: Self::new_guid(),
            coordinates: [x, y, z],
            restraint: [false; 6],
            springs: None,
            groups: vec![ALL_GROUP.to_string()],
            loads: Vec::new(),
        };
        Ok(self.points.insert(user_name, record))
    }

    fn point_guid(&self, name: &str) -> ApiResult<String> {
        self.query("point_guid", name)?;
        self.points.get(name).map(|p| p.guid.clone()).ok_or(ApiStatus::FAILED)
    }

    fn set_point_restraint(&mut self, name: &str, restraint: [bool; 6]) -> ApiResult<()> {
        self.enter("set_point_restraint", name)?;
        self.point_mut(name)?.restraint = restraint;
        Ok(())
    }

    fn set_point_spring(&mut self, name: &str, stiffness: [f64; 6]) -> ApiResult<()> {
        self.enter("set_point_spring", name)?;
        self.point_mut(name)?.springs = Some(stiffness);
        Ok(())
    }

    fn set_point_group(&mut self, name: &str, group: &str) -> ApiResult<()> {
        self.enter("set_point_group", name)?;
        if !self.has_group(group) {
            return Err(ApiStatus::FAILED);
        }
        self.point_mut(name)?.groups.push(group.to_string());
        Ok(())
    }

    fn set_point_load_force(
        &mut self,
        name: &str,
        pattern: &str,
        values: [f64; 6],
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()> {
        self.point_load("set_point_load_force", name, pattern, values, replace, csys, false)
    }

    fn set_point_load_displacement(
        &mut self,
        name: &str,
        pattern: &str,
        values: [f64; 6],
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()> {
        self.point_load("set_point_load_displacement", name, pattern, values, replace, csys, true)
    }

    fn add_frame(&mut self, start: &str, end: &str, section: &str, user_name: &str) -> ApiResult<String> {
        self.enter("add_frame", user_name)?;
        if !self.points.contains(start) || !self.points.contains(end) || start == end {
            return Err(ApiStatus::FAILED);
        }
        if !NO_PROPERTY.contains(&section) && !self.sections.contains(section) {
            return Err(ApiStatus::FAILED);
        }
        let record = FrameRecord {
            guid: Self::new_guid(),
            start: start.to_string(),
            end: end.to_string(),
            section: section.to_string(),
            local_axis_degrees: 0.0,
            releases: None,
            end_offset: None,
            groups: vec![ALL_GROUP.to_string()],
            auto_mesh: None,
            design_procedure: None,
            insertion: None,
            modifiers: None,
            loads: Vec::new(),
        };
        Ok(self.frames.insert(user_name, record))
    }

    fn frame_guid(&self, name: &str) -> ApiResult<String> {
        self.query("frame_guid", name)?;
        self.frames.get(name).map(|f| f.guid.clone()).ok_or(ApiStatus::FAILED)
    }

    fn set_frame_section(&mut self, name: &str, section: &str) -> ApiResult<()> {
        self.enter("set_frame_section", name)?;
        if !self.sections.contains(section) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.section = section.to_string();
        Ok(())
    }

    fn set_frame_local_axes(&mut self, name: &str, angle_degrees: f64) -> ApiResult<()> {
        self.enter("set_frame_local_axes", name)?;
        self.frame_mut(name)?.local_axis_degrees = angle_degrees;
        Ok(())
    }

    fn set_frame_releases(&mut self, name: &str, releases: &FrameReleases) -> ApiResult<()> {
        self.enter("set_frame_releases", name)?;
        // Axial and torsional releases at both ends make the frame unstable
        if (releases.start[0] && releases.end[0]) || (releases.start[3] && releases.end[3]) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.releases = Some(*releases);
        Ok(())
    }

    fn set_frame_end_length_offset(
        &mut self,
        name: &str,
        auto_offset: bool,
        length1: f64,
        length2: f64,
        rigid_factor: f64,
    ) -> ApiResult<()> {
        self.enter("set_frame_end_length_offset", name)?;
        if !(0.0..=1.0).contains(&rigid_factor) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.end_offset = Some(EndOffsetRecord {
            auto_offset,
            length1,
            length2,
            rigid_factor,
        });
        Ok(())
    }

    fn set_frame_group(&mut self, name: &str, group: &str) -> ApiResult<()> {
        self.enter("set_frame_group", name)?;
        if !self.has_group(group) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.groups.push(group.to_string());
        Ok(())
    }

    fn set_frame_auto_mesh(
        &mut self,
        name: &str,
        auto_mesh: bool,
        at_points: bool,
        at_lines: bool,
        num_segments: i32,
        max_length: f64,
    ) -> ApiResult<()> {
        self.enter("set_frame_auto_mesh", name)?;
        if num_segments < 0 || max_length < 0.0 {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.auto_mesh = Some(AutoMeshRecord {
            auto_mesh,
            at_points,
            at_lines,
            num_segments,
            max_length,
        });
        Ok(())
    }

    fn set_frame_design_procedure(&mut self, name: &str, procedure: i32) -> ApiResult<()> {
        self.enter("set_frame_design_procedure", name)?;
        if !(1..=2).contains(&procedure) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.design_procedure = Some(procedure);
        Ok(())
    }

    fn set_frame_insertion_point(
        &mut self,
        name: &str,
        cardinal_point: i32,
        mirror: bool,
        stiffness_transform: bool,
        offset1: [f64; 3],
        offset2: [f64; 3],
    ) -> ApiResult<()> {
        self.enter("set_frame_insertion_point", name)?;
        if !(1..=11).contains(&cardinal_point) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.insertion = Some(InsertionRecord {
            cardinal_point,
            mirror,
            stiffness_transform,
            offset1,
            offset2,
        });
        Ok(())
    }

    fn set_frame_modifiers(&mut self, name: &str, modifiers: [f64; 8]) -> ApiResult<()> {
        self.enter("set_frame_modifiers", name)?;
        if modifiers.iter().any(|m| *m < 0.0) {
            return Err(ApiStatus::FAILED);
        }
        self.frame_mut(name)?.modifiers = Some(modifiers);
        Ok(())
    }

    fn set_frame_load_distributed(&mut self, load: &FrameDistributedLoad) -> ApiResult<()> {
        self.enter("set_frame_load_distributed", &load.frame)?;
        self.require_pattern(&load.pattern)?;
        if load.relative && !(0.0..=1.0).contains(&load.dist1) {
            return Err(ApiStatus::FAILED);
        }
        if load.dist2 < load.dist1 {
            return Err(ApiStatus::FAILED);
        }
        let frame = self.frame_mut(&load.frame)?;
        if load.replace {
            frame.loads.retain(|l| l.pattern != load.pattern);
        }
        frame.loads.push(load.clone());
        Ok(())
    }

    fn add_area(&mut self, corners: &[[f64; 3]], property: &str, user_name: &str) -> ApiResult<String> {
        self.enter("add_area", user_name)?;
        if corners.len() < 3 {
            return Err(ApiStatus::FAILED);
        }
        if !NO_PROPERTY.contains(&property) && !self.shells.contains(property) {
            return Err(ApiStatus::FAILED);
        }
        let record = AreaRecord {
            guid: Self::new_guid(),
            corners: corners.to_vec(),
            property: property.to_string(),
            groups: vec![ALL_GROUP.to_string()],
            loads: Vec::new(),
        };
        Ok(self.areas.insert(user_name, record))
    }

    fn area_guid(&self, name: &str) -> ApiResult<String> {
        self.query("area_guid", name)?;
        self.areas.get(name).map(|a| a.guid.clone()).ok_or(ApiStatus::FAILED)
    }

    fn set_area_property(&mut self, name: &str, property: &str) -> ApiResult<()> {
        self.enter("set_area_property", name)?;
        if !self.shells.contains(property) {
            return Err(ApiStatus::FAILED);
        }
        self.area_mut(name)?.property = property.to_string();
        Ok(())
    }

    fn area_property(&self, name: &str) -> ApiResult<String> {
        self.query("area_property", name)?;
        self.areas.get(name).map(|a| a.property.clone()).ok_or(ApiStatus::FAILED)
    }

    fn set_area_group(&mut self, name: &str, group: &str) -> ApiResult<()> {
        self.enter("set_area_group", name)?;
        if !self.has_group(group) {
            return Err(ApiStatus::FAILED);
        }
        self.area_mut(name)?.groups.push(group.to_string());
        Ok(())
    }

    fn set_area_load_uniform(
        &mut self,
        name: &str,
        pattern: &str,
        value: f64,
        direction: i32,
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()> {
        let load = AreaLoadRecord::Uniform {
            pattern: pattern.to_string(),
            value,
            direction,
            csys,
        };
        self.area_load("set_area_load_uniform", name, replace, load)
    }

    fn set_area_load_uniform_to_frame(
        &mut self,
        name: &str,
        pattern: &str,
        value: f64,
        direction: i32,
        distribution: i32,
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()> {
        if !(1..=2).contains(&distribution) {
            self.enter("set_area_load_uniform_to_frame", name)?;
            return Err(ApiStatus::FAILED);
        }
        let load = AreaLoadRecord::UniformToFrame {
            pattern: pattern.to_string(),
            value,
            direction,
            distribution,
            csys,
        };
        self.area_load("set_area_load_uniform_to_frame", name, replace, load)
    }

    fn set_area_load_temperature(
        &mut self,
        name: &str,
        pattern: &str,
        load_type: i32,
        value: f64,
        replace: bool,
    ) -> ApiResult<()> {
        let load = AreaLoadRecord::Temperature {
            pattern: pattern.to_string(),
            load_type,
            value,
        };
        self.area_load("set_area_load_temperature", name, replace, load)
    }

    fn add_link(&mut self, primary: &str, secondary: &str, property: &str, user_name: &str) -> ApiResult<String> {
        self.enter("add_link", user_name)?;
        if !self.points.contains(primary) || !self.points.contains(secondary) {
            return Err(ApiStatus::FAILED);
        }
        if !self.link_properties.contains(property) {
            return Err(ApiStatus::FAILED);
        }
        let record = LinkRecord {
            guid: Self::new_guid(),
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            property: property.to_string(),
        };
        Ok(self.links.insert(user_name, record))
    }

    fn link_guid(&self, name: &str) -> ApiResult<String> {
        self.query("link_guid", name)?;
        self.links.get(name).map(|l| l.guid.clone()).ok_or(ApiStatus::FAILED)
    }

    fn set_link_property_linear(&mut self, name: &str, fixity: [bool; 6]) -> ApiResult<()> {
        self.enter("set_link_property_linear", name)?;
        self.link_properties.upsert(name, fixity);
        Ok(())
    }

    fn set_group(&mut self, name: &str) -> ApiResult<()> {
        self.enter("set_group", name)?;
        if name.trim().is_empty() {
            return Err(ApiStatus::FAILED);
        }
        if !self.has_group(name) {
            self.groups.push(name.to_string());
        }
        Ok(())
    }

    fn add_material(&mut self, name: &str, material_type: i32) -> ApiResult<String> {
        self.enter("add_material", name)?;
        if !(1..=8).contains(&material_type) {
            return Err(ApiStatus::FAILED);
        }
        let record = MaterialRecord {
            material_type,
            youngs_modulus: 0.0,
            poissons_ratio: 0.0,
            thermal_expansion: 0.0,
            density: 0.0,
        };
        Ok(self.materials.insert(name, record))
    }

    fn set_material_isotropic(
        &mut self,
        name: &str,
        youngs_modulus: f64,
        poissons_ratio: f64,
        thermal_expansion: f64,
    ) -> ApiResult<()> {
        self.enter("set_material_isotropic", name)?;
        let material = self.materials.get_mut(name).ok_or(ApiStatus::FAILED)?;
        material.youngs_modulus = youngs_modulus;
        material.poissons_ratio = poissons_ratio;
        material.thermal_expansion = thermal_expansion;
        Ok(())
    }

    fn set_material_mass(&mut self, name: &str, density: f64) -> ApiResult<()> {
        self.enter("set_material_mass", name)?;
        self.materials.get_mut(name).ok_or(ApiStatus::FAILED)?.density = density;
        Ok(())
    }

    fn set_frame_section_general(
        &mut self,
        name: &str,
        material: &str,
        depth: f64,
        width: f64,
        area: f64,
        as2: f64,
        as3: f64,
        torsion: f64,
        i22: f64,
        i33: f64,
    ) -> ApiResult<()> {
        self.enter("set_frame_section_general", name)?;
        if name.trim().is_empty() || !self.materials.contains(material) {
            return Err(ApiStatus::FAILED);
        }
        let record = SectionRecord {
            material: material.to_string(),
            depth,
            width,
            area,
            as2,
            as3,
            torsion,
            i22,
            i33,
        };
        self.sections.upsert(name, record);
        Ok(())
    }

    fn set_area_shell(&mut self, name: &str, material: &str, thickness: f64) -> ApiResult<()> {
        self.enter("set_area_shell", name)?;
        if name.trim().is_empty() || !self.materials.contains(material) || thickness <= 0.0 {
            return Err(ApiStatus::FAILED);
        }
        self.shells.upsert(
            name,
            ShellRecord {
                material: material.to_string(),
                thickness,
            },
        );
        Ok(())
    }

    fn add_load_pattern(&mut self, name: &str, nature: i32, self_weight: f64, add_analysis_case: bool) -> ApiResult<()> {
        self.enter("add_load_pattern", name)?;
        if name.trim().is_empty() || self.patterns.contains(name) {
            return Err(ApiStatus::FAILED);
        }
        self.patterns.upsert(name, PatternRecord { nature, self_weight });
        if add_analysis_case {
            self.cases.upsert(
                name,
                CaseRecord {
                    loads: vec![("Load".to_string(), name.to_string(), 1.0)],
                },
            );
        }
        Ok(())
    }

    fn set_static_linear_case(&mut self, name: &str) -> ApiResult<()> {
        self.enter("set_static_linear_case", name)?;
        self.cases.upsert(name, CaseRecord::default());
        Ok(())
    }

    fn set_static_linear_loads(&mut self, case: &str, loads: &[(String, String, f64)]) -> ApiResult<()> {
        self.enter("set_static_linear_loads", case)?;
        if loads.iter().any(|(_, pattern, _)| !self.patterns.contains(pattern)) {
            return Err(ApiStatus::FAILED);
        }
        self.cases.get_mut(case).ok_or(ApiStatus::FAILED)?.loads = loads.to_vec();
        Ok(())
    }

    fn load_pattern_count(&self) -> ApiResult<usize> {
        self.query("load_pattern_count", "")?;
        Ok(self.patterns.len())
    }

    fn self_weight_multiplier(&self, pattern: &str) -> ApiResult<f64> {
        self.query("self_weight_multiplier", pattern)?;
        self.patterns.get(pattern).map(|p| p.self_weight).ok_or(ApiStatus::FAILED)
    }

    fn set_self_weight_multiplier(&mut self, pattern: &str, multiplier: f64) -> ApiResult<()> {
        self.enter("set_self_weight_multiplier", pattern)?;
        self.patterns.get_mut(pattern).ok_or(ApiStatus::FAILED)?.self_weight = multiplier;
        Ok(())
    }

    fn add_combination(&mut self, name: &str, combo_type: i32) -> ApiResult<()> {
        self.enter("add_combination", name)?;
        if name.trim().is_empty() || self.combinations.contains(name) {
            return Err(ApiStatus::FAILED);
        }
        self.combinations.upsert(
            name,
            CombinationRecord {
                combo_type,
                cases: Vec::new(),
            },
        );
        Ok(())
    }

    fn set_combination_case(&mut self, combo: &str, kind: ComboCaseKind, case: &str, factor: f64) -> ApiResult<()> {
        self.enter("set_combination_case", combo)?;
        let exists = match kind {
            ComboCaseKind::LoadCase => self.cases.contains(case),
            ComboCaseKind::LoadCombination => self.combinations.contains(case) && case != combo,
        };
        if !exists {
            return Err(ApiStatus::FAILED);
        }
        let record = self.combinations.get_mut(combo).ok_or(ApiStatus::FAILED)?;
        match record.cases.iter_mut().find(|(k, c, _)| *k == kind && c == case) {
            Some(entry) => entry.2 = factor,
            None => record.cases.push((kind, case.to_string(), factor)),
        }
        Ok(())
    }

    fn name_list(&self, category: ObjectCategory) -> ApiResult<Vec<String>> {
        self.query("name_list", category.label())?;
        let names = match category {
            ObjectCategory::Point => self.points.names(),
            ObjectCategory::Frame => self.frames.names(),
            ObjectCategory::Area => self.areas.names(),
            ObjectCategory::Link => self.links.names(),
            ObjectCategory::FrameSection => self.sections.names(),
            ObjectCategory::AreaProperty => self.shells.names(),
            ObjectCategory::LinkProperty => self.link_properties.names(),
            ObjectCategory::Material => self.materials.names(),
            ObjectCategory::LoadPattern => self.patterns.names(),
            ObjectCategory::AnalysisCase => self.cases.names(),
            ObjectCategory::Combination => self.combinations.names(),
        };
        Ok(names)
    }

    fn delete(&mut self, category: ObjectCategory, name: &str) -> ApiResult<()> {
        self.enter("delete", name)?;
        let in_use = match category {
            ObjectCategory::Point => self.point_in_use(name),
            ObjectCategory::FrameSection => self.frames.values().any(|f| f.section == name),
            ObjectCategory::AreaProperty => self.areas.values().any(|a| a.property == name),
            ObjectCategory::LinkProperty => self.links.values().any(|l| l.property == name),
            ObjectCategory::Material => {
                self.sections.values().any(|s| s.material == name) || self.shells.values().any(|s| s.material == name)
            }
            _ => false,
        };
        if in_use {
            return Err(ApiStatus::FAILED);
        }
        let removed = match category {
            ObjectCategory::Point => self.points.remove(name),
            ObjectCategory::Frame => self.frames.remove(name),
            ObjectCategory::Area => self.areas.remove(name),
            ObjectCategory::Link => self.links.remove(name),
            ObjectCategory::FrameSection => self.sections.remove(name),
            ObjectCategory::AreaProperty => self.shells.remove(name),
            ObjectCategory::LinkProperty => self.link_properties.remove(name),
            ObjectCategory::Material => self.materials.remove(name),
            ObjectCategory::LoadPattern => self.patterns.remove(name),
            ObjectCategory::AnalysisCase => self.cases.remove(name),
            ObjectCategory::Combination => self.combinations.remove(name),
        };
        if removed {
            Ok(())
        } else {
            Err(ApiStatus::FAILED)
        }
    }

    fn deselect_all_for_output(&mut self) -> ApiResult<()> {
        self.enter("deselect_all_for_output", "")?;
        self.selected_cases.clear();
        self.selected_combinations.clear();
        Ok(())
    }

    fn select_case_for_output(&mut self, case: &str) -> ApiResult<()> {
        self.enter("select_case_for_output", case)?;
        if !self.cases.contains(case) {
            return Err(ApiStatus::FAILED);
        }
        if !self.selected_cases.iter().any(|c| c == case) {
            self.selected_cases.push(case.to_string());
        }
        Ok(())
    }

    fn select_combination_for_output(&mut self, combo: &str) -> ApiResult<()> {
        self.enter("select_combination_for_output", combo)?;
        if !self.combinations.contains(combo) {
            return Err(ApiStatus::FAILED);
        }
        if !self.selected_combinations.iter().any(|c| c == combo) {
            self.selected_combinations.push(combo.to_string());
        }
        Ok(())
    }

    fn base_reactions(&self) -> ApiResult<BaseReactions> {
        self.query("base_reactions", "")?;
        let r = &self.reactions;
        let rows: Vec<usize> = (0..r.case_names.len())
            .filter(|&i| self.is_output_selected(&r.case_names[i]))
            .collect();
        Ok(BaseReactions {
            case_names: pick(&r.case_names, &rows),
            step_types: pick(&r.step_types, &rows),
            step_nums: pick(&r.step_nums, &rows),
            fx: pick(&r.fx, &rows),
            fy: pick(&r.fy, &rows),
            fz: pick(&r.fz, &rows),
            mx: pick(&r.mx, &rows),
            my: pick(&r.my, &rows),
            mz: pick(&r.mz, &rows),
            gx: r.gx,
            gy: r.gy,
            gz: r.gz,
        })
    }

    fn modal_participating_mass_ratios(&self) -> ApiResult<ModalMassRatios> {
        self.query("modal_participating_mass_ratios", "")?;
        let m = &self.modal;
        let rows: Vec<usize> = (0..m.case_names.len())
            .filter(|&i| self.is_output_selected(&m.case_names[i]))
            .collect();
        Ok(ModalMassRatios {
            case_names: pick(&m.case_names, &rows),
            step_types: pick(&m.step_types, &rows),
            step_nums: pick(&m.step_nums, &rows),
            periods: pick(&m.periods, &rows),
            ux: pick(&m.ux, &rows),
            uy: pick(&m.uy, &rows),
            uz: pick(&m.uz, &rows),
            sum_ux: pick(&m.sum_ux, &rows),
            sum_uy: pick(&m.sum_uy, &rows),
            sum_uz: pick(&m.sum_uz, &rows),
            rx: pick(&m.rx, &rows),
            ry: pick(&m.ry, &rows),
            rz: pick(&m.rz, &rows),
            sum_rx: pick(&m.sum_rx, &rows),
            sum_ry: pick(&m.sum_ry, &rows),
            sum_rz: pick(&m.sum_rz, &rows),
        })
    }
}
