//! # External Analysis API
//!
//! [`AnalysisModel`] is the seam between the adapter and the external
//! structural-analysis application. Each method is one blocking call into
//! the application's automation interface. Calls that succeed return their
//! output values; any nonzero status code comes back as [`ApiStatus`] and
//! must be treated as failure whatever else the call may have written.
//!
//! Parameter lists are deliberately flat and close to the vendor's own: the
//! adapter, not the backend, is responsible for mapping domain objects.

use serde::{Deserialize, Serialize};

/// Nonzero status code returned by a failed external call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus(pub i32);

impl ApiStatus {
    /// Generic failure code
    pub const FAILED: ApiStatus = ApiStatus(1);

    /// Convert a raw status code (0 = success) into a result
    pub fn check(code: i32) -> ApiResult<()> {
        if code == 0 {
            Ok(())
        } else {
            Err(ApiStatus(code))
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "external call returned status {}", self.0)
    }
}

/// Result of an external call
pub type ApiResult<T> = Result<T, ApiStatus>;

/// Categories of named objects the external model can enumerate and delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Point,
    Frame,
    Area,
    Link,
    FrameSection,
    AreaProperty,
    LinkProperty,
    Material,
    LoadPattern,
    AnalysisCase,
    Combination,
}

impl ObjectCategory {
    /// Domain-facing label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            ObjectCategory::Point => "Node",
            ObjectCategory::Frame => "Bar",
            ObjectCategory::Area => "Panel",
            ObjectCategory::Link => "RigidLink",
            ObjectCategory::FrameSection => "SectionProperty",
            ObjectCategory::AreaProperty => "SurfaceProperty",
            ObjectCategory::LinkProperty => "LinkConstraint",
            ObjectCategory::Material => "Material",
            ObjectCategory::LoadPattern => "Loadcase",
            ObjectCategory::AnalysisCase => "AnalysisCase",
            ObjectCategory::Combination => "LoadCombination",
        }
    }
}

/// Coordinate system a load is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    Global,
    Local,
}

impl CoordinateSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSystem::Global => "Global",
            CoordinateSystem::Local => "Local",
        }
    }
}

/// What a combination entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboCaseKind {
    LoadCase,
    LoadCombination,
}

/// Release flags and partial-fixity springs for both ends of a frame,
/// in U1, U2, U3, R1, R2, R3 order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameReleases {
    pub start: [bool; 6],
    pub end: [bool; 6],
    pub start_springs: [f64; 6],
    pub end_springs: [f64; 6],
}

/// Distributed load along a frame, one direction and one load kind per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDistributedLoad {
    pub frame: String,
    pub pattern: String,
    /// 1 = force per length, 2 = moment per length
    pub load_kind: i32,
    pub direction: i32,
    pub dist1: f64,
    pub dist2: f64,
    pub value1: f64,
    pub value2: f64,
    pub csys: CoordinateSystem,
    /// Distances are fractions of the frame length when true
    pub relative: bool,
    pub replace: bool,
}

/// Parallel arrays returned by the base reaction query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseReactions {
    pub case_names: Vec<String>,
    pub step_types: Vec<String>,
    pub step_nums: Vec<f64>,
    pub fx: Vec<f64>,
    pub fy: Vec<f64>,
    pub fz: Vec<f64>,
    pub mx: Vec<f64>,
    pub my: Vec<f64>,
    pub mz: Vec<f64>,
    /// Reaction summation point
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

/// Parallel arrays returned by the modal participating mass ratio query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModalMassRatios {
    pub case_names: Vec<String>,
    pub step_types: Vec<String>,
    pub step_nums: Vec<f64>,
    pub periods: Vec<f64>,
    pub ux: Vec<f64>,
    pub uy: Vec<f64>,
    pub uz: Vec<f64>,
    pub sum_ux: Vec<f64>,
    pub sum_uy: Vec<f64>,
    pub sum_uz: Vec<f64>,
    pub rx: Vec<f64>,
    pub ry: Vec<f64>,
    pub rz: Vec<f64>,
    pub sum_rx: Vec<f64>,
    pub sum_ry: Vec<f64>,
    pub sum_rz: Vec<f64>,
}

/// One session of the external analysis application.
///
/// Implementations are driven strictly sequentially; the adapter owns the
/// session exclusively while it holds it.
pub trait AnalysisModel {
    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    /// Add a point; returns the name the application assigned
    fn add_point(&mut self, x: f64, y: f64, z: f64, user_name: &str) -> ApiResult<String>;
    fn point_guid(&self, name: &str) -> ApiResult<String>;
    fn set_point_restraint(&mut self, name: &str, restraint: [bool; 6]) -> ApiResult<()>;
    fn set_point_spring(&mut self, name: &str, stiffness: [f64; 6]) -> ApiResult<()>;
    fn set_point_group(&mut self, name: &str, group: &str) -> ApiResult<()>;
    fn set_point_load_force(
        &mut self,
        name: &str,
        pattern: &str,
        values: [f64; 6],
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()>;
    fn set_point_load_displacement(
        &mut self,
        name: &str,
        pattern: &str,
        values: [f64; 6],
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Add a frame between two existing points; returns the assigned name
    fn add_frame(&mut self, start: &str, end: &str, section: &str, user_name: &str) -> ApiResult<String>;
    fn frame_guid(&self, name: &str) -> ApiResult<String>;
    fn set_frame_section(&mut self, name: &str, section: &str) -> ApiResult<()>;
    fn set_frame_local_axes(&mut self, name: &str, angle_degrees: f64) -> ApiResult<()>;
    fn set_frame_releases(&mut self, name: &str, releases: &FrameReleases) -> ApiResult<()>;
    fn set_frame_end_length_offset(
        &mut self,
        name: &str,
        auto_offset: bool,
        length1: f64,
        length2: f64,
        rigid_factor: f64,
    ) -> ApiResult<()>;
    fn set_frame_group(&mut self, name: &str, group: &str) -> ApiResult<()>;
    fn set_frame_auto_mesh(
        &mut self,
        name: &str,
        auto_mesh: bool,
        at_points: bool,
        at_lines: bool,
        num_segments: i32,
        max_length: f64,
    ) -> ApiResult<()>;
    /// 1 = derive from material, 2 = no design
    fn set_frame_design_procedure(&mut self, name: &str, procedure: i32) -> ApiResult<()>;
    fn set_frame_insertion_point(
        &mut self,
        name: &str,
        cardinal_point: i32,
        mirror: bool,
        stiffness_transform: bool,
        offset1: [f64; 3],
        offset2: [f64; 3],
    ) -> ApiResult<()>;
    /// Area, As2, As3, torsion, I22, I33, mass, weight
    fn set_frame_modifiers(&mut self, name: &str, modifiers: [f64; 8]) -> ApiResult<()>;
    fn set_frame_load_distributed(&mut self, load: &FrameDistributedLoad) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Areas
    // ------------------------------------------------------------------

    /// Add an area from its corner coordinates; returns the assigned name
    fn add_area(&mut self, corners: &[[f64; 3]], property: &str, user_name: &str) -> ApiResult<String>;
    fn area_guid(&self, name: &str) -> ApiResult<String>;
    fn set_area_property(&mut self, name: &str, property: &str) -> ApiResult<()>;
    /// Property currently assigned, `"None"` when the area has none
    fn area_property(&self, name: &str) -> ApiResult<String>;
    fn set_area_group(&mut self, name: &str, group: &str) -> ApiResult<()>;
    fn set_area_load_uniform(
        &mut self,
        name: &str,
        pattern: &str,
        value: f64,
        direction: i32,
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()>;
    /// Uniform load transferred to the surrounding frames (1 = one-way, 2 = two-way)
    fn set_area_load_uniform_to_frame(
        &mut self,
        name: &str,
        pattern: &str,
        value: f64,
        direction: i32,
        distribution: i32,
        replace: bool,
        csys: CoordinateSystem,
    ) -> ApiResult<()>;
    /// 1 = uniform temperature change, 3 = gradient
    fn set_area_load_temperature(
        &mut self,
        name: &str,
        pattern: &str,
        load_type: i32,
        value: f64,
        replace: bool,
    ) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    fn add_link(&mut self, primary: &str, secondary: &str, property: &str, user_name: &str) -> ApiResult<String>;
    fn link_guid(&self, name: &str) -> ApiResult<String>;
    /// Define (or redefine) a linear link property; `true` DOFs are rigid
    fn set_link_property_linear(&mut self, name: &str, fixity: [bool; 6]) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    fn set_group(&mut self, name: &str) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Add a material of a type code; returns the assigned name
    fn add_material(&mut self, name: &str, material_type: i32) -> ApiResult<String>;
    fn set_material_isotropic(&mut self, name: &str, youngs_modulus: f64, poissons_ratio: f64, thermal_expansion: f64) -> ApiResult<()>;
    fn set_material_mass(&mut self, name: &str, density: f64) -> ApiResult<()>;
    #[allow(clippy::too_many_arguments)]
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
    ) -> ApiResult<()>;
    fn set_area_shell(&mut self, name: &str, material: &str, thickness: f64) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Load patterns, cases and combinations
    // ------------------------------------------------------------------

    fn add_load_pattern(&mut self, name: &str, nature: i32, self_weight: f64, add_analysis_case: bool) -> ApiResult<()>;
    fn set_static_linear_case(&mut self, name: &str) -> ApiResult<()>;
    /// Entries are (load type, load name, scale factor)
    fn set_static_linear_loads(&mut self, case: &str, loads: &[(String, String, f64)]) -> ApiResult<()>;
    fn load_pattern_count(&self) -> ApiResult<usize>;
    fn self_weight_multiplier(&self, pattern: &str) -> ApiResult<f64>;
    fn set_self_weight_multiplier(&mut self, pattern: &str, multiplier: f64) -> ApiResult<()>;
    fn add_combination(&mut self, name: &str, combo_type: i32) -> ApiResult<()>;
    fn set_combination_case(&mut self, combo: &str, kind: ComboCaseKind, case: &str, factor: f64) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Enumeration and deletion
    // ------------------------------------------------------------------

    fn name_list(&self, category: ObjectCategory) -> ApiResult<Vec<String>>;
    fn delete(&mut self, category: ObjectCategory, name: &str) -> ApiResult<()>;

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    fn deselect_all_for_output(&mut self) -> ApiResult<()>;
    fn select_case_for_output(&mut self, case: &str) -> ApiResult<()>;
    fn select_combination_for_output(&mut self, combo: &str) -> ApiResult<()>;
    fn base_reactions(&self) -> ApiResult<BaseReactions>;
    fn modal_participating_mass_ratios(&self) -> ApiResult<ModalMassRatios>;
}
