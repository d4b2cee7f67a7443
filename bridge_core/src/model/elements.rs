//! Structural elements: nodes, bars and panels.
//!
//! Elements reference each other and their properties by `Uuid`. A bar with
//! a missing endpoint is representable on purpose: the adapter rejects it at
//! push time with a validation error instead of the model refusing to hold it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{Point, Vector};
use crate::units::Radians;

// ============================================================================
// Nodes
// ============================================================================

/// Fixity of a single degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DofType {
    Fixed,
    Free,
    /// Elastic spring with the given stiffness
    Spring(f64),
}

impl DofType {
    /// Whether the external model sees this DOF as released
    pub fn is_released(&self) -> bool {
        !matches!(self, DofType::Fixed)
    }

    /// Spring stiffness, zero unless this is a spring
    pub fn stiffness(&self) -> f64 {
        match self {
            DofType::Spring(k) => *k,
            _ => 0.0,
        }
    }
}

/// Six-DOF constraint in local (or global, for supports) axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint6 {
    pub tx: DofType,
    pub ty: DofType,
    pub tz: DofType,
    pub rx: DofType,
    pub ry: DofType,
    pub rz: DofType,
}

impl Constraint6 {
    pub fn fixed() -> Self {
        Constraint6 {
            tx: DofType::Fixed,
            ty: DofType::Fixed,
            tz: DofType::Fixed,
            rx: DofType::Fixed,
            ry: DofType::Fixed,
            rz: DofType::Fixed,
        }
    }

    pub fn pinned() -> Self {
        Constraint6 {
            rx: DofType::Free,
            ry: DofType::Free,
            rz: DofType::Free,
            ..Constraint6::fixed()
        }
    }

    /// Constraint with every DOF free
    pub fn free() -> Self {
        Constraint6 {
            tx: DofType::Free,
            ty: DofType::Free,
            tz: DofType::Free,
            rx: DofType::Free,
            ry: DofType::Free,
            rz: DofType::Free,
        }
    }

    /// DOFs in x, y, z, rx, ry, rz order
    pub fn dofs(&self) -> [DofType; 6] {
        [self.tx, self.ty, self.tz, self.rx, self.ry, self.rz]
    }
}

impl Default for Constraint6 {
    fn default() -> Self {
        Constraint6::fixed()
    }
}

/// A point in the structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub name: String,
    pub position: Point,
    /// Support condition in global axes; fixed DOFs are restrained
    pub support: Option<Constraint6>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Node {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            support: None,
            tags: Vec::new(),
        }
    }

    /// Attach a support (builder pattern)
    pub fn with_support(mut self, support: Constraint6) -> Self {
        self.support = Some(support);
        self
    }

    /// Add a group tag (builder pattern)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

// ============================================================================
// Bars
// ============================================================================

/// End releases of a bar in its local axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRelease {
    pub start: Constraint6,
    pub end: Constraint6,
}

impl BarRelease {
    pub fn fix_fix() -> Self {
        BarRelease {
            start: Constraint6::fixed(),
            end: Constraint6::fixed(),
        }
    }

    /// Moment releases at both ends, torsion held at the start
    pub fn pin_pin() -> Self {
        BarRelease {
            start: Constraint6 {
                ry: DofType::Free,
                rz: DofType::Free,
                ..Constraint6::fixed()
            },
            end: Constraint6 {
                ry: DofType::Free,
                rz: DofType::Free,
                ..Constraint6::fixed()
            },
        }
    }
}

/// End offsets of a bar in its local axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub start: Option<Vector>,
    pub end: Option<Vector>,
}

/// Cardinal insertion point of the section relative to the bar axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertionPoint {
    BottomLeft,
    BottomCenter,
    BottomRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    Centroid,
    ShearCenter,
}

impl InsertionPoint {
    /// Cardinal point code used by the external application (1-11)
    pub fn code(&self) -> i32 {
        match self {
            InsertionPoint::BottomLeft => 1,
            InsertionPoint::BottomCenter => 2,
            InsertionPoint::BottomRight => 3,
            InsertionPoint::MiddleLeft => 4,
            InsertionPoint::MiddleCenter => 5,
            InsertionPoint::MiddleRight => 6,
            InsertionPoint::TopLeft => 7,
            InsertionPoint::TopCenter => 8,
            InsertionPoint::TopRight => 9,
            InsertionPoint::Centroid => 10,
            InsertionPoint::ShearCenter => 11,
        }
    }
}

/// Meshing hints for the external mesher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarAutoMesh {
    pub auto_mesh: bool,
    pub at_points: bool,
    pub at_lines: bool,
    /// Minimum number of segments, zero for no minimum
    pub num_segments: i32,
    /// Maximum segment length, zero for no maximum
    pub max_length: f64,
}

impl Default for BarAutoMesh {
    fn default() -> Self {
        BarAutoMesh {
            auto_mesh: true,
            at_points: true,
            at_lines: true,
            num_segments: 0,
            max_length: 0.0,
        }
    }
}

/// Design procedure requested for a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignProcedure {
    Steel,
    Concrete,
    Aluminium,
    ColdFormed,
    NoDesign,
}

impl DesignProcedure {
    /// Whether the procedure can be derived from the material in the external model
    pub fn derives_from_material(&self) -> bool {
        !matches!(self, DesignProcedure::NoDesign)
    }
}

/// A line element between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub id: Uuid,
    pub name: String,
    pub start: Option<Uuid>,
    pub end: Option<Uuid>,
    pub section: Option<Uuid>,
    /// Rotation about the local x axis
    #[serde(default)]
    pub orientation_angle: Radians,
    pub release: Option<BarRelease>,
    pub offset: Option<Offset>,
    #[serde(default)]
    pub insertion_point: InsertionPoint,
    /// Whether stiffness is transformed for the insertion offset
    #[serde(default)]
    pub modify_stiffness_insertion_point: bool,
    pub auto_mesh: Option<BarAutoMesh>,
    pub design_procedure: Option<DesignProcedure>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Bar {
    pub fn new(name: impl Into<String>, start: Uuid, end: Uuid) -> Self {
        Bar {
            id: Uuid::new_v4(),
            name: name.into(),
            start: Some(start),
            end: Some(end),
            section: None,
            orientation_angle: Radians(0.0),
            release: None,
            offset: None,
            insertion_point: InsertionPoint::Centroid,
            modify_stiffness_insertion_point: true,
            auto_mesh: None,
            design_procedure: None,
            tags: Vec::new(),
        }
    }

    /// Assign a section (builder pattern)
    pub fn with_section(mut self, section: Uuid) -> Self {
        self.section = Some(section);
        self
    }

    /// Set the orientation angle (builder pattern)
    pub fn with_orientation(mut self, angle: Radians) -> Self {
        self.orientation_angle = angle;
        self
    }

    /// Set end releases (builder pattern)
    pub fn with_release(mut self, release: BarRelease) -> Self {
        self.release = Some(release);
        self
    }

    /// Set end offsets (builder pattern)
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add a group tag (builder pattern)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set meshing hints (builder pattern)
    pub fn with_auto_mesh(mut self, auto_mesh: BarAutoMesh) -> Self {
        self.auto_mesh = Some(auto_mesh);
        self
    }

    /// Set design procedure (builder pattern)
    pub fn with_design_procedure(mut self, procedure: DesignProcedure) -> Self {
        self.design_procedure = Some(procedure);
        self
    }
}

// ============================================================================
// Panels
// ============================================================================

/// A planar area element bounded by a closed polygon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub id: Uuid,
    pub name: String,
    /// Outline vertices, not repeated at the end
    pub outline: Vec<Point>,
    #[serde(default)]
    pub openings: Vec<Vec<Point>>,
    pub property: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Panel {
    pub fn new(name: impl Into<String>, outline: Vec<Point>) -> Self {
        Panel {
            id: Uuid::new_v4(),
            name: name.into(),
            outline,
            openings: Vec::new(),
            property: None,
            tags: Vec::new(),
        }
    }

    /// Assign a surface property (builder pattern)
    pub fn with_property(mut self, property: Uuid) -> Self {
        self.property = Some(property);
        self
    }

    /// Add a group tag (builder pattern)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
