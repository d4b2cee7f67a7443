//! Load cases, load combinations and loads
//!
//! # Overview
//!
//! - [`LoadNature`] - Category of a load case (dead, live, wind, ...)
//! - [`Loadcase`] - A named load pattern
//! - [`LoadCombination`] - Ordered (factor, case) pairs
//! - [`Load`] - Closed set of load kinds, each targeting elements by id
//!
//! # Example
//!
//! ```
//! use bridge_core::model::loads::{Loadcase, LoadCombination, LoadNature};
//!
//! let dead = Loadcase::new("DL", LoadNature::Dead);
//! let live = Loadcase::new("LL", LoadNature::Live);
//! let combo = LoadCombination::new("1.2D+1.6L")
//!     .with_case(1.2, dead.id)
//!     .with_case(1.6, live.id);
//!
//! assert_eq!(combo.cases.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{Line, Point, Vector};

// ============================================================================
// Load cases and combinations
// ============================================================================

/// Nature of a load case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadNature {
    Dead,
    SuperDead,
    Live,
    Wind,
    Seismic,
    Temperature,
    Snow,
    Accidental,
    Prestress,
    Other,
}

impl LoadNature {
    /// Load pattern type code used by the external application
    pub fn code(&self) -> i32 {
        match self {
            LoadNature::Dead => 1,
            LoadNature::SuperDead => 2,
            LoadNature::Live => 3,
            LoadNature::Seismic => 5,
            LoadNature::Wind => 6,
            LoadNature::Snow => 7,
            LoadNature::Other => 8,
            LoadNature::Temperature => 10,
            LoadNature::Prestress => 12,
            LoadNature::Accidental => 8,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadNature::Dead => "Dead load",
            LoadNature::SuperDead => "Superimposed dead load",
            LoadNature::Live => "Live load",
            LoadNature::Wind => "Wind load",
            LoadNature::Seismic => "Seismic load",
            LoadNature::Temperature => "Temperature load",
            LoadNature::Snow => "Snow load",
            LoadNature::Accidental => "Accidental load",
            LoadNature::Prestress => "Prestress",
            LoadNature::Other => "Other",
        }
    }
}

impl std::fmt::Display for LoadNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A named load pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadcase {
    pub id: Uuid,
    pub name: String,
    pub nature: LoadNature,
}

impl Loadcase {
    pub fn new(name: impl Into<String>, nature: LoadNature) -> Self {
        Loadcase {
            id: Uuid::new_v4(),
            name: name.into(),
            nature,
        }
    }
}

/// A linear combination of load cases (or other combinations)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    pub id: Uuid,
    pub name: String,
    /// Ordered (factor, referenced case or combination id) pairs
    pub cases: Vec<(f64, Uuid)>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>) -> Self {
        LoadCombination {
            id: Uuid::new_v4(),
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a factored case (builder pattern)
    pub fn with_case(mut self, factor: f64, case: Uuid) -> Self {
        self.cases.push((factor, case));
        self
    }

    /// Get the factor for a case (0.0 if not in combination)
    pub fn get_factor(&self, case: Uuid) -> f64 {
        self.cases
            .iter()
            .filter(|(_, id)| *id == case)
            .map(|(factor, _)| factor)
            .sum()
    }
}

// ============================================================================
// Loads
// ============================================================================

/// Axis system a directional load is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadAxis {
    #[default]
    Global,
    Local,
}

/// Fields shared by every element load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadTarget {
    pub name: String,
    pub loadcase: Uuid,
    /// Ids of the elements the load acts on
    pub objects: Vec<Uuid>,
}

impl LoadTarget {
    pub fn new(name: impl Into<String>, loadcase: Uuid, objects: Vec<Uuid>) -> Self {
        LoadTarget {
            name: name.into(),
            loadcase,
            objects,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLoad {
    pub target: LoadTarget,
    pub force: Vector,
    pub moment: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDisplacement {
    pub target: LoadTarget,
    pub translation: Vector,
    pub rotation: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarUniformlyDistributedLoad {
    pub target: LoadTarget,
    pub force: Vector,
    pub moment: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
    #[serde(default)]
    pub projected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarVaryingDistributedLoad {
    pub target: LoadTarget,
    /// Absolute distance of the load start from the bar start
    pub distance_from_a: f64,
    pub force_a: Vector,
    pub moment_a: Vector,
    /// Absolute distance of the load end from the bar end
    pub distance_from_b: f64,
    pub force_b: Vector,
    pub moment_b: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
    #[serde(default)]
    pub projected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaUniformlyDistributedLoad {
    pub target: LoadTarget,
    pub pressure: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
    #[serde(default)]
    pub projected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaTemperatureLoad {
    pub target: LoadTarget,
    pub temperature_change: f64,
}

/// Area load over an arbitrary closed contour, independent of existing panels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourLoad {
    pub name: String,
    pub loadcase: Uuid,
    pub contour: Vec<Point>,
    pub force: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
    #[serde(default)]
    pub projected: bool,
}

/// Line load along an arbitrary segment, independent of existing bars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometricalLineLoad {
    pub name: String,
    pub loadcase: Uuid,
    pub location: Line,
    pub force_a: Vector,
    pub force_b: Vector,
    pub moment_a: Vector,
    pub moment_b: Vector,
    #[serde(default)]
    pub axis: LoadAxis,
    #[serde(default)]
    pub projected: bool,
}

/// Self-weight of the whole model for one load case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityLoad {
    pub name: String,
    pub loadcase: Uuid,
    pub direction: Vector,
    /// Accepted for completeness; gravity always applies to the whole model
    #[serde(default)]
    pub objects: Vec<Uuid>,
}

/// Every load kind the adapter can push
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    Point(PointLoad),
    PointDisplacement(PointDisplacement),
    BarUniform(BarUniformlyDistributedLoad),
    BarVarying(BarVaryingDistributedLoad),
    AreaUniform(AreaUniformlyDistributedLoad),
    AreaTemperature(AreaTemperatureLoad),
    Contour(ContourLoad),
    GeometricalLine(GeometricalLineLoad),
    Gravity(GravityLoad),
}

impl Load {
    pub fn name(&self) -> &str {
        match self {
            Load::Point(l) => &l.target.name,
            Load::PointDisplacement(l) => &l.target.name,
            Load::BarUniform(l) => &l.target.name,
            Load::BarVarying(l) => &l.target.name,
            Load::AreaUniform(l) => &l.target.name,
            Load::AreaTemperature(l) => &l.target.name,
            Load::Contour(l) => &l.name,
            Load::GeometricalLine(l) => &l.name,
            Load::Gravity(l) => &l.name,
        }
    }

    pub fn loadcase(&self) -> Uuid {
        match self {
            Load::Point(l) => l.target.loadcase,
            Load::PointDisplacement(l) => l.target.loadcase,
            Load::BarUniform(l) => l.target.loadcase,
            Load::BarVarying(l) => l.target.loadcase,
            Load::AreaUniform(l) => l.target.loadcase,
            Load::AreaTemperature(l) => l.target.loadcase,
            Load::Contour(l) => l.loadcase,
            Load::GeometricalLine(l) => l.loadcase,
            Load::Gravity(l) => l.loadcase,
        }
    }

    /// Display name of the load kind
    pub fn kind(&self) -> &'static str {
        match self {
            Load::Point(_) => "Point Load",
            Load::PointDisplacement(_) => "Point Displacement",
            Load::BarUniform(_) => "Bar Uniform Load",
            Load::BarVarying(_) => "Bar Varying Load",
            Load::AreaUniform(_) => "Area Uniform Load",
            Load::AreaTemperature(_) => "Area Temperature Load",
            Load::Contour(_) => "Contour Load",
            Load::GeometricalLine(_) => "Geometrical Line Load",
            Load::Gravity(_) => "Gravity Load",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::vector;

    #[test]
    fn test_nature_codes() {
        assert_eq!(LoadNature::Dead.code(), 1);
        assert_eq!(LoadNature::Live.code(), 3);
        assert_eq!(LoadNature::Wind.code(), 6);
        assert_eq!(LoadNature::Temperature.code(), 10);
    }

    #[test]
    fn test_combination_factor() {
        let dead = Loadcase::new("DL", LoadNature::Dead);
        let combo = LoadCombination::new("C1").with_case(1.35, dead.id);
        assert_eq!(combo.get_factor(dead.id), 1.35);
        assert_eq!(combo.get_factor(Uuid::new_v4()), 0.0);
    }

    #[test]
    fn test_load_tagged_serialization() {
        let case = Loadcase::new("DL", LoadNature::Dead);
        let load = Load::Gravity(GravityLoad {
            name: "SW".to_string(),
            loadcase: case.id,
            direction: vector(0.0, 0.0, -1.0),
            objects: Vec::new(),
        });

        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"Gravity\""));

        let parsed: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name(), "SW");
        assert_eq!(parsed.loadcase(), case.id);
        assert_eq!(parsed.kind(), "Gravity Load");
    }
}
