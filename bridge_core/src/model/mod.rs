//! # Domain Model
//!
//! The `Model` struct is the caller-owned container for everything that can
//! be pushed. Entities reference each other by `Uuid`; each category is kept
//! in insertion order because push order matters to the external
//! application (nodes before bars, load cases before loads).
//!
//! ## Structure
//!
//! ```text
//! Model
//! ├── meta: ModelMetadata (version, author, timestamps)
//! ├── materials / sections / surface_properties
//! ├── nodes / bars / panels / links
//! ├── loadcases / combinations
//! └── loads
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::model::{Model, geometry::point, elements::{Node, Bar}};
//!
//! let mut model = Model::new("Jane Engineer");
//! let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
//! let b = model.add_node(Node::new("B", point(6.0, 0.0, 0.0)));
//! let bar = model.add_bar(Bar::new("B1", a, b));
//!
//! assert_eq!(model.bar_length(model.bar(bar).unwrap()), Some(6.0));
//! ```

pub mod elements;
pub mod geometry;
pub mod links;
pub mod loads;
pub mod properties;
pub mod results;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use elements::{Bar, Node, Panel};
use links::RigidLink;
use loads::{Load, LoadCombination, Loadcase};
use properties::{Material, SectionProperty, SurfaceProperty};

/// Current schema version for model files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root model container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub meta: ModelMetadata,

    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub sections: Vec<SectionProperty>,
    #[serde(default)]
    pub surface_properties: Vec<SurfaceProperty>,

    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub links: Vec<RigidLink>,

    #[serde(default)]
    pub loadcases: Vec<Loadcase>,
    #[serde(default)]
    pub combinations: Vec<LoadCombination>,
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl Model {
    /// Create a new empty model.
    pub fn new(author: impl Into<String>) -> Self {
        let now = Utc::now();
        Model {
            meta: ModelMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                created: now,
                modified: now,
            },
            materials: Vec::new(),
            sections: Vec::new(),
            surface_properties: Vec::new(),
            nodes: Vec::new(),
            bars: Vec::new(),
            panels: Vec::new(),
            links: Vec::new(),
            loadcases: Vec::new(),
            combinations: Vec::new(),
            loads: Vec::new(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn add_material(&mut self, material: Material) -> Uuid {
        let id = material.id;
        self.materials.push(material);
        self.touch();
        id
    }

    pub fn add_section(&mut self, section: SectionProperty) -> Uuid {
        let id = section.id;
        self.sections.push(section);
        self.touch();
        id
    }

    pub fn add_surface_property(&mut self, property: SurfaceProperty) -> Uuid {
        let id = property.id;
        self.surface_properties.push(property);
        self.touch();
        id
    }

    pub fn add_node(&mut self, node: Node) -> Uuid {
        let id = node.id;
        self.nodes.push(node);
        self.touch();
        id
    }

    pub fn add_bar(&mut self, bar: Bar) -> Uuid {
        let id = bar.id;
        self.bars.push(bar);
        self.touch();
        id
    }

    pub fn add_panel(&mut self, panel: Panel) -> Uuid {
        let id = panel.id;
        self.panels.push(panel);
        self.touch();
        id
    }

    pub fn add_link(&mut self, link: RigidLink) -> Uuid {
        let id = link.id;
        self.links.push(link);
        self.touch();
        id
    }

    pub fn add_loadcase(&mut self, loadcase: Loadcase) -> Uuid {
        let id = loadcase.id;
        self.loadcases.push(loadcase);
        self.touch();
        id
    }

    pub fn add_combination(&mut self, combination: LoadCombination) -> Uuid {
        let id = combination.id;
        self.combinations.push(combination);
        self.touch();
        id
    }

    pub fn add_load(&mut self, load: Load) {
        self.loads.push(load);
        self.touch();
    }

    pub fn material(&self, id: Uuid) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn section(&self, id: Uuid) -> Option<&SectionProperty> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn surface_property(&self, id: Uuid) -> Option<&SurfaceProperty> {
        self.surface_properties.iter().find(|s| s.id == id)
    }

    pub fn node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn bar(&self, id: Uuid) -> Option<&Bar> {
        self.bars.iter().find(|b| b.id == id)
    }

    pub fn panel(&self, id: Uuid) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn loadcase(&self, id: Uuid) -> Option<&Loadcase> {
        self.loadcases.iter().find(|c| c.id == id)
    }

    pub fn combination(&self, id: Uuid) -> Option<&LoadCombination> {
        self.combinations.iter().find(|c| c.id == id)
    }

    /// Length of a bar from its endpoint positions, if both endpoints exist
    pub fn bar_length(&self, bar: &Bar) -> Option<f64> {
        let start = self.node(bar.start?)?;
        let end = self.node(bar.end?)?;
        Some(start.position.distance(&end.position))
    }

    /// Total number of entities in the model
    pub fn entity_count(&self) -> usize {
        self.materials.len()
            + self.sections.len()
            + self.surface_properties.len()
            + self.nodes.len()
            + self.bars.len()
            + self.panels.len()
            + self.links.len()
            + self.loadcases.len()
            + self.combinations.len()
            + self.loads.len()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new("")
    }
}

/// Model metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub author: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use elements::{Bar, Node};
    use geometry::point;

    #[test]
    fn test_model_creation() {
        let model = Model::new("Jane Engineer");
        assert_eq!(model.meta.author, "Jane Engineer");
        assert_eq!(model.meta.version, SCHEMA_VERSION);
        assert_eq!(model.entity_count(), 0);
    }

    #[test]
    fn test_bar_length_requires_both_nodes() {
        let mut model = Model::new("Engineer");
        let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
        let b = model.add_node(Node::new("B", point(0.0, 3.0, 4.0)));
        let bar = Bar::new("B1", a, b);
        assert_eq!(model.bar_length(&bar), Some(5.0));

        let mut dangling = bar.clone();
        dangling.end = None;
        assert_eq!(model.bar_length(&dangling), None);
    }

    #[test]
    fn test_model_serialization() {
        let mut model = Model::new("Engineer");
        model.add_node(Node::new("A", point(1.0, 2.0, 3.0)));

        let json = serde_json::to_string_pretty(&model).unwrap();
        assert!(json.contains("Engineer"));

        let roundtrip: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.nodes.len(), 1);
        assert_eq!(roundtrip.nodes[0].position, point(1.0, 2.0, 3.0));
    }
}
