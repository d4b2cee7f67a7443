//! # Adapter
//!
//! [`Adapter`] owns one external session and translates domain entities
//! into calls on it. A push walks the model in dependency order:
//!
//! ```text
//! materials → sections → surface properties → nodes → bars → panels
//!           → rigid links → load cases → combinations → loads
//! ```
//!
//! Every entity follows the same pipeline: validate, create, fetch the
//! persistent id, record the [`ExternalId`], set properties. Only a failed
//! validation or create stops an entity; property failures become warnings
//! and nothing in a batch stops the batch.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::adapter::Adapter;
//! use bridge_core::config::AdapterConfig;
//! use bridge_core::memory::InMemoryModel;
//! use bridge_core::model::{Model, elements::Node, geometry::point};
//!
//! let mut model = Model::new("Engineer");
//! let node = model.add_node(Node::new("N1", point(0.0, 0.0, 0.0)));
//!
//! let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
//! let report = adapter.push(&model);
//!
//! assert_eq!(report.created(), 1);
//! assert_eq!(adapter.registry().name_of(node), Some("N1"));
//! ```

pub mod convert;
pub mod create;
pub mod delete;
pub mod read;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{AnalysisModel, ApiResult};
use crate::config::AdapterConfig;
use crate::diagnostics::{Diagnostics, Severity};
use crate::errors::{BridgeError, BridgeResult};
use crate::model::Model;
use crate::registry::{ExternalId, IdRegistry};

/// An entity the adapter created on its own to carry a load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperEntity {
    /// "Node", "Bar" or "Panel"
    pub entity_type: String,
    pub id: Uuid,
    pub external_id: String,
    /// Name of the load that needed it
    pub load: String,
}

/// Outcome counts for one entity category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub created: usize,
    /// Entities that already had an external id
    pub skipped: usize,
    pub failed: usize,
}

impl CategoryReport {
    fn new(category: &str) -> Self {
        CategoryReport {
            category: category.to_string(),
            ..Default::default()
        }
    }
}

/// Summary of one [`Adapter::push`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushReport {
    pub categories: Vec<CategoryReport>,
    /// Load targets that received their load
    pub load_targets: usize,
    /// Loads rejected as a whole
    pub loads_failed: usize,
    pub helpers: Vec<HelperEntity>,
    pub notes: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl PushReport {
    pub fn category(&self, category: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Entities created across all categories
    pub fn created(&self) -> usize {
        self.categories.iter().map(|c| c.created).sum()
    }

    pub fn failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }
}

pub struct Adapter<A: AnalysisModel> {
    api: A,
    registry: IdRegistry,
    diagnostics: Diagnostics,
    config: AdapterConfig,
    helpers: Vec<HelperEntity>,
    /// Link constraints already defined as link properties
    link_properties: Vec<String>,
}

impl<A: AnalysisModel> Adapter<A> {
    pub fn new(api: A, config: AdapterConfig) -> Self {
        Adapter {
            api,
            registry: IdRegistry::new(),
            diagnostics: Diagnostics::new(),
            config,
            helpers: Vec::new(),
            link_properties: Vec::new(),
        }
    }

    /// Continue a session with identifiers recorded earlier
    pub fn with_registry(mut self, registry: IdRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Helper entities created so far in this session
    pub fn helpers(&self) -> &[HelperEntity] {
        &self.helpers
    }

    /// End the session, handing back the external model and the registry
    pub fn into_parts(self) -> (A, IdRegistry, Diagnostics) {
        (self.api, self.registry, self.diagnostics)
    }

    /// Push every entity of a model.
    ///
    /// Per-entity failures are recorded in the diagnostics and counted in
    /// the report; the push itself never fails.
    pub fn push(&mut self, model: &Model) -> PushReport {
        let first_record = self.diagnostics.records().len();
        let first_helper = self.helpers.len();
        let mut report = PushReport::default();

        log::info!("pushing {} entities", model.entity_count());

        report.categories.push(self.push_category("Material", &model.materials, |m| m.id, |a, m| a.create_material(m)));
        report.categories.push(self.push_category("SectionProperty", &model.sections, |s| s.id, |a, s| {
            a.create_section(model, s)
        }));
        report.categories.push(self.push_category(
            "SurfaceProperty",
            &model.surface_properties,
            |s| s.id,
            |a, s| a.create_surface_property(model, s),
        ));
        report.categories.push(self.push_category("Node", &model.nodes, |n| n.id, |a, n| a.create_node(n)));
        report.categories.push(self.push_category("Bar", &model.bars, |b| b.id, |a, b| a.create_bar(model, b)));
        report.categories.push(self.push_category("Panel", &model.panels, |p| p.id, |a, p| a.create_panel(model, p)));
        report.categories.push(self.push_category("RigidLink", &model.links, |l| l.id, |a, l| a.create_link(l)));
        report.categories.push(self.push_category("Loadcase", &model.loadcases, |c| c.id, |a, c| a.create_loadcase(c)));
        report.categories.push(self.push_category(
            "LoadCombination",
            &model.combinations,
            |c| c.id,
            |a, c| a.create_combination(model, c),
        ));

        for load in &model.loads {
            match self.apply_load(model, load) {
                Ok(applied) => report.load_targets += applied,
                Err(e) => {
                    report.loads_failed += 1;
                    self.diagnostics.record(&operation("apply", load.kind()), &e);
                }
            }
        }

        report.helpers = self.helpers[first_helper..].to_vec();
        let added = &self.diagnostics.records()[first_record..];
        report.notes = added.iter().filter(|d| d.severity == Severity::Note).count();
        report.warnings = added.iter().filter(|d| d.severity == Severity::Warning).count();
        report.errors = added.iter().filter(|d| d.severity == Severity::Error).count();

        log::info!(
            "push finished: {} created, {} failed, {} load targets",
            report.created(),
            report.failed(),
            report.load_targets
        );
        report
    }

    fn push_category<T>(
        &mut self,
        category: &str,
        items: &[T],
        id_of: impl Fn(&T) -> Uuid,
        mut create: impl FnMut(&mut Self, &T) -> BridgeResult<ExternalId>,
    ) -> CategoryReport {
        let mut report = CategoryReport::new(category);
        for item in items {
            let known = self.registry.contains(id_of(item));
            match create(self, item) {
                Ok(_) if known => report.skipped += 1,
                Ok(_) => report.created += 1,
                Err(e) => {
                    report.failed += 1;
                    self.diagnostics.record(&operation("create", category), &e);
                }
            }
        }
        report
    }

    // ========================================================================
    // Shared pipeline steps
    // ========================================================================

    /// Existing annotation of an entity, noting that it will not be created again
    pub(crate) fn already_synced(&mut self, entity_type: &str, id: Uuid, name: &str) -> Option<ExternalId> {
        let existing = self.registry.get(id)?.clone();
        self.diagnostics.note(
            &operation("create", entity_type),
            Some(name),
            format!(
                "{} {} already has external id {}; it was not created again",
                entity_type, name, existing.id
            ),
        );
        Some(existing)
    }

    /// Note when the external application picked a different name than requested
    pub(crate) fn note_rename(&mut self, entity_type: &str, requested: &str, assigned: &str) {
        if !requested.is_empty() && requested != assigned {
            self.diagnostics.note(
                &operation("create", entity_type),
                Some(requested),
                format!("{} {} was assigned external id {}", entity_type, requested, assigned),
            );
        }
    }

    /// Record the annotation of a newly created entity
    pub(crate) fn annotate(&mut self, entity_type: &str, id: Uuid, name: String, guid: Option<ApiResult<String>>) -> ExternalId {
        let external = match guid {
            None => ExternalId::new(name),
            Some(Ok(guid)) => ExternalId::with_persistent_id(name, guid),
            Some(Err(status)) => {
                self.diagnostics.warning(
                    &operation("create", entity_type),
                    Some(&name),
                    format!("persistent id could not be read: {}", status),
                );
                ExternalId::new(name)
            }
        };
        self.registry.assign(id, external.clone());
        external
    }

    /// Turn a property call result into a warning on failure
    pub(crate) fn check_property(&mut self, property: &str, entity_type: &str, name: &str, result: ApiResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(_) => {
                let warning = BridgeError::property_warning(property, entity_type, name);
                self.diagnostics.record(&operation("set", entity_type), &warning);
                false
            }
        }
    }

    /// Assign group tags, creating a missing group and retrying once
    pub(crate) fn assign_groups(
        &mut self,
        entity_type: &str,
        name: &str,
        tags: &[String],
        assign: fn(&mut A, &str, &str) -> ApiResult<()>,
    ) -> bool {
        let mut all_set = true;
        for tag in tags {
            let mut result = assign(&mut self.api, name, tag);
            if result.is_err() && self.config.create_missing_groups {
                if let Err(status) = self.api.set_group(tag) {
                    self.diagnostics.warning(
                        &operation("set", entity_type),
                        Some(name),
                        format!("group '{}' could not be created: {}", tag, status),
                    );
                }
                result = assign(&mut self.api, name, tag);
            }
            all_set &= self.check_property(&format!("Group '{}'", tag), entity_type, name, result);
        }
        all_set
    }

    /// External name of an entity the caller references by id
    pub(crate) fn external_name(&self, id: Uuid) -> Option<String> {
        self.registry.name_of(id).map(str::to_string)
    }

    pub(crate) fn track_helper(&mut self, entity_type: &str, id: Uuid, external_id: &str, load: &str) {
        self.helpers.push(HelperEntity {
            entity_type: entity_type.to_string(),
            id,
            external_id: external_id.to_string(),
            load: load.to_string(),
        });
    }
}

/// Diagnostic operation label, e.g. "create Bar"
pub(crate) fn operation(verb: &str, subject: &str) -> String {
    format!("{} {}", verb, subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryModel;
    use crate::model::elements::{Bar, Node};
    use crate::model::geometry::point;

    #[test]
    fn test_second_push_skips_annotated_entities() {
        let mut model = Model::new("Engineer");
        let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
        let b = model.add_node(Node::new("B", point(4.0, 0.0, 0.0)));
        model.add_bar(Bar::new("AB", a, b));

        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let first = adapter.push(&model);
        assert_eq!(first.created(), 3);

        let second = adapter.push(&model);
        assert_eq!(second.created(), 0);
        assert_eq!(second.category("Node").unwrap().skipped, 2);
        assert_eq!(second.category("Bar").unwrap().skipped, 1);
        assert_eq!(second.notes, 3);
        assert_eq!(adapter.api().call_count("add_point"), 2);
    }

    #[test]
    fn test_report_counts_failures_without_stopping() {
        let mut model = Model::new("Engineer");
        let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
        model.add_node(Node::new("B", point(4.0, 0.0, 0.0)));
        let mut dangling = Bar::new("AX", a, a);
        dangling.end = None;
        model.add_bar(dangling);

        let mut api = InMemoryModel::new();
        api.fail_on_name("add_point", "B");

        let mut adapter = Adapter::new(api, AdapterConfig::default());
        let report = adapter.push(&model);

        assert_eq!(report.category("Node").unwrap().created, 1);
        assert_eq!(report.category("Node").unwrap().failed, 1);
        assert_eq!(report.category("Bar").unwrap().failed, 1);
        assert_eq!(report.errors, 2);
    }
}
