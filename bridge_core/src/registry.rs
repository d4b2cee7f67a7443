//! # Identifier Registry
//!
//! Side-record mapping a domain entity's `Uuid` to the identifiers the
//! external application assigned to it. An entity gets at most one record
//! per session and the record is never replaced: every later call that
//! addresses the entity uses [`ExternalId::id`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiers assigned by the external application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalId {
    /// Name the external model uses to address the object
    pub id: String,
    /// Persistent token that survives renames, for object types that have one
    pub persistent_id: Option<String>,
}

impl ExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        ExternalId {
            id: id.into(),
            persistent_id: None,
        }
    }

    pub fn with_persistent_id(id: impl Into<String>, persistent_id: impl Into<String>) -> Self {
        ExternalId {
            id: id.into(),
            persistent_id: Some(persistent_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdRegistry {
    ids: HashMap<Uuid, ExternalId>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the external identifiers of an entity.
    ///
    /// Returns `false` and leaves the existing record untouched when the
    /// entity already has one.
    pub fn assign(&mut self, entity: Uuid, external: ExternalId) -> bool {
        if self.ids.contains_key(&entity) {
            return false;
        }
        self.ids.insert(entity, external);
        true
    }

    pub fn get(&self, entity: Uuid) -> Option<&ExternalId> {
        self.ids.get(&entity)
    }

    /// External name of an entity, if it has been synchronized
    pub fn name_of(&self, entity: Uuid) -> Option<&str> {
        self.ids.get(&entity).map(|e| e.id.as_str())
    }

    pub fn contains(&self, entity: Uuid) -> bool {
        self.ids.contains_key(&entity)
    }

    /// Entity whose external name matches, if any
    pub fn entity_for(&self, external_name: &str) -> Option<Uuid> {
        self.ids
            .iter()
            .find(|(_, e)| e.id == external_name)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
