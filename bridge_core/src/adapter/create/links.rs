use crate::adapter::{operation, Adapter};
use crate::api::AnalysisModel;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::links::{LinkConstraint, RigidLink};
use crate::registry::ExternalId;

impl<A: AnalysisModel> Adapter<A> {
    /// Create a rigid link as one two-point link per secondary node.
    ///
    /// The annotation of the first part is recorded for the whole link;
    /// later parts that fail are reported but do not undo the link.
    pub fn create_link(&mut self, link: &RigidLink) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("RigidLink", link.id, &link.name) {
            return Ok(existing);
        }

        if link.secondaries.is_empty() {
            return Err(BridgeError::validation("RigidLink", &link.name, "it has no secondary nodes"));
        }

        let Some(primary) = self.external_name(link.primary) else {
            return Err(BridgeError::validation(
                "RigidLink",
                &link.name,
                "its primary node was not found in the external model",
            ));
        };

        let mut secondaries = Vec::with_capacity(link.secondaries.len());
        for secondary in &link.secondaries {
            match self.external_name(*secondary) {
                Some(name) => secondaries.push(name),
                None => {
                    return Err(BridgeError::validation(
                        "RigidLink",
                        &link.name,
                        "a secondary node was not found in the external model",
                    ))
                }
            }
        }

        let property = self.link_property(&link.constraint)?;

        let mut first: Option<ExternalId> = None;
        for (part, secondary) in link.split().iter().zip(&secondaries) {
            match self.api.add_link(&primary, secondary, &property, &part.name) {
                Ok(name) => {
                    self.note_rename("RigidLink", &part.name, &name);
                    if first.is_none() {
                        let guid = self.api.link_guid(&name);
                        first = Some(self.annotate("RigidLink", link.id, name, Some(guid)));
                    }
                }
                Err(status) => {
                    let error = BridgeError::external_create("RigidLink", &part.name, status.to_string());
                    if first.is_none() {
                        return Err(error);
                    }
                    self.diagnostics.record(&operation("create", "RigidLink"), &error);
                }
            }
        }

        first.ok_or_else(|| BridgeError::external_create("RigidLink", &link.name, "no link part was created"))
    }

    /// External link property for a constraint, defined on first use
    fn link_property(&mut self, constraint: &LinkConstraint) -> BridgeResult<String> {
        if self.link_properties.contains(&constraint.name) {
            return Ok(constraint.name.clone());
        }

        self.api
            .set_link_property_linear(&constraint.name, constraint.fixity)
            .map_err(|status| BridgeError::external_create("LinkConstraint", &constraint.name, status.to_string()))?;

        self.link_properties.push(constraint.name.clone());
        Ok(constraint.name.clone())
    }
}
