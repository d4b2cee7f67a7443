use crate::adapter::{convert, Adapter};
use crate::api::AnalysisModel;
use crate::errors::{BridgeError, BridgeResult};
use crate::model::elements::Node;
use crate::registry::ExternalId;

impl<A: AnalysisModel> Adapter<A> {
    pub fn create_node(&mut self, node: &Node) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("Node", node.id, &node.name) {
            return Ok(existing);
        }

        let p = node.position;
        let name = self
            .api
            .add_point(p.x, p.y, p.z, &node.name)
            .map_err(|status| BridgeError::external_create("Node", &node.name, status.to_string()))?;

        self.note_rename("Node", &node.name, &name);
        let guid = self.api.point_guid(&name);
        let external = self.annotate("Node", node.id, name, Some(guid));

        self.set_node(node, &external.id);
        Ok(external)
    }

    /// Support conditions and group tags
    pub fn set_node(&mut self, node: &Node, name: &str) -> bool {
        let mut all_set = true;

        if let Some(support) = &node.support {
            let restraint = self.api.set_point_restraint(name, convert::restraint(support));
            all_set &= self.check_property("Support", "Node", name, restraint);

            if let Some(springs) = convert::springs(support) {
                let spring = self.api.set_point_spring(name, springs);
                all_set &= self.check_property("Support spring", "Node", name, spring);
            }
        }

        all_set &= self.assign_groups("Node", name, &node.tags, A::set_point_group);
        all_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::memory::InMemoryModel;
    use crate::model::elements::Constraint6;
    use crate::model::geometry::point;

    #[test]
    fn test_node_with_support() {
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let node = Node::new("S1", point(0.0, 0.0, 0.0)).with_support(Constraint6::pinned());

        let external = adapter.create_node(&node).unwrap();
        assert_eq!(external.id, "S1");
        assert!(external.persistent_id.is_some());

        let point = adapter.api().point("S1").unwrap();
        assert_eq!(point.restraint, [true, true, true, false, false, false]);
        assert!(point.springs.is_none());
    }

    #[test]
    fn test_empty_name_gets_assigned_name_without_note() {
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let external = adapter.create_node(&Node::new("", point(1.0, 0.0, 0.0))).unwrap();
        assert_eq!(external.id, "1");
        assert!(adapter.diagnostics().is_empty());
    }
}
