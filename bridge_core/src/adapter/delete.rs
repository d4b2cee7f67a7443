use crate::adapter::{operation, Adapter};
use crate::api::{AnalysisModel, ObjectCategory};
use crate::errors::BridgeError;

impl<A: AnalysisModel> Adapter<A> {
    /// Delete named objects of one category.
    ///
    /// With `None`, every object the external model lists for the category
    /// is deleted. Returns the number of successful deletions; each failure
    /// is recorded and does not stop the others.
    pub fn delete_by_ids(&mut self, category: ObjectCategory, ids: Option<&[String]>) -> usize {
        let op = operation("delete", category.label());

        let names = match ids {
            Some(ids) => ids.to_vec(),
            None => match self.api.name_list(category) {
                Ok(names) => names,
                Err(status) => {
                    self.diagnostics.error(
                        &op,
                        None,
                        format!("{} objects could not be listed: {}", category.label(), status),
                    );
                    return 0;
                }
            },
        };

        let mut deleted = 0;
        for name in &names {
            match self.api.delete(category, name) {
                Ok(()) => deleted += 1,
                Err(_) => {
                    let error = BridgeError::delete_failed(category.label(), name);
                    self.diagnostics.record(&op, &error);
                }
            }
        }

        log::debug!("deleted {} of {} {} objects", deleted, names.len(), category.label());
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::memory::InMemoryModel;
    use crate::model::elements::{Bar, Node};
    use crate::model::geometry::point;
    use crate::model::Model;

    fn pushed() -> Adapter<InMemoryModel> {
        let mut model = Model::new("Engineer");
        let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
        let b = model.add_node(Node::new("B", point(5.0, 0.0, 0.0)));
        model.add_node(Node::new("C", point(5.0, 5.0, 0.0)));
        model.add_bar(Bar::new("AB", a, b));

        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.push(&model);
        adapter
    }

    #[test]
    fn test_delete_named_objects() {
        let mut adapter = pushed();
        let ids = vec!["C".to_string()];
        assert_eq!(adapter.delete_by_ids(ObjectCategory::Point, Some(ids.as_slice())), 1);
        assert!(adapter.api().point("C").is_none());
        assert!(adapter.diagnostics().is_empty());
    }

    #[test]
    fn test_delete_failure_recorded_per_object() {
        let mut adapter = pushed();
        let deleted = adapter.delete_by_ids(ObjectCategory::Point, None);

        // A and B still carry the bar
        assert_eq!(deleted, 1);
        assert_eq!(adapter.diagnostics().with_code("DELETE_FAILED").count(), 2);
    }

    #[test]
    fn test_delete_everything_in_order() {
        let mut adapter = pushed();
        assert_eq!(adapter.delete_by_ids(ObjectCategory::Frame, None), 1);
        assert_eq!(adapter.delete_by_ids(ObjectCategory::Point, None), 3);
        assert_eq!(adapter.api().object_count(), 0);
    }
}
