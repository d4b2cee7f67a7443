use crate::adapter::{operation, Adapter};
use crate::api::{AnalysisModel, ComboCaseKind};
use crate::errors::{BridgeError, BridgeResult};
use crate::model::loads::{LoadCombination, Loadcase};
use crate::model::Model;
use crate::registry::ExternalId;

impl<A: AnalysisModel> Adapter<A> {
    /// Create a load pattern and the static linear case that applies it
    pub fn create_loadcase(&mut self, loadcase: &Loadcase) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("Loadcase", loadcase.id, &loadcase.name) {
            return Ok(existing);
        }

        self.api
            .add_load_pattern(&loadcase.name, loadcase.nature.code(), 0.0, false)
            .map_err(|status| BridgeError::external_create("Loadcase", &loadcase.name, status.to_string()))?;

        let external = self.annotate("Loadcase", loadcase.id, loadcase.name.clone(), None);

        let case = self.api.set_static_linear_case(&loadcase.name);
        if self.check_property("Static linear case", "Loadcase", &loadcase.name, case) {
            let loads = [("Load".to_string(), loadcase.name.clone(), 1.0)];
            let result = self.api.set_static_linear_loads(&loadcase.name, &loads);
            self.check_property("Static linear case loads", "Loadcase", &loadcase.name, result);
        }

        if let Ok(count) = self.api.load_pattern_count() {
            log::debug!("loadcase {} is load pattern {}", loadcase.name, count);
        }

        Ok(external)
    }

    /// Create a linear-additive combination and add its factored cases.
    ///
    /// A referenced case without an external id is skipped with a warning.
    pub fn create_combination(&mut self, model: &Model, combination: &LoadCombination) -> BridgeResult<ExternalId> {
        if let Some(existing) = self.already_synced("LoadCombination", combination.id, &combination.name) {
            return Ok(existing);
        }

        self.api
            .add_combination(&combination.name, 0)
            .map_err(|status| BridgeError::external_create("LoadCombination", &combination.name, status.to_string()))?;

        let external = self.annotate("LoadCombination", combination.id, combination.name.clone(), None);
        let op = operation("create", "LoadCombination");

        for (factor, case_id) in &combination.cases {
            let (kind, case_label) = match (model.loadcase(*case_id), model.combination(*case_id)) {
                (Some(case), _) => (ComboCaseKind::LoadCase, case.name.clone()),
                (None, Some(combo)) => (ComboCaseKind::LoadCombination, combo.name.clone()),
                (None, None) => (ComboCaseKind::LoadCase, case_id.to_string()),
            };

            let Some(case_name) = self.external_name(*case_id) else {
                self.diagnostics.warning(
                    &op,
                    Some(&combination.name),
                    format!(
                        "case {} has no external id; push the case first and build the combination from the result",
                        case_label
                    ),
                );
                continue;
            };

            if self
                .api
                .set_combination_case(&combination.name, kind, &case_name, *factor)
                .is_err()
            {
                self.diagnostics.warning(
                    &op,
                    Some(&combination.name),
                    format!("could not add case {} to combination {}", case_label, combination.name),
                );
            }
        }

        Ok(external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::diagnostics::Severity;
    use crate::memory::InMemoryModel;
    use crate::model::loads::LoadNature;

    #[test]
    fn test_loadcase_creates_pattern_and_case() {
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        let dead = Loadcase::new("DL", LoadNature::Dead);
        let external = adapter.create_loadcase(&dead).unwrap();

        assert_eq!(external.id, "DL");
        assert_eq!(external.persistent_id, None);
        assert_eq!(adapter.api().load_pattern("DL").unwrap().nature, 1);
        assert_eq!(adapter.api().load_pattern("DL").unwrap().self_weight, 0.0);
        assert_eq!(
            adapter.api().analysis_case("DL").unwrap().loads,
            vec![("Load".to_string(), "DL".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_duplicate_pattern_is_create_error() {
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.create_loadcase(&Loadcase::new("DL", LoadNature::Dead)).unwrap();
        let err = adapter.create_loadcase(&Loadcase::new("DL", LoadNature::Dead)).unwrap_err();
        assert_eq!(err.error_code(), "EXTERNAL_CREATE");
    }

    #[test]
    fn test_combination_skips_unpushed_case() {
        let mut model = Model::new("Engineer");
        let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
        let live = model.add_loadcase(Loadcase::new("LL", LoadNature::Live));
        model.add_combination(LoadCombination::new("ULS").with_case(1.35, dead).with_case(1.5, live));

        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.create_loadcase(&model.loadcases[0]).unwrap();
        let external = adapter.create_combination(&model, &model.combinations[0]).unwrap();

        let combo = adapter.api().combination(&external.id).unwrap();
        assert_eq!(combo.cases, vec![(ComboCaseKind::LoadCase, "DL".to_string(), 1.35)]);
        assert_eq!(adapter.diagnostics().count(Severity::Warning), 1);
        assert_eq!(adapter.api().call_count("set_combination_case"), 1);
    }

    #[test]
    fn test_combination_of_combinations() {
        let mut model = Model::new("Engineer");
        let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
        let inner = model.add_combination(LoadCombination::new("C1").with_case(1.0, dead));
        model.add_combination(LoadCombination::new("C2").with_case(2.0, inner));

        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.create_loadcase(&model.loadcases[0]).unwrap();
        adapter.create_combination(&model, &model.combinations[0]).unwrap();
        adapter.create_combination(&model, &model.combinations[1]).unwrap();

        let combo = adapter.api().combination("C2").unwrap();
        assert_eq!(combo.cases, vec![(ComboCaseKind::LoadCombination, "C1".to_string(), 2.0)]);
    }
}
