//! Whole-model results.
//!
//! The external application returns each result table as parallel arrays.
//! Rows are rebuilt positionally; a table with arrays of unequal length
//! yields only as many rows as its shortest array.

use crate::adapter::Adapter;
use crate::api::{AnalysisModel, BaseReactions, ModalMassRatios, ObjectCategory};
use crate::errors::BridgeError;
use crate::model::results::{
    CaseSelector, GlobalReactions, GlobalResult, GlobalResultRequest, GlobalResultType, ModalDynamics,
};

const READ_OPERATION: &str = "read GlobalResults";

impl<A: AnalysisModel> Adapter<A> {
    /// Read one kind of global result for the requested cases.
    ///
    /// Failures never escape: they are recorded in the diagnostics and the
    /// rows read so far (possibly none) are returned.
    pub fn read_global_results(&mut self, request: &GlobalResultRequest) -> Vec<GlobalResult> {
        if !matches!(
            request.result_type,
            GlobalResultType::Reactions | GlobalResultType::ModalDynamics
        ) {
            let error = BridgeError::unsupported_result_type(request.result_type.to_string());
            self.diagnostics.record(READ_OPERATION, &error);
            return Vec::new();
        }

        self.select_cases(&request.cases);

        match request.result_type {
            GlobalResultType::Reactions => match self.api.base_reactions() {
                Ok(table) => reaction_rows(&table),
                Err(status) => {
                    self.diagnostics.error(
                        READ_OPERATION,
                        None,
                        format!("base reactions could not be read: {}", status),
                    );
                    Vec::new()
                }
            },
            _ => match self.api.modal_participating_mass_ratios() {
                Ok(table) => self.modal_rows(&table),
                Err(status) => {
                    self.diagnostics.error(
                        READ_OPERATION,
                        None,
                        format!("modal participating mass ratios could not be read: {}", status),
                    );
                    Vec::new()
                }
            },
        }
    }

    /// Reset the output selection to the requested cases
    fn select_cases(&mut self, cases: &[CaseSelector]) {
        if self.api.deselect_all_for_output().is_err() {
            self.diagnostics
                .warning(READ_OPERATION, None, "output selection could not be cleared");
        }

        if cases.is_empty() {
            if self.config.select_all_cases_by_default {
                self.select_everything();
            }
            return;
        }

        let combinations = self.api.name_list(ObjectCategory::Combination).unwrap_or_default();
        for selector in cases {
            let name = match selector {
                CaseSelector::Name(name) => name.clone(),
                CaseSelector::Entity(id) => match self.external_name(*id) {
                    Some(name) => name,
                    None => {
                        self.diagnostics.warning(
                            READ_OPERATION,
                            None,
                            format!("case {} has no external id and was not selected", id),
                        );
                        continue;
                    }
                },
            };

            let result = if combinations.contains(&name) {
                self.api.select_combination_for_output(&name)
            } else {
                self.api.select_case_for_output(&name)
            };
            if result.is_err() {
                self.diagnostics.warning(
                    READ_OPERATION,
                    Some(&name),
                    format!("case {} could not be selected for output", name),
                );
            }
        }
    }

    fn select_everything(&mut self) {
        match self.api.name_list(ObjectCategory::AnalysisCase) {
            Ok(names) => {
                for name in names {
                    if self.api.select_case_for_output(&name).is_err() {
                        log::warn!("case {} could not be selected for output", name);
                    }
                }
            }
            Err(status) => self
                .diagnostics
                .warning(READ_OPERATION, None, format!("cases could not be listed: {}", status)),
        }

        match self.api.name_list(ObjectCategory::Combination) {
            Ok(names) => {
                for name in names {
                    if self.api.select_combination_for_output(&name).is_err() {
                        log::warn!("combination {} could not be selected for output", name);
                    }
                }
            }
            Err(status) => self
                .diagnostics
                .warning(READ_OPERATION, None, format!("combinations could not be listed: {}", status)),
        }
    }

    fn modal_rows(&mut self, table: &ModalMassRatios) -> Vec<GlobalResult> {
        let rows = [
            table.case_names.len(),
            table.periods.len(),
            table.ux.len(),
            table.uy.len(),
            table.uz.len(),
            table.rx.len(),
            table.ry.len(),
            table.rz.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0);

        let mut results = Vec::with_capacity(rows);
        let mut mode_number = 0;
        let mut previous_case: Option<&str> = None;

        for i in 0..rows {
            let case = table.case_names[i].as_str();
            if previous_case == Some(case) {
                mode_number += 1;
            } else {
                mode_number = 1;
                previous_case = Some(case);
            }

            let period = table.periods[i];
            if period == 0.0 {
                let error = BridgeError::domain(
                    READ_OPERATION,
                    format!("mode {} of case {} has a period of zero", mode_number, case),
                );
                self.diagnostics.record(READ_OPERATION, &error);
                continue;
            }

            results.push(GlobalResult::Modal(ModalDynamics {
                result_case: case.to_string(),
                mode_number,
                frequency: 1.0 / period,
                mass_ratio_x: table.ux[i],
                mass_ratio_y: table.uy[i],
                mass_ratio_z: table.uz[i],
                inertia_ratio_x: table.rx[i],
                inertia_ratio_y: table.ry[i],
                inertia_ratio_z: table.rz[i],
            }));
        }
        results
    }
}

fn reaction_rows(table: &BaseReactions) -> Vec<GlobalResult> {
    let rows = [
        table.case_names.len(),
        table.step_nums.len(),
        table.fx.len(),
        table.fy.len(),
        table.fz.len(),
        table.mx.len(),
        table.my.len(),
        table.mz.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    (0..rows)
        .map(|i| {
            GlobalResult::Reactions(GlobalReactions {
                result_case: table.case_names[i].clone(),
                time_step: table.step_nums[i],
                fx: table.fx[i],
                fy: table.fy[i],
                fz: table.fz[i],
                mx: table.mx[i],
                my: table.my[i],
                mz: table.mz[i],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::memory::InMemoryModel;
    use crate::model::loads::{LoadCombination, LoadNature, Loadcase};
    use crate::model::Model;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn adapter_with_cases(names: &[&str]) -> Adapter<InMemoryModel> {
        let mut model = Model::new("Engineer");
        for name in names {
            model.add_loadcase(Loadcase::new(*name, LoadNature::Dead));
        }
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.push(&model);
        adapter
    }

    fn modal_fixture(cases: &[&str], periods: &[f64]) -> ModalMassRatios {
        let n = cases.len();
        ModalMassRatios {
            case_names: strings(cases),
            step_types: vec!["Mode".to_string(); n],
            step_nums: (1..=n).map(|i| i as f64).collect(),
            periods: periods.to_vec(),
            ux: vec![0.5; n],
            uy: vec![0.25; n],
            uz: vec![0.0; n],
            rx: vec![0.1; n],
            ry: vec![0.2; n],
            rz: vec![0.3; n],
            ..Default::default()
        }
    }

    #[test]
    fn test_unsupported_type_returns_empty() {
        let mut adapter = adapter_with_cases(&["DL"]);
        let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::ModalMassAndFrequencies));

        assert!(results.is_empty());
        assert_eq!(adapter.diagnostics().with_code("UNSUPPORTED_RESULT_TYPE").count(), 1);
        assert_eq!(adapter.api().call_count("deselect_all_for_output"), 0);
    }

    #[test]
    fn test_reactions_for_all_cases() {
        let mut adapter = adapter_with_cases(&["DL", "LL"]);
        adapter.api_mut().set_base_reactions(BaseReactions {
            case_names: strings(&["DL", "LL"]),
            step_types: strings(&["", ""]),
            step_nums: vec![0.0, 0.0],
            fx: vec![0.0, 1.0],
            fy: vec![0.0, 0.0],
            fz: vec![100.0, 20.0],
            mx: vec![0.0, 0.0],
            my: vec![0.0, 0.0],
            mz: vec![0.0, 0.0],
            ..Default::default()
        });

        let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::Reactions));
        assert_eq!(results.len(), 2);
        let GlobalResult::Reactions(first) = &results[0] else {
            panic!("expected reactions");
        };
        assert_eq!(first.result_case, "DL");
        assert_eq!(first.fz, 100.0);
    }

    #[test]
    fn test_selected_case_filters_rows() {
        let mut model = Model::new("Engineer");
        model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
        let live = model.add_loadcase(Loadcase::new("LL", LoadNature::Live));
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.push(&model);
        adapter.api_mut().set_base_reactions(BaseReactions {
            case_names: strings(&["DL", "LL"]),
            step_types: strings(&["", ""]),
            step_nums: vec![0.0, 0.0],
            fx: vec![0.0, 0.0],
            fy: vec![0.0, 0.0],
            fz: vec![100.0, 20.0],
            mx: vec![0.0, 0.0],
            my: vec![0.0, 0.0],
            mz: vec![0.0, 0.0],
            ..Default::default()
        });

        let request = GlobalResultRequest::new(GlobalResultType::Reactions).with_case(CaseSelector::Entity(live));
        let results = adapter.read_global_results(&request);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_case(), "LL");
        assert_eq!(adapter.api().selected_cases(), &["LL".to_string()]);
    }

    #[test]
    fn test_combination_selected_by_name() {
        let mut model = Model::new("Engineer");
        let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
        model.add_combination(LoadCombination::new("ULS").with_case(1.35, dead));
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.push(&model);

        let request =
            GlobalResultRequest::new(GlobalResultType::Reactions).with_case(CaseSelector::Name("ULS".to_string()));
        adapter.read_global_results(&request);

        assert_eq!(adapter.api().selected_combinations(), &["ULS".to_string()]);
        assert!(adapter.api().selected_cases().is_empty());
    }

    #[test]
    fn test_modal_numbering_resets_per_case() {
        let mut adapter = adapter_with_cases(&["A", "B"]);
        adapter
            .api_mut()
            .set_modal_mass_ratios(modal_fixture(&["A", "A", "A", "B", "B"], &[0.5, 0.25, 0.2, 1.0, 0.5]));

        let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::ModalDynamics));
        let modes: Vec<u32> = results
            .iter()
            .map(|r| match r {
                GlobalResult::Modal(m) => m.mode_number,
                GlobalResult::Reactions(_) => 0,
            })
            .collect();
        assert_eq!(modes, vec![1, 2, 3, 1, 2]);

        let GlobalResult::Modal(first) = &results[0] else {
            panic!("expected modal result");
        };
        assert_eq!(first.frequency, 2.0);
        assert_eq!(first.mass_ratio_y, 0.25);
        assert_eq!(first.inertia_ratio_z, 0.3);
    }

    #[test]
    fn test_zero_period_skips_row_but_keeps_numbering() {
        let mut adapter = adapter_with_cases(&["A"]);
        adapter
            .api_mut()
            .set_modal_mass_ratios(modal_fixture(&["A", "A", "A"], &[0.5, 0.0, 0.25]));

        let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::ModalDynamics));
        assert_eq!(results.len(), 2);
        let GlobalResult::Modal(last) = &results[1] else {
            panic!("expected modal result");
        };
        assert_eq!(last.mode_number, 3);
        assert_eq!(adapter.diagnostics().with_code("DOMAIN").count(), 1);
    }

    #[test]
    fn test_query_failure_is_error() {
        let mut adapter = adapter_with_cases(&["DL"]);
        adapter.api_mut().fail_on("base_reactions");

        let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::Reactions));
        assert!(results.is_empty());
        assert_eq!(adapter.diagnostics().count(crate::diagnostics::Severity::Error), 1);
    }

    #[test]
    fn test_short_arrays_limit_rows() {
        let table = BaseReactions {
            case_names: strings(&["DL", "LL", "WL"]),
            step_nums: vec![0.0, 0.0, 0.0],
            fx: vec![0.0, 0.0],
            fy: vec![0.0, 0.0, 0.0],
            fz: vec![0.0, 0.0, 0.0],
            mx: vec![0.0, 0.0, 0.0],
            my: vec![0.0, 0.0, 0.0],
            mz: vec![0.0, 0.0, 0.0],
            ..Default::default()
        };
        assert_eq!(reaction_rows(&table).len(), 2);
    }
}
