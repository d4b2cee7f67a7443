//! Global result requests and records.

use serde::{Deserialize, Serialize};

/// Kinds of whole-model result a caller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalResultType {
    Reactions,
    ModalDynamics,
    ModalMassAndFrequencies,
}

impl std::fmt::Display for GlobalResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GlobalResultType::Reactions => "Reactions",
            GlobalResultType::ModalDynamics => "ModalDynamics",
            GlobalResultType::ModalMassAndFrequencies => "ModalMassAndFrequencies",
        };
        write!(f, "{}", label)
    }
}

/// A case selector in a result request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseSelector {
    /// A load case or combination from the domain model
    Entity(uuid::Uuid),
    /// A case name as the external application knows it
    Name(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResultRequest {
    pub result_type: GlobalResultType,
    /// Cases to select for output; empty selects every case and combination
    #[serde(default)]
    pub cases: Vec<CaseSelector>,
}

impl GlobalResultRequest {
    pub fn new(result_type: GlobalResultType) -> Self {
        GlobalResultRequest {
            result_type,
            cases: Vec::new(),
        }
    }

    /// Restrict output to a case (builder pattern)
    pub fn with_case(mut self, case: CaseSelector) -> Self {
        self.cases.push(case);
        self
    }
}

/// Total support reactions for one case and step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalReactions {
    pub result_case: String,
    pub time_step: f64,
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

/// Participating mass ratios of one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalDynamics {
    pub result_case: String,
    pub mode_number: u32,
    pub frequency: f64,
    pub mass_ratio_x: f64,
    pub mass_ratio_y: f64,
    pub mass_ratio_z: f64,
    pub inertia_ratio_x: f64,
    pub inertia_ratio_y: f64,
    pub inertia_ratio_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlobalResult {
    Reactions(GlobalReactions),
    Modal(ModalDynamics),
}

impl GlobalResult {
    pub fn result_case(&self) -> &str {
        match self {
            GlobalResult::Reactions(r) => &r.result_case,
            GlobalResult::Modal(m) => &m.result_case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_selector_untagged() {
        let request = GlobalResultRequest::new(GlobalResultType::Reactions)
            .with_case(CaseSelector::Name("DEAD".to_string()));
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"DEAD\""));

        let parsed: GlobalResultRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cases, vec![CaseSelector::Name("DEAD".to_string())]);
    }

    #[test]
    fn test_result_type_display() {
        assert_eq!(GlobalResultType::ModalDynamics.to_string(), "ModalDynamics");
    }
}
