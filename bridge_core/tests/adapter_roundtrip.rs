//! End-to-end behaviour of the adapter against the in-process analysis model.

use bridge_core::api::{ModalMassRatios, ObjectCategory};
use bridge_core::diagnostics::Severity;
use bridge_core::model::elements::{Bar, BarRelease, Constraint6, Node};
use bridge_core::model::geometry::{point, vector, Vector};
use bridge_core::model::loads::{BarVaryingDistributedLoad, GravityLoad, Load, LoadAxis, LoadNature, LoadTarget, Loadcase};
use bridge_core::model::results::{GlobalResult, GlobalResultRequest, GlobalResultType};
use bridge_core::units::Radians;
use bridge_core::{Adapter, AdapterConfig, InMemoryModel, Model};

fn beam_model() -> (Model, uuid::Uuid) {
    let mut model = Model::new("Engineer");
    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_support(Constraint6::fixed()));
    let b = model.add_node(Node::new("B", point(10.0, 0.0, 0.0)));
    let bar = model.add_bar(Bar::new("Beam", a, b));
    (model, bar)
}

fn adapter(api: InMemoryModel) -> Adapter<InMemoryModel> {
    Adapter::new(api, AdapterConfig::default())
}

#[test]
fn missing_prerequisite_fails_without_annotation() {
    let (model, bar) = beam_model();
    let mut api = InMemoryModel::new();
    api.fail_on_name("add_point", "B");

    let mut adapter = adapter(api);
    let report = adapter.push(&model);

    assert_eq!(report.category("Bar").unwrap().failed, 1);
    assert!(!adapter.registry().contains(bar));
    assert_eq!(adapter.api().call_count("add_frame"), 0);
    assert_eq!(adapter.diagnostics().with_code("VALIDATION").count(), 1);
}

#[test]
fn recorded_name_is_the_assigned_name() {
    let mut model = Model::new("Engineer");
    let first = model.add_node(Node::new("N1", point(0.0, 0.0, 0.0)));
    let second = model.add_node(Node::new("N1", point(1.0, 0.0, 0.0)));

    let mut adapter = adapter(InMemoryModel::new());
    adapter.push(&model);

    assert_eq!(adapter.registry().name_of(first), Some("N1"));
    let renamed = adapter.registry().name_of(second).unwrap().to_string();
    assert_ne!(renamed, "N1");

    let record = adapter.api().point(&renamed).unwrap();
    assert_eq!(record.coordinates, [1.0, 0.0, 0.0]);
    assert_eq!(
        adapter.registry().get(second).unwrap().persistent_id.as_deref(),
        Some(record.guid.as_str())
    );

    let notes: Vec<_> = adapter
        .diagnostics()
        .records()
        .iter()
        .filter(|d| d.severity == Severity::Note)
        .collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].entity.as_deref(), Some("N1"));
    assert!(notes[0].message.contains(&renamed));
    assert_eq!(adapter.diagnostics().count(Severity::Error), 0);
}

#[test]
fn failed_property_group_does_not_stop_later_groups() {
    let mut model = Model::new("Engineer");
    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
    let b = model.add_node(Node::new("B", point(0.0, 0.0, 3.0)));
    model.add_bar(
        Bar::new("Column", a, b)
            .with_orientation(Radians::new(std::f64::consts::FRAC_PI_2))
            .with_release(BarRelease::pin_pin()),
    );

    let mut api = InMemoryModel::new();
    api.fail_on("set_frame_local_axes");

    let mut adapter = adapter(api);
    let report = adapter.push(&model);

    assert_eq!(report.category("Bar").unwrap().created, 1);
    let frame = adapter.api().frame("Column").unwrap();
    assert_eq!(frame.local_axis_degrees, 0.0);
    assert!(frame.releases.is_some());
    assert!(frame.insertion.is_some());
    assert_eq!(adapter.diagnostics().with_code("PROPERTY_WARNING").count(), 1);
}

#[test]
fn missing_group_is_created_and_retried_once() {
    let mut model = Model::new("Engineer");
    model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_tag("Supports"));

    let mut adapter = adapter(InMemoryModel::new());
    adapter.push(&model);

    assert_eq!(adapter.api().call_count("set_point_group"), 2);
    assert_eq!(adapter.api().call_count("set_group"), 1);
    assert!(adapter.api().point("A").unwrap().groups.contains(&"Supports".to_string()));
    assert_eq!(adapter.diagnostics().count(Severity::Warning), 0);
}

#[test]
fn second_group_failure_is_not_retried() {
    let mut model = Model::new("Engineer");
    model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_tag("Supports"));

    let mut api = InMemoryModel::new();
    api.fail_on("set_point_group");

    let mut adapter = adapter(api);
    adapter.push(&model);

    assert_eq!(adapter.api().call_count("set_point_group"), 2);
    assert_eq!(adapter.api().call_count("set_group"), 1);
    assert_eq!(adapter.diagnostics().with_code("PROPERTY_WARNING").count(), 1);
}

#[test]
fn failed_group_creation_still_retries_assignment() {
    let mut model = Model::new("Engineer");
    model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_tag("G"));

    let mut api = InMemoryModel::new();
    api.fail_on("set_group");

    let mut adapter = adapter(api);
    adapter.push(&model);

    assert_eq!(adapter.api().call_count("set_point_group"), 2);
    assert_eq!(adapter.api().call_count("set_group"), 1);
    assert!(adapter
        .diagnostics()
        .records()
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("could not be created")));
    assert_eq!(adapter.diagnostics().with_code("PROPERTY_WARNING").count(), 1);
}

#[test]
fn modal_modes_are_numbered_per_case() {
    let mut model = Model::new("Engineer");
    model.add_loadcase(Loadcase::new("A", LoadNature::Other));
    model.add_loadcase(Loadcase::new("B", LoadNature::Other));

    let mut adapter = adapter(InMemoryModel::new());
    adapter.push(&model);
    adapter.api_mut().set_modal_mass_ratios(ModalMassRatios {
        case_names: ["A", "A", "A", "B", "B"].iter().map(|s| s.to_string()).collect(),
        periods: vec![1.0, 0.5, 0.25, 2.0, 1.0],
        ux: vec![0.6, 0.2, 0.1, 0.7, 0.2],
        uy: vec![0.0; 5],
        uz: vec![0.0; 5],
        rx: vec![0.0; 5],
        ry: vec![0.0; 5],
        rz: vec![0.0; 5],
        ..Default::default()
    });

    let results = adapter.read_global_results(&GlobalResultRequest::new(GlobalResultType::ModalDynamics));
    let modes: Vec<(String, u32, f64)> = results
        .into_iter()
        .filter_map(|r| match r {
            GlobalResult::Modal(m) => Some((m.result_case, m.mode_number, m.frequency)),
            GlobalResult::Reactions(_) => None,
        })
        .collect();

    let numbers: Vec<u32> = modes.iter().map(|m| m.1).collect();
    assert_eq!(numbers, vec![1, 2, 3, 1, 2]);
    assert_eq!(modes[2].2, 4.0);
    assert_eq!(modes[3].0, "B");
}

#[test]
fn downward_gravity_sets_self_weight() {
    let mut model = Model::new("Engineer");
    let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
    model.add_load(Load::Gravity(GravityLoad {
        name: "SW".to_string(),
        loadcase: dead,
        direction: vector(0.0, 0.0, -1.0),
        objects: Vec::new(),
    }));

    let mut adapter = adapter(InMemoryModel::new());
    let report = adapter.push(&model);

    assert_eq!(report.load_targets, 1);
    assert_eq!(adapter.api().load_pattern("DL").unwrap().self_weight, 1.0);
}

#[test]
fn sideways_gravity_is_rejected_before_any_call() {
    let mut model = Model::new("Engineer");
    let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
    model.add_load(Load::Gravity(GravityLoad {
        name: "SW".to_string(),
        loadcase: dead,
        direction: vector(1.0, 0.0, -1.0),
        objects: Vec::new(),
    }));

    let mut adapter = adapter(InMemoryModel::new());
    let report = adapter.push(&model);

    assert_eq!(report.loads_failed, 1);
    assert_eq!(adapter.api().call_count("set_self_weight_multiplier"), 0);
    assert_eq!(adapter.api().load_pattern("DL").unwrap().self_weight, 0.0);
    assert_eq!(adapter.diagnostics().with_code("DOMAIN").count(), 1);
}

#[test]
fn varying_bar_load_uses_absolute_span() {
    let (mut model, bar) = beam_model();
    let live = model.add_loadcase(Loadcase::new("LL", LoadNature::Live));
    model.add_load(Load::BarVarying(BarVaryingDistributedLoad {
        target: LoadTarget::new("Ramp", live, vec![bar]),
        distance_from_a: 2.0,
        force_a: vector(0.0, 0.0, -1.0),
        moment_a: Vector::ZERO,
        distance_from_b: 3.0,
        force_b: vector(0.0, 0.0, -4.0),
        moment_b: Vector::ZERO,
        axis: LoadAxis::Global,
        projected: false,
    }));

    let mut adapter = adapter(InMemoryModel::new());
    let report = adapter.push(&model);
    assert_eq!(report.load_targets, 1);

    let loads = &adapter.api().frame("Beam").unwrap().loads;
    assert_eq!(loads.len(), 6);
    assert!(loads.iter().all(|l| !l.relative && l.dist1 == 2.0 && l.dist2 == 7.0));

    let vertical = loads.iter().find(|l| l.direction == 6 && l.load_kind == 1).unwrap();
    assert_eq!((vertical.value1, vertical.value2), (-1.0, -4.0));
}

#[test]
fn delete_all_counts_successes() {
    let mut model = Model::new("Engineer");
    for i in 0..4 {
        model.add_node(Node::new(format!("N{}", i), point(i as f64, 0.0, 0.0)));
    }

    let mut api = InMemoryModel::new();
    api.fail_on_name("delete", "N2");

    let mut adapter = adapter(api);
    adapter.push(&model);

    assert_eq!(adapter.delete_by_ids(ObjectCategory::Point, None), 3);
    assert_eq!(adapter.diagnostics().with_code("DELETE_FAILED").count(), 1);
    assert!(adapter.api().point("N2").is_some());
    assert!(adapter.api().point("N0").is_none());
}
