//! Configuration and session continuity.

use bridge_core::config::AreaLoadDistribution;
use bridge_core::memory::AreaLoadRecord;
use bridge_core::model::elements::{Bar, BarAutoMesh, Node, Panel};
use bridge_core::model::geometry::{point, vector, Point, Vector};
use bridge_core::model::loads::{
    AreaUniformlyDistributedLoad, BarUniformlyDistributedLoad, Load, LoadAxis, LoadNature, LoadTarget, Loadcase,
};
use bridge_core::model::properties::{Material, MaterialKind, SectionProperty, SurfaceProperty};
use bridge_core::{Adapter, AdapterConfig, InMemoryModel, Model};

fn slab_outline(x0: f64) -> Vec<Point> {
    vec![
        point(x0, 0.0, 3.0),
        point(x0 + 5.0, 0.0, 3.0),
        point(x0 + 5.0, 5.0, 3.0),
        point(x0, 5.0, 3.0),
    ]
}

#[test]
fn shell_panels_take_direct_loads_and_bare_panels_load_frames() {
    let mut model = Model::new("Engineer");
    let concrete = model.add_material(Material::new("C30", MaterialKind::Concrete).with_elastic(33e9, 0.2, 1e-5));
    let slab = model.add_surface_property(SurfaceProperty::new("Slab200", Some(concrete), 0.2));
    let shell = model.add_panel(Panel::new("Shell", slab_outline(0.0)).with_property(slab));
    let bare = model.add_panel(Panel::new("Bare", slab_outline(10.0)));
    let live = model.add_loadcase(Loadcase::new("LL", LoadNature::Live));
    model.add_load(Load::AreaUniform(AreaUniformlyDistributedLoad {
        target: LoadTarget::new("Floor", live, vec![shell, bare]),
        pressure: vector(0.0, 0.0, -3000.0),
        axis: LoadAxis::Global,
        projected: false,
    }));

    let config = AdapterConfig::default().with_area_load_distribution(AreaLoadDistribution::OneWay);
    let mut adapter = Adapter::new(InMemoryModel::new(), config);
    let report = adapter.push(&model);

    assert_eq!(report.load_targets, 2);
    assert_eq!(adapter.api().area("Shell").unwrap().property, "Slab200");
    assert!(matches!(
        adapter.api().area("Shell").unwrap().loads[..],
        [AreaLoadRecord::Uniform { direction: 6, value, .. }] if value == -3000.0
    ));
    assert!(matches!(
        adapter.api().area("Bare").unwrap().loads[..],
        [AreaLoadRecord::UniformToFrame { direction: 6, distribution: 1, .. }]
    ));
}

#[test]
fn sections_and_mesh_hints_reach_the_frame() {
    let mut model = Model::new("Engineer");
    let steel = model.add_material(Material::new("S275", MaterialKind::Steel));
    let section = model.add_section(
        SectionProperty::new("RHS", Some(steel))
            .with_properties(4e-3, 1e-5, 5e-6, 2e-6)
            .with_shear_areas(1.5e-3, 2.5e-3),
    );
    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
    let b = model.add_node(Node::new("B", point(3.0, 0.0, 0.0)));
    model.add_bar(
        Bar::new("Tie", a, b)
            .with_section(section)
            .with_auto_mesh(BarAutoMesh {
                max_length: 0.5,
                ..Default::default()
            }),
    );

    let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
    adapter.push(&model);

    let record = adapter.api().section("RHS").unwrap();
    assert_eq!((record.as2, record.as3), (2.5e-3, 1.5e-3));
    assert_eq!((record.i22, record.i33), (5e-6, 1e-5));

    let frame = adapter.api().frame("Tie").unwrap();
    assert_eq!(frame.section, "RHS");
    assert_eq!(frame.auto_mesh.unwrap().max_length, 0.5);
}

#[test]
fn loads_accumulate_when_replacement_is_off() {
    let mut model = Model::new("Engineer");
    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
    let b = model.add_node(Node::new("B", point(4.0, 0.0, 0.0)));
    let bar = model.add_bar(Bar::new("Beam", a, b));
    let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
    for magnitude in [1.0, 2.0] {
        model.add_load(Load::BarUniform(BarUniformlyDistributedLoad {
            target: LoadTarget::new(format!("Q{}", magnitude), dead, vec![bar]),
            force: vector(0.0, 0.0, -magnitude),
            moment: Vector::ZERO,
            axis: LoadAxis::Global,
            projected: false,
        }));
    }

    let replacing = {
        let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
        adapter.push(&model);
        adapter.api().frame("Beam").unwrap().loads.len()
    };
    let accumulating = {
        let config = AdapterConfig::default().with_replace_loads(false);
        let mut adapter = Adapter::new(InMemoryModel::new(), config);
        adapter.push(&model);
        adapter.api().frame("Beam").unwrap().loads.len()
    };

    assert_eq!(replacing, 6);
    assert_eq!(accumulating, 12);
}

#[test]
fn groups_are_not_created_when_disabled() {
    let mut model = Model::new("Engineer");
    model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_tag("Supports"));

    let config = AdapterConfig::default().with_create_missing_groups(false);
    let mut adapter = Adapter::new(InMemoryModel::new(), config);
    adapter.push(&model);

    assert_eq!(adapter.api().call_count("set_group"), 0);
    assert_eq!(adapter.diagnostics().with_code("PROPERTY_WARNING").count(), 1);
}

#[test]
fn registry_carries_a_session_forward() {
    let mut model = Model::new("Engineer");
    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
    let b = model.add_node(Node::new("B", point(0.0, 4.0, 0.0)));
    model.add_bar(Bar::new("AB", a, b));

    let mut api = InMemoryModel::new();
    api.fail_on("add_frame");
    let mut first = Adapter::new(api, AdapterConfig::default());
    let report = first.push(&model);
    assert_eq!(report.category("Bar").unwrap().failed, 1);

    let (mut api, registry, _) = first.into_parts();
    api.clear_failures();

    let mut second = Adapter::new(api, AdapterConfig::default()).with_registry(registry);
    let report = second.push(&model);

    assert_eq!(report.category("Node").unwrap().skipped, 2);
    assert_eq!(report.category("Bar").unwrap().created, 1);
    assert_eq!(second.api().call_count("add_point"), 2);

    let drained = second.diagnostics_mut().drain();
    assert_eq!(drained.len(), 2);
    assert!(second.diagnostics().is_empty());
}
