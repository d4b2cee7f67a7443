//! # Stratify Bridge CLI
//!
//! Dry-run pushes of structural models into the in-process analysis model.
//! Useful for checking what a push would create, and what it would warn
//! about, before a session with the real application.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use bridge_core::adapter::PushReport;
use bridge_core::diagnostics::Diagnostic;
use bridge_core::file_io::{load_config, load_model_with_lock_check, FileLock};
use bridge_core::model::elements::{Bar, BarRelease, Constraint6, Node};
use bridge_core::model::geometry::{point, vector, Vector};
use bridge_core::model::loads::{
    BarUniformlyDistributedLoad, GravityLoad, Load, LoadAxis, LoadCombination, LoadNature, LoadTarget, Loadcase,
    PointLoad,
};
use bridge_core::model::properties::{Material, MaterialKind, SectionProperty};
use bridge_core::{Adapter, AdapterConfig, BridgeError, BridgeResult, InMemoryModel, Model};

/// Command line interface
#[derive(Parser)]
#[command(name = "bridge_cli", version, about = "Push structural models into an analysis model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Push a saved model file and print the report
    Push {
        /// Model file (JSON)
        model: PathBuf,
        /// Adapter configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Push a small portal frame and print the report
    Demo {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Push { model, config, json } => push(model, config, json),
        Command::Demo { json } => demo(json),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}

fn push(path: PathBuf, config: Option<PathBuf>, json: bool) -> BridgeResult<()> {
    // A dry run only reads, so a model locked by someone else is opened read-only
    let lock = match FileLock::acquire(&path, user_name()) {
        Ok(lock) => Some(lock),
        Err(BridgeError::FileLocked { .. }) => None,
        Err(e) => return Err(e),
    };
    let (model, holder) = load_model_with_lock_check(&path)?;
    if let (None, Some(info)) = (&lock, holder) {
        eprintln!(
            "Note: {} is locked by {} ({}) since {}; opened read-only",
            path.display(),
            info.user_id,
            info.machine,
            info.locked_at.to_rfc3339()
        );
    }
    let config = match config {
        Some(config_path) => load_config(&config_path)?,
        None => AdapterConfig::default(),
    };

    let mut adapter = Adapter::new(InMemoryModel::new(), config);
    let report = adapter.push(&model);
    let (external, _, diagnostics) = adapter.into_parts();

    print_report(&report, diagnostics.records(), json);
    if !json {
        println!("External model: {} objects", external.object_count());
    }
    Ok(())
}

fn demo(json: bool) -> BridgeResult<()> {
    let model = portal_frame();

    let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
    let report = adapter.push(&model);

    print_report(&report, adapter.diagnostics().records(), json);
    if !json {
        println!("External calls: {}", adapter.api().journal().len());
    }
    Ok(())
}

/// Two pinned columns, a beam, dead and live loads and one combination
fn portal_frame() -> Model {
    let mut model = Model::new(user_name());

    let steel = model.add_material(
        Material::new("S355", MaterialKind::Steel)
            .with_elastic(210e9, 0.3, 1.2e-5)
            .with_density(7850.0),
    );
    let column = model.add_section(
        SectionProperty::new("HEB300", Some(steel))
            .with_dimensions(0.3, 0.3)
            .with_properties(1.49e-2, 2.517e-4, 8.563e-5, 1.854e-6),
    );
    let beam = model.add_section(
        SectionProperty::new("IPE400", Some(steel))
            .with_dimensions(0.4, 0.18)
            .with_properties(8.45e-3, 2.313e-4, 1.318e-5, 5.11e-7),
    );

    let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)).with_support(Constraint6::pinned()));
    let b = model.add_node(Node::new("B", point(0.0, 0.0, 4.0)));
    let c = model.add_node(Node::new("C", point(8.0, 0.0, 4.0)));
    let d = model.add_node(Node::new("D", point(8.0, 0.0, 0.0)).with_support(Constraint6::pinned()));

    model.add_bar(Bar::new("C1", a, b).with_section(column).with_tag("Columns"));
    let girder = model.add_bar(
        Bar::new("G1", b, c)
            .with_section(beam)
            .with_release(BarRelease::fix_fix())
            .with_tag("Beams"),
    );
    model.add_bar(Bar::new("C2", d, c).with_section(column).with_tag("Columns"));

    let dead = model.add_loadcase(Loadcase::new("DL", LoadNature::Dead));
    let live = model.add_loadcase(Loadcase::new("LL", LoadNature::Live));
    model.add_combination(LoadCombination::new("ULS").with_case(1.35, dead).with_case(1.5, live));

    model.add_load(Load::Gravity(GravityLoad {
        name: "Self weight".to_string(),
        loadcase: dead,
        direction: vector(0.0, 0.0, -1.0),
        objects: Vec::new(),
    }));
    model.add_load(Load::BarUniform(BarUniformlyDistributedLoad {
        target: LoadTarget::new("Roof", live, vec![girder]),
        force: vector(0.0, 0.0, -12_000.0),
        moment: Vector::ZERO,
        axis: LoadAxis::Global,
        projected: false,
    }));
    model.add_load(Load::Point(PointLoad {
        target: LoadTarget::new("Wind", live, vec![b]),
        force: vector(5_000.0, 0.0, 0.0),
        moment: Vector::ZERO,
        axis: LoadAxis::Global,
    }));

    model
}

fn print_report(report: &PushReport, diagnostics: &[Diagnostic], json: bool) {
    if json {
        let output = serde_json::json!({
            "report": report,
            "diagnostics": diagnostics,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: could not serialize report: {}", e),
        }
        return;
    }

    println!("═══════════════════════════════════════");
    println!("  PUSH REPORT");
    println!("═══════════════════════════════════════");
    for category in &report.categories {
        println!(
            "  {:<16} created {:>3}  skipped {:>3}  failed {:>3}",
            category.category, category.created, category.skipped, category.failed
        );
    }
    println!();
    println!("  Load targets: {}  (failed loads: {})", report.load_targets, report.loads_failed);
    if !report.helpers.is_empty() {
        println!("  Helper entities: {}", report.helpers.len());
    }
    println!("  Notes: {}  Warnings: {}  Errors: {}", report.notes, report.warnings, report.errors);
    println!("═══════════════════════════════════════");

    for diagnostic in diagnostics {
        println!(
            "[{}] {}{}: {}",
            diagnostic.severity,
            diagnostic.operation,
            diagnostic.entity.as_deref().map(|e| format!(" {}", e)).unwrap_or_default(),
            diagnostic.message
        );
    }
}

fn user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "bridge".to_string())
}
