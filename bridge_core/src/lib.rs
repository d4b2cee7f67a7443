//! # bridge_core - Structural Model Adapter
//!
//! `bridge_core` pushes a structural domain model (nodes, bars, panels,
//! rigid links, properties, load cases and loads) into an external
//! structural-analysis application and reads whole-model results back.
//! Every type is JSON-serializable, and every failure is reported as a
//! structured diagnostic instead of aborting the batch.
//!
//! ## Design Philosophy
//!
//! - **Explicit seam**: the external application sits behind the
//!   [`api::AnalysisModel`] trait; [`memory::InMemoryModel`] implements it
//!   in-process for dry runs and tests
//! - **Side-record registry**: external names live in an [`IdRegistry`],
//!   never on the domain entities
//! - **Rich diagnostics**: per-entity failures become [`diagnostics::Diagnostic`]
//!   records that are also forwarded to the `log` facade
//!
//! ## Quick Start
//!
//! ```rust
//! use bridge_core::{Adapter, AdapterConfig, InMemoryModel, Model};
//! use bridge_core::model::elements::{Bar, Node};
//! use bridge_core::model::geometry::point;
//!
//! let mut model = Model::new("Engineer");
//! let a = model.add_node(Node::new("A", point(0.0, 0.0, 0.0)));
//! let b = model.add_node(Node::new("B", point(6.0, 0.0, 0.0)));
//! model.add_bar(Bar::new("Beam", a, b));
//!
//! let mut adapter = Adapter::new(InMemoryModel::new(), AdapterConfig::default());
//! let report = adapter.push(&model);
//!
//! assert_eq!(report.created(), 3);
//! assert_eq!(report.errors, 0);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Domain entities, loads and result records
//! - [`adapter`] - Push, result reading and deletion
//! - [`api`] - The external application interface
//! - [`memory`] - In-process implementation of that interface
//! - [`registry`] - Domain id to external name records
//! - [`diagnostics`] - Collected notes, warnings and errors
//! - [`config`] - Adapter settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Model files with atomic saves and locking

pub mod adapter;
pub mod api;
pub mod config;
pub mod diagnostics;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod memory;
pub mod model;
pub mod registry;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use adapter::{Adapter, PushReport};
pub use config::AdapterConfig;
pub use errors::{BridgeError, BridgeResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_model, save_model, FileLock};
pub use memory::InMemoryModel;
pub use model::Model;
pub use registry::{ExternalId, IdRegistry};
