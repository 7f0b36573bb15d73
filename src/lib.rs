pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use config::AuditConfig;
pub use crate::core::{engine::AuditEngine, pipeline::BreachPipeline};
pub use domain::model::{BreachRecord, SchemaViolation, ValidationReport};
pub use utils::error::{AuditError, Result};
