pub mod engine;
pub mod pipeline;
pub mod schema;

pub use crate::domain::model::{BreachRecord, SchemaViolation, ValidationReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use engine::AuditEngine;
pub use pipeline::BreachPipeline;
pub use schema::BreachValidator;
