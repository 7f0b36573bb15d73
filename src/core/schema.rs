use crate::domain::model::{BreachRecord, SchemaViolation};
use crate::utils::error::{AuditError, Result};
use serde_json::{json, Map, Value};

fn breach_properties() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(
        "AddedDate".to_string(),
        json!({"type": "string", "format": "date-time"}),
    );
    props.insert(
        "BreachDate".to_string(),
        json!({"type": "string", "format": "date"}),
    );
    props.insert(
        "DataClasses".to_string(),
        json!({"type": "array", "items": {"type": "string"}, "minItems": 1}),
    );
    props.insert("Description".to_string(), json!({"type": "string"}));
    props.insert("Domain".to_string(), json!({"type": "string"}));
    props.insert("IsFabricated".to_string(), json!({"type": "boolean"}));
    props.insert("IsMalware".to_string(), json!({"type": "boolean"}));
    props.insert("IsRetired".to_string(), json!({"type": "boolean"}));
    props.insert("IsSensitive".to_string(), json!({"type": "boolean"}));
    props.insert("IsSpamList".to_string(), json!({"type": "boolean"}));
    props.insert("IsVerified".to_string(), json!({"type": "boolean"}));
    props.insert("LogoPath".to_string(), json!({"type": "string"}));
    props.insert(
        "LogoUrl".to_string(),
        json!({"type": "string", "format": "uri"}),
    );
    props.insert(
        "ModifiedDate".to_string(),
        json!({"type": "string", "format": "date-time"}),
    );
    props.insert("Name".to_string(), json!({"type": "string"}));
    props.insert("PwnCount".to_string(), json!({"type": "integer"}));
    props.insert("Title".to_string(), json!({"type": "string"}));
    props
}

/// Schema for a single breach object. Every declared field is required
/// (the list is derived from the property map so the two cannot drift);
/// undeclared extra fields are allowed.
pub fn breach_schema() -> Value {
    let properties = breach_properties();
    let required: Vec<Value> = properties.keys().cloned().map(Value::String).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": true,
    })
}

/// Schema for the whole feed: an array of breach objects.
pub fn breach_list_schema() -> Value {
    json!({
        "type": "array",
        "items": breach_schema(),
    })
}

pub struct BreachValidator {
    validator: jsonschema::Validator,
}

impl BreachValidator {
    pub fn new() -> Result<Self> {
        let schema = breach_list_schema();
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&schema)
            .map_err(|e| AuditError::SchemaError {
                message: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Collects every violation across all records; never fails fast.
    pub fn check(&self, records: &[BreachRecord]) -> Result<Vec<SchemaViolation>> {
        let instance = serde_json::to_value(records)?;

        Ok(self
            .validator
            .iter_errors(&instance)
            .map(|e| SchemaViolation {
                path: e.instance_path.to_string(),
                reason: e.to_string(),
            })
            .collect())
    }
}
