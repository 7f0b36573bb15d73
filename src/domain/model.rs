use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// One breach entry as fetched, kept as raw JSON fields so the validator
/// sees exactly what the feed returned (missing fields included).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreachRecord {
    pub data: HashMap<String, Value>,
}

impl BreachRecord {
    pub fn added_date(&self) -> Option<DateTime<FixedOffset>> {
        self.data
            .get("AddedDate")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("Name").and_then(|v| v.as_str())
    }

    pub fn logo_path(&self) -> Option<&str> {
        self.data.get("LogoPath").and_then(|v| v.as_str())
    }

    /// True when `LogoUrl` is absent or JSON `null`. A present value of the
    /// wrong type does not count as unset; the validator has to see it.
    pub fn logo_url_is_unset(&self) -> bool {
        matches!(self.data.get("LogoUrl"), None | Some(Value::Null))
    }

    pub fn set_logo_url(&mut self, url: String) {
        self.data.insert("LogoUrl".to_string(), Value::String(url));
    }
}

#[derive(Debug, Clone)]
pub struct SchemaViolation {
    /// JSON pointer into the validated array, e.g. `/0/LogoUrl`.
    pub path: String,
    pub reason: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.reason)
    }
}

/// Outcome of the validation stage. Violations are a reported condition,
/// not an error; the caller decides what failure means.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub checked: usize,
    pub limit: usize,
    pub violations: Vec<SchemaViolation>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.violations.len()
    }

    /// One line per violation, for stderr.
    pub fn render(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The `errors/limit` count line, for stdout.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.error_count(), self.limit)
    }
}
