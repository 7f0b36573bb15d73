use crate::utils::error::{AuditError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| AuditError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", url.scheme()),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
