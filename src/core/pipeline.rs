use crate::core::schema::BreachValidator;
use crate::domain::model::{BreachRecord, ValidationReport};
use crate::domain::ports::{ConfigProvider, Pipeline};
use crate::utils::error::{AuditError, Result};
use reqwest::Client;
use url::Url;

/// 外洩資料稽核管線實現，依序執行擷取、正規化、檢核三個階段
pub struct BreachPipeline<C: ConfigProvider> {
    pub(crate) config: C,
    pub(crate) client: Client,
    validator: BreachValidator,
}

impl<C: ConfigProvider> BreachPipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        Ok(Self {
            config,
            client: Client::new(),
            validator: BreachValidator::new()?,
        })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for BreachPipeline<C> {
    async fn fetch(&self) -> Result<Vec<BreachRecord>> {
        tracing::info!("🌐 Fetching breach feed from: {}", self.config.endpoint());

        // 執行請求，非 2xx 狀態一律視為擷取失敗
        let response = self.client.get(self.config.endpoint()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&body)?;

        // 餵入的資料必須是物件陣列
        let items = match payload {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(AuditError::PayloadError {
                    message: "breach feed is not a JSON array".to_string(),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                return Err(AuditError::PayloadError {
                    message: format!("feed element {} is not a JSON object", index),
                });
            }
            records.push(serde_json::from_value(item)?);
        }

        tracing::info!("📊 Fetched {} breach records", records.len());
        Ok(records)
    }

    async fn normalize(&self, mut records: Vec<BreachRecord>) -> Result<Vec<BreachRecord>> {
        tracing::info!("🔧 Normalizing {} breach records", records.len());

        // 依 AddedDate 由新到舊排序，無法解析的日期排最後
        records.sort_by(|a, b| b.added_date().cmp(&a.added_date()));
        records.truncate(self.config.limit());

        let cdn_base =
            Url::parse(self.config.cdn_base()).map_err(|e| AuditError::ConfigError {
                message: format!("invalid CDN base URL '{}': {}", self.config.cdn_base(), e),
            })?;

        // 以 CDN 基底補齊缺漏的 LogoUrl，已有值（包含型別錯誤的值）不動
        let mut backfilled = 0;
        for record in &mut records {
            if !record.logo_url_is_unset() {
                continue;
            }
            let resolved = record.logo_path().and_then(|path| cdn_base.join(path).ok());
            if let Some(url) = resolved {
                record.set_logo_url(url.to_string());
                backfilled += 1;
            }
        }
        if backfilled > 0 {
            tracing::debug!("Backfilled LogoUrl for {} records", backfilled);
        }

        tracing::info!("✅ Normalization complete: {} records kept", records.len());
        Ok(records)
    }

    async fn validate(&self, records: Vec<BreachRecord>) -> Result<ValidationReport> {
        tracing::info!(
            "🔍 Validating {} records against the breach schema",
            records.len()
        );

        let violations = self.validator.check(&records)?;

        if violations.is_empty() {
            tracing::info!("✅ Validation passed: all records conform");
        } else {
            tracing::warn!("⚠️ Validation found {} violations", violations.len());
        }

        Ok(ValidationReport {
            checked: records.len(),
            limit: self.config.limit(),
            violations,
        })
    }
}
