pub mod file;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use file::FileConfig;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "https://monitor.firefox.com/hibp/breaches";
pub const DEFAULT_CDN_BASE: &str = "https://monitor.cdn.mozilla.net/img/logos/";
pub const DEFAULT_LIMIT: usize = 20;

/// 解析完成的執行配置，優先序為預設值 < 設定檔 < 命令列旗標
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub endpoint: String,
    pub cdn_base: String,
    pub limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl AuditConfig {
    /// 套用設定檔內容，檔案沒給的欄位維持原值
    pub fn apply_file(mut self, file: &FileConfig) -> Self {
        if let Some(endpoint) = file.endpoint() {
            self.endpoint = endpoint.to_string();
        }
        if let Some(cdn_base) = file.cdn_base() {
            self.cdn_base = cdn_base.to_string();
        }
        if let Some(limit) = file.limit() {
            self.limit = limit;
        }
        self
    }
}

impl ConfigProvider for AuditConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn cdn_base(&self) -> &str {
        &self.cdn_base
    }

    fn limit(&self) -> usize {
        self.limit
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_url("cdn_base", &self.cdn_base)?;
        validate_positive_number("limit", self.limit, 1)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "breach-audit")]
#[command(about = "Audits the Firefox Monitor breach feed against its JSON schema")]
pub struct CliArgs {
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub cdn_base: Option<String>,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, help = "TOML config file path")]
    pub config: Option<std::path::PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// 合併預設值、設定檔與命令列旗標成最終配置
    pub fn resolve(&self) -> Result<AuditConfig> {
        let mut config = AuditConfig::default();

        if let Some(path) = &self.config {
            config = config.apply_file(&FileConfig::from_file(path)?);
        }

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(cdn_base) = &self.cdn_base {
            config.cdn_base = cdn_base.clone();
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }

        config.validate()?;
        Ok(config)
    }
}
