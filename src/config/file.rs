use crate::utils::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML 設定檔的原始內容，所有欄位皆為選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub source: Option<SourceSection>,
    pub audit: Option<AuditSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub endpoint: Option<String>,
    pub cdn_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSection {
    pub limit: Option<usize>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONITOR_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.endpoint.as_deref())
    }

    pub fn cdn_base(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.cdn_base.as_deref())
    }

    pub fn limit(&self) -> Option<usize> {
        self.audit.as_ref().and_then(|a| a.limit)
    }
}
