use crate::adapters::http::DEFAULT_CACHE_MAX_AGE_SECONDS;
use crate::core::group::W3C_GROUPS_API;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 查詢服務相關設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_cache_max_age_seconds")]
    pub cache_max_age_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    W3C_GROUPS_API.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_cache_max_age_seconds() -> u64 {
    DEFAULT_CACHE_MAX_AGE_SECONDS
}

fn default_user_agent() -> String {
    format!("w3c-group/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_seconds: default_timeout_seconds(),
            cache_max_age_seconds: default_cache_max_age_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl ResolverConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GroupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GroupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GROUPS_API})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl ConfigProvider for ResolverConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn cache_max_age_seconds(&self) -> u64 {
        self.cache_max_age_seconds
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_not_blank("user_agent", &self.user_agent)?;
        Ok(())
    }
}
