use crate::domain::model::DocumentConfig;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// 從本機檔案讀寫文件設定 (JSON)
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn read_config(&self, path: &str) -> Result<DocumentConfig> {
        let full_path = self.base_path.join(path);
        let content = fs::read_to_string(full_path)?;
        DocumentConfig::from_json_str(&content)
    }

    pub fn write_config(&self, path: &str, conf: &DocumentConfig) -> Result<PathBuf> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, conf.to_json_pretty()?)?;
        Ok(full_path)
    }
}
