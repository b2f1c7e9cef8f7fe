pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::ResolverConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "w3c-group")]
#[command(about = "Resolve the `group` option of a document configuration")]
pub struct CliConfig {
    #[arg(long, help = "Document configuration (JSON) to resolve")]
    pub input: String,

    #[arg(long, help = "Write the resolved configuration here instead of stdout")]
    pub output: Option<String>,

    #[arg(long, help = "Resolver settings (TOML)")]
    pub config: Option<String>,

    #[arg(long, help = "Override the group lookup endpoint")]
    pub api_base: Option<String>,

    #[arg(long, help = "Exit with status 2 when a group cannot be resolved")]
    pub strict: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 設定檔為基礎，再套用命令列覆寫
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None => ResolverConfig::default(),
        };
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
