pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::CachingFetcher;
pub use crate::config::{cli::LocalDocumentStore, toml_config::ResolverConfig};
pub use crate::core::diagnostics::{Diagnostic, Diagnostics, Level};
pub use crate::core::group::{check_superseded_options, GroupResolver, PLUGIN_NAME, W3C_GROUPS_API};
pub use crate::domain::model::{
    AggregatedGroupDetails, DocumentConfig, FetchResponse, GroupDetails, GroupMetadata,
    GroupSelection,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher};
pub use crate::utils::error::{GroupError, Result};

/// 以設定建立預設的快取取得器與解析器
pub fn resolver_from_config<C: ConfigProvider>(config: &C) -> Result<GroupResolver<CachingFetcher>> {
    let fetcher = CachingFetcher::from_config(config)?;
    GroupResolver::with_base(fetcher, config.api_base())
}
