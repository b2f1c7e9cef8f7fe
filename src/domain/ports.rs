use crate::domain::model::FetchResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// 具快取能力的 HTTP 取得器；快取策略完全由實作決定
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn cache_max_age_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
}
