use crate::domain::model::FetchResponse;
use crate::domain::ports::{ConfigProvider, Fetcher};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// 預設快取一天
pub const DEFAULT_CACHE_MAX_AGE_SECONDS: u64 = 86_400;

const MAX_CACHE_AGE_SECONDS: i64 = 10 * 365 * 86_400;

#[derive(Debug, Clone)]
struct CacheEntry {
    response: FetchResponse,
    fetched_at: DateTime<Utc>,
}

/// 以 URL 為鍵、只在記憶體中快取成功回應的 HTTP 取得器
pub struct CachingFetcher {
    client: Client,
    max_age: chrono::Duration,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl CachingFetcher {
    pub fn new(client: Client, max_age_seconds: u64) -> Self {
        let seconds = i64::try_from(max_age_seconds)
            .unwrap_or(MAX_CACHE_AGE_SECONDS)
            .min(MAX_CACHE_AGE_SECONDS);
        Self {
            client,
            max_age: chrono::Duration::seconds(seconds),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self::new(client, config.cache_max_age_seconds()))
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    async fn cached(&self, url: &Url) -> Option<FetchResponse> {
        let cache = self.cache.lock().await;
        let entry = cache.get(url.as_str())?;
        if Utc::now() - entry.fetched_at < self.max_age {
            Some(entry.response.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl Fetcher for CachingFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        if let Some(response) = self.cached(url).await {
            tracing::debug!("📦 Cache hit: {}", url);
            return Ok(response);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        let body = response.bytes().await?.to_vec();
        let fetched = FetchResponse::new(status, body);

        // 失敗的回應不快取，下次仍會重新請求
        if fetched.ok() {
            self.cache.lock().await.insert(
                url.to_string(),
                CacheEntry {
                    response: fetched.clone(),
                    fetched_at: Utc::now(),
                },
            );
        }

        Ok(fetched)
    }
}
