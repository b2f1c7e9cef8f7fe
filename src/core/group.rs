//! `group` 設定的解析：把工作小組名稱轉成 `wg`、`wgId`、`wgURI`、`wgPatentURI`。

use crate::core::diagnostics::{Diagnostic, Diagnostics, Level};
use crate::domain::model::{
    AggregatedGroupDetails, DocumentConfig, GroupDetails, GroupMetadata, GroupRecord,
    GroupSelection,
};
use crate::domain::ports::Fetcher;
use crate::utils::error::{GroupError, Result};
use crate::utils::text::join_and;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

pub const PLUGIN_NAME: &str = "w3c/group";

pub const W3C_GROUPS_API: &str = "https://respec.org/w3c/groups/";

const NOT_FOUND_HINT: &str = "See [supported group names](https://respec.org/w3c/groups/) to use with the [`group`](https://respec.org/docs/#group) configuration option.";

pub struct GroupResolver<F: Fetcher> {
    fetcher: Arc<F>,
    base: Url,
}

impl<F: Fetcher + 'static> GroupResolver<F> {
    pub fn new(fetcher: F) -> Result<Self> {
        Self::with_base(fetcher, W3C_GROUPS_API)
    }

    /// 沒有結尾 `/` 的 base 會被補上，否則相對路徑解析會吃掉最後一段
    pub fn with_base(fetcher: F, base: &str) -> Result<Self> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };
        Ok(Self {
            fetcher: Arc::new(fetcher),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// 解析 `conf.group` 並合併結果。沒有設定 `group` 時不做任何事
    pub async fn run(&self, conf: &mut DocumentConfig) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let Some(group) = conf.requested_group().cloned() else {
            tracing::debug!("No `group` configured, skipping");
            return diagnostics;
        };

        check_superseded_options(conf, &mut diagnostics);

        let metadata = match group {
            GroupSelection::One(name) => self
                .group_details(&name, &mut diagnostics)
                .await
                .map(GroupMetadata::Single),
            GroupSelection::Many(names) => Some(GroupMetadata::Multiple(
                self.multiple_group_details(&names, &mut diagnostics).await,
            )),
        };

        if let Some(metadata) = metadata {
            conf.apply(metadata);
        }

        diagnostics
    }

    pub async fn group_details(
        &self,
        group: &str,
        sink: &mut Diagnostics,
    ) -> Option<GroupDetails> {
        match resolve_group(self.fetcher.as_ref(), &self.base, group).await {
            Ok(details) => Some(details),
            Err(diagnostic) => {
                sink.push(diagnostic);
                None
            }
        }
    }

    /// 每個名稱各開一個 task 同時查詢，結果依請求順序合併，失敗的直接略過
    pub async fn multiple_group_details(
        &self,
        groups: &[String],
        sink: &mut Diagnostics,
    ) -> AggregatedGroupDetails {
        let handles: Vec<_> = groups
            .iter()
            .map(|group| {
                let fetcher = Arc::clone(&self.fetcher);
                let base = self.base.clone();
                let group = group.clone();
                tokio::spawn(async move { resolve_group(fetcher.as_ref(), &base, &group).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(
                handle
                    .await
                    .unwrap_or_else(|e| Err(fetch_failed(&GroupError::TaskError(e)))),
            );
        }

        let aggregated: AggregatedGroupDetails = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(details) => Some(details),
                Err(diagnostic) => {
                    sink.push(diagnostic);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Resolved {} of {} requested groups",
            aggregated.len(),
            groups.len()
        );
        aggregated
    }
}

/// 同時使用 `group` 與舊設定時發出一則警告
pub fn check_superseded_options(conf: &DocumentConfig, sink: &mut Diagnostics) {
    let used = conf.superseded_options_in_use();
    if used.is_empty() {
        return;
    }

    let options = join_and(&used, |s| format!("`{}`", s));
    let message = format!(
        "Configuration options {} are superseded by `group` and will be overridden.",
        options
    );
    sink.warn(
        message,
        PLUGIN_NAME,
        Some("Please remove them from `respecConfig`.".to_string()),
    );
}

pub fn group_url(base: &Url, group: &str) -> Result<Url> {
    Ok(base.join(group)?)
}

async fn resolve_group<F: Fetcher + ?Sized>(
    fetcher: &F,
    base: &Url,
    group: &str,
) -> std::result::Result<GroupDetails, Diagnostic> {
    let url = group_url(base, group).map_err(|e| fetch_failed(&e))?;
    tracing::debug!("🔎 Looking up group \"{}\" at {}", group, url);

    let response = fetcher.fetch(&url).await.map_err(|e| fetch_failed(&e))?;

    if response.ok() {
        let body: Map<String, Value> = response.json().map_err(|e| fetch_failed(&e))?;
        let details = GroupDetails::from(GroupRecord::from(body));
        tracing::debug!("✅ Group \"{}\" resolved to {}", group, details.wg);
        return Ok(details);
    }

    if response.status() == 404 {
        return Err(Diagnostic::new(
            Level::Error,
            format!("No group with name `\"{}\"` found.", group),
            PLUGIN_NAME,
        )
        .with_hint(NOT_FOUND_HINT));
    }

    Err(Diagnostic::new(
        Level::Error,
        format!(
            "Failed to fetch group details (HTTP: {})",
            response.status()
        ),
        PLUGIN_NAME,
    ))
}

fn fetch_failed(error: &GroupError) -> Diagnostic {
    Diagnostic::new(
        Level::Error,
        format!("Failed to fetch group details ({})", error.reason()),
        PLUGIN_NAME,
    )
}
