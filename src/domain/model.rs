use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `group` 取代的舊設定鍵，依此順序檢查與回報
pub const SUPERSEDED_OPTIONS: [&str; 4] = ["wg", "wgURI", "wgId", "wgPatentURI"];

/// `group` 設定：單一名稱或依序排列的多個名稱
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSelection {
    One(String),
    Many(Vec<String>),
}

/// 查詢服務回傳的原始 JSON。欄位不做型別檢查，缺少的欄位視為 null
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub id: Value,
    pub name: Value,
    pub uri: Value,
    pub patent_uri: Value,
}

impl From<Map<String, Value>> for GroupRecord {
    fn from(mut body: Map<String, Value>) -> Self {
        let mut take = |key: &str| body.remove(key).unwrap_or(Value::Null);
        Self {
            id: take("id"),
            name: take("name"),
            uri: take("URI"),
            patent_uri: take("patentURI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetails {
    pub wg: Value,
    #[serde(rename = "wgId")]
    pub wg_id: Value,
    #[serde(rename = "wgURI")]
    pub wg_uri: Value,
    #[serde(rename = "wgPatentURI")]
    pub wg_patent_uri: Value,
}

impl From<GroupRecord> for GroupDetails {
    fn from(record: GroupRecord) -> Self {
        Self {
            wg: record.name,
            wg_id: record.id,
            wg_uri: record.uri,
            wg_patent_uri: record.patent_uri,
        }
    }
}

/// 多個群組的結果，四個欄位長度永遠相同
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedGroupDetails {
    pub wg: Vec<Value>,
    #[serde(rename = "wgId")]
    pub wg_id: Vec<Value>,
    #[serde(rename = "wgURI")]
    pub wg_uri: Vec<Value>,
    #[serde(rename = "wgPatentURI")]
    pub wg_patent_uri: Vec<Value>,
}

impl AggregatedGroupDetails {
    pub fn push(&mut self, details: GroupDetails) {
        self.wg.push(details.wg);
        self.wg_id.push(details.wg_id);
        self.wg_uri.push(details.wg_uri);
        self.wg_patent_uri.push(details.wg_patent_uri);
    }

    pub fn len(&self) -> usize {
        self.wg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wg.is_empty()
    }
}

impl FromIterator<GroupDetails> for AggregatedGroupDetails {
    fn from_iter<I: IntoIterator<Item = GroupDetails>>(iter: I) -> Self {
        let mut aggregated = Self::default();
        for details in iter {
            aggregated.push(details);
        }
        aggregated
    }
}

/// 要合併回設定物件的群組資料
#[derive(Debug, Clone, PartialEq)]
pub enum GroupMetadata {
    Single(GroupDetails),
    Multiple(AggregatedGroupDetails),
}

/// 文件設定物件。只讀寫與群組相關的鍵，其餘鍵原樣保留。
/// 群組相關的鍵區分「未出現」(`None`) 與「值為 null」，寫回時 null 仍會保留
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<Option<GroupSelection>>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub wg: Option<Value>,
    #[serde(
        rename = "wgId",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub wg_id: Option<Value>,
    #[serde(
        rename = "wgURI",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub wg_uri: Option<Value>,
    #[serde(
        rename = "wgPatentURI",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub wg_patent_uri: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 鍵有出現就是 `Some`，即使值是 null
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl DocumentConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 空字串視同未設定
    pub fn requested_group(&self) -> Option<&GroupSelection> {
        match self.group.as_ref().and_then(Option::as_ref) {
            Some(GroupSelection::One(name)) if name.is_empty() => None,
            other => other,
        }
    }

    pub fn legacy_value(&self, key: &str) -> Option<&Value> {
        match key {
            "wg" => self.wg.as_ref(),
            "wgId" => self.wg_id.as_ref(),
            "wgURI" => self.wg_uri.as_ref(),
            "wgPatentURI" => self.wg_patent_uri.as_ref(),
            _ => None,
        }
    }

    /// 目前有設定（且為 truthy）的舊設定鍵
    pub fn superseded_options_in_use(&self) -> Vec<&'static str> {
        SUPERSEDED_OPTIONS
            .iter()
            .copied()
            .filter(|key| self.legacy_value(key).is_some_and(is_truthy))
            .collect()
    }

    /// 覆寫四個群組欄位
    pub fn apply(&mut self, metadata: GroupMetadata) {
        match metadata {
            GroupMetadata::Single(details) => {
                self.wg = Some(details.wg);
                self.wg_id = Some(details.wg_id);
                self.wg_uri = Some(details.wg_uri);
                self.wg_patent_uri = Some(details.wg_patent_uri);
            }
            GroupMetadata::Multiple(aggregated) => {
                self.wg = Some(Value::Array(aggregated.wg));
                self.wg_id = Some(Value::Array(aggregated.wg_id));
                self.wg_uri = Some(Value::Array(aggregated.wg_uri));
                self.wg_patent_uri = Some(Value::Array(aggregated.wg_patent_uri));
            }
        }
    }
}

/// JSON 值的 truthiness：null、false、0、"" 為假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 查詢服務的 HTTP 回應
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
