use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::BookId;
use crate::domain::error::DomainError;

/// 本の登録リクエスト。未指定(None)と空文字はどちらも欠落として扱う。
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub uploader: Option<String>,
    pub contact: Option<String>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        uploader: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            uploader: Some(uploader.into()),
            contact: Some(contact.into()),
        }
    }
}

/// 出品された1冊の本。
///
/// 永続化形式のフィールド名は camelCase（`createdAt`）。
/// 既知フィールドも JSON 値のまま保持するので、インポートされたレコードの
/// null・数値・欠落はそのまま書き戻される。未知のフィールドは `extra` に保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    id: BookId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    title: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    author: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    uploader: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    contact: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    created_at: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl BookRecord {
    /// 必須項目を検証し、IDと登録日時を採番してレコードを作る。
    pub fn create(req: NewBook, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let title = required("title", req.title)?;
        let author = required("author", req.author)?;
        let uploader = required("uploader", req.uploader)?;
        let contact = required("contact", req.contact)?;

        Ok(Self {
            id: BookId::generate(),
            title: Some(Value::String(title)),
            author: Some(Value::String(author)),
            uploader: Some(Value::String(uploader)),
            contact: Some(Value::String(contact)),
            created_at: Some(Value::String(iso_timestamp(now))),
            extra: Map::new(),
        })
    }

    /// ID付きでレコードを組み立てる。検証は行わない（サンプル投入用）。
    pub(crate) fn with_id(
        id: impl Into<BookId>,
        title: &str,
        author: &str,
        uploader: &str,
        contact: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            author: Some(author.into()),
            uploader: Some(uploader.into()),
            contact: Some(contact.into()),
            created_at: Some(Value::String(iso_timestamp(created_at))),
            extra: Map::new(),
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    /// 文字列でない・欠落している場合は空文字。以下同様。
    pub fn title(&self) -> &str {
        text(&self.title)
    }

    pub fn author(&self) -> &str {
        text(&self.author)
    }

    pub fn uploader(&self) -> &str {
        text(&self.uploader)
    }

    pub fn contact(&self) -> &str {
        text(&self.contact)
    }

    pub fn created_at(&self) -> &str {
        text(&self.created_at)
    }

    /// 小文字化済みキーワードが title / author / uploader のいずれかに含まれるか。
    /// contact は検索対象外。
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title().to_lowercase().contains(needle)
            || self.author().to_lowercase().contains(needle)
            || self.uploader().to_lowercase().contains(needle)
    }
}

/// キーが存在すれば null も含めて `Some` にする。欠落時は `default` で None。
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn text(value: &Option<Value>) -> &str {
    value.as_ref().and_then(Value::as_str).unwrap_or("")
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::MissingField(field)),
    }
}

/// ISO-8601（UTC、ミリ秒、`Z`終端）
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
