use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::model::catalog::{Catalog, MergeOutcome};
use crate::domain::model::record::BookRecord;
use crate::domain::repository::CatalogStore;

use super::error::AppError;
use super::service::CatalogService;

/// インポート結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub imported: usize,
    pub total: usize,
}

impl From<MergeOutcome> for ImportOutcome {
    fn from(m: MergeOutcome) -> Self {
        Self {
            success: true,
            imported: m.imported,
            total: m.total,
        }
    }
}

/// カタログ ⇔ バックアップファイルの変換
pub struct ExchangeService;

impl ExchangeService {
    /// 一覧を整形済みJSON（2スペースインデント）に変換する。
    pub fn render(records: &[BookRecord]) -> Result<String, AppError> {
        serde_json::to_string_pretty(records).map_err(|e| AppError::Export(Box::new(e)))
    }

    /// `books_backup_<YYYY-MM-DD>.json`
    pub fn backup_filename(date: NaiveDate) -> String {
        format!("books_backup_{}.json", date.format("%Y-%m-%d"))
    }

    /// 現在の全件を `output_dir` に今日の日付付きファイル名で書き出す。
    pub fn export<S: CatalogStore>(
        svc: &CatalogService<S>,
        output_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        Self::export_dated(svc, output_dir, Utc::now().date_naive())
    }

    pub fn export_dated<S: CatalogStore>(
        svc: &CatalogService<S>,
        output_dir: &Path,
        date: NaiveDate,
    ) -> Result<PathBuf, AppError> {
        let records = svc.get_all();
        let content = Self::render(&records)?;

        std::fs::create_dir_all(output_dir).map_err(|e| AppError::Export(Box::new(e)))?;
        let path = output_dir.join(Self::backup_filename(date));
        std::fs::write(&path, content).map_err(|e| AppError::Export(Box::new(e)))?;

        tracing::info!(path = %path.display(), count = records.len(), "catalog exported");
        Ok(path)
    }

    /// ファイルを非同期に読み込み、既存カタログにマージする。
    pub async fn import_file<S: CatalogStore>(
        svc: &CatalogService<S>,
        path: &Path,
    ) -> Result<ImportOutcome, AppError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(AppError::ImportRead)?;
        Self::import_str(svc, &content)
    }

    /// JSONテキストをパースし、IDが未登録のレコードだけを末尾に追加する。
    ///
    /// ファイル内で同じIDが複数回現れた場合は最初の1件だけを追加する
    /// （既存IDとの照合に加えて、カタログ内のID一意性を保つため）。
    pub fn import_str<S: CatalogStore>(
        svc: &CatalogService<S>,
        content: &str,
    ) -> Result<ImportOutcome, AppError> {
        let incoming = Self::parse_records(content)?;

        let mut catalog = Catalog::new(svc.get_all());
        let outcome = catalog.merge(incoming);
        svc.store().write(catalog.records())?;

        tracing::info!(
            imported = outcome.imported,
            total = outcome.total,
            "catalog imported"
        );
        Ok(outcome.into())
    }

    /// 配列であること、各要素が文字列の `id` を持つオブジェクトであることだけを検証する。
    /// それ以外のフィールドは型を問わずそのまま保持する。
    fn parse_records(content: &str) -> Result<Vec<BookRecord>, AppError> {
        let value: Value = serde_json::from_str(content).map_err(AppError::ImportParse)?;
        let Value::Array(items) = value else {
            return Err(AppError::ImportNotAList);
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.get("id").is_some_and(Value::is_string) {
                    return Err(AppError::ImportInvalidRecord(i));
                }
                serde_json::from_value(item).map_err(|_| AppError::ImportInvalidRecord(i))
            })
            .collect()
    }
}
