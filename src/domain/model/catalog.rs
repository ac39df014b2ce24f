use std::collections::HashSet;

use serde::Serialize;

use super::id::BookId;
use super::record::BookRecord;
use crate::domain::error::DomainError;

/// 集計値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    pub total_uploaders: usize,
}

/// マージ結果。imported は新規追加件数、total はマージ後の総件数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub imported: usize,
    pub total: usize,
}

/// 本の一覧 — 集約ルート。登録順を保持する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<BookRecord>,
}

impl Catalog {
    pub fn new(records: Vec<BookRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 末尾に追加する。
    pub fn push(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// IDが一致するレコードを削除する。一致がなければエラー。
    pub fn remove(&mut self, id: &BookId) -> Result<(), DomainError> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            return Err(DomainError::BookNotFound(id.clone()));
        }
        Ok(())
    }

    /// title / author / uploader の部分一致（大文字小文字無視）。
    /// 空白のみのキーワードは全件を返す。順序は登録順。
    pub fn search(&self, keyword: &str) -> Vec<&BookRecord> {
        if keyword.trim().is_empty() {
            return self.records.iter().collect();
        }
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches_lowercase(&needle))
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let uploaders: HashSet<&str> = self.records.iter().map(|r| r.uploader()).collect();
        CatalogStats {
            total_books: self.records.len(),
            total_uploaders: uploaders.len(),
        }
    }

    /// 既存IDに無いレコードだけを元の順序で末尾に追加する。
    ///
    /// 同じIDのレコードは内容が異なっても捨てる。入力内で重複するIDは
    /// 最初の1件だけを採用する。
    pub fn merge(&mut self, incoming: Vec<BookRecord>) -> MergeOutcome {
        let mut known: HashSet<BookId> = self.records.iter().map(|r| r.id().clone()).collect();
        let mut imported = 0;
        for record in incoming {
            if known.insert(record.id().clone()) {
                self.records.push(record);
                imported += 1;
            }
        }
        MergeOutcome {
            imported,
            total: self.records.len(),
        }
    }
}
