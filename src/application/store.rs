use crate::domain::model::record::BookRecord;
use crate::domain::repository::CatalogStore;

use super::error::AppError;

/// CatalogStore の薄いラッパー。
///
/// 読み込みは失敗しても空の一覧を返し（ログのみ）、書き込みと削除の失敗は
/// `AppError::Storage` として呼び出し側に返す。リトライはしない。
pub struct Store<S: CatalogStore> {
    inner: S,
}

impl<S: CatalogStore> Store<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn read(&self) -> Vec<BookRecord> {
        match self.inner.load() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read catalog, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn write(&self, records: &[BookRecord]) -> Result<(), AppError> {
        self.inner.save(records).map_err(|e| {
            tracing::error!(error = %e, count = records.len(), "failed to write catalog");
            AppError::Storage(Box::new(e))
        })
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.inner.clear().map_err(|e| {
            tracing::error!(error = %e, "failed to clear catalog");
            AppError::Storage(Box::new(e))
        })
    }
}
