use chrono::Utc;

use crate::domain::model::catalog::{Catalog, CatalogStats};
use crate::domain::model::id::BookId;
use crate::domain::model::record::{BookRecord, NewBook};
use crate::domain::repository::CatalogStore;

use super::error::AppError;
use super::store::Store;

/// カタログに対するユースケース。
/// load → mutate → save のパターンで操作する。
pub struct CatalogService<S: CatalogStore> {
    store: Store<S>,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Store::new(store),
        }
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// 全件を登録順で返す。
    pub fn get_all(&self) -> Vec<BookRecord> {
        self.store.read()
    }

    /// 本を登録する。必須項目が欠けていれば何も書き込まずにエラー。
    pub fn add(&self, req: NewBook) -> Result<BookRecord, AppError> {
        let record = BookRecord::create(req, Utc::now()).map_err(|e| {
            tracing::warn!(error = %e, "rejected book");
            e
        })?;
        let mut catalog = self.load_catalog();
        catalog.push(record.clone());
        self.store.write(catalog.records())?;
        tracing::info!(id = %record.id(), title = record.title(), "book added");
        Ok(record)
    }

    /// IDで削除する。該当なしの場合は書き込まない。
    pub fn delete_by_id(&self, id: &BookId) -> Result<(), AppError> {
        let mut catalog = self.load_catalog();
        if let Err(e) = catalog.remove(id) {
            tracing::warn!(%id, "no book to delete");
            return Err(e.into());
        }
        self.store.write(catalog.records())?;
        tracing::info!(%id, remaining = catalog.len(), "book deleted");
        Ok(())
    }

    /// title / author / uploader の部分一致検索（大文字小文字無視）。
    pub fn search(&self, keyword: &str) -> Vec<BookRecord> {
        let catalog = self.load_catalog();
        catalog.search(keyword).into_iter().cloned().collect()
    }

    pub fn stats(&self) -> CatalogStats {
        self.load_catalog().stats()
    }

    /// 保存値ごと削除する。
    pub fn clear_all(&self) -> Result<(), AppError> {
        self.store.clear()?;
        tracing::info!("catalog cleared");
        Ok(())
    }

    // --- private ---

    fn load_catalog(&self) -> Catalog {
        Catalog::new(self.store.read())
    }
}
