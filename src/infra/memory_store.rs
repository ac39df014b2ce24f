use std::cell::{Cell, RefCell};

use crate::domain::model::record::BookRecord;
use crate::domain::repository::CatalogStore;

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("simulated write failure")]
    WriteRejected,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// ファイルI/O不要のインメモリストア。
///
/// 値はJSON文字列で保持するので、ファイル版と同じシリアライズ経路を通る。
/// 単一スレッド前提なので `RefCell` で内部可変性を持つ。
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    value: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生の保存値を差し替える（破損データの再現用）。
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.value.borrow_mut() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// 書き込み失敗（容量超過など）を再現する。
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl CatalogStore for MemoryCatalogStore {
    type Error = MemoryStoreError;

    fn load(&self) -> Result<Option<Vec<BookRecord>>, Self::Error> {
        match self.value.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if self.fail_writes.get() {
            return Err(MemoryStoreError::WriteRejected);
        }
        let json = serde_json::to_string(records)?;
        *self.value.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        if self.fail_writes.get() {
            return Err(MemoryStoreError::WriteRejected);
        }
        *self.value.borrow_mut() = None;
        Ok(())
    }
}
