use std::path::PathBuf;

use crate::domain::model::record::BookRecord;
use crate::domain::repository::CatalogStore;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるCatalogStore実装。
/// 1 カタログ = 1 JSONファイル（BookRecordの配列）。
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogStore for JsonCatalogStore {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Option<Vec<BookRecord>>, Self::Error> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<BookRecord> = serde_json::from_str(&content)?;
        Ok(Some(records))
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(records)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::record::NewBook;

    #[test]
    fn roundtrip_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let store = JsonCatalogStore::new(&path);

        // 初回loadはNone
        assert!(store.load().unwrap().is_none());

        let rec =
            BookRecord::create(NewBook::new("Dune", "Herbert", "alice", "a@x"), chrono::Utc::now())
                .unwrap();
        store.save(std::slice::from_ref(&rec)).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, vec![rec]);
        assert!(!path.with_extension("tmp").exists());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // 二重clearも成功
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonCatalogStore::new(&path);
        assert!(matches!(store.load(), Err(JsonStoreError::Json(_))));
    }
}
