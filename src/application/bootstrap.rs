use chrono::{DateTime, Utc};

use crate::domain::model::record::BookRecord;
use crate::domain::repository::CatalogStore;

use super::error::AppError;
use super::store::Store;

/// 初回起動時に投入するサンプル。IDは固定文字列 "1".."6"。
pub fn sample_books(now: DateTime<Utc>) -> Vec<BookRecord> {
    [
        ("1", "The Pragmatic Programmer", "David Thomas, Andrew Hunt", "Emma Chen", "emma.chen@example.com"),
        ("2", "Clean Code", "Robert C. Martin", "Liam Patel", "+1 555 0102"),
        ("3", "Dune", "Frank Herbert", "Sofia Rossi", "telegram: @sofia_reads"),
        ("4", "One Hundred Years of Solitude", "Gabriel García Márquez", "Emma Chen", "emma.chen@example.com"),
        ("5", "The Rust Programming Language", "Steve Klabnik, Carol Nichols", "Noah Kim", "noah.kim@example.com"),
        ("6", "Sapiens", "Yuval Noah Harari", "Ava Müller", "wechat: ava_mueller"),
    ]
    .into_iter()
    .map(|(id, title, author, uploader, contact)| {
        BookRecord::with_id(id, title, author, uploader, contact, now)
    })
    .collect()
}

/// 保存値が空ならサンプルを書き込む。投入した場合 true。
///
/// 検証とID採番を経由せず Store に直接書く。
pub fn seed_if_empty<S: CatalogStore>(store: &Store<S>) -> Result<bool, AppError> {
    if !store.read().is_empty() {
        return Ok(false);
    }
    let samples = sample_books(Utc::now());
    store.write(&samples)?;
    tracing::info!(count = samples.len(), "seeded sample catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory_store::MemoryCatalogStore;

    #[test]
    fn seeds_only_once() {
        let store = Store::new(MemoryCatalogStore::new());
        assert!(seed_if_empty(&store).unwrap());
        assert_eq!(store.read().len(), 6);

        assert!(!seed_if_empty(&store).unwrap());
        assert_eq!(store.read().len(), 6);
    }

    #[test]
    fn sample_ids_are_fixed_and_unique() {
        let ids: Vec<String> = sample_books(Utc::now())
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn seed_write_failure_is_reported() {
        let store = Store::new(MemoryCatalogStore::new());
        store.inner().set_fail_writes(true);
        assert!(seed_if_empty(&store).is_err());
    }
}
