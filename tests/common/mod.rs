//! Shared test harness for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};

use bookswap_mcp::application::bootstrap::sample_books;
use bookswap_mcp::application::service::CatalogService;
use bookswap_mcp::domain::model::record::{BookRecord, NewBook};
use bookswap_mcp::domain::repository::CatalogStore;
use bookswap_mcp::infra::memory_store::MemoryCatalogStore;

// =============================================================================
// Catalog fixtures
// =============================================================================

/// 空のインメモリカタログ
pub fn empty_service() -> CatalogService<MemoryCatalogStore> {
    CatalogService::new(MemoryCatalogStore::new())
}

/// サンプル6冊を投入済みのインメモリカタログ
pub fn sample_service() -> CatalogService<MemoryCatalogStore> {
    let store = MemoryCatalogStore::new();
    store.save(&sample_books(fixed_now())).unwrap();
    CatalogService::new(store)
}

pub fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()
}

pub fn new_book(title: &str, author: &str, uploader: &str, contact: &str) -> NewBook {
    NewBook::new(title, author, uploader, contact)
}

pub fn ids(records: &[BookRecord]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
