//! Property-based tests — invariant verification with proptest.

mod common;

use std::collections::HashSet;

use common::{empty_service, new_book, sample_service};
use proptest::prelude::*;

use bookswap_mcp::application::exchange::ExchangeService;
use bookswap_mcp::domain::model::catalog::Catalog;
use bookswap_mcp::domain::model::id::BookId;
use bookswap_mcp::domain::model::record::BookRecord;

// =============================================================================
// Search invariants
// =============================================================================

proptest! {
    /// 大文字・小文字を入れ替えても検索結果は変わらない。
    #[test]
    fn search_ignores_case(keyword in "[A-Za-z]{1,6}") {
        let svc = sample_service();
        let upper = svc.search(&keyword.to_uppercase());
        let lower = svc.search(&keyword.to_lowercase());
        prop_assert_eq!(upper, lower);
    }

    /// 検索結果はすべて title / author / uploader のどれかにキーワードを含む。
    #[test]
    fn search_hits_always_match_a_searched_field(keyword in "[a-z]{1,4}") {
        let svc = sample_service();
        for rec in svc.search(&keyword) {
            let hit = rec.title().to_lowercase().contains(&keyword)
                || rec.author().to_lowercase().contains(&keyword)
                || rec.uploader().to_lowercase().contains(&keyword);
            prop_assert!(hit);
        }
    }

    /// contact にしか無い語では何も見つからない。
    #[test]
    fn contact_is_never_searched(token in "[a-z]{6,10}") {
        let svc = empty_service();
        let contact = format!("zz{token}@qq.example");
        svc.add(new_book("Title", "Author", "Uploader", &contact)).unwrap();
        let needle = format!("zz{token}");
        prop_assert!(svc.search(&needle).is_empty());
    }
}

// =============================================================================
// Stats invariants
// =============================================================================

proptest! {
    /// totalUploaders == 重複を除いた uploader 数。
    #[test]
    fn uploader_count_is_distinct(uploaders in prop::collection::vec("[a-cA-C]{1,2}", 0..12)) {
        let svc = empty_service();
        for (i, u) in uploaders.iter().enumerate() {
            svc.add(new_book(&format!("Book {i}"), "Author", u, "c")).unwrap();
        }
        let distinct: HashSet<&String> = uploaders.iter().collect();
        let stats = svc.stats();
        prop_assert_eq!(stats.total_books, uploaders.len());
        prop_assert_eq!(stats.total_uploaders, distinct.len());
    }
}

// =============================================================================
// Add / delete / merge invariants
// =============================================================================

proptest! {
    /// add → delete_by_id で件数が元に戻る。
    #[test]
    fn add_delete_preserves_count(title in "[A-Za-z ]{1,30}") {
        let svc = sample_service();
        let before = svc.get_all().len();

        let rec = svc.add(new_book(&title, "Author", "Uploader", "c")).unwrap();
        prop_assert_eq!(svc.get_all().len(), before + 1);

        svc.delete_by_id(rec.id()).unwrap();
        prop_assert_eq!(svc.get_all().len(), before);
    }

    /// 同じ内容を2回インポートしても2回目は何も増えない。
    #[test]
    fn import_is_idempotent(ids in prop::collection::vec("[a-z0-9]{1,8}", 0..10)) {
        let json = serde_json::to_string(
            &ids.iter().map(|id| serde_json::json!({ "id": id })).collect::<Vec<_>>(),
        ).unwrap();

        let svc = empty_service();
        let first = ExchangeService::import_str(&svc, &json).unwrap();
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(first.imported, unique.len());
        prop_assert_eq!(first.total, unique.len());

        let second = ExchangeService::import_str(&svc, &json).unwrap();
        prop_assert_eq!(second.imported, 0);
        prop_assert_eq!(second.total, unique.len());
    }

    /// マージ後もIDは一意。
    #[test]
    fn merge_keeps_ids_unique(ids in prop::collection::vec("[1-9]", 0..15)) {
        let svc = sample_service();
        let incoming: Vec<BookRecord> = ids
            .iter()
            .map(|id| serde_json::from_value(serde_json::json!({ "id": id })).unwrap())
            .collect();

        let mut catalog = Catalog::new(svc.get_all());
        catalog.merge(incoming);

        let seen: HashSet<&BookId> = catalog.records().iter().map(|r| r.id()).collect();
        prop_assert_eq!(seen.len(), catalog.len());
    }
}
