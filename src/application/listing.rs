use crate::domain::model::catalog::CatalogStats;
use crate::domain::model::record::BookRecord;

/// 一覧を番号付きのテキストに整形する。
pub fn render_listing(heading: &str, records: &[BookRecord]) -> String {
    if records.is_empty() {
        return format!("# {heading} (0)\n\nNo books found.\n");
    }
    let mut out = format!("# {heading} ({})\n\n", records.len());
    for (i, rec) in records.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} by {}\n   uploader: {} | contact: {} | id: {}\n",
            i + 1,
            rec.title(),
            rec.author(),
            rec.uploader(),
            rec.contact(),
            rec.id()
        ));
    }
    out
}

pub fn render_stats(stats: &CatalogStats) -> String {
    format!(
        "Books: {}\nUploaders: {}",
        stats.total_books, stats.total_uploaders
    )
}
