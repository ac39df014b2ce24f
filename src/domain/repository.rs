use super::model::record::BookRecord;

/// 永続化の抽象。Infra層が実装する。
/// コレクション全体を1つの値として読み書きする。
pub trait CatalogStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存済みの一覧。未保存なら None。
    fn load(&self) -> Result<Option<Vec<BookRecord>>, Self::Error>;
    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error>;
    /// 保存値を削除する。未保存でも成功とする。
    fn clear(&self) -> Result<(), Self::Error>;
}
