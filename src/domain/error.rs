use super::model::id::BookId;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("book not found: {0}")]
    BookNotFound(BookId),
}
