use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("import: failed to read file: {0}")]
    ImportRead(#[source] std::io::Error),

    #[error("import: invalid JSON: {0}")]
    ImportParse(#[source] serde_json::Error),

    #[error("import: file content is not a list of books")]
    ImportNotAList,

    #[error("import: entry {0} is not an object with a string id")]
    ImportInvalidRecord(usize),

    #[error("export error: {0}")]
    Export(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    /// 呼び出し側の入力に起因するエラーか。
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AppError::Domain(_)
                | AppError::ImportParse(_)
                | AppError::ImportNotAList
                | AppError::ImportInvalidRecord(_)
        )
    }
}
