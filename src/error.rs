/// Errors that can occur while acquiring or parsing table input.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TableTakeoutError {
    #[error("Failed to read file: {0}")]
    FileRead(#[source] std::io::Error),
    #[error("Failed to make HTTP request: {0}")]
    HttpRequest(String),
    #[error("invalid extract_links value: {0}")]
    InvalidExtractLinks(String),
}
