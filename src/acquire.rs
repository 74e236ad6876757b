//! Turns a `source` argument into HTML text: a URL is fetched over HTTP, an
//! existing filesystem path is read, and anything else is treated as
//! literal HTML. Acquisition is the only place in this crate that performs
//! I/O; the parsing pipeline itself never fails.

use std::path::Path;

use crate::error::TableTakeoutError;

pub(crate) fn acquire(source: &str) -> Result<String, TableTakeoutError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch(source);
    }
    if Path::new(source).is_file() {
        return read_file(source);
    }
    Ok(source.to_string())
}

fn read_file(path: &str) -> Result<String, TableTakeoutError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(path, "reading HTML from file");
    std::fs::read_to_string(path).map_err(TableTakeoutError::FileRead)
}

fn fetch(url: &str) -> Result<String, TableTakeoutError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(url, "fetching HTML over HTTP");
    let body = ureq::get(url)
        .call()
        .map_err(|e| TableTakeoutError::HttpRequest(e.to_string()))?
        .body_mut()
        .read_to_string()
        .map_err(|e| TableTakeoutError::HttpRequest(e.to_string()))?;
    Ok(body)
}
