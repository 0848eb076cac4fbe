use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog must be a JSON object of records or an array of records, found {found}")]
    UnsupportedShape { found: &'static str },

    #[error("catalog record `{key}` is malformed: {source}")]
    InvalidRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
