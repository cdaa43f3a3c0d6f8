use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed resource URL '{url}': {source}")]
    MalformedResourceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid {field}: {value} (must be a finite, non-negative number)")]
    InvalidNumericInput { field: &'static str, value: f64 },

    #[error("Transferred byte total overflows at resource '{url}'")]
    SizeOverflow { url: String },

    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid snapshot structure: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
