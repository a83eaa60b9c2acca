use thiserror::Error;

#[derive(Error, Debug)]
pub enum UscrapeError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Extraction error: no value for field '{field}' on a page that returned success")]
    Extraction { field: &'static str },

    #[error("Manga not found: {0}")]
    MangaNotFound(String),
}

impl UscrapeError {
    pub fn extraction(field: &'static str) -> Self {
        Self::Extraction { field }
    }

    pub fn manga_not_found(name: impl Into<String>) -> Self {
        Self::MangaNotFound(name.into())
    }
}

pub type Result<T> = std::result::Result<T, UscrapeError>;
