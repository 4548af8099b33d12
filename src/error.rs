use thiserror::Error;

/// Structural problems found while walking a retrieved page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no element matches `{selector}`")]
    MissingElement { selector: &'static str },

    #[error("`{selector}` has no `{attr}` attribute")]
    MissingAttr {
        selector: &'static str,
        attr: &'static str,
    },

    #[error("link `{href}` has fewer than two path segments")]
    ShortHref { href: String },

    #[error("no element with id `{fragment}`")]
    MissingFragment { fragment: String },
}

#[derive(Debug, Error)]
pub enum GrabError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected page structure at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sink(String),
}

impl GrabError {
    pub fn parse(url: &str, source: ParseError) -> Self {
        GrabError::Parse {
            url: url.to_string(),
            source,
        }
    }
}
