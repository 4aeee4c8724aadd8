use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid request method '{0}', expected one of get, post, put, delete")]
    InvalidMethod(String),

    #[error("invalid HTTP version '{0}', expected one of AUTO, HTTP1_ONLY, HTTP2_PRIOR_KNOWLEDGE")]
    InvalidHttpVersion(String),

    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An audio file was found without a same-stem `.txt` next to it.
    #[error("no transcript found for {}", audio.display())]
    MissingTranscript { audio: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Parameters built for one client shape were handed to the other client.
    #[error("request body shape does not match the {0} client")]
    ModeMismatch(&'static str),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
