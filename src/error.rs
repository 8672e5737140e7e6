use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: remote answered {status}: {body}")]
    UpstreamStatus {
        context: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("interrupted by user")]
    Interrupted,
}

impl Error {
    pub fn upstream(context: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Upstream {
            context: context.into(),
            source,
        }
    }
}
