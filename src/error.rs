use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("YouTube API error on {endpoint}: {status} - {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },
    #[error("unexpected response from {endpoint}: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("channel '@{0}' not found or API quota exceeded")]
    ChannelNotFound(String),
}
