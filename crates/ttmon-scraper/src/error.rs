use thiserror::Error;

use ttmon_core::TargetKind;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid request URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("target kind \"{kind}\" is not supported yet")]
    UnsupportedTarget { kind: TargetKind },

    #[error("dataset item has no content id (share URL: \"{video_url}\")")]
    MissingContentId { video_url: String },
}
