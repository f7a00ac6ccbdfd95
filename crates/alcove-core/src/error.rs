use thiserror::Error;

use alcove_types::CommentId;

/// The primary error type for all alcove-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The submitted or queried URL does not parse.
    #[error("bad url value: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL parsed but carries no host, which would alias every unscoped
    /// path into a single thread.
    #[error("bad url value: missing host")]
    MissingHost,

    /// A required submission field was empty.
    #[error("bad {0} value")]
    MissingField(&'static str),

    /// Comments are not enabled for the thread.
    #[error("comments not enabled")]
    Disabled,

    /// The key-value store is unreachable or misbehaving.
    #[error("backend unavailable: {0}")]
    Backend(#[from] anyhow::Error),

    /// The classifier request itself failed.
    #[error("classifier request failed: {0}")]
    Classifier(#[from] reqwest::Error),

    /// The classifier answered with something other than a boolean literal.
    #[error("unexpected classifier response: {0:?}")]
    ClassifierProtocol(String),

    /// An index references a comment record that cannot be read.
    #[error("approved index references missing comment {id}")]
    CorruptIndex { id: CommentId },
}

/// A specialized Result type for alcove-core logic.
pub type Result<T> = std::result::Result<T, Error>;
