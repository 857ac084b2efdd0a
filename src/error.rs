//! Library error type. The CLI wraps these in `anyhow` at the top level.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An execution option is missing or has the wrong shape. Raised before
    /// any network traffic happens.
    #[error("{0}")]
    Validation(String),

    /// The requested language id is not in the catalog.
    #[error("Language {0} could not be found.")]
    UnknownLanguage(String),

    /// A pattern we scrape from the frontend did not match.
    #[error("An error occurred while trying to scrape the {0} from tio.run.")]
    Scrape(&'static str),

    /// The service answered with an HTTP error status. Never retried.
    #[error("[HTTP {status}: {status_text}]")]
    Http { status: u16, status_text: String },

    /// The response body failed to decompress or was not valid UTF-8.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
