//! Error types for catalog key derivation and the stats transport.

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between "caller hands us a URL" and
/// "caller receives a parsed JSON tree".
///
/// Validation problems are caught before any network activity. A successfully
/// received non-2xx HTTP response is *not* an error at this layer; the status
/// code travels with the response stream untouched. A catalog lookup miss is
/// also not represented here — lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An alternating key/value list (query parameters or headers) had an
    /// odd number of entries, so at least one key is missing its value.
    #[error("alternating key/value list has odd length {0}")]
    OddPairList(usize),

    /// The target URL was empty, or its scheme/host could not be parsed.
    #[error("invalid url: {0:?}")]
    InvalidUrl(String),

    /// A header name or value cannot be represented on the wire.
    #[error("invalid header: {0:?}")]
    InvalidHeader(String),

    /// The connection could not be opened, or I/O on an open connection
    /// failed (DNS, refused, reset, timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response bytes were not a complete, valid JSON document.
    #[error("response is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// True for input problems detected before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::OddPairList(_) | Error::InvalidUrl(_) | Error::InvalidHeader(_)
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}
