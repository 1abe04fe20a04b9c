//! Error handling for the gitlab-mirror crate.
use std::{error::Error as StdError, fmt};

/// Error type for the gitlab-mirror crate.
#[derive(Debug)]
pub struct MirrorError {
    /// Inner error.
    inner: Box<Inner>,
}

impl MirrorError {
    /// Create a new error.
    pub(crate) fn new(kind: MirrorErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Attach a human-readable text as the error source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }

    /// Whether this is a configuration error (fatal before any work).
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, MirrorErrorKind::Config)
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the gitlab-mirror crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: MirrorErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// Kind of error.
#[derive(Debug)]
pub(crate) enum MirrorErrorKind {
    /// Missing or invalid configuration.
    Config,

    /// Non-success response from a hosting API.
    Http,

    /// Error related to the reqwest crate.
    Request,

    /// Error related to serde.
    Serde,

    /// Error related to the filesystem or a subprocess.
    Io,
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner.kind)?;
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for MirrorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for MirrorError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: MirrorErrorKind::Request,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<serde_json::Error> for MirrorError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: MirrorErrorKind::Serde,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<std::io::Error> for MirrorError {
    fn from(e: std::io::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: MirrorErrorKind::Io,
                source: Some(Box::new(e)),
            }),
        }
    }
}
