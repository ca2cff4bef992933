//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::processing::RunSummary;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Http(reqwest::Error),
    /// A single backend rejected or botched a batch call.
    Backend { backend: String, reason: String },
    /// Every configured backend failed. Holds the last failure.
    Gateway(Box<Error>),
    /// No usable backend configuration.
    Config(String),
    /// Reading an input file failed.
    Input { path: PathBuf, err: std::io::Error },
    /// A run stopped early. `summary` covers the batches completed before `cause`.
    Aborted {
        summary: RunSummary,
        cause: Box<Error>,
    },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Serde(e) => write!(f, "json error: {e}"),
            Error::Http(e) => write!(f, "http error: {e}"),
            Error::Backend { backend, reason } => write!(f, "backend {backend}: {reason}"),
            Error::Gateway(last) => write!(f, "all backends failed, last error: {last}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Input { path, err } => write!(f, "could not read {path:?}: {err}"),
            Error::Aborted { summary, cause } => write!(
                f,
                "run aborted after {} generated and {} failed sayings: {cause}",
                summary.generated(),
                summary.failures().len()
            ),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Http(e) => Some(e),
            Error::Gateway(e) => Some(e.as_ref()),
            Error::Input { err, .. } => Some(err),
            Error::Aborted { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
