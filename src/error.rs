use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Error type for loading and converting one map document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The argument could not be turned into an absolute path
    #[error("cannot resolve {path:?} to an absolute path: {source}")]
    PathResolution {
        /// Argument as given
        path: PathBuf,
        /// Resolver failure
        #[source]
        source: io::Error,
    },

    /// The source document could not be opened or fully read
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// Absolute path of the document
        path: PathBuf,
        /// Open or read failure
        #[source]
        source: io::Error,
    },

    /// The source document is not valid UTF-8
    #[error("{path:?} is not valid UTF-8: {source}")]
    InvalidEncoding {
        /// Absolute path of the document
        path: PathBuf,
        /// Position of the bad bytes
        #[source]
        source: Utf8Error,
    },

    /// The TMX document is not well-formed XML
    #[error("malformed TMX document {path:?}: {source}")]
    MalformedXml {
        /// Absolute path of the document
        path: PathBuf,
        /// Parser error with its position
        #[source]
        source: roxmltree::Error,
    },

    /// The JSON map is not valid JSON or has mistyped fields
    #[error("malformed JSON map {path:?}: {source}")]
    MalformedJson {
        /// Absolute path of the document
        path: PathBuf,
        /// Parser error with its position
        #[source]
        source: serde_json::Error,
    },

    /// The shared output stream could not be written
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl ConvertError {
    /// True for errors caused by the content of the document rather than by I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidEncoding { .. }
                | ConvertError::MalformedXml { .. }
                | ConvertError::MalformedJson { .. }
        )
    }
}
