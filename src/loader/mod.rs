//! Map document readers.
//!
//! `.json`/`.tmj` files go through the JSON reader, everything else is read as TMX.

pub mod json_loader;
pub mod tmx_loader;

use crate::error::ConvertError;
use crate::model::TileMap;
use crate::source::{ByteSource, FileSource};
use std::path::Path;
use tracing::debug;

/// Source document flavour, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// TMX XML
    Tmx,
    /// Tiled JSON
    Json,
}

impl SourceFormat {
    /// `.json`/`.tmj` (any case) is JSON, anything else TMX.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") | Some("tmj") => SourceFormat::Json,
            _ => SourceFormat::Tmx,
        }
    }
}

/// Decode an in-memory document. `path` picks the format and labels errors.
pub fn decode_map(path: &Path, bytes: &[u8]) -> Result<TileMap, ConvertError> {
    let text = std::str::from_utf8(bytes).map_err(|source| ConvertError::InvalidEncoding {
        path: path.to_path_buf(),
        source,
    })?;

    let format = SourceFormat::from_path(path);
    debug!(path = %path.display(), ?format, "decoding map");

    match format {
        SourceFormat::Tmx => {
            tmx_loader::parse_tmx(text).map_err(|source| ConvertError::MalformedXml {
                path: path.to_path_buf(),
                source,
            })
        }
        SourceFormat::Json => {
            json_loader::parse_json(text).map_err(|source| ConvertError::MalformedJson {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Read and decode one document through `source`.
pub fn load_map_with<S: ByteSource>(source: &S, path: &Path) -> Result<TileMap, ConvertError> {
    let bytes = source.read_all(path).map_err(|e| ConvertError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_map(path, &bytes)
}

/// Read and decode one document from disk.
pub fn load_map_file<P: AsRef<Path>>(path: P) -> Result<TileMap, ConvertError> {
    load_map_with(&FileSource, path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.tmx")), SourceFormat::Tmx);
        assert_eq!(SourceFormat::from_path(Path::new("a.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.TMJ")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.xml")), SourceFormat::Tmx);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), SourceFormat::Tmx);
    }

    #[test]
    fn returns_typed_error_for_invalid_utf8() {
        let err = decode_map(Path::new("bad.tmx"), &[0x3c, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidEncoding { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn returns_typed_error_for_malformed_documents() {
        let err = decode_map(Path::new("bad.tmx"), b"<map>").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedXml { .. }));

        let err = decode_map(Path::new("bad.json"), b"{ not json").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedJson { .. }));
    }

    #[test]
    fn returns_typed_error_for_missing_file() {
        let missing = std::env::temp_dir().join("tmx2c_missing_dir").join("map.tmx");
        let err = load_map_file(&missing).unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
        assert!(!err.is_malformed());
    }
}
