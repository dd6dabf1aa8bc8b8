//! Converts Tiled tile maps (TMX, or Tiled JSON) into C headers of `#define`s.
//!
//! Each input becomes one guarded definition block named after its file:
//!
//! ```
//! use tmx2c::{derive_identifier, parse_tmx, Emitter};
//! use std::path::Path;
//!
//! let map = parse_tmx(r#"<map version="1.0" orientation="orthogonal"/>"#).unwrap();
//! let id = derive_identifier(Path::new("level1.tmx"));
//! let block = Emitter::default().emit(&map, &id);
//! assert_eq!(
//!     String::from_utf8(block).unwrap(),
//!     "#ifdef level1_tmx_MAP\n#define level1_tmx_Version 1.0\n#define level1_tmx_Orientation orthogonal\n#endif\n"
//! );
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod emit;
mod error;
pub mod loader;
pub mod model;
mod source;

pub use batch::{Batch, BatchReport, SkippedInput};
pub use config::{BatchOptions, MalformedPolicy};
pub use emit::{derive_identifier, Emitter, MapAttribute, ALL_ATTRIBUTES, CORE_ATTRIBUTES};
pub use error::ConvertError;
pub use loader::json_loader::parse_json;
pub use loader::tmx_loader::parse_tmx;
pub use loader::{decode_map, load_map_file, load_map_with, SourceFormat};
pub use model::TileMap;
pub use source::{ByteSource, CurrentDirResolver, FileSource, PathResolver, SyncedFile};
