// src/emit.rs

//! C header emission.
//!
//! One guarded definition block per map:
//!
//! ```text
//! #ifdef level1_tmx_MAP
//! #define level1_tmx_Version 1.0
//! #define level1_tmx_Orientation orthogonal
//! #endif
//! ```

use crate::model::TileMap;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

/// Guard/prefix token for a source file: its file name with every `.` turned into `_`.
///
/// `level1.tmx` gives `level1_tmx`, `a.b.c.tmx` gives `a_b_c_tmx`. Paths without a file
/// name (`/`, `..`) give an empty identifier.
pub fn derive_identifier(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_default()
}

/// A map-level value that can be emitted as `#define <id>_<name> <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapAttribute {
    /// `version`
    Version,
    /// `orientation`
    Orientation,
    /// `renderorder`
    RenderOrder,
    /// `width`, in tiles
    Width,
    /// `height`, in tiles
    Height,
    /// `tilewidth`
    TileWidth,
    /// `tileheight`
    TileHeight,
    /// `staggeraxis`
    StaggerAxis,
    /// `staggerindex`
    StaggerIndex,
    /// `nextobjectid`
    NextObjectId,
    /// `backgroundcolor`
    BackgroundColor,
    /// Number of tilesets
    TileSetCount,
    /// Number of tile layers
    LayerCount,
    /// Number of object groups
    ObjectGroupCount,
    /// Number of image layers
    ImageLayerCount,
}

impl MapAttribute {
    /// Suffix used after `<identifier>_`.
    pub fn define_name(self) -> &'static str {
        match self {
            MapAttribute::Version => "Version",
            MapAttribute::Orientation => "Orientation",
            MapAttribute::RenderOrder => "RenderOrder",
            MapAttribute::Width => "Width",
            MapAttribute::Height => "Height",
            MapAttribute::TileWidth => "TileWidth",
            MapAttribute::TileHeight => "TileHeight",
            MapAttribute::StaggerAxis => "StaggerAxis",
            MapAttribute::StaggerIndex => "StaggerIndex",
            MapAttribute::NextObjectId => "NextObjectId",
            MapAttribute::BackgroundColor => "BackgroundColor",
            MapAttribute::TileSetCount => "TileSetCount",
            MapAttribute::LayerCount => "LayerCount",
            MapAttribute::ObjectGroupCount => "ObjectGroupCount",
            MapAttribute::ImageLayerCount => "ImageLayerCount",
        }
    }

    /// Raw value, verbatim from the source document.
    pub fn value(self, map: &TileMap) -> Cow<'_, str> {
        let raw = match self {
            MapAttribute::Version => &map.version,
            MapAttribute::Orientation => &map.orientation,
            MapAttribute::RenderOrder => &map.render_order,
            MapAttribute::Width => &map.width,
            MapAttribute::Height => &map.height,
            MapAttribute::TileWidth => &map.tile_width,
            MapAttribute::TileHeight => &map.tile_height,
            MapAttribute::StaggerAxis => &map.stagger_axis,
            MapAttribute::StaggerIndex => &map.stagger_index,
            MapAttribute::NextObjectId => &map.next_object_id,
            MapAttribute::BackgroundColor => &map.background_color,
            MapAttribute::TileSetCount => return map.tilesets.len().to_string().into(),
            MapAttribute::LayerCount => return map.layers.len().to_string().into(),
            MapAttribute::ObjectGroupCount => return map.object_groups.len().to_string().into(),
            MapAttribute::ImageLayerCount => return map.image_layers.len().to_string().into(),
        };
        Cow::Borrowed(raw.as_str())
    }
}

/// What the converter has always emitted.
pub const CORE_ATTRIBUTES: &[MapAttribute] = &[MapAttribute::Version, MapAttribute::Orientation];

/// Every map-level scalar plus structural counts.
pub const ALL_ATTRIBUTES: &[MapAttribute] = &[
    MapAttribute::Version,
    MapAttribute::Orientation,
    MapAttribute::RenderOrder,
    MapAttribute::Width,
    MapAttribute::Height,
    MapAttribute::TileWidth,
    MapAttribute::TileHeight,
    MapAttribute::StaggerAxis,
    MapAttribute::StaggerIndex,
    MapAttribute::NextObjectId,
    MapAttribute::BackgroundColor,
    MapAttribute::TileSetCount,
    MapAttribute::LayerCount,
    MapAttribute::ObjectGroupCount,
    MapAttribute::ImageLayerCount,
];

/// Turns a map into its definition block, using a fixed attribute table.
#[derive(Debug, Clone)]
pub struct Emitter {
    attributes: Vec<MapAttribute>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(CORE_ATTRIBUTES)
    }
}

impl Emitter {
    /// Emitter writing `attributes` in the given order.
    pub fn new(attributes: &[MapAttribute]) -> Self {
        Self {
            attributes: attributes.to_vec(),
        }
    }

    /// Render the guarded block for `map`. Always ends with `#endif\n`.
    pub fn emit(&self, map: &TileMap, identifier: &str) -> Vec<u8> {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "#ifdef {identifier}_MAP");
        for attr in &self.attributes {
            let _ = writeln!(
                out,
                "#define {identifier}_{} {}",
                attr.define_name(),
                attr.value(map)
            );
        }
        out.push_str("#endif\n");
        out.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;

    fn map(version: &str, orientation: &str) -> TileMap {
        TileMap {
            version: version.to_owned(),
            orientation: orientation.to_owned(),
            ..TileMap::default()
        }
    }

    fn emit_str(emitter: &Emitter, map: &TileMap, id: &str) -> String {
        String::from_utf8(emitter.emit(map, id)).expect("utf8")
    }

    #[test]
    fn identifier_replaces_every_dot() {
        assert_eq!(derive_identifier(Path::new("level1.tmx")), "level1_tmx");
        assert_eq!(derive_identifier(Path::new("a.b.c.tmx")), "a_b_c_tmx");
        assert_eq!(derive_identifier(Path::new("/maps/world/level1.tmx")), "level1_tmx");
        assert_eq!(derive_identifier(Path::new("noext")), "noext");
    }

    #[test]
    fn identifier_of_pathless_input_is_empty() {
        assert_eq!(derive_identifier(Path::new("/")), "");
        assert_eq!(derive_identifier(Path::new("..")), "");
    }

    #[test]
    fn core_block_has_version_and_orientation() {
        let out = emit_str(&Emitter::default(), &map("1.0", "orthogonal"), "a_tmx");
        assert_eq!(
            out,
            "#ifdef a_tmx_MAP\n\
             #define a_tmx_Version 1.0\n\
             #define a_tmx_Orientation orthogonal\n\
             #endif\n"
        );
    }

    #[test]
    fn missing_value_emits_empty_token() {
        let out = emit_str(&Emitter::default(), &map("", "isometric"), "b_tmx");
        assert!(out.lines().any(|l| l == "#define b_tmx_Version "));
        assert!(out.lines().any(|l| l == "#define b_tmx_Orientation isometric"));
    }

    #[test]
    fn empty_table_still_closes_guard() {
        let out = emit_str(&Emitter::new(&[]), &map("1.0", "orthogonal"), "x");
        assert_eq!(out, "#ifdef x_MAP\n#endif\n");
    }

    #[test]
    fn emission_is_deterministic() {
        let emitter = Emitter::new(ALL_ATTRIBUTES);
        let m = map("1.0", "hexagonal");
        assert_eq!(emitter.emit(&m, "level"), emitter.emit(&m, "level"));
    }

    #[test]
    fn extended_table_emits_every_attribute_in_order() {
        let mut m = map("1.2", "staggered");
        m.stagger_axis = "x".into();
        m.background_color = "#000000".into();
        m.layers.push(Layer::default());
        m.layers.push(Layer::default());

        let out = emit_str(&Emitter::new(ALL_ATTRIBUTES), &m, "w");
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), ALL_ATTRIBUTES.len() + 2);
        assert_eq!(lines[0], "#ifdef w_MAP");
        assert_eq!(lines[1], "#define w_Version 1.2");
        assert!(lines.contains(&"#define w_StaggerAxis x"));
        assert!(lines.contains(&"#define w_BackgroundColor #000000"));
        assert!(lines.contains(&"#define w_LayerCount 2"));
        assert!(lines.contains(&"#define w_TileSetCount 0"));
        assert_eq!(*lines.last().expect("non-empty"), "#endif");
    }

    #[test]
    fn values_are_not_interpreted() {
        let out = emit_str(&Emitter::default(), &map("not a number", "a b c"), "m");
        assert!(out.contains("#define m_Version not a number\n"));
        assert!(out.contains("#define m_Orientation a b c\n"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn identifier_has_no_dots(stem in "[a-z0-9]{1,8}(\\.[a-z0-9]{1,4}){0,3}") {
                let id = derive_identifier(Path::new(&stem));
                prop_assert!(!id.contains('.'));
                prop_assert_eq!(id.len(), stem.len());
                prop_assert_eq!(id, stem.replace('.', "_"));
            }

            #[test]
            fn block_is_guarded_by_its_own_identifier(id in "[A-Za-z_][A-Za-z0-9_]{0,12}", v in "[0-9.]{0,5}") {
                let out = String::from_utf8(Emitter::default().emit(&map(&v, ""), &id)).unwrap();
                let expected = format!("#ifdef {id}_MAP\n");
                prop_assert!(out.starts_with(&expected));
                prop_assert!(out.ends_with("#endif\n"));
            }
        }
    }
}
