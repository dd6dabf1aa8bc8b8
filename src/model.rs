// src/model.rs

//! Canonical, format-agnostic tile map.
//!
//! Every attribute is kept as the raw text found in the source document. Nothing here is
//! validated or interpreted: an attribute or element missing from the source simply stays
//! at its `Default` value.

/// Root of a tile map document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
    /// TMX format version
    pub version: String,
    /// `orthogonal`, `isometric`, `staggered` or `hexagonal`
    pub orientation: String,
    /// Tile draw order, e.g. `right-down`
    pub render_order: String,
    /// Width in tiles
    pub width: String,
    /// Height in tiles
    pub height: String,
    /// Grid cell width in pixels
    pub tile_width: String,
    /// Grid cell height in pixels
    pub tile_height: String,
    /// `x` or `y`, staggered and hexagonal maps only
    pub stagger_axis: String,
    /// `even` or `odd`
    pub stagger_index: String,
    /// Next free object id
    pub next_object_id: String,
    /// `#RRGGBB` or `#AARRGGBB`
    pub background_color: String,

    /// Custom map properties
    pub properties: Properties,
    /// In document order
    pub tilesets: Vec<TileSet>,
    /// Tile layers only
    pub layers: Vec<Layer>,
    /// Object layers
    pub object_groups: Vec<ObjectGroup>,
    /// Image layers
    pub image_layers: Vec<ImageLayer>,
}

/// A tileset, embedded or external.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSet {
    /// First global tile id of this set
    pub first_gid: String,
    /// External tileset reference; the referenced file is not followed.
    pub source: String,
    /// Name as written
    pub name: String,
    /// Maximum tile width
    pub tile_width: String,
    /// Maximum tile height
    pub tile_height: String,
    /// Pixels between tiles
    pub spacing: String,
    /// Pixels around the tiles
    pub margin: String,
    /// Number of tiles
    pub tile_count: String,
    /// Tiles per row
    pub columns: String,

    /// Custom properties
    pub properties: Properties,
    /// Source images; normally just one
    pub images: Vec<Image>,
    /// Drawing offset for every tile
    pub tile_offset: TileOffset,
    /// Terrain definitions
    pub terrain_types: TerrainTypes,
    /// Per-tile definitions
    pub tiles: Vec<Tile>,
}

/// Offset applied when drawing tiles of a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileOffset {
    /// X position
    pub x: String,
    /// Y position
    pub y: String,
}

/// `<terraintypes>` block of a tileset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainTypes {
    /// Terrains in index order
    pub terrains: Vec<Terrain>,
}

/// One terrain type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terrain {
    /// Name as written
    pub name: String,
    /// Local id of the tile representing this terrain.
    pub tile: String,
    /// Custom properties
    pub properties: Properties,
}

/// A tile definition inside a tileset, or a `<tile gid=".."/>` record inside XML data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    /// Local id within the tileset
    pub id: String,
    /// Global id, set only on data records
    pub gid: String,
    /// Corner terrain indices, comma separated (`"0,0,,1"`).
    pub terrain: String,
    /// Weight used by the terrain tool
    pub probability: String,

    /// Custom properties
    pub properties: Properties,
    /// Image of an image-collection tile
    pub image: Image,
    /// Frame animation, if any
    pub animation: Animation,
    /// Collision shapes
    pub object_groups: Vec<ObjectGroup>,
}

/// Tile animation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Animation {
    /// Played in order, looping
    pub frames: Vec<Frame>,
}

/// One animation frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Local id of the shown tile
    pub tile_id: String,
    /// Milliseconds
    pub duration: String,
}

/// A tile layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    /// Name as written
    pub name: String,
    /// Width in tiles
    pub width: String,
    /// Height in tiles
    pub height: String,
    /// `0` or `1`
    pub visible: String,
    /// `0` to `1`
    pub opacity: String,
    /// Horizontal offset in pixels
    pub offset_x: String,
    /// Vertical offset in pixels
    pub offset_y: String,

    /// Custom properties
    pub properties: Properties,
    /// Tile payload
    pub data: Data,
}

/// Tile or image payload. The payload is never decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data {
    /// `base64`, `csv` or empty for XML records
    pub encoding: String,
    /// `gzip`, `zlib`, `zstd` or empty
    pub compression: String,
    /// Everything between `<data>` and `</data>`, untouched.
    pub payload: String,
    /// `<tile>` records when the data is plain XML
    pub tiles: Vec<Tile>,
}

/// Image reference or embedded image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Embedded image format, e.g. `png`
    pub format: String,
    /// Image id
    pub id: String,
    /// Image file reference
    pub source: String,
    /// Transparent color key.
    pub trans: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,

    /// Embedded image bytes
    pub data: Data,
}

/// Object layer, also used for tile collision shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectGroup {
    /// Name as written
    pub name: String,
    /// Display color
    pub color: String,
    /// X position
    pub x: String,
    /// Y position
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Opacity, `0` to `1`
    pub opacity: String,
    /// `0` hides it
    pub visible: String,
    /// Horizontal offset in pixels
    pub offset_x: String,
    /// Vertical offset in pixels
    pub offset_y: String,
    /// `index` or `topdown`
    pub draw_order: String,

    /// Objects in document order
    pub objects: Vec<Object>,
    /// Custom properties
    pub properties: Properties,
}

/// A placed object. Its shape is a rectangle unless one of the shape lists is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    /// Unique object id
    pub id: String,
    /// Name as written
    pub name: String,
    /// User-defined type
    pub kind: String,
    /// Position in pixels
    pub x: String,
    /// Y position
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Degrees clockwise
    pub rotation: String,
    /// Tile object reference
    pub gid: String,
    /// `0` hides it
    pub visible: String,

    /// Present when the object is an ellipse
    pub ellipses: Vec<Ellipse>,
    /// Closed shapes
    pub polygons: Vec<PointList>,
    /// Open shapes
    pub polylines: Vec<PointList>,
    /// Custom properties
    pub properties: Properties,
}

/// `<ellipse/>` carries no data; only its presence matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ellipse;

/// Raw `points` text of a polygon or polyline, e.g. `"0,0 16,0 16,16"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointList {
    /// Space-separated `x,y` pairs
    pub points: String,
}

/// Layer showing a single image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageLayer {
    /// Name as written
    pub name: String,
    /// Horizontal offset in pixels
    pub offset_x: String,
    /// Vertical offset in pixels
    pub offset_y: String,
    /// X position
    pub x: String,
    /// Y position
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Opacity, `0` to `1`
    pub opacity: String,
    /// `0` hides it
    pub visible: String,

    /// The layer image
    pub image: Image,
    /// Custom properties
    pub properties: Properties,
}

/// A custom property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Name as written
    pub name: String,
    /// Type tag as written (`"int"`, `"bool"`, ...). Empty means string.
    pub kind: String,
    /// Value text as written
    pub value: String,
}

/// Ordered property bag. Document order is kept so output stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<Property>,
}

impl Properties {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// First property with this name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|p| p.name == name)
    }

    /// Value of the first property with this name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.value.as_str())
    }

    /// Properties in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, value: &str) -> Property {
        Property {
            name: name.to_owned(),
            kind: String::new(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn default_map_is_empty() {
        let map = TileMap::default();
        assert_eq!(map.version, "");
        assert!(map.tilesets.is_empty());
        assert!(map.properties.is_empty());
    }

    #[test]
    fn properties_keep_insertion_order_and_duplicates() {
        let props: Properties = [prop("b", "1"), prop("a", "2"), prop("b", "3")]
            .into_iter()
            .collect();

        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "b"]);
        assert_eq!(props.value("b"), Some("1"));
        assert_eq!(props.value("missing"), None);
        assert_eq!(props.len(), 3);
    }
}
