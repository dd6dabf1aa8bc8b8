// src/loader/json_loader.rs

//! Tiled JSON (`.json`/`.tmj`) reader.

use crate::model::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonMap {
    version: JsonValue,
    orientation: JsonValue,
    renderorder: JsonValue,
    width: JsonValue,
    height: JsonValue,
    tilewidth: JsonValue,
    tileheight: JsonValue,
    staggeraxis: JsonValue,
    staggerindex: JsonValue,
    nextobjectid: JsonValue,
    backgroundcolor: JsonValue,
    properties: Vec<JsonProperty>,
    layers: Vec<JsonLayer>,
    tilesets: Vec<JsonTileset>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonLayer {
    #[serde(rename = "type")]
    kind: String,
    name: JsonValue,
    width: JsonValue,
    height: JsonValue,
    x: JsonValue,
    y: JsonValue,
    visible: JsonValue,
    opacity: JsonValue,
    offsetx: JsonValue,
    offsety: JsonValue,
    // tile layers
    data: JsonValue,
    encoding: JsonValue,
    compression: JsonValue,
    // object groups
    color: JsonValue,
    draworder: JsonValue,
    objects: Vec<JsonObject>,
    // image layers
    image: JsonValue,
    imagewidth: JsonValue,
    imageheight: JsonValue,
    transparentcolor: JsonValue,
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonTileset {
    firstgid: JsonValue,
    source: JsonValue,
    name: JsonValue,
    tilewidth: JsonValue,
    tileheight: JsonValue,
    spacing: JsonValue,
    margin: JsonValue,
    tilecount: JsonValue,
    columns: JsonValue,
    image: JsonValue,
    imagewidth: JsonValue,
    imageheight: JsonValue,
    transparentcolor: JsonValue,
    tileoffset: JsonPoint,
    terrains: Vec<JsonTerrain>,
    tiles: Vec<JsonTile>,
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonTerrain {
    name: JsonValue,
    tile: JsonValue,
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonTile {
    id: JsonValue,
    terrain: Vec<JsonValue>,
    probability: JsonValue,
    image: JsonValue,
    imagewidth: JsonValue,
    imageheight: JsonValue,
    animation: Vec<JsonFrame>,
    objectgroup: Option<JsonLayer>,
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonFrame {
    tileid: JsonValue,
    duration: JsonValue,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonObject {
    id: JsonValue,
    name: JsonValue,
    #[serde(rename = "type")]
    kind: JsonValue,
    class: JsonValue,
    x: JsonValue,
    y: JsonValue,
    width: JsonValue,
    height: JsonValue,
    rotation: JsonValue,
    gid: JsonValue,
    visible: JsonValue,
    ellipse: bool,
    polygon: Vec<JsonPoint>,
    polyline: Vec<JsonPoint>,
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonPoint {
    x: JsonValue,
    y: JsonValue,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonProperty {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: JsonValue,
}

/// JSON scalar as the text TMX would carry for it.
fn text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// TMX writes visibility as `1`/`0`.
fn flag(value: &JsonValue) -> String {
    match value {
        JsonValue::Bool(true) => "1".to_owned(),
        JsonValue::Bool(false) => "0".to_owned(),
        other => text(other),
    }
}

/// TMX colour keys have no leading `#`.
fn color_key(value: &JsonValue) -> String {
    let key = text(value);
    key.strip_prefix('#').map(str::to_owned).unwrap_or(key)
}

fn points_text(points: &[JsonPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", text(&p.x), text(&p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `[0, 0, -1, 1]` becomes `"0,0,,1"`.
fn terrain_text(corners: &[JsonValue]) -> String {
    corners
        .iter()
        .map(|c| match c.as_i64() {
            Some(-1) => String::new(),
            _ => text(c),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn properties_from_json(props: Vec<JsonProperty>) -> Properties {
    props
        .into_iter()
        .map(|p| Property {
            name: p.name,
            kind: p.kind,
            value: text(&p.value),
        })
        .collect()
}

fn data_from_json(layer: &JsonLayer) -> Data {
    match &layer.data {
        JsonValue::Array(gids) => Data {
            encoding: match text(&layer.encoding) {
                e if e.is_empty() => "csv".to_owned(),
                e => e,
            },
            compression: text(&layer.compression),
            payload: gids.iter().map(text).collect::<Vec<_>>().join(","),
            tiles: Vec::new(),
        },
        other => Data {
            encoding: text(&layer.encoding),
            compression: text(&layer.compression),
            payload: text(other),
            tiles: Vec::new(),
        },
    }
}

fn image_from_json(source: &JsonValue, width: &JsonValue, height: &JsonValue) -> Image {
    Image {
        source: text(source),
        width: text(width),
        height: text(height),
        ..Image::default()
    }
}

fn object_to_model(obj: JsonObject) -> Object {
    // Tiled 1.9 renamed "type" to "class"
    let kind = match text(&obj.kind) {
        k if k.is_empty() => text(&obj.class),
        k => k,
    };

    Object {
        id: text(&obj.id),
        name: text(&obj.name),
        kind,
        x: text(&obj.x),
        y: text(&obj.y),
        width: text(&obj.width),
        height: text(&obj.height),
        rotation: text(&obj.rotation),
        gid: text(&obj.gid),
        visible: flag(&obj.visible),
        ellipses: if obj.ellipse { vec![Ellipse] } else { Vec::new() },
        polygons: if obj.polygon.is_empty() {
            Vec::new()
        } else {
            vec![PointList {
                points: points_text(&obj.polygon),
            }]
        },
        polylines: if obj.polyline.is_empty() {
            Vec::new()
        } else {
            vec![PointList {
                points: points_text(&obj.polyline),
            }]
        },
        properties: properties_from_json(obj.properties),
    }
}

fn object_group_to_model(l: JsonLayer) -> ObjectGroup {
    ObjectGroup {
        name: text(&l.name),
        color: text(&l.color),
        x: text(&l.x),
        y: text(&l.y),
        width: text(&l.width),
        height: text(&l.height),
        opacity: text(&l.opacity),
        visible: flag(&l.visible),
        offset_x: text(&l.offsetx),
        offset_y: text(&l.offsety),
        draw_order: text(&l.draworder),
        objects: l.objects.into_iter().map(object_to_model).collect(),
        properties: properties_from_json(l.properties),
    }
}

fn tile_to_model(tile: JsonTile) -> Tile {
    let image = if tile.image.is_null() {
        Image::default()
    } else {
        image_from_json(&tile.image, &tile.imagewidth, &tile.imageheight)
    };

    Tile {
        id: text(&tile.id),
        gid: String::new(),
        terrain: terrain_text(&tile.terrain),
        probability: text(&tile.probability),
        properties: properties_from_json(tile.properties),
        image,
        animation: Animation {
            frames: tile
                .animation
                .iter()
                .map(|f| Frame {
                    tile_id: text(&f.tileid),
                    duration: text(&f.duration),
                })
                .collect(),
        },
        object_groups: tile
            .objectgroup
            .into_iter()
            .map(object_group_to_model)
            .collect(),
    }
}

fn tileset_to_model(ts: JsonTileset) -> TileSet {
    let mut images = Vec::new();
    if !ts.image.is_null() {
        let mut image = image_from_json(&ts.image, &ts.imagewidth, &ts.imageheight);
        image.trans = color_key(&ts.transparentcolor);
        images.push(image);
    }

    TileSet {
        first_gid: text(&ts.firstgid),
        source: text(&ts.source),
        name: text(&ts.name),
        tile_width: text(&ts.tilewidth),
        tile_height: text(&ts.tileheight),
        spacing: text(&ts.spacing),
        margin: text(&ts.margin),
        tile_count: text(&ts.tilecount),
        columns: text(&ts.columns),
        properties: properties_from_json(ts.properties),
        images,
        tile_offset: TileOffset {
            x: text(&ts.tileoffset.x),
            y: text(&ts.tileoffset.y),
        },
        terrain_types: TerrainTypes {
            terrains: ts
                .terrains
                .into_iter()
                .map(|t| Terrain {
                    name: text(&t.name),
                    tile: text(&t.tile),
                    properties: properties_from_json(t.properties),
                })
                .collect(),
        },
        tiles: ts.tiles.into_iter().map(tile_to_model).collect(),
    }
}

/// Parse a Tiled JSON map into the canonical model.
pub fn parse_json(text_in: &str) -> Result<TileMap, serde_json::Error> {
    let j: JsonMap = serde_json::from_str(text_in)?;

    let mut layers = Vec::new();
    let mut object_groups = Vec::new();
    let mut image_layers = Vec::new();

    for mut l in j.layers {
        let kind = std::mem::take(&mut l.kind);
        // layers without a type are tile layers
        match kind.as_str() {
            "" | "tilelayer" => {
                let data = data_from_json(&l);
                layers.push(Layer {
                    name: text(&l.name),
                    width: text(&l.width),
                    height: text(&l.height),
                    visible: flag(&l.visible),
                    opacity: text(&l.opacity),
                    offset_x: text(&l.offsetx),
                    offset_y: text(&l.offsety),
                    properties: properties_from_json(l.properties),
                    data,
                });
            }
            "objectgroup" => object_groups.push(object_group_to_model(l)),
            "imagelayer" => {
                let mut image = image_from_json(&l.image, &l.imagewidth, &l.imageheight);
                image.trans = color_key(&l.transparentcolor);
                image_layers.push(ImageLayer {
                    name: text(&l.name),
                    offset_x: text(&l.offsetx),
                    offset_y: text(&l.offsety),
                    x: text(&l.x),
                    y: text(&l.y),
                    width: text(&l.width),
                    height: text(&l.height),
                    opacity: text(&l.opacity),
                    visible: flag(&l.visible),
                    image,
                    properties: properties_from_json(l.properties),
                });
            }
            other => debug!(kind = other, "skipping unsupported layer type"),
        }
    }

    Ok(TileMap {
        version: text(&j.version),
        orientation: text(&j.orientation),
        render_order: text(&j.renderorder),
        width: text(&j.width),
        height: text(&j.height),
        tile_width: text(&j.tilewidth),
        tile_height: text(&j.tileheight),
        stagger_axis: text(&j.staggeraxis),
        stagger_index: text(&j.staggerindex),
        next_object_id: text(&j.nextobjectid),
        background_color: text(&j.backgroundcolor),
        properties: properties_from_json(j.properties),
        tilesets: j.tilesets.into_iter().map(tileset_to_model).collect(),
        layers,
        object_groups,
        image_layers,
    })
}
