// src/loader/tmx_loader.rs

//! TMX (XML) reader.

use crate::model::*;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

/// Parse a TMX document into the canonical model.
///
/// Unknown elements and attributes are skipped. Missing ones leave the matching field empty.
/// Only XML that is not well-formed is an error.
pub fn parse_tmx(text: &str) -> Result<TileMap, roxmltree::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let opts = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, opts)?;

    let root = doc.root_element();
    if !root.has_tag_name("map") {
        debug!(root = root.tag_name().name(), "root element is not <map>, reading it anyway");
    }

    Ok(map_from_xml(root))
}

fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_owned()
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(tag))
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &'static str) -> Option<Node<'a, 'input>> {
    children(node, tag).next()
}

/// Raw source text between the start and end tag of `node`.
fn inner_xml<'input>(node: Node<'_, 'input>) -> &'input str {
    let (Some(first), Some(last)) = (node.first_child(), node.last_child()) else {
        return "";
    };
    let input = node.document().input_text();
    input
        .get(first.range().start..last.range().end)
        .unwrap_or_default()
}

fn properties_from_xml(parent: Node) -> Properties {
    let Some(props) = child(parent, "properties") else {
        return Properties::new();
    };

    children(props, "property")
        .map(|p| Property {
            name: attr(p, "name"),
            kind: attr(p, "type"),
            // multi-line string values are stored as element text
            value: p
                .attribute("value")
                .or_else(|| p.text())
                .unwrap_or_default()
                .to_owned(),
        })
        .collect()
}

fn map_from_xml(node: Node) -> TileMap {
    TileMap {
        version: attr(node, "version"),
        orientation: attr(node, "orientation"),
        render_order: attr(node, "renderorder"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        tile_width: attr(node, "tilewidth"),
        tile_height: attr(node, "tileheight"),
        stagger_axis: attr(node, "staggeraxis"),
        stagger_index: attr(node, "staggerindex"),
        next_object_id: attr(node, "nextobjectid"),
        background_color: attr(node, "backgroundcolor"),
        properties: properties_from_xml(node),
        tilesets: children(node, "tileset").map(tileset_from_xml).collect(),
        layers: children(node, "layer").map(layer_from_xml).collect(),
        object_groups: children(node, "objectgroup")
            .map(object_group_from_xml)
            .collect(),
        image_layers: children(node, "imagelayer")
            .map(image_layer_from_xml)
            .collect(),
    }
}

fn tileset_from_xml(node: Node) -> TileSet {
    TileSet {
        first_gid: attr(node, "firstgid"),
        source: attr(node, "source"),
        name: attr(node, "name"),
        tile_width: attr(node, "tilewidth"),
        tile_height: attr(node, "tileheight"),
        spacing: attr(node, "spacing"),
        margin: attr(node, "margin"),
        tile_count: attr(node, "tilecount"),
        columns: attr(node, "columns"),
        properties: properties_from_xml(node),
        images: children(node, "image").map(image_from_xml).collect(),
        tile_offset: child(node, "tileoffset")
            .map(|o| TileOffset {
                x: attr(o, "x"),
                y: attr(o, "y"),
            })
            .unwrap_or_default(),
        terrain_types: child(node, "terraintypes")
            .map(|t| TerrainTypes {
                terrains: children(t, "terrain").map(terrain_from_xml).collect(),
            })
            .unwrap_or_default(),
        tiles: children(node, "tile").map(tile_from_xml).collect(),
    }
}

fn terrain_from_xml(node: Node) -> Terrain {
    Terrain {
        name: attr(node, "name"),
        tile: attr(node, "tile"),
        properties: properties_from_xml(node),
    }
}

fn tile_from_xml(node: Node) -> Tile {
    Tile {
        id: attr(node, "id"),
        gid: attr(node, "gid"),
        terrain: attr(node, "terrain"),
        probability: attr(node, "probability"),
        properties: properties_from_xml(node),
        image: child(node, "image").map(image_from_xml).unwrap_or_default(),
        animation: child(node, "animation")
            .map(|a| Animation {
                frames: children(a, "frame")
                    .map(|f| Frame {
                        tile_id: attr(f, "tileid"),
                        duration: attr(f, "duration"),
                    })
                    .collect(),
            })
            .unwrap_or_default(),
        object_groups: children(node, "objectgroup")
            .map(object_group_from_xml)
            .collect(),
    }
}

fn data_from_xml(node: Node) -> Data {
    Data {
        encoding: attr(node, "encoding"),
        compression: attr(node, "compression"),
        payload: inner_xml(node).to_owned(),
        tiles: children(node, "tile").map(tile_from_xml).collect(),
    }
}

fn image_from_xml(node: Node) -> Image {
    Image {
        format: attr(node, "format"),
        id: attr(node, "id"),
        source: attr(node, "source"),
        trans: attr(node, "trans"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        data: child(node, "data").map(data_from_xml).unwrap_or_default(),
    }
}

fn layer_from_xml(node: Node) -> Layer {
    Layer {
        name: attr(node, "name"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        visible: attr(node, "visible"),
        opacity: attr(node, "opacity"),
        offset_x: attr(node, "offsetx"),
        offset_y: attr(node, "offsety"),
        properties: properties_from_xml(node),
        data: child(node, "data").map(data_from_xml).unwrap_or_default(),
    }
}

fn object_group_from_xml(node: Node) -> ObjectGroup {
    ObjectGroup {
        name: attr(node, "name"),
        color: attr(node, "color"),
        x: attr(node, "x"),
        y: attr(node, "y"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        opacity: attr(node, "opacity"),
        visible: attr(node, "visible"),
        offset_x: attr(node, "offsetx"),
        offset_y: attr(node, "offsety"),
        draw_order: attr(node, "draworder"),
        objects: children(node, "object").map(object_from_xml).collect(),
        properties: properties_from_xml(node),
    }
}

fn object_from_xml(node: Node) -> Object {
    let points = |tag: &'static str| -> Vec<PointList> {
        children(node, tag)
            .map(|p| PointList {
                points: attr(p, "points"),
            })
            .collect()
    };

    Object {
        id: attr(node, "id"),
        name: attr(node, "name"),
        kind: attr(node, "type"),
        x: attr(node, "x"),
        y: attr(node, "y"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        rotation: attr(node, "rotation"),
        gid: attr(node, "gid"),
        visible: attr(node, "visible"),
        ellipses: children(node, "ellipse").map(|_| Ellipse).collect(),
        polygons: points("polygon"),
        polylines: points("polyline"),
        properties: properties_from_xml(node),
    }
}

fn image_layer_from_xml(node: Node) -> ImageLayer {
    ImageLayer {
        name: attr(node, "name"),
        offset_x: attr(node, "offsetx"),
        offset_y: attr(node, "offsety"),
        x: attr(node, "x"),
        y: attr(node, "y"),
        width: attr(node, "width"),
        height: attr(node, "height"),
        opacity: attr(node, "opacity"),
        visible: attr(node, "visible"),
        image: child(node, "image").map(image_from_xml).unwrap_or_default(),
        properties: properties_from_xml(node),
    }
}
