// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tmx2c::{load_map_file, parse_json, parse_tmx, ConvertError};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tmx2c_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const LEVEL_TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.0" tiledversion="1.0.3" orientation="orthogonal" renderorder="right-down"
     width="4" height="3" tilewidth="32" tileheight="32" nextobjectid="2">
 <tileset firstgid="1" source="terrain.tsx"/>
 <layer name="Tile Layer 1" width="4" height="3">
  <data encoding="base64" compression="zlib">
   eJxjZGBgYEQCAAAsAAU=
  </data>
 </layer>
 <objectgroup name="Objects">
  <object id="1" name="door" x="64" y="32" width="32" height="32"/>
 </objectgroup>
</map>
"#;

#[test]
fn integration_load_from_file_and_str() {
    let from_str = parse_tmx(LEVEL_TMX).expect("should parse inline TMX");
    assert_eq!(from_str.width, "4");

    let dir = temp_dir("load");
    let path = dir.join("level.tmx");
    fs::write(&path, LEVEL_TMX).unwrap();

    let from_file = load_map_file(&path).unwrap();
    assert_eq!(from_file, from_str);
    assert_eq!(from_file.tile_width, "32");
    assert_eq!(from_file.tilesets[0].source, "terrain.tsx");
    assert_eq!(from_file.layers[0].data.compression, "zlib");
    assert_eq!(from_file.object_groups[0].objects[0].name, "door");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn integration_load_json_map_by_extension() {
    let json = r#"{
        "version": "1.10",
        "orientation": "isometric",
        "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
        "dummyField": "ignored",
        "layers": [ { "type": "tilelayer", "name": "L", "data": [0], "opacity": 0.5, "properties": [] } ]
    }"#;

    let dir = temp_dir("json");
    for name in ["map.json", "map.tmj"] {
        let path = dir.join(name);
        fs::write(&path, json).unwrap();

        let map = load_map_file(&path).expect("should ignore unknown fields");
        assert_eq!(map.orientation, "isometric");
        assert_eq!(map.layers[0].name, "L");
        assert_eq!(map.layers[0].opacity, "0.5");
        assert_eq!(map.layers[0].data.payload, "0");
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn json_content_in_tmx_file_is_malformed() {
    let dir = temp_dir("mismatch");
    let path = dir.join("map.tmx");
    fs::write(&path, r#"{"version": "1.0"}"#).unwrap();

    let err = load_map_file(&path).unwrap_err();
    match err {
        ConvertError::MalformedXml { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected MalformedXml, got {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_allows_empty_names() {
    let map = parse_tmx(r#"<map><layer name=""/></map>"#).unwrap();
    assert_eq!(map.layers[0].name, "");

    let map = parse_json(r#"{"layers":[{"type":"tilelayer","name":""}]}"#).unwrap();
    assert_eq!(map.layers[0].name, "");
}

#[test]
fn unreadable_path_is_a_read_failure() {
    let dir = temp_dir("dir_as_file");
    // a directory opens on some platforms but never reads
    let err = load_map_file(&dir).unwrap_err();
    assert!(matches!(err, ConvertError::Read { .. }));
    fs::remove_dir_all(&dir).unwrap();
}
