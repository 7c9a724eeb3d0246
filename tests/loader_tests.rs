use islet::map::loader::parse_map_file;
use islet::{LayerKind, MapError, ObjectShape};
use std::path::PathBuf;

fn res_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("res");
    path.push(name);
    path
}

#[test]
fn bundled_island_map_parses() {
    let path = res_path("island.json");
    let (doc, base) =
        parse_map_file(path.to_str().expect("path utf8")).expect("bundled map should parse");

    assert_eq!((doc.width, doc.height), (24, 16));
    assert_eq!((doc.tile_w, doc.tile_h), (32, 32));
    assert_eq!(doc.tilesets.len(), 1);
    assert_eq!(doc.tilesets[0].tilecount, 8);
    assert!(doc.tilesets[0].texture.is_none());
    assert!(base.ends_with("res"));

    assert_eq!(doc.layers.len(), 3);
    match &doc.layers[0].kind {
        LayerKind::Tiles(grid) => {
            assert_eq!(grid.data.len(), 24 * 16);
            // Border row of the authored map.
            assert_eq!(grid.gid(0, 0).clean(), 2);
        }
        _ => panic!("expected ground tile layer"),
    }
    match &doc.layers[1].kind {
        LayerKind::Group { layers } => {
            assert_eq!(layers.len(), 2);
            assert!(matches!(layers[0].kind, LayerKind::Tiles(_)));
            assert!(matches!(layers[1].kind, LayerKind::Image { .. }));
        }
        _ => panic!("expected scenery group"),
    }
    match &doc.layers[2].kind {
        LayerKind::Objects(group) => {
            assert_eq!(group.objects.len(), 8);
            assert!(group
                .objects
                .iter()
                .any(|o| matches!(o.shape, ObjectShape::Ellipse)));
            assert!(group
                .objects
                .iter()
                .any(|o| matches!(o.shape, ObjectShape::Tile { gid: 6 })));
            assert!(group.objects.iter().any(|o| !o.visible));
        }
        _ => panic!("expected markers object layer"),
    }
}

#[test]
fn bundled_decor_layer_keeps_flip_flags() {
    let path = res_path("island.json");
    let (doc, _) = parse_map_file(path.to_str().expect("path utf8")).expect("parse");

    let LayerKind::Group { layers } = &doc.layers[1].kind else {
        panic!("expected scenery group");
    };
    let LayerKind::Tiles(decor) = &layers[0].kind else {
        panic!("expected decor tile layer");
    };

    let flipped = decor
        .data
        .iter()
        .copied()
        .map(islet::TileId)
        .find(|id| id.flip_h())
        .expect("authored map carries a flipped tile");
    assert_eq!(flipped.clean(), 5);
    assert_eq!(
        doc.tileset_for(flipped).expect("resolves").0.first_gid,
        doc.tileset_for(islet::TileId(5)).expect("resolves").0.first_gid,
    );
}

#[test]
fn non_json_map_paths_are_rejected() {
    let err = parse_map_file("res/island.tmx").unwrap_err();
    assert!(matches!(err, MapError::UnsupportedFormat(p) if p == "res/island.tmx"));
}

#[test]
fn missing_map_file_is_an_io_error() {
    let path = res_path("nonexistent.json");
    let err = parse_map_file(path.to_str().expect("path utf8")).unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}
