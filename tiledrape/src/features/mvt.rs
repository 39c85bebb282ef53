//! Mapbox Vector Tile decoding.

use std::io::Read;

use flate2::read::GzDecoder;
use geozero::mvt::tile::{self, GeomType};
use geozero::mvt::{Message, Tile};
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use super::error::FeatureError;
use super::geojson::{Feature, FeatureCollection, Geometry};
use super::FeatureDecoder;
use crate::coord::{TileCoord, TileSpace};

/// Layer extent assumed when a layer does not declare one.
pub const DEFAULT_EXTENT: u32 = 4096;

/// Positions may reach this many extents past either tile edge.
const MAX_EXTENT_OVERSHOOT: i64 = 8;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

/// Decodes (optionally gzipped) MVT protobuf tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct MvtDecoder;

impl MvtDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureDecoder for MvtDecoder {
    fn decode(
        &self,
        data: &[u8],
        tile: &TileCoord,
        space: TileSpace,
    ) -> Result<FeatureCollection, FeatureError> {
        let inflated;
        let data = if data.starts_with(&GZIP_MAGIC) {
            inflated = gunzip(data)?;
            inflated.as_slice()
        } else {
            data
        };

        let mvt = Tile::decode(data).map_err(|e| FeatureError::Protobuf(e.to_string()))?;

        let mut features = Vec::new();
        for layer in &mvt.layers {
            let before = features.len();
            decode_layer(layer, tile, space, &mut features)?;
            trace!(
                tile = %tile,
                layer = %layer.name,
                features = features.len() - before,
                "Vector tile layer decoded"
            );
        }

        debug!(
            tile = %tile,
            layers = mvt.layers.len(),
            features = features.len(),
            "Vector tile decoded"
        );

        Ok(FeatureCollection::new(features))
    }
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>, FeatureError> {
    let mut out = Vec::with_capacity(data.len() * 4);
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(FeatureError::Decompress)?;
    Ok(out)
}

fn decode_layer(
    layer: &tile::Layer,
    tile: &TileCoord,
    space: TileSpace,
    out: &mut Vec<Feature>,
) -> Result<(), FeatureError> {
    let extent = layer.extent.unwrap_or(DEFAULT_EXTENT);
    let transform = CoordTransform::new(extent, tile, space);
    let limit = coordinate_limit(extent);

    for feature in &layer.features {
        let geometry_error = |reason: String| FeatureError::Geometry {
            layer: layer.name.clone(),
            reason,
        };

        let parts = decode_commands(&feature.geometry, limit).map_err(geometry_error)?;
        let geometry = match feature.r#type() {
            GeomType::Point => points(&parts, &transform),
            GeomType::Linestring => lines(&parts, &transform),
            GeomType::Polygon => polygons(&parts, &transform),
            GeomType::Unknown => None,
        };

        // Features without usable geometry are skipped
        let Some(geometry) = geometry else {
            continue;
        };

        out.push(Feature {
            layer: layer.name.clone(),
            id: feature.id,
            geometry,
            properties: properties(layer, &feature.tags)?,
        });
    }

    Ok(())
}

/// Decodes a geometry command stream into parts in tile pixel space.
///
/// Each MoveTo starts a new part. ClosePath repeats the first position of
/// the current part. Positions with `|x|` or `|y|` above `limit` are
/// rejected.
fn decode_commands(commands: &[u32], limit: i64) -> Result<Vec<Vec<[i64; 2]>>, String> {
    let mut parts: Vec<Vec<[i64; 2]>> = Vec::new();
    let (mut x, mut y) = (0i64, 0i64);
    let mut i = 0;

    while i < commands.len() {
        let command = commands[i];
        let id = command & 0x7;
        let count = (command >> 3) as usize;
        i += 1;

        match id {
            MOVE_TO | LINE_TO => {
                if i + count * 2 > commands.len() {
                    return Err(format!("command {} truncated after {} values", id, count));
                }
                if id == LINE_TO && parts.is_empty() {
                    return Err("LineTo before MoveTo".to_string());
                }
                for _ in 0..count {
                    x += zigzag(commands[i]);
                    y += zigzag(commands[i + 1]);
                    i += 2;
                    if x.abs() > limit || y.abs() > limit {
                        return Err(format!("position ({}, {}) outside layer bounds", x, y));
                    }
                    if id == MOVE_TO {
                        parts.push(vec![[x, y]]);
                    } else if let Some(part) = parts.last_mut() {
                        part.push([x, y]);
                    }
                }
            }
            CLOSE_PATH => {
                let part = parts
                    .last_mut()
                    .ok_or_else(|| "ClosePath before MoveTo".to_string())?;
                if let Some(&first) = part.first() {
                    part.push(first);
                }
            }
            other => return Err(format!("unknown command {}", other)),
        }
    }

    Ok(parts)
}

fn coordinate_limit(extent: u32) -> i64 {
    i64::from(extent.max(1)) * MAX_EXTENT_OVERSHOOT
}

#[inline]
fn zigzag(value: u32) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Shoelace area in tile pixel space, where y grows downward.
fn signed_area(ring: &[[i64; 2]]) -> i128 {
    let mut sum = 0i128;
    for pair in ring.windows(2) {
        let ([x1, y1], [x2, y2]) = (pair[0], pair[1]);
        sum += i128::from(x1) * i128::from(y2) - i128::from(x2) * i128::from(y1);
    }
    sum
}

fn points(parts: &[Vec<[i64; 2]>], transform: &CoordTransform) -> Option<Geometry> {
    let points: Vec<[f64; 2]> = parts
        .iter()
        .flatten()
        .map(|&p| transform.apply(p))
        .collect();

    match points.len() {
        0 => None,
        1 => Some(Geometry::Point(points[0])),
        _ => Some(Geometry::MultiPoint(points)),
    }
}

fn lines(parts: &[Vec<[i64; 2]>], transform: &CoordTransform) -> Option<Geometry> {
    let mut lines: Vec<Vec<[f64; 2]>> = parts
        .iter()
        .filter(|part| part.len() >= 2)
        .map(|part| transform.apply_all(part))
        .collect();

    match lines.len() {
        0 => None,
        1 => lines.pop().map(Geometry::LineString),
        _ => Some(Geometry::MultiLineString(lines)),
    }
}

fn polygons(parts: &[Vec<[i64; 2]>], transform: &CoordTransform) -> Option<Geometry> {
    let mut polygons: Vec<Vec<Vec<[f64; 2]>>> = Vec::new();

    for ring in parts {
        let area = signed_area(ring);
        if area > 0 {
            polygons.push(vec![transform.apply_all(ring)]);
        } else if area < 0 {
            match polygons.last_mut() {
                Some(polygon) => polygon.push(transform.apply_all(ring)),
                None => trace!("Dropping interior ring without exterior"),
            }
        }
    }

    match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(polygons)),
    }
}

fn properties(layer: &tile::Layer, tags: &[u32]) -> Result<Map<String, Value>, FeatureError> {
    let tags_error = |reason: String| FeatureError::Tags {
        layer: layer.name.clone(),
        reason,
    };

    if tags.len() % 2 != 0 {
        return Err(tags_error(format!("odd tag count {}", tags.len())));
    }

    let mut properties = Map::new();
    for pair in tags.chunks_exact(2) {
        let key = layer
            .keys
            .get(pair[0] as usize)
            .ok_or_else(|| tags_error(format!("key index {} out of range", pair[0])))?;
        let value = layer
            .values
            .get(pair[1] as usize)
            .ok_or_else(|| tags_error(format!("value index {} out of range", pair[1])))?;
        properties.insert(key.clone(), json_value(value));
    }

    Ok(properties)
}

fn json_value(value: &tile::Value) -> Value {
    if let Some(s) = &value.string_value {
        Value::String(s.clone())
    } else if let Some(f) = value.float_value {
        Number::from_f64(f as f64).map_or(Value::Null, Value::Number)
    } else if let Some(d) = value.double_value {
        Number::from_f64(d).map_or(Value::Null, Value::Number)
    } else if let Some(i) = value.int_value {
        Value::from(i)
    } else if let Some(u) = value.uint_value {
        Value::from(u)
    } else if let Some(s) = value.sint_value {
        Value::from(s)
    } else if let Some(b) = value.bool_value {
        Value::Bool(b)
    } else {
        Value::Null
    }
}

/// Maps tile pixel positions into the output coordinate space.
struct CoordTransform {
    extent: f64,
    space: TileSpace,
    size: f64,
    x0: f64,
    y0: f64,
}

impl CoordTransform {
    fn new(extent: u32, tile: &TileCoord, space: TileSpace) -> Self {
        let extent = extent as f64;
        Self {
            extent,
            space,
            size: extent * 2.0_f64.powi(tile.z as i32),
            x0: extent * tile.x as f64,
            y0: extent * tile.y as f64,
        }
    }

    fn apply(&self, [px, py]: [i64; 2]) -> [f64; 2] {
        let (px, py) = (px as f64, py as f64);
        match self.space {
            TileSpace::Local => [px / self.extent, py / self.extent],
            TileSpace::Geographic => {
                let lon = (px + self.x0) * 360.0 / self.size - 180.0;
                let y2 = 180.0 - (py + self.y0) * 360.0 / self.size;
                let lat = 360.0 / std::f64::consts::PI * (y2.to_radians()).exp().atan() - 90.0;
                [lon, lat]
            }
        }
    }

    fn apply_all(&self, ring: &[[i64; 2]]) -> Vec<[f64; 2]> {
        ring.iter().map(|&p| self.apply(p)).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    pub(crate) fn command(id: u32, count: u32) -> u32 {
        (id & 0x7) | (count << 3)
    }

    pub(crate) fn zz(n: i32) -> u32 {
        ((n << 1) ^ (n >> 31)) as u32
    }

    pub(crate) fn layer(name: &str, features: Vec<tile::Feature>) -> tile::Layer {
        tile::Layer {
            version: 2,
            name: name.to_string(),
            features,
            extent: Some(4096),
            ..Default::default()
        }
    }

    pub(crate) fn point_feature(x: i32, y: i32) -> tile::Feature {
        tile::Feature {
            r#type: Some(GeomType::Point as i32),
            geometry: vec![command(MOVE_TO, 1), zz(x), zz(y)],
            ..Default::default()
        }
    }

    pub(crate) fn encode(layers: Vec<tile::Layer>) -> Vec<u8> {
        Tile {
            layers,
            ..Default::default()
        }
        .encode_to_vec()
    }

    fn decode(bytes: &[u8], tile: TileCoord, space: TileSpace) -> FeatureCollection {
        MvtDecoder::new().decode(bytes, &tile, space).unwrap()
    }

    const ROOT: TileCoord = TileCoord { x: 0, y: 0, z: 0 };
    const LIMIT: i64 = 4096 * MAX_EXTENT_OVERSHOOT;

    fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-6 && (actual[1] - expected[1]).abs() < 1e-6,
            "expected {:?} but got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(1), -1);
        assert_eq!(zigzag(2), 1);
        assert_eq!(zigzag(3), -2);
        assert_eq!(zigzag(zz(-1234)), -1234);
    }

    #[test]
    fn test_point_in_wgs84() {
        let bytes = encode(vec![layer("poi", vec![point_feature(2048, 2048)])]);
        let collection = decode(&bytes, ROOT, TileSpace::Geographic);

        assert_eq!(collection.len(), 1);
        match &collection.features[0].geometry {
            Geometry::Point(p) => assert_close(*p, [0.0, 0.0]),
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_tile_corner_in_wgs84() {
        let bytes = encode(vec![layer("poi", vec![point_feature(0, 0)])]);
        let collection = decode(&bytes, ROOT, TileSpace::Geographic);

        match &collection.features[0].geometry {
            Geometry::Point(p) => assert_close(*p, [-180.0, 85.0511287798066]),
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_point_offset_by_tile_index() {
        // Tile 1/1/0 covers lon 0..180, lat 0..85
        let bytes = encode(vec![layer("poi", vec![point_feature(0, 4096)])]);
        let collection = decode(&bytes, TileCoord { x: 1, y: 0, z: 1 }, TileSpace::Geographic);

        match &collection.features[0].geometry {
            Geometry::Point(p) => assert_close(*p, [0.0, 0.0]),
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_point_in_local_space() {
        let bytes = encode(vec![layer("poi", vec![point_feature(1024, 3072)])]);
        let collection = decode(&bytes, TileCoord { x: 5, y: 9, z: 4 }, TileSpace::Local);

        assert_eq!(collection.features[0].geometry, Geometry::Point([0.25, 0.75]));
    }

    #[test]
    fn test_multi_point() {
        let feature = tile::Feature {
            r#type: Some(GeomType::Point as i32),
            geometry: vec![command(MOVE_TO, 2), zz(4), zz(4), zz(4), zz(-4)],
            ..Default::default()
        };
        let bytes = encode(vec![layer("poi", vec![feature])]);
        let collection = decode(&bytes, ROOT, TileSpace::Local);

        assert_eq!(
            collection.features[0].geometry,
            Geometry::MultiPoint(vec![[4.0 / 4096.0, 4.0 / 4096.0], [8.0 / 4096.0, 0.0]])
        );
    }

    #[test]
    fn test_line_string() {
        let feature = tile::Feature {
            r#type: Some(GeomType::Linestring as i32),
            geometry: vec![
                command(MOVE_TO, 1),
                zz(0),
                zz(0),
                command(LINE_TO, 2),
                zz(2048),
                zz(0),
                zz(0),
                zz(1024),
            ],
            ..Default::default()
        };
        let bytes = encode(vec![layer("road", vec![feature])]);
        let collection = decode(&bytes, ROOT, TileSpace::Local);

        assert_eq!(
            collection.features[0].geometry,
            Geometry::LineString(vec![[0.0, 0.0], [0.5, 0.0], [0.5, 0.25]])
        );
    }

    fn square_with_hole() -> Vec<u32> {
        vec![
            // exterior (0,0) (10,0) (10,10) (0,10)
            command(MOVE_TO, 1),
            zz(0),
            zz(0),
            command(LINE_TO, 3),
            zz(10),
            zz(0),
            zz(0),
            zz(10),
            zz(-10),
            zz(0),
            command(CLOSE_PATH, 1),
            // interior (2,2) (2,8) (8,8) (8,2)
            command(MOVE_TO, 1),
            zz(2),
            zz(-8),
            command(LINE_TO, 3),
            zz(0),
            zz(6),
            zz(6),
            zz(0),
            zz(0),
            zz(-6),
            command(CLOSE_PATH, 1),
        ]
    }

    #[test]
    fn test_polygon_with_hole() {
        let feature = tile::Feature {
            r#type: Some(GeomType::Polygon as i32),
            geometry: square_with_hole(),
            ..Default::default()
        };
        let bytes = encode(vec![layer("building", vec![feature])]);
        let collection = decode(&bytes, ROOT, TileSpace::Local);

        match &collection.features[0].geometry {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0].first(), rings[0].last());
                assert_eq!(rings[1][0], [2.0 / 4096.0, 2.0 / 4096.0]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_two_exteriors_make_multi_polygon() {
        let mut geometry = vec![
            command(MOVE_TO, 1),
            zz(0),
            zz(0),
            command(LINE_TO, 2),
            zz(4),
            zz(0),
            zz(0),
            zz(4),
            command(CLOSE_PATH, 1),
        ];
        // second triangle starts at (20,4)
        geometry.extend([
            command(MOVE_TO, 1),
            zz(16),
            zz(0),
            command(LINE_TO, 2),
            zz(4),
            zz(0),
            zz(0),
            zz(4),
            command(CLOSE_PATH, 1),
        ]);
        let feature = tile::Feature {
            r#type: Some(GeomType::Polygon as i32),
            geometry,
            ..Default::default()
        };
        let bytes = encode(vec![layer("landuse", vec![feature])]);
        let collection = decode(&bytes, ROOT, TileSpace::Local);

        assert!(matches!(
            &collection.features[0].geometry,
            Geometry::MultiPolygon(polygons) if polygons.len() == 2
        ));
    }

    #[test]
    fn test_degenerate_polygon_is_skipped() {
        let feature = tile::Feature {
            r#type: Some(GeomType::Polygon as i32),
            geometry: vec![
                command(MOVE_TO, 1),
                zz(0),
                zz(0),
                command(LINE_TO, 2),
                zz(5),
                zz(5),
                zz(5),
                zz(5),
                command(CLOSE_PATH, 1),
            ],
            ..Default::default()
        };
        let bytes = encode(vec![layer("landuse", vec![feature])]);
        assert!(decode(&bytes, ROOT, TileSpace::Local).is_empty());
    }

    #[test]
    fn test_properties() {
        let mut layer = layer("road", vec![]);
        layer.keys = vec!["name".into(), "width".into(), "oneway".into(), "lanes".into()];
        layer.values = vec![
            tile::Value {
                string_value: Some("Main".into()),
                ..Default::default()
            },
            tile::Value {
                double_value: Some(12.5),
                ..Default::default()
            },
            tile::Value {
                bool_value: Some(true),
                ..Default::default()
            },
            tile::Value {
                uint_value: Some(2),
                ..Default::default()
            },
        ];
        let mut feature = point_feature(1, 1);
        feature.id = Some(42);
        feature.tags = vec![0, 0, 1, 1, 2, 2, 3, 3];
        layer.features.push(feature);

        let collection = decode(&encode(vec![layer]), ROOT, TileSpace::Local);
        let feature = &collection.features[0];

        assert_eq!(feature.id, Some(42));
        assert_eq!(feature.layer, "road");
        assert_eq!(feature.properties["name"], "Main");
        assert_eq!(feature.properties["width"], 12.5);
        assert_eq!(feature.properties["oneway"], true);
        assert_eq!(feature.properties["lanes"], 2);
    }

    #[test]
    fn test_bad_tag_index_is_error() {
        let mut layer = layer("road", vec![]);
        let mut feature = point_feature(1, 1);
        feature.tags = vec![0, 0];
        layer.features.push(feature);

        let result = MvtDecoder::new().decode(&encode(vec![layer]), &ROOT, TileSpace::Local);
        assert!(matches!(result, Err(FeatureError::Tags { .. })));
    }

    #[test]
    fn test_multiple_layers() {
        let bytes = encode(vec![
            layer("water", vec![point_feature(1, 1)]),
            layer("poi", vec![point_feature(2, 2), point_feature(3, 3)]),
        ]);
        let collection = decode(&bytes, ROOT, TileSpace::Local);

        assert_eq!(collection.layers(), vec!["water", "poi"]);
        assert_eq!(collection.in_layer("poi").count(), 2);
    }

    #[test]
    fn test_gzipped_tile() {
        let bytes = encode(vec![layer("poi", vec![point_feature(2048, 2048)])]);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes).unwrap();
        let gzipped = encoder.finish().unwrap();

        assert_eq!(&gzipped[..2], &GZIP_MAGIC);
        let collection = decode(&gzipped, ROOT, TileSpace::Local);
        assert_eq!(collection.features[0].geometry, Geometry::Point([0.5, 0.5]));
    }

    #[test]
    fn test_truncated_gzip_is_error() {
        let result = MvtDecoder::new().decode(&[0x1f, 0x8b, 0x08], &ROOT, TileSpace::Local);
        assert!(matches!(result, Err(FeatureError::Decompress(_))));
    }

    #[test]
    fn test_garbage_is_protobuf_error() {
        let result = MvtDecoder::new().decode(b"not a vector tile", &ROOT, TileSpace::Local);
        assert!(matches!(result, Err(FeatureError::Protobuf(_))));
    }

    #[test]
    fn test_unknown_command_is_error() {
        let feature = tile::Feature {
            r#type: Some(GeomType::Point as i32),
            geometry: vec![command(5, 1), zz(0), zz(0)],
            ..Default::default()
        };
        let result = MvtDecoder::new().decode(
            &encode(vec![layer("poi", vec![feature])]),
            &ROOT,
            TileSpace::Local,
        );
        assert!(matches!(result, Err(FeatureError::Geometry { .. })));
    }

    #[test]
    fn test_truncated_command_is_error() {
        assert!(decode_commands(&[command(MOVE_TO, 2), zz(1), zz(1)], LIMIT).is_err());
        assert!(decode_commands(&[command(LINE_TO, 1), zz(1), zz(1)], LIMIT).is_err());
    }

    #[test]
    fn test_position_outside_layer_bounds_is_error() {
        let far = zz(i32::MAX);
        let err = decode_commands(&[command(MOVE_TO, 1), far, far], LIMIT).unwrap_err();
        assert!(err.contains("outside layer bounds"));

        // The buffer around the tile is accepted
        assert!(decode_commands(&[command(MOVE_TO, 1), zz(-4096), zz(8192)], LIMIT).is_ok());
    }

    #[test]
    fn test_oversized_polygon_is_geometry_error() {
        let far = zz(i32::MAX);
        let feature = tile::Feature {
            r#type: Some(GeomType::Polygon as i32),
            geometry: vec![
                command(MOVE_TO, 1),
                far,
                far,
                command(LINE_TO, 2),
                far,
                far,
                far,
                far,
                command(CLOSE_PATH, 1),
            ],
            ..Default::default()
        };
        let bytes = encode(vec![layer("water", vec![feature])]);

        let result = MvtDecoder::new().decode(&bytes, &ROOT, TileSpace::Geographic);
        assert!(matches!(
            result,
            Err(FeatureError::Geometry { ref layer, .. }) if layer == "water"
        ));
    }

    #[test]
    fn test_signed_area_at_coordinate_limit() {
        let l = coordinate_limit(u32::MAX);
        let ring = [[-l, -l], [l, -l], [l, l], [-l, l], [-l, -l]];
        assert!(signed_area(&ring) > 0);
    }

    #[test]
    fn test_empty_tile() {
        assert!(decode(&encode(vec![]), ROOT, TileSpace::Geographic).is_empty());
    }
}
