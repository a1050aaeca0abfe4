#![deny(missing_docs)]

//! # GeoJSON Type Registry
//!
//! The closed set of GeoJSON types the enrichment knows about, together with
//! the static facts attached to each one: discriminator strings, payload
//! property names and the coordinate nesting table.

use std::fmt;

/// The seven concrete GeoJSON geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKind {
    /// A single position.
    Point,
    /// An array of positions.
    MultiPoint,
    /// Two or more positions.
    LineString,
    /// An array of line strings.
    MultiLineString,
    /// An array of linear rings.
    Polygon,
    /// An array of polygons.
    MultiPolygon,
    /// A heterogeneous collection of geometries.
    GeometryCollection,
}

/// Shape of the payload below a geometry's `coordinates` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateShape {
    /// The coordinates are themselves a position.
    Position,
    /// Nested arrays ending in positions.
    ///
    /// One entry per array level, outermost first; each entry is the
    /// `minItems` applied at that level (or none). The innermost level's
    /// `items` is the shared Position schema.
    Nested(&'static [Option<u64>]),
}

impl GeometryKind {
    /// All kinds, in the order used by the base discriminator pattern.
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// The six kinds that carry `coordinates`.
    pub const COORDINATE_BEARING: [GeometryKind; 6] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
    ];

    /// The value of the `type` member for this kind.
    pub const fn discriminator(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// `Point|MultiPoint|...|GeometryCollection`.
    pub fn discriminator_pattern() -> String {
        Self::ALL
            .iter()
            .map(|k| k.discriminator())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// The property holding this kind's payload.
    pub const fn payload_property(self) -> PropertyName {
        match self {
            GeometryKind::GeometryCollection => PropertyName::Geometries,
            _ => PropertyName::Coordinates,
        }
    }

    /// Coordinate nesting and per-level minimum cardinalities.
    ///
    /// A linear ring needs four positions (the closing position repeats the
    /// first), a polygon at least one ring, a multi-polygon at least one polygon.
    /// Returns `None` for `GeometryCollection`.
    pub const fn coordinate_shape(self) -> Option<CoordinateShape> {
        match self {
            GeometryKind::Point => Some(CoordinateShape::Position),
            GeometryKind::MultiPoint => Some(CoordinateShape::Nested(&[None])),
            GeometryKind::LineString => Some(CoordinateShape::Nested(&[Some(2)])),
            GeometryKind::MultiLineString => {
                Some(CoordinateShape::Nested(&[Some(1), Some(2)]))
            }
            GeometryKind::Polygon => Some(CoordinateShape::Nested(&[Some(1), Some(4)])),
            GeometryKind::MultiPolygon => {
                Some(CoordinateShape::Nested(&[Some(1), Some(1), Some(4)]))
            }
            GeometryKind::GeometryCollection => None,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

/// Every type whose schema the enrichment looks up in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeoJsonType {
    /// A coordinate pair or triple.
    Position,
    /// The abstract geometry base type.
    Geometry,
    /// A concrete geometry.
    Kind(GeometryKind),
}

impl GeoJsonType {
    /// All types, Position and the base first.
    pub const ALL: [GeoJsonType; 9] = [
        GeoJsonType::Position,
        GeoJsonType::Geometry,
        GeoJsonType::Kind(GeometryKind::Point),
        GeoJsonType::Kind(GeometryKind::MultiPoint),
        GeoJsonType::Kind(GeometryKind::LineString),
        GeoJsonType::Kind(GeometryKind::MultiLineString),
        GeoJsonType::Kind(GeometryKind::Polygon),
        GeoJsonType::Kind(GeometryKind::MultiPolygon),
        GeoJsonType::Kind(GeometryKind::GeometryCollection),
    ];

    /// The component identifier a generator uses unless configured otherwise.
    pub const fn default_schema_id(self) -> &'static str {
        match self {
            GeoJsonType::Position => "Position",
            GeoJsonType::Geometry => "GeometryBase",
            GeoJsonType::Kind(kind) => kind.discriminator(),
        }
    }
}

impl From<GeometryKind> for GeoJsonType {
    fn from(kind: GeometryKind) -> Self {
        GeoJsonType::Kind(kind)
    }
}

impl fmt::Display for GeoJsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_schema_id())
    }
}

/// Property names the enrichment requires, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    /// The discriminator.
    Type,
    /// Payload of coordinate-bearing geometries.
    Coordinates,
    /// Payload of a geometry collection.
    Geometries,
}

impl PropertyName {
    /// Canonical (lower-case) spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyName::Type => "type",
            PropertyName::Coordinates => "coordinates",
            PropertyName::Geometries => "geometries",
        }
    }

    /// Whether an emitted property name denotes this property.
    pub fn matches(self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
