#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Describes how the upstream schema generator shaped its output: which
//! polymorphism composition it used and the component identifiers it gave the
//! GeoJSON types. Options can be built in code or deserialized from YAML/JSON.

use crate::error::{AppError, AppResult};
use crate::kinds::{GeoJsonType, GeometryKind};
use serde::{Deserialize, Serialize};

/// How the generator expresses polymorphic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositionStrategy {
    /// Every concrete schema carries its own discriminator property.
    #[default]
    FlatDiscriminator,
    /// Concrete schemas `allOf` the base schema that owns the discriminator.
    InheritanceComposition,
    /// Polymorphic references are `oneOf` unions; subtypes still `allOf` the base.
    UnionComposition,
}

impl CompositionStrategy {
    /// Maps the generator's two independent switches onto a strategy.
    ///
    /// Hosts that configure their generator with `useAllOfForInheritance` and
    /// `useOneOfForPolymorphism` pass them through here, usually via
    /// [`crate::SchemaGenOptions::composition_flags`]. Both switches at once
    /// have no defined precedence and are rejected.
    pub fn from_flags(
        use_all_of_for_inheritance: bool,
        use_one_of_for_polymorphism: bool,
    ) -> AppResult<Self> {
        match (use_all_of_for_inheritance, use_one_of_for_polymorphism) {
            (false, false) => Ok(CompositionStrategy::FlatDiscriminator),
            (true, false) => Ok(CompositionStrategy::InheritanceComposition),
            (false, true) => Ok(CompositionStrategy::UnionComposition),
            (true, true) => Err(AppError::AmbiguousCompositionStrategy),
        }
    }

    /// Whether concrete schemas reach their discriminator through `allOf`.
    pub fn composes(self) -> bool {
        !matches!(self, CompositionStrategy::FlatDiscriminator)
    }
}

/// Component identifiers of the GeoJSON types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeNames {
    /// Coordinate tuple.
    pub position: String,
    /// Abstract geometry base.
    pub geometry: String,
    /// `Point`.
    pub point: String,
    /// `MultiPoint`.
    pub multi_point: String,
    /// `LineString`.
    pub line_string: String,
    /// `MultiLineString`.
    pub multi_line_string: String,
    /// `Polygon`.
    pub polygon: String,
    /// `MultiPolygon`.
    pub multi_polygon: String,
    /// `GeometryCollection`.
    pub geometry_collection: String,
}

impl Default for TypeNames {
    fn default() -> Self {
        let id = |ty: GeoJsonType| ty.default_schema_id().to_string();
        Self {
            position: id(GeoJsonType::Position),
            geometry: id(GeoJsonType::Geometry),
            point: id(GeometryKind::Point.into()),
            multi_point: id(GeometryKind::MultiPoint.into()),
            line_string: id(GeometryKind::LineString.into()),
            multi_line_string: id(GeometryKind::MultiLineString.into()),
            polygon: id(GeometryKind::Polygon.into()),
            multi_polygon: id(GeometryKind::MultiPolygon.into()),
            geometry_collection: id(GeometryKind::GeometryCollection.into()),
        }
    }
}

impl TypeNames {
    /// The component identifier configured for `ty`.
    pub fn schema_id(&self, ty: GeoJsonType) -> &str {
        match ty {
            GeoJsonType::Position => &self.position,
            GeoJsonType::Geometry => &self.geometry,
            GeoJsonType::Kind(GeometryKind::Point) => &self.point,
            GeoJsonType::Kind(GeometryKind::MultiPoint) => &self.multi_point,
            GeoJsonType::Kind(GeometryKind::LineString) => &self.line_string,
            GeoJsonType::Kind(GeometryKind::MultiLineString) => &self.multi_line_string,
            GeoJsonType::Kind(GeometryKind::Polygon) => &self.polygon,
            GeoJsonType::Kind(GeometryKind::MultiPolygon) => &self.multi_polygon,
            GeoJsonType::Kind(GeometryKind::GeometryCollection) => &self.geometry_collection,
        }
    }
}

/// Options shared by the generator and the passes that run after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Composition used for polymorphic types.
    pub composition: CompositionStrategy,
    /// Component identifiers of the GeoJSON types.
    pub type_names: TypeNames,
}

impl GeneratorOptions {
    /// Options with the given composition strategy and default type names.
    pub fn with_composition(composition: CompositionStrategy) -> Self {
        Self {
            composition,
            ..Self::default()
        }
    }

    /// Parses options from YAML (JSON is valid YAML).
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml).map_err(AppError::from)
    }
}
