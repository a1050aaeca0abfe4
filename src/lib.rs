#![deny(missing_docs)]

//! # GeoJSON OpenAPI
//!
//! Post-processing for generated OpenAPI documents that makes the GeoJSON
//! geometry schemas conform to RFC 7946: exact coordinate nesting, minimum
//! ring and point counts, fixed discriminator values, one shared Position
//! schema, and no self-referencing member in GeometryCollection's union.
//!
//! ```no_run
//! use geojson_openapi::{enrich_openapi_yaml, SchemaGenOptions};
//!
//! let mut options = SchemaGenOptions::default();
//! options.add_geojson_schemas();
//! let yaml = std::fs::read_to_string("openapi.yaml")?;
//! let enriched = enrich_openapi_yaml(&yaml, &options)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Shared error types.
pub mod error;

/// GeoJSON type registry.
pub mod kinds;

/// Generator options.
pub mod config;

/// Arena schema graph.
pub mod graph;

/// Schema generation seam.
pub mod generator;

/// The enrichment pass.
pub mod enrich;

/// Host registration surface.
pub mod registration;

/// OpenAPI document loading and writing.
pub mod document;

pub use config::{CompositionStrategy, GeneratorOptions, TypeNames};
pub use document::{
    enrich_file, enrich_openapi_document, enrich_openapi_json, enrich_openapi_yaml,
    graph_from_schemas, write_schemas, DocumentFormat,
};
pub use enrich::{enrich_geojson_schemas, EnrichmentSummary};
pub use error::{AppError, AppResult};
pub use generator::{DefaultSchemaGenerator, SchemaGenerator};
pub use graph::{NodeId, SchemaGraph, SchemaNode};
pub use kinds::{CoordinateShape, GeoJsonType, GeometryKind, PropertyName};
pub use registration::{
    DocumentFilter, DocumentFilterContext, GeoJsonDocumentFilter, SchemaGenOptions,
};
