#![deny(missing_docs)]

//! # GeoJSON Enrichment
//!
//! Post-generation pass that makes the GeoJSON schemas conform to RFC 7946:
//!
//! - **position**: bounds the shared Position schema to 2..=3 elements.
//! - **base**: enumerates the geometry names on the abstract base discriminator.
//! - **geometry**: wires Position into each coordinate-bearing kind at the
//!   right depth, with the minimum cardinalities GeoJSON requires.
//! - **discriminator**: collapses `allOf` composition into a flat `type` property.
//! - **collection**: enriches GeometryCollection and drops its self-referencing
//!   union branch.
//!
//! The steps run in that order; later ones read the Position node the first produces.

pub mod base;
pub mod collection;
pub mod discriminator;
pub mod geometry;
pub mod position;

pub use base::enrich_geometry_base;
pub use collection::enrich_geometry_collection;
pub use discriminator::normalize_discriminator;
pub use geometry::enrich_coordinate_schema;
pub use position::{resolve_position, POSITION_MAX_ITEMS, POSITION_MIN_ITEMS};

use crate::config::GeneratorOptions;
use crate::error::AppResult;
use crate::generator::SchemaGenerator;
use crate::graph::{NodeId, SchemaGraph};
use crate::kinds::GeometryKind;
use tracing::debug;

/// What one enrichment pass touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// The shared Position node.
    pub position: NodeId,
    /// Whether the abstract base schema was present.
    pub base: bool,
    /// Kinds whose schema was present and enriched, in pass order.
    pub enriched: Vec<GeometryKind>,
    /// `oneOf` branches removed because they referenced their own collection or node.
    pub removed_self_references: usize,
}

/// Runs the full enrichment over `graph`.
///
/// Absent types are skipped. A present schema lacking a property its kind
/// requires aborts the pass with [`crate::AppError::MissingRequiredProperty`].
pub fn enrich_geojson_schemas(
    graph: &mut SchemaGraph,
    generator: &dyn SchemaGenerator,
    options: &GeneratorOptions,
) -> AppResult<EnrichmentSummary> {
    let strategy = options.composition;

    let position = resolve_position(graph, generator, options)?;
    let base = enrich_geometry_base(graph)?;

    let mut enriched = Vec::new();
    for kind in GeometryKind::COORDINATE_BEARING {
        if enrich_coordinate_schema(graph, kind, position, strategy)? {
            enriched.push(kind);
        }
    }

    let mut removed_self_references = 0;
    if let Some(removed) = enrich_geometry_collection(graph, strategy)? {
        enriched.push(GeometryKind::GeometryCollection);
        removed_self_references += removed;
    }
    removed_self_references += graph.strip_self_union_branches();

    debug!(
        ?strategy,
        base,
        enriched = enriched.len(),
        removed_self_references,
        "geojson enrichment finished"
    );

    Ok(EnrichmentSummary {
        position,
        base,
        enriched,
        removed_self_references,
    })
}
