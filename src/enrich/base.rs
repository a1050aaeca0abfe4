//! Abstract geometry base schema.

use crate::error::AppResult;
use crate::graph::SchemaGraph;
use crate::kinds::{GeoJsonType, GeometryKind, PropertyName};
use tracing::{debug, trace};

/// Restricts the base schema's discriminator to the seven geometry names.
///
/// Returns whether the base schema was present.
pub fn enrich_geometry_base(graph: &mut SchemaGraph) -> AppResult<bool> {
    let Some(base) = graph.lookup(GeoJsonType::Geometry) else {
        trace!("no geometry base schema");
        return Ok(false);
    };

    let discriminator = graph.require_property(base, PropertyName::Type)?;
    let node = graph.node_mut(discriminator);
    node.nullable = false;
    node.pattern = Some(GeometryKind::discriminator_pattern());
    debug!(node = %graph.label(base), "enriched geometry base schema");
    Ok(true)
}
