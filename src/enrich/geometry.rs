//! Coordinate-bearing geometries: Point, MultiPoint, LineString,
//! MultiLineString, Polygon and MultiPolygon.

use crate::config::CompositionStrategy;
use crate::enrich::discriminator::normalize_discriminator;
use crate::error::{AppError, AppResult};
use crate::graph::{NodeId, SchemaGraph};
use crate::kinds::{CoordinateShape, GeometryKind};
use tracing::{debug, trace};

/// Enriches the schema of one coordinate-bearing kind.
///
/// The discriminator is normalized, `coordinates` becomes non-nullable and is
/// shaped according to [`GeometryKind::coordinate_shape`], with the shared
/// `position` node as the innermost element schema.
///
/// Returns whether the kind's schema was present.
pub fn enrich_coordinate_schema(
    graph: &mut SchemaGraph,
    kind: GeometryKind,
    position: NodeId,
    strategy: CompositionStrategy,
) -> AppResult<bool> {
    let Some(shape) = kind.coordinate_shape() else {
        return Err(AppError::General(format!(
            "{} does not carry coordinates",
            kind
        )));
    };
    let Some(id) = graph.lookup(kind.into()) else {
        trace!(%kind, "no schema for geometry kind");
        return Ok(false);
    };

    normalize_discriminator(graph, id, kind, strategy)?;

    let coordinates = graph.require_property(id, kind.payload_property())?;
    graph.node_mut(coordinates).nullable = false;

    match shape {
        CoordinateShape::Position => {
            let (min_items, max_items) = {
                let position = graph.node(position);
                (position.min_items, position.max_items)
            };
            let node = graph.node_mut(coordinates);
            node.min_items = min_items;
            node.max_items = max_items;
        }
        CoordinateShape::Nested(levels) => {
            let mut level = coordinates;
            for (depth, min_items) in levels.iter().enumerate() {
                if let Some(min_items) = min_items {
                    graph.node_mut(level).min_items = Some(*min_items);
                }
                if depth + 1 == levels.len() {
                    graph.node_mut(level).items = Some(position);
                } else {
                    level = graph.ensure_items(level);
                }
            }
        }
    }

    debug!(%kind, node = %graph.label(id), "enriched coordinate schema");
    Ok(true)
}
