//! Position schema: the coordinate pair or triple every geometry shares.

use crate::config::GeneratorOptions;
use crate::error::AppResult;
use crate::generator::SchemaGenerator;
use crate::graph::{NodeId, SchemaGraph};
use crate::kinds::GeoJsonType;
use tracing::debug;

/// Longitude and latitude.
pub const POSITION_MIN_ITEMS: u64 = 2;
/// Longitude, latitude and altitude.
pub const POSITION_MAX_ITEMS: u64 = 3;

/// Locates the Position schema (generating it when absent) and bounds it to
/// two or three elements.
pub fn resolve_position(
    graph: &mut SchemaGraph,
    generator: &dyn SchemaGenerator,
    options: &GeneratorOptions,
) -> AppResult<NodeId> {
    let position = match graph.lookup(GeoJsonType::Position) {
        Some(id) => id,
        None => {
            let id = generator.generate(GeoJsonType::Position, graph, options)?;
            graph.bind_type(GeoJsonType::Position, id);
            id
        }
    };

    let node = graph.node_mut(position);
    node.min_items = Some(POSITION_MIN_ITEMS);
    node.max_items = Some(POSITION_MAX_ITEMS);
    debug!(node = %graph.label(position), "bounded position schema");
    Ok(position)
}
