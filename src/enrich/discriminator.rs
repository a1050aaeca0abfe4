//! Discriminator normalization shared by every concrete geometry schema.

use crate::config::CompositionStrategy;
use crate::error::{AppError, AppResult};
use crate::graph::{NodeId, SchemaGraph, SchemaNode};
use crate::kinds::{GeometryKind, PropertyName};
use serde_json::Value;
use tracing::debug;

/// Gives a concrete geometry schema a flat, fixed-value `type` property.
///
/// Under a composing strategy the discriminator lives on the base schema
/// referenced by the first `allOf` entry. That composition is collapsed: the
/// `allOf` list is cleared and a string property named after the base's
/// discriminator is added to the concrete schema. A schema whose `allOf` is
/// already empty counts as flattened.
///
/// The `type` property then gets `pattern` and `example` set to the kind's
/// discriminator and stops being nullable.
pub fn normalize_discriminator(
    graph: &mut SchemaGraph,
    id: NodeId,
    kind: GeometryKind,
    strategy: CompositionStrategy,
) -> AppResult<()> {
    if strategy.composes() {
        if let Some(&base) = graph.node(id).all_of.first() {
            let name = graph
                .node(base)
                .find_property(PropertyName::Type)
                .map(|(name, _)| name.to_string())
                .ok_or_else(|| AppError::MissingRequiredProperty {
                    node: graph.label(base),
                    expected: PropertyName::Type,
                })?;

            graph.node_mut(id).all_of.clear();
            if graph.node(id).find_property(PropertyName::Type).is_none() {
                let discriminator = graph.add_node(SchemaNode::string().with_nullable(false));
                graph.node_mut(id).properties.insert(name, discriminator);
            }
            debug!(node = %graph.label(id), base = %graph.label(base), "collapsed allOf composition");
        }
    }

    let discriminator = graph.require_property(id, PropertyName::Type)?;
    let node = graph.node_mut(discriminator);
    node.pattern = Some(kind.discriminator().to_string());
    node.example = Some(Value::String(kind.discriminator().to_string()));
    node.nullable = false;
    Ok(())
}
