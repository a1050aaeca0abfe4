//! GeometryCollection: a heterogeneous, nominally recursive collection.

use crate::config::CompositionStrategy;
use crate::enrich::discriminator::normalize_discriminator;
use crate::error::{AppError, AppResult};
use crate::graph::SchemaGraph;
use crate::kinds::GeometryKind;
use tracing::{debug, trace};

/// Enriches the collection schema and drops the member union's branch that
/// points back at the collection.
///
/// Returns the number of branches removed, or `None` when the graph has no
/// collection schema.
pub fn enrich_geometry_collection(
    graph: &mut SchemaGraph,
    strategy: CompositionStrategy,
) -> AppResult<Option<usize>> {
    let kind = GeometryKind::GeometryCollection;
    let Some(id) = graph.lookup(kind.into()) else {
        trace!("no geometry collection schema");
        return Ok(None);
    };

    normalize_discriminator(graph, id, kind, strategy)?;

    let geometries = graph.require_property(id, kind.payload_property())?;
    graph.node_mut(geometries).nullable = false;

    let members = graph
        .node(geometries)
        .items
        .ok_or_else(|| AppError::MissingArrayItems {
            node: format!("{}.{}", graph.label(id), kind.payload_property()),
        })?;

    let union = &mut graph.node_mut(members).one_of;
    let before = union.len();
    union.retain(|branch| *branch != id);
    let removed = before - union.len();

    debug!(node = %graph.label(id), removed, "enriched geometry collection schema");
    Ok(Some(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, SchemaNode};
    use crate::kinds::PropertyName;
    use pretty_assertions::assert_eq;

    fn collection_graph() -> (SchemaGraph, NodeId, NodeId, Vec<NodeId>) {
        let mut graph = SchemaGraph::new();
        let mut kinds = Vec::new();
        for kind in GeometryKind::COORDINATE_BEARING {
            kinds.push(
                graph
                    .add_component(kind.discriminator(), SchemaNode::object())
                    .unwrap(),
            );
        }

        let ty = graph.add_node(SchemaNode::string());
        let collection = graph
            .add_component(
                "GeometryCollection",
                SchemaNode::object().with_property("type", ty),
            )
            .unwrap();
        let mut union = SchemaNode::default();
        union.one_of = kinds[..3].to_vec();
        union.one_of.push(collection);
        union.one_of.extend_from_slice(&kinds[3..]);
        let union = graph.add_node(union);
        let geometries = graph.add_node(SchemaNode::array(Some(union)));
        graph
            .node_mut(collection)
            .properties
            .insert("Geometries".into(), geometries);
        graph.bind_type(GeometryKind::GeometryCollection.into(), collection);

        (graph, collection, union, kinds)
    }

    #[test]
    fn test_self_reference_removed() {
        let (mut graph, collection, union, kinds) = collection_graph();

        let removed =
            enrich_geometry_collection(&mut graph, CompositionStrategy::FlatDiscriminator)
                .unwrap();
        assert_eq!(removed, Some(1));
        assert_eq!(graph.node(union).one_of, kinds);

        let geometries = graph
            .require_property(collection, PropertyName::Geometries)
            .unwrap();
        assert!(!graph.node(geometries).nullable);

        let ty = graph.require_property(collection, PropertyName::Type).unwrap();
        assert_eq!(
            graph.node(ty).pattern.as_deref(),
            Some("GeometryCollection")
        );
    }

    #[test]
    fn test_second_pass_removes_nothing() {
        let (mut graph, _, union, kinds) = collection_graph();
        let strategy = CompositionStrategy::FlatDiscriminator;

        enrich_geometry_collection(&mut graph, strategy).unwrap();
        assert_eq!(enrich_geometry_collection(&mut graph, strategy).unwrap(), Some(0));
        assert_eq!(graph.node(union).one_of, kinds);
    }

    #[test]
    fn test_absent_collection_is_noop() {
        let mut graph = SchemaGraph::new();
        assert_eq!(
            enrich_geometry_collection(&mut graph, CompositionStrategy::UnionComposition)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_missing_geometries_fails() {
        let mut graph = SchemaGraph::new();
        let ty = graph.add_node(SchemaNode::string());
        let collection = graph
            .add_component(
                "GeometryCollection",
                SchemaNode::object().with_property("type", ty),
            )
            .unwrap();
        graph.bind_type(GeometryKind::GeometryCollection.into(), collection);

        let err = enrich_geometry_collection(&mut graph, CompositionStrategy::FlatDiscriminator)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema 'GeometryCollection' has no property named 'geometries' (case-insensitive)"
        );
        match err {
            AppError::MissingRequiredProperty { node, expected } => {
                assert_eq!(node, "GeometryCollection");
                assert_eq!(expected, PropertyName::Geometries);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_geometries_without_items_fails() {
        let mut graph = SchemaGraph::new();
        let ty = graph.add_node(SchemaNode::string());
        let geometries = graph.add_node(SchemaNode::array(None));
        let collection = graph
            .add_component(
                "GeometryCollection",
                SchemaNode::object()
                    .with_property("type", ty)
                    .with_property("geometries", geometries),
            )
            .unwrap();
        graph.bind_type(GeometryKind::GeometryCollection.into(), collection);

        let err = enrich_geometry_collection(&mut graph, CompositionStrategy::FlatDiscriminator)
            .unwrap_err();
        match err {
            AppError::MissingArrayItems { node } => {
                assert_eq!(node, "GeometryCollection.geometries")
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
