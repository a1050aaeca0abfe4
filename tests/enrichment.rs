use geojson_openapi::{
    enrich_geojson_schemas, CompositionStrategy, DefaultSchemaGenerator, GeoJsonType,
    GeneratorOptions, GeometryKind, NodeId, PropertyName, SchemaGraph, SchemaNode,
};
use pretty_assertions::assert_eq;
use serde_json::json;

struct Stubs {
    graph: SchemaGraph,
    position: NodeId,
    base: NodeId,
    union: NodeId,
}

/// Seven geometry stubs the way an inheritance-composing generator leaves
/// them: everything nullable, no cardinalities, coordinate arrays without items.
fn inheritance_stubs() -> Stubs {
    let mut graph = SchemaGraph::new();

    let position = graph
        .add_component("Position", SchemaNode::array(None))
        .unwrap();
    let base_type = graph.add_node(SchemaNode::string());
    let base = graph
        .add_component(
            "GeometryBase",
            SchemaNode::object().with_property("type", base_type),
        )
        .unwrap();

    let mut kinds = Vec::new();
    for kind in GeometryKind::COORDINATE_BEARING {
        let coordinates = graph.add_node(SchemaNode::array(None));
        let mut node = SchemaNode::object().with_property("coordinates", coordinates);
        node.all_of.push(base);
        kinds.push(graph.add_component(kind.discriminator(), node).unwrap());
    }

    let mut collection = SchemaNode::object();
    collection.all_of.push(base);
    let collection = graph.add_component("GeometryCollection", collection).unwrap();
    let mut union = SchemaNode::default();
    union.one_of = kinds.clone();
    union.one_of.push(collection);
    let union = graph.add_node(union);
    let geometries = graph.add_node(SchemaNode::array(Some(union)));
    graph
        .node_mut(collection)
        .properties
        .insert("geometries".into(), geometries);

    graph.bind_types(&Default::default());

    Stubs {
        graph,
        position,
        base,
        union,
    }
}

fn enrich(stubs: &mut Stubs) {
    let options = GeneratorOptions::with_composition(CompositionStrategy::InheritanceComposition);
    enrich_geojson_schemas(&mut stubs.graph, &DefaultSchemaGenerator, &options).unwrap();
}

fn coordinates(graph: &SchemaGraph, kind: GeometryKind) -> NodeId {
    let id = graph.lookup(kind.into()).unwrap();
    graph.require_property(id, PropertyName::Coordinates).unwrap()
}

#[test]
fn test_line_string_end_to_end() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let graph = &stubs.graph;

    let line_string = graph.lookup(GeometryKind::LineString.into()).unwrap();
    assert!(graph.node(line_string).all_of.is_empty());

    let coordinates = graph.node(coordinates(graph, GeometryKind::LineString));
    assert!(!coordinates.nullable);
    assert_eq!(coordinates.min_items, Some(2));
    assert_eq!(coordinates.items, Some(stubs.position));

    let ty = graph.require_property(line_string, PropertyName::Type).unwrap();
    let ty = graph.node(ty);
    assert_eq!(ty.pattern.as_deref(), Some("LineString"));
    assert_eq!(ty.example, Some(json!("LineString")));
    assert!(!ty.nullable);
}

#[test]
fn test_every_kind_has_fixed_discriminator() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let graph = &stubs.graph;

    for kind in GeometryKind::ALL {
        let id = graph.lookup(kind.into()).unwrap();
        assert!(graph.node(id).all_of.is_empty(), "{} kept allOf", kind);
        let ty = graph.node(graph.require_property(id, PropertyName::Type).unwrap());
        assert_eq!(ty.pattern.as_deref(), Some(kind.discriminator()));
        assert_eq!(ty.example, Some(json!(kind.discriminator())));
        assert!(!ty.nullable);
    }
}

#[test]
fn test_base_discriminator_enumerates_kinds() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let graph = &stubs.graph;

    let ty = graph.node(graph.require_property(stubs.base, PropertyName::Type).unwrap());
    assert!(!ty.nullable);
    assert_eq!(
        ty.pattern.as_deref(),
        Some("Point|MultiPoint|LineString|MultiLineString|Polygon|MultiPolygon|GeometryCollection")
    );
}

#[test]
fn test_nesting_table() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let graph = &stubs.graph;
    let position = stubs.position;

    let point = graph.node(coordinates(graph, GeometryKind::Point));
    assert_eq!((point.min_items, point.max_items), (Some(2), Some(3)));

    let multi_point = graph.node(coordinates(graph, GeometryKind::MultiPoint));
    assert_eq!(multi_point.items, Some(position));

    let polygon = graph.node(coordinates(graph, GeometryKind::Polygon));
    assert_eq!(polygon.min_items, Some(1));
    let ring = graph.node(polygon.items.unwrap());
    assert_eq!(ring.min_items, Some(4));
    assert_eq!(ring.items, Some(position));

    let multi_line = graph.node(coordinates(graph, GeometryKind::MultiLineString));
    assert_eq!(multi_line.min_items, Some(1));
    let line = graph.node(multi_line.items.unwrap());
    assert_eq!(line.min_items, Some(2));
    assert_eq!(line.items, Some(position));

    let multi_polygon = graph.node(coordinates(graph, GeometryKind::MultiPolygon));
    assert_eq!(multi_polygon.min_items, Some(1));
    let polygon = graph.node(multi_polygon.items.unwrap());
    assert_eq!(polygon.min_items, Some(1));
    let ring = graph.node(polygon.items.unwrap());
    assert_eq!(ring.min_items, Some(4));
    assert_eq!(ring.items, Some(position));

    let position = graph.node(position);
    assert_eq!((position.min_items, position.max_items), (Some(2), Some(3)));
}

#[test]
fn test_collection_union_keeps_six_kinds() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let graph = &stubs.graph;

    let expected: Vec<NodeId> = GeometryKind::COORDINATE_BEARING
        .iter()
        .map(|kind| graph.lookup((*kind).into()).unwrap())
        .collect();
    assert_eq!(graph.node(stubs.union).one_of, expected);

    let collection = graph.lookup(GeometryKind::GeometryCollection.into()).unwrap();
    let geometries = graph.require_property(collection, PropertyName::Geometries).unwrap();
    assert!(!graph.node(geometries).nullable);
}

#[test]
fn test_no_node_references_itself() {
    let mut stubs = inheritance_stubs();
    let collection = stubs.graph.lookup(GeometryKind::GeometryCollection.into()).unwrap();
    stubs.graph.node_mut(collection).one_of.push(collection);
    enrich(&mut stubs);

    let graph = &stubs.graph;
    let mut queue: Vec<NodeId> = graph.components().map(|(_, id)| id).collect();
    let mut seen = Vec::new();
    while let Some(id) = queue.pop() {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        let node = graph.node(id);
        assert!(!node.one_of.contains(&id), "{} references itself", graph.label(id));
        queue.extend(node.properties.values().copied());
        queue.extend(node.items);
        queue.extend(node.one_of.iter().copied());
    }
    assert!(seen.contains(&stubs.union));
}

#[test]
fn test_enrichment_is_idempotent() {
    let mut stubs = inheritance_stubs();
    enrich(&mut stubs);
    let once = stubs.graph.clone();
    enrich(&mut stubs);
    assert_eq!(stubs.graph, once);
}

#[test]
fn test_pruned_kinds_are_skipped() {
    let mut graph = SchemaGraph::new();
    let ty = graph.add_node(SchemaNode::string());
    let coordinates = graph.add_node(SchemaNode::array(None));
    let polygon = graph
        .add_component(
            "Polygon",
            SchemaNode::object()
                .with_property("Type", ty)
                .with_property("Coordinates", coordinates),
        )
        .unwrap();
    graph.bind_type(GeometryKind::Polygon.into(), polygon);

    let summary = enrich_geojson_schemas(
        &mut graph,
        &DefaultSchemaGenerator,
        &GeneratorOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.enriched, vec![GeometryKind::Polygon]);
    assert!(!summary.base);
    assert_eq!(graph.lookup(GeoJsonType::Position), Some(summary.position));
    let ring = graph.node(coordinates).items.unwrap();
    assert_eq!(graph.node(ring).items, Some(summary.position));
}
