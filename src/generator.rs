#![deny(missing_docs)]

//! # Schema Generator
//!
//! The seam towards the component that builds the initial schema graph.
//!
//! The enrichment only ever asks a generator for the Position schema, when a
//! document does not already contain one. [`DefaultSchemaGenerator`] also
//! builds the whole GeoJSON family the way a reflection-based generator emits
//! it (nullable objects and arrays, no cardinalities, Position copied inline),
//! which gives hosts without their own generator a starting graph.

use crate::config::GeneratorOptions;
use crate::error::AppResult;
use crate::graph::{NodeId, SchemaGraph, SchemaNode};
use crate::kinds::{CoordinateShape, GeoJsonType, GeometryKind, PropertyName};
use tracing::trace;

/// Produces the schema of a type into a graph.
pub trait SchemaGenerator {
    /// Returns the schema of `ty`, generating and binding it if the graph has none.
    fn generate(
        &self,
        ty: GeoJsonType,
        graph: &mut SchemaGraph,
        options: &GeneratorOptions,
    ) -> AppResult<NodeId>;
}

/// Generator emitting the shapes a reflection-based generator derives from the
/// GeoJSON model types.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSchemaGenerator;

impl DefaultSchemaGenerator {
    /// Generates every GeoJSON type into `graph`.
    pub fn generate_all(
        &self,
        graph: &mut SchemaGraph,
        options: &GeneratorOptions,
    ) -> AppResult<()> {
        for ty in GeoJsonType::ALL {
            self.generate(ty, graph, options)?;
        }
        Ok(())
    }

    /// `Position` is a value-typed list of doubles; generators inline it
    /// wherever it is used.
    fn position(graph: &mut SchemaGraph) -> NodeId {
        let mut number = SchemaNode::of_type("number").with_nullable(false);
        number.format = Some("double".into());
        let number = graph.add_node(number);
        graph.add_node(SchemaNode::array(Some(number)).with_nullable(false))
    }

    fn geometry_object(
        &self,
        graph: &mut SchemaGraph,
        options: &GeneratorOptions,
    ) -> AppResult<SchemaNode> {
        let mut node = SchemaNode::object();
        if options.composition.composes() {
            let base = self.generate(GeoJsonType::Geometry, graph, options)?;
            node.all_of.push(base);
        } else {
            let discriminator = graph.add_node(SchemaNode::string());
            node.properties
                .insert(PropertyName::Type.as_str().into(), discriminator);
        }
        Ok(node)
    }

    fn coordinates(graph: &mut SchemaGraph, shape: CoordinateShape) -> NodeId {
        match shape {
            CoordinateShape::Position => Self::position(graph),
            CoordinateShape::Nested(levels) => {
                let mut inner = Self::position(graph);
                for _ in levels {
                    inner = graph.add_node(SchemaNode::array(Some(inner)));
                }
                inner
            }
        }
    }
}

impl SchemaGenerator for DefaultSchemaGenerator {
    fn generate(
        &self,
        ty: GeoJsonType,
        graph: &mut SchemaGraph,
        options: &GeneratorOptions,
    ) -> AppResult<NodeId> {
        if let Some(id) = graph.lookup(ty) {
            return Ok(id);
        }
        let schema_id = options.type_names.schema_id(ty);
        if let Some(id) = graph.component(schema_id) {
            graph.bind_type(ty, id);
            return Ok(id);
        }

        trace!(%ty, schema_id, "generating schema");
        let id = match ty {
            GeoJsonType::Position => Self::position(graph),
            GeoJsonType::Geometry => {
                let discriminator = graph.add_node(SchemaNode::string());
                let node = SchemaNode::object()
                    .with_property(PropertyName::Type.as_str(), discriminator);
                graph.add_component(schema_id, node)?
            }
            GeoJsonType::Kind(GeometryKind::GeometryCollection) => {
                // Bound before its members so the self-reference resolves.
                let node = self.geometry_object(graph, options)?;
                let id = graph.add_component(schema_id, node)?;
                graph.bind_type(ty, id);

                let mut union = SchemaNode::default();
                for kind in GeometryKind::ALL {
                    union.one_of.push(self.generate(kind.into(), graph, options)?);
                }
                let union = graph.add_node(union);
                let geometries = graph.add_node(SchemaNode::array(Some(union)));
                graph
                    .node_mut(id)
                    .properties
                    .insert(PropertyName::Geometries.as_str().into(), geometries);
                id
            }
            GeoJsonType::Kind(kind) => {
                let mut node = self.geometry_object(graph, options)?;
                if let Some(shape) = kind.coordinate_shape() {
                    let coordinates = Self::coordinates(graph, shape);
                    node.properties
                        .insert(PropertyName::Coordinates.as_str().into(), coordinates);
                }
                graph.add_component(schema_id, node)?
            }
        };
        graph.bind_type(ty, id);
        Ok(id)
    }
}
