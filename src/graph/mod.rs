#![deny(missing_docs)]

//! # Schema Graph
//!
//! Arena-backed representation of a document's schemas.
//!
//! - Nodes live in a single `Vec` and are addressed by [`NodeId`].
//! - Component schemas (the named, top-level entries) map a name to a node.
//! - Children (`properties`, `items`, `oneOf`, `allOf`) are node ids, so two
//!   parents pointing at the same id share one subtree instead of copies.
//! - A type index answers "which node is the schema for type X".

pub(crate) mod refs;

use crate::config::TypeNames;
use crate::error::{AppError, AppResult};
use crate::kinds::{GeoJsonType, PropertyName};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Stable handle of a node inside one [`SchemaGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single schema.
///
/// Keywords the enrichment reads or writes are typed fields; everything else
/// the source schema carried is kept verbatim in `extensions`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// The `type` keyword.
    pub schema_type: Option<String>,
    /// The `format` keyword.
    pub format: Option<String>,
    /// Object properties, in emitted order.
    pub properties: IndexMap<String, NodeId>,
    /// Array element schema.
    pub items: Option<NodeId>,
    /// Discriminated union branches.
    pub one_of: Vec<NodeId>,
    /// Inheritance composition.
    pub all_of: Vec<NodeId>,
    /// Lower bound on array length.
    pub min_items: Option<u64>,
    /// Upper bound on array length.
    pub max_items: Option<u64>,
    /// OpenAPI 3.0 `nullable`.
    pub nullable: bool,
    /// Regular expression the string must match.
    pub pattern: Option<String>,
    /// Sample value.
    pub example: Option<Value>,
    /// Keywords not modelled above.
    pub extensions: Map<String, Value>,
}

impl Default for SchemaNode {
    /// Generators mark schemas nullable unless told otherwise.
    fn default() -> Self {
        Self {
            schema_type: None,
            format: None,
            properties: IndexMap::new(),
            items: None,
            one_of: Vec::new(),
            all_of: Vec::new(),
            min_items: None,
            max_items: None,
            nullable: true,
            pattern: None,
            example: None,
            extensions: Map::new(),
        }
    }
}

impl SchemaNode {
    /// A schema with the given `type` keyword.
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// A plain `string` schema.
    pub fn string() -> Self {
        Self::of_type("string")
    }

    /// An `object` schema without properties.
    pub fn object() -> Self {
        Self::of_type("object")
    }

    /// An `array` schema, optionally with an element schema.
    pub fn array(items: Option<NodeId>) -> Self {
        Self {
            items,
            ..Self::of_type("array")
        }
    }

    /// Overrides the `nullable` flag.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Adds (or replaces) a property.
    pub fn with_property(mut self, name: impl Into<String>, node: NodeId) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// First property whose name matches `name` case-insensitively.
    pub fn find_property(&self, name: PropertyName) -> Option<(&str, NodeId)> {
        self.properties
            .iter()
            .find(|(key, _)| name.matches(key))
            .map(|(key, id)| (key.as_str(), *id))
    }
}

/// All schemas of one document build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
    components: IndexMap<String, NodeId>,
    names: HashMap<NodeId, String>,
    types: HashMap<GeoJsonType, NodeId>,
}

impl SchemaGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, anonymous ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds an anonymous (inline) node.
    pub fn add_node(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Adds a named component schema.
    pub fn add_component(&mut self, name: impl Into<String>, node: SchemaNode) -> AppResult<NodeId> {
        let name = name.into();
        if self.components.contains_key(&name) {
            return Err(AppError::General(format!(
                "Duplicate component schema '{}'",
                name
            )));
        }
        let id = self.add_node(node);
        self.names.insert(id, name.clone());
        self.components.insert(name, id);
        Ok(id)
    }

    /// Returns the node behind an id.
    ///
    /// # Panics
    /// If `id` was produced by a different graph.
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Mutable access to the node behind an id.
    pub fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Looks up a component by name.
    pub fn component(&self, name: &str) -> Option<NodeId> {
        self.components.get(name).copied()
    }

    /// Name of the component a node is registered under, if any.
    pub fn component_name(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Component schemas in insertion order.
    pub fn components(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.components.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Human readable label for messages and logs.
    pub fn label(&self, id: NodeId) -> String {
        match self.component_name(id) {
            Some(name) => name.to_string(),
            None => format!("<anonymous {}>", id),
        }
    }

    /// Records that `id` is the schema of `ty`.
    pub fn bind_type(&mut self, ty: GeoJsonType, id: NodeId) {
        self.types.insert(ty, id);
    }

    /// Binds every type whose configured component exists in the graph.
    ///
    /// Returns how many types were bound.
    pub fn bind_types(&mut self, names: &TypeNames) -> usize {
        let mut bound = 0;
        for ty in GeoJsonType::ALL {
            if let Some(id) = self.component(names.schema_id(ty)) {
                self.types.insert(ty, id);
                bound += 1;
            }
        }
        bound
    }

    /// The schema bound to `ty`, if the generator produced one.
    pub fn lookup(&self, ty: GeoJsonType) -> Option<NodeId> {
        self.types.get(&ty).copied()
    }

    /// Resolves a property that a schema must have.
    ///
    /// Fails with [`AppError::MissingRequiredProperty`] when no property
    /// matches case-insensitively.
    pub fn require_property(&self, id: NodeId, name: PropertyName) -> AppResult<NodeId> {
        self.node(id)
            .find_property(name)
            .map(|(_, child)| child)
            .ok_or_else(|| AppError::MissingRequiredProperty {
                node: self.label(id),
                expected: name,
            })
    }

    /// Returns the `items` of an array node, creating an anonymous `array`
    /// node for it when absent.
    pub fn ensure_items(&mut self, id: NodeId) -> NodeId {
        if let Some(items) = self.node(id).items {
            return items;
        }
        let items = self.add_node(SchemaNode::array(None));
        self.node_mut(id).items = Some(items);
        items
    }

    /// Removes every `oneOf` branch that points back at its own node.
    ///
    /// Returns the number of branches removed.
    pub fn strip_self_union_branches(&mut self) -> usize {
        let mut removed = 0;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            let before = node.one_of.len();
            node.one_of.retain(|branch| branch.0 != index);
            removed += before - node.one_of.len();
        }
        removed
    }
}
