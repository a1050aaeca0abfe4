#![deny(missing_docs)]

//! # Document Adapter
//!
//! Moves `components/schemas` of an OpenAPI 3.0 document into a
//! [`SchemaGraph`] and back.
//!
//! - `properties`, `items`, `oneOf` and `allOf` become graph edges; a `$ref`
//!   child resolves to the component's node, so shared schemas stay shared.
//! - `type`, `format`, `nullable`, `pattern`, `example`, `minItems` and
//!   `maxItems` become typed fields.
//! - Every other keyword is carried verbatim.
//!
//! On the way out, children that are components are written as `$ref` and
//! anonymous children are written inline.

use crate::error::{AppError, AppResult};
use crate::graph::refs::{component_ref, extract_component_name};
use crate::graph::{NodeId, SchemaGraph, SchemaNode};
use crate::registration::SchemaGenOptions;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

const SCHEMAS_POINTER: &str = "/components/schemas";

/// Text encodings of an OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// Anything else.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    fn parse(self, text: &str) -> AppResult<Value> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        }
    }

    fn render(self, document: &Value) -> AppResult<String> {
        match self {
            DocumentFormat::Json => Ok(serde_json::to_string_pretty(document)?),
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        }
    }
}

/// Builds a graph from a `components/schemas` map.
///
/// Sibling keywords of a `$ref` are ignored, as OpenAPI 3.0 prescribes.
pub fn graph_from_schemas(schemas: &Map<String, Value>) -> AppResult<SchemaGraph> {
    let mut graph = SchemaGraph::new();

    // Reserve every component first so forward and recursive refs resolve.
    let mut pending = Vec::with_capacity(schemas.len());
    for (name, value) in schemas {
        let id = graph.add_component(name.clone(), SchemaNode::default())?;
        pending.push((id, format!("#{}/{}", SCHEMAS_POINTER, name), value));
    }

    for (id, path, value) in pending {
        let node = parse_node(&mut graph, value, &path)?;
        *graph.node_mut(id) = node;
    }
    Ok(graph)
}

fn parse_child(graph: &mut SchemaGraph, value: &Value, path: &str) -> AppResult<NodeId> {
    if let Some(ref_str) = value.get("$ref").and_then(Value::as_str) {
        return extract_component_name(ref_str)
            .and_then(|name| graph.component(&name))
            .ok_or_else(|| AppError::UnresolvedReference(ref_str.to_string()));
    }
    let node = parse_node(graph, value, path)?;
    Ok(graph.add_node(node))
}

fn parse_children(graph: &mut SchemaGraph, value: &Value, path: &str) -> AppResult<Vec<NodeId>> {
    let items = value.as_array().ok_or_else(|| invalid(path, "expected an array of schemas"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_child(graph, item, &format!("{}/{}", path, i)))
        .collect()
}

fn parse_node(graph: &mut SchemaGraph, value: &Value, path: &str) -> AppResult<SchemaNode> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid(path, "expected a schema object"))?;

    // An absent `nullable` means not nullable in a document.
    let mut node = SchemaNode::default().with_nullable(false);
    for (key, v) in map {
        match key.as_str() {
            "type" if v.is_string() => node.schema_type = v.as_str().map(String::from),
            "format" if v.is_string() => node.format = v.as_str().map(String::from),
            "pattern" if v.is_string() => node.pattern = v.as_str().map(String::from),
            "nullable" if v.is_boolean() => node.nullable = v.as_bool() == Some(true),
            "minItems" if v.is_u64() => node.min_items = v.as_u64(),
            "maxItems" if v.is_u64() => node.max_items = v.as_u64(),
            "example" => node.example = Some(v.clone()),
            "items" => {
                node.items = Some(parse_child(graph, v, &format!("{}/items", path))?);
            }
            "properties" => {
                let props = v
                    .as_object()
                    .ok_or_else(|| invalid(path, "properties must be an object"))?;
                for (name, prop) in props {
                    let child = parse_child(graph, prop, &format!("{}/properties/{}", path, name))?;
                    node.properties.insert(name.clone(), child);
                }
            }
            "oneOf" => node.one_of = parse_children(graph, v, &format!("{}/oneOf", path))?,
            "allOf" => node.all_of = parse_children(graph, v, &format!("{}/allOf", path))?,
            _ => {
                node.extensions.insert(key.clone(), v.clone());
            }
        }
    }
    Ok(node)
}

fn invalid(path: &str, reason: &str) -> AppError {
    AppError::InvalidSchema {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Writes the component schemas of `graph` back into a `components/schemas` map.
pub fn write_schemas(graph: &SchemaGraph) -> AppResult<Map<String, Value>> {
    let mut schemas = Map::new();
    for (name, id) in graph.components() {
        let mut stack = vec![id];
        schemas.insert(name.to_string(), write_node(graph, id, &mut stack)?);
    }
    Ok(schemas)
}

fn write_child(graph: &SchemaGraph, id: NodeId, stack: &mut Vec<NodeId>) -> AppResult<Value> {
    if let Some(name) = graph.component_name(id) {
        let mut reference = Map::new();
        reference.insert("$ref".into(), Value::String(component_ref(name)));
        return Ok(Value::Object(reference));
    }
    if stack.contains(&id) {
        return Err(invalid(&graph.label(id), "anonymous schemas form a cycle"));
    }
    stack.push(id);
    let value = write_node(graph, id, stack);
    stack.pop();
    value
}

fn write_node(graph: &SchemaGraph, id: NodeId, stack: &mut Vec<NodeId>) -> AppResult<Value> {
    let node = graph.node(id);
    let mut map = Map::new();

    if let Some(schema_type) = &node.schema_type {
        map.insert("type".into(), Value::String(schema_type.clone()));
    }
    if let Some(format) = &node.format {
        map.insert("format".into(), Value::String(format.clone()));
    }
    if !node.all_of.is_empty() {
        let all_of = node
            .all_of
            .iter()
            .map(|child| write_child(graph, *child, stack))
            .collect::<AppResult<Vec<_>>>()?;
        map.insert("allOf".into(), Value::Array(all_of));
    }
    if !node.properties.is_empty() {
        let mut props = Map::new();
        for (name, child) in &node.properties {
            props.insert(name.clone(), write_child(graph, *child, stack)?);
        }
        map.insert("properties".into(), Value::Object(props));
    }
    if let Some(items) = node.items {
        map.insert("items".into(), write_child(graph, items, stack)?);
    }
    if !node.one_of.is_empty() {
        let one_of = node
            .one_of
            .iter()
            .map(|child| write_child(graph, *child, stack))
            .collect::<AppResult<Vec<_>>>()?;
        map.insert("oneOf".into(), Value::Array(one_of));
    }
    if let Some(min_items) = node.min_items {
        map.insert("minItems".into(), Value::from(min_items));
    }
    if let Some(max_items) = node.max_items {
        map.insert("maxItems".into(), Value::from(max_items));
    }
    if let Some(pattern) = &node.pattern {
        map.insert("pattern".into(), Value::String(pattern.clone()));
    }
    if node.nullable {
        map.insert("nullable".into(), Value::Bool(true));
    }
    if let Some(example) = &node.example {
        map.insert("example".into(), example.clone());
    }
    for (key, value) in &node.extensions {
        map.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(map))
}

/// Loads the document's component schemas, runs the registered document
/// filters and writes the schemas back.
///
/// A document without `components/schemas` is left untouched.
pub fn enrich_openapi_document(document: &mut Value, options: &SchemaGenOptions) -> AppResult<()> {
    let Some(schemas) = document.pointer(SCHEMAS_POINTER).and_then(Value::as_object) else {
        debug!("document has no component schemas");
        return Ok(());
    };

    let mut graph = graph_from_schemas(schemas)?;
    let bound = graph.bind_types(&options.generator_options.type_names);
    debug!(components = schemas.len(), bound, "loaded component schemas");

    options.apply_document_filters(&mut graph)?;

    let written = write_schemas(&graph)?;
    if let Some(slot) = document.pointer_mut(SCHEMAS_POINTER) {
        *slot = Value::Object(written);
    }
    Ok(())
}

fn enrich_text(text: &str, format: DocumentFormat, options: &SchemaGenOptions) -> AppResult<String> {
    let mut document = format.parse(text)?;
    enrich_openapi_document(&mut document, options)?;
    format.render(&document)
}

/// [`enrich_openapi_document`] over JSON text; returns pretty-printed JSON.
pub fn enrich_openapi_json(json: &str, options: &SchemaGenOptions) -> AppResult<String> {
    enrich_text(json, DocumentFormat::Json, options)
}

/// [`enrich_openapi_document`] over YAML text.
pub fn enrich_openapi_yaml(yaml: &str, options: &SchemaGenOptions) -> AppResult<String> {
    enrich_text(yaml, DocumentFormat::Yaml, options)
}

/// Reads a document, enriches it and writes it to `output`.
///
/// Formats follow the file extensions, so a YAML input may be written as JSON.
pub fn enrich_file<P: AsRef<Path>>(input: P, output: P, options: &SchemaGenOptions) -> AppResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let text = fs::read_to_string(input)?;
    let mut document = DocumentFormat::from_path(input).parse(&text)?;
    enrich_openapi_document(&mut document, options)?;
    fs::write(output, DocumentFormat::from_path(output).render(&document)?)?;
    Ok(())
}
