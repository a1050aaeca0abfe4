#![deny(missing_docs)]

//! # Registration
//!
//! Host-facing wiring: an options object holding the generator, its options
//! and the document filters that run once the initial graph exists.

use crate::config::{CompositionStrategy, GeneratorOptions};
use crate::enrich::enrich_geojson_schemas;
use crate::error::AppResult;
use crate::generator::{DefaultSchemaGenerator, SchemaGenerator};
use crate::graph::SchemaGraph;
use crate::kinds::GeoJsonType;
use tracing::debug;

/// What a document filter may use besides the graph itself.
pub struct DocumentFilterContext<'a> {
    /// Generator for schemas the graph lacks.
    pub generator: &'a dyn SchemaGenerator,
    /// Options the graph was generated with.
    pub options: &'a GeneratorOptions,
}

/// A pass run over the complete schema graph of a document build.
pub trait DocumentFilter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Mutates the graph in place.
    fn apply(&self, graph: &mut SchemaGraph, context: &DocumentFilterContext<'_>) -> AppResult<()>;
}

/// Document filter bringing the GeoJSON schemas in line with RFC 7946.
///
/// Reads the composition strategy from the context at apply time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonDocumentFilter;

impl DocumentFilter for GeoJsonDocumentFilter {
    fn name(&self) -> &str {
        "geojson"
    }

    fn apply(&self, graph: &mut SchemaGraph, context: &DocumentFilterContext<'_>) -> AppResult<()> {
        enrich_geojson_schemas(graph, context.generator, context.options).map(|_| ())
    }
}

/// Schema generation settings of one host.
pub struct SchemaGenOptions {
    /// Options shared by generator and filters.
    pub generator_options: GeneratorOptions,
    generator: Box<dyn SchemaGenerator>,
    document_filters: Vec<Box<dyn DocumentFilter>>,
}

impl Default for SchemaGenOptions {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl SchemaGenOptions {
    /// Options using [`DefaultSchemaGenerator`] and no filters.
    pub fn new(generator_options: GeneratorOptions) -> Self {
        Self {
            generator_options,
            generator: Box::new(DefaultSchemaGenerator),
            document_filters: Vec::new(),
        }
    }

    /// Replaces the schema generator.
    pub fn with_generator(mut self, generator: impl SchemaGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Sets the composition strategy from the generator's two switches.
    ///
    /// Fails with [`crate::AppError::AmbiguousCompositionStrategy`] when both are set.
    pub fn composition_flags(
        &mut self,
        use_all_of_for_inheritance: bool,
        use_one_of_for_polymorphism: bool,
    ) -> AppResult<&mut Self> {
        self.generator_options.composition = CompositionStrategy::from_flags(
            use_all_of_for_inheritance,
            use_one_of_for_polymorphism,
        )?;
        Ok(self)
    }

    /// Registers a filter to run after generation, after those already registered.
    pub fn document_filter(&mut self, filter: impl DocumentFilter + 'static) -> &mut Self {
        self.document_filters.push(Box::new(filter));
        self
    }

    /// Names of the registered filters, in run order.
    pub fn document_filter_names(&self) -> Vec<&str> {
        self.document_filters.iter().map(|f| f.name()).collect()
    }

    /// Prefers union composition for polymorphic types and registers the
    /// GeoJSON document filter.
    pub fn add_geojson_schemas(&mut self) -> &mut Self {
        self.generator_options.composition = CompositionStrategy::UnionComposition;
        self.document_filter(GeoJsonDocumentFilter)
    }

    /// Runs every registered filter over `graph`, stopping at the first error.
    pub fn apply_document_filters(&self, graph: &mut SchemaGraph) -> AppResult<()> {
        let context = DocumentFilterContext {
            generator: self.generator.as_ref(),
            options: &self.generator_options,
        };
        for filter in &self.document_filters {
            debug!(filter = filter.name(), "applying document filter");
            filter.apply(graph, &context)?;
        }
        Ok(())
    }

    /// Generates the GeoJSON type family with the configured options.
    ///
    /// Only meaningful with [`DefaultSchemaGenerator`]-like generators; hosts
    /// with their own generator build the graph themselves.
    pub fn generate_geojson_graph(&self) -> AppResult<SchemaGraph> {
        let mut graph = SchemaGraph::new();
        for ty in GeoJsonType::ALL {
            self.generator.generate(ty, &mut graph, &self.generator_options)?;
        }
        Ok(graph)
    }
}
