//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use crate::kinds::PropertyName;
use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Contract violations of the upstream generator (a present schema missing a
/// property it must have) are distinct variants so hosts can tell them apart
/// from malformed input documents.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A schema the generator produced lacks a property every schema of its kind must carry.
    #[from(ignore)]
    #[display("Schema '{node}' has no property named '{expected}' (case-insensitive)")]
    MissingRequiredProperty {
        /// Component name (or anonymous label) of the offending schema.
        node: String,
        /// The property that was looked up.
        expected: PropertyName,
    },

    /// An array schema that must describe its elements has no `items`.
    #[from(ignore)]
    #[display("Array schema '{node}' has no items schema")]
    MissingArrayItems {
        /// Component name (or anonymous label) of the offending schema.
        node: String,
    },

    /// A `$ref` that does not point at a schema of the current document.
    #[from(ignore)]
    #[display("Unresolved schema reference: {_0}")]
    UnresolvedReference(String),

    /// A schema value that cannot be represented in the graph.
    #[from(ignore)]
    #[display("Invalid schema at '{path}': {reason}")]
    InvalidSchema {
        /// JSON Pointer-ish location of the schema.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Both inheritance and union composition were requested at once.
    #[from(ignore)]
    #[display("Ambiguous composition strategy: inheritance and union composition are both enabled")]
    AmbiguousCompositionStrategy,

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
