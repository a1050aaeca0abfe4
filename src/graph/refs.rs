#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for the `$ref` strings that link component schemas.
//!
//! Only local references (`#/components/schemas/{name}`) are understood; the
//! enrichment never fetches external documents.

use percent_encoding::percent_decode_str;

const SCHEMAS_POINTER: &str = "#/components/schemas/";

/// Builds the local `$ref` for a component schema.
pub(crate) fn component_ref(name: &str) -> String {
    format!("{}{}", SCHEMAS_POINTER, encode_pointer_segment(name))
}

/// Extracts a component name from a `$ref` if it points to `#/components/schemas/{name}`.
///
/// Returns `None` for external references and pointers into other sections.
pub(crate) fn extract_component_name(ref_str: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix('#')?.trim_start_matches('/');
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != "schemas" {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
