//! Document manifest resolution.
//!
//! Turns a case's authored document rows into render-ready descriptors:
//!
//! - **URL**: uploaded file, else external link, else the placeholder URL
//!   (`"#"` by default). A row mid-edit still renders.
//! - **Icon**: looked up by kind; unknown kinds render with the name only.
//! - **Order**: output order is input order. Authors control it.
//!
//! Resolution never fails. Rows that cannot even be parsed out of the
//! `documents` field are skipped with a warning so the rest of the list
//! still shows.

use crate::config::DocumentsConfig;
use crate::metadata;
use crate::tree::PageTree;
use crate::types::{DocumentDescriptor, DocumentKind, NodeId, RawDocumentEntry, fields};
use tracing::{debug, warn};

/// Resolve raw document rows using the stock document settings.
pub fn resolve(raw_documents: &[RawDocumentEntry]) -> Vec<DocumentDescriptor> {
    resolve_with(raw_documents, &DocumentsConfig::default())
}

/// Resolve raw document rows with explicit settings.
pub fn resolve_with(
    raw_documents: &[RawDocumentEntry],
    config: &DocumentsConfig,
) -> Vec<DocumentDescriptor> {
    raw_documents
        .iter()
        .map(|entry| resolve_entry(entry, config))
        .collect()
}

fn resolve_entry(entry: &RawDocumentEntry, config: &DocumentsConfig) -> DocumentDescriptor {
    let kind = DocumentKind::from_tag(&entry.kind);
    let resolved_url = metadata::resolve(&[
        entry.uploaded_url.as_deref(),
        entry.external_url.as_deref(),
    ])
    .unwrap_or_else(|| {
        debug!(name = %entry.name, "document has no file or link, using placeholder");
        config.placeholder_url.clone()
    });
    let icon = config.icons.icon_for(&kind).map(String::from);

    DocumentDescriptor {
        display_name: entry.name.trim().to_string(),
        kind,
        resolved_url,
        icon,
    }
}

/// Read the raw document rows stored on a node's `documents` field.
///
/// A missing node or field yields an empty list. A field that is not an
/// array, or rows that do not parse, are skipped with a warning.
pub fn raw_documents_of<T: PageTree + ?Sized>(tree: &T, case_id: NodeId) -> Vec<RawDocumentEntry> {
    let Some(value) = tree
        .get_fields(case_id)
        .and_then(|mut f| f.remove(fields::DOCUMENTS))
    else {
        return Vec::new();
    };

    let serde_json::Value::Array(rows) = value else {
        warn!(case = %case_id, "documents field is not a list, ignoring");
        return Vec::new();
    };

    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value::<RawDocumentEntry>(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(case = %case_id, row = i, error = %e, "skipping malformed document row");
                None
            }
        })
        .collect()
}

/// Resolved documents of a case, in authored order.
pub fn documents_of<T: PageTree + ?Sized>(
    tree: &T,
    case_id: NodeId,
    config: &DocumentsConfig,
) -> Vec<DocumentDescriptor> {
    resolve_with(&raw_documents_of(tree, case_id), config)
}
