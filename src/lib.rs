//! # Estudio de Casos
//!
//! Content model for a teaching case-study site. A site root holds ordered
//! **cases**; each case holds ordered **questions** and a **ficha**: a
//! summary, an optional video, and a list of supporting documents.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      content/   →  page tree       (filesystem → nodes)
//! 2. Derive    page tree  →  views           (navigation, documents, ficha)
//! ```
//!
//! Everything after the scan is a pure function of the page tree. Nothing is
//! cached between calls: sibling order can change between two requests, so
//! the CLI rescans the content directory for every view and navigation is
//! rebuilt from the tree every time. `manifest.json` is an export of the scan,
//! never read back by the view commands.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | `PageTree` trait (read-only repository) and the in-memory `MemoryTree` |
//! | [`navigator`] | Ordered questions of a case, current position, prev/next, page strip |
//! | [`documents`] | Raw document rows → descriptors (URL precedence, icons, stable order) |
//! | [`views`] | Catalog, ficha and question page views; video embed URLs |
//! | [`carousel`] | Clamped, non-wrapping cursor for the case carousel |
//! | [`scan`] | Content directory → manifest |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`types`] | Shared types: `Node`, `NodeId`, document types, field names |
//! | [`naming`] | `NNN-name` directory convention |
//! | [`metadata`] | First-non-empty field resolution and sidecar files |
//! | [`output`] | CLI text formatting |
//!
//! # Design Decisions
//!
//! ## Explicit ids, no ambient "current page"
//!
//! Every operation takes the case id and the current question id as
//! arguments. There is no global current page and no request-scoped counter.
//!
//! ## Degrade, don't fail
//!
//! A question that does not belong to its case renders with disabled
//! previous/next controls ([`navigator::NavigationState::NotFound`]). A
//! document row with no file and no link points at a placeholder URL. An
//! unknown document type renders without an icon. Only a missing case is an
//! error, and callers show an empty state for it.
//!
//! ## Deterministic ordering
//!
//! Siblings are ordered by `sort_order`, then by id. Two questions sharing a
//! sort order still have a stable sequence; `check` reports them.

pub mod carousel;
pub mod config;
pub mod documents;
pub mod metadata;
pub mod naming;
pub mod navigator;
pub mod output;
pub mod scan;
pub mod tree;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;
