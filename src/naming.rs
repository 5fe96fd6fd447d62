//! The `NNN-name` convention for content directories.
//!
//! Cases and questions are directories whose names carry their ordering:
//! an optional numeric prefix (`NNN-`) followed by a name. The prefix becomes
//! the node's `sort_order`; the rest becomes its title.
//!
//! - `010-Mercado-Electrico/` → sort 10, "Mercado Electrico"
//! - `020-Oferta/` → sort 20, "Oferta"
//! - `borrador/` → unnumbered, "borrador" (sorted after every numbered sibling)

/// Sort order given to entries without a numeric prefix.
pub const UNNUMBERED: i64 = i64::MAX;

/// Result of parsing a directory name like `010-Mercado-Electrico`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Numeric prefix, if present.
    pub number: Option<i64>,
    /// Title: the name part with dashes turned into spaces. Falls back to the
    /// raw input for number-only names so a node is never untitled.
    pub title: String,
}

impl ParsedName {
    /// Sort key: the prefix, or [`UNNUMBERED`].
    pub fn sort_order(&self) -> i64 {
        self.number.unwrap_or(UNNUMBERED)
    }
}

/// Parse a directory name following the `NNN-name` convention.
///
/// - `"010-Mercado-Electrico"` → number=Some(10), title="Mercado Electrico"
/// - `"005"` / `"005-"` → number=Some(5), title="005"
/// - `"borrador-final"` → number=None, title="borrador final"
pub fn parse_entry_name(name: &str) -> ParsedName {
    let (prefix, rest) = match name.split_once('-') {
        Some((prefix, rest)) => (prefix, Some(rest)),
        None => (name, None),
    };

    let number = if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix.parse::<i64>().ok()
    } else {
        None
    };

    let title_source = match rest {
        Some(rest) if number.is_some() && !rest.is_empty() => rest,
        _ => name,
    };

    ParsedName {
        number,
        title: title_source.replace('-', " ").trim().to_string(),
    }
}
