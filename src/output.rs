//! CLI output formatting.
//!
//! Every entity is shown as a positional index plus its title, with ids and
//! extra detail on indented context lines:
//!
//! ```text
//! Cases
//! 001 Mercado Eléctrico (3 questions)
//!     Id: 1
//!     001 Demanda
//!     002 Oferta
//!     003 Equilibrio
//! 002 Caso Vacío (0 questions)
//!     Id: 2
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*`
//! wrappers write them to stdout.

use crate::navigator::{self, NavigationState, PageLink};
use crate::tree::PageTree;
use crate::types::{DocumentDescriptor, NodeId};
use crate::views::{CarouselPage, CaseSummary, Ficha, QuestionView};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max && first_line.len() == text.len() {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Catalog / scan
// ============================================================================

/// Case inventory under the site root: each case with its questions.
pub fn format_catalog<T: PageTree + ?Sized>(tree: &T, cases: &[CaseSummary]) -> Vec<String> {
    let mut lines = vec!["Cases".to_string()];
    if cases.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, case) in cases.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            case.title,
            plural(case.question_count, "question", "questions")
        ));
        lines.push(format!("{}Id: {}", indent(1), case.id));
        // Same order the question pages navigate in
        let question_ids = navigator::build(tree, case.id)
            .map(|ctx| ctx.question_ids)
            .unwrap_or_default();
        let questions = question_ids.into_iter().filter_map(|id| tree.get_node(id));
        for (j, question) in questions.enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                question.title
            ));
        }
    }
    lines
}

pub fn print_catalog<T: PageTree + ?Sized>(tree: &T, cases: &[CaseSummary]) {
    for line in format_catalog(tree, cases) {
        println!("{}", line);
    }
}

/// Carousel window: a position header, then the visible cards.
///
/// ```text
/// Cases 2-3 of 5  ‹ ›
/// 002 Cambio Climático (1 question)
/// ```
pub fn format_carousel(page: &CarouselPage) -> Vec<String> {
    let arrows = format!(
        "{} {}",
        if page.has_prev { "‹" } else { " " },
        if page.has_next { "›" } else { " " }
    );
    let header = if page.cards.is_empty() {
        "Cases (none)".to_string()
    } else {
        format!(
            "Cases {}-{} of {}  {}",
            page.index + 1,
            page.index + page.cards.len(),
            page.total,
            arrows.trim_end()
        )
    };
    let mut lines = vec![header];
    for (i, card) in page.cards.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(page.index + i + 1),
            card.title,
            plural(card.question_count, "question", "questions")
        ));
    }
    lines
}

pub fn print_carousel(page: &CarouselPage) {
    for line in format_carousel(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Documents
// ============================================================================

/// One line per document: index, kind, name, then the URL as context.
pub fn format_documents(documents: &[DocumentDescriptor]) -> Vec<String> {
    let mut lines = Vec::new();
    if documents.is_empty() {
        lines.push(format!("{}(no documents)", indent(1)));
    }
    for (i, doc) in documents.iter().enumerate() {
        let name = if doc.display_name.is_empty() {
            "(untitled)"
        } else {
            doc.display_name.as_str()
        };
        let icon = doc
            .icon
            .as_deref()
            .map(|icon| format!(" [{icon}]"))
            .unwrap_or_default();
        lines.push(format!(
            "{} {} {}{}",
            format_index(i + 1),
            doc.kind.label(),
            name,
            icon
        ));
        lines.push(format!("{}{}", indent(1), doc.resolved_url));
    }
    lines
}

pub fn print_documents(documents: &[DocumentDescriptor]) {
    for line in format_documents(documents) {
        println!("{}", line);
    }
}

// ============================================================================
// Ficha
// ============================================================================

pub fn format_ficha(ficha: &Ficha) -> Vec<String> {
    let mut lines = vec![ficha.title.clone()];
    lines.push(format!("{}Id: {}", indent(1), ficha.case_id));
    if let Some(desc) = &ficha.description {
        lines.push(format!("{}Ficha: {}", indent(1), truncate_desc(desc, 60)));
    }
    if let Some(video) = &ficha.video_embed {
        lines.push(format!("{}Video: {}", indent(1), video));
    }
    lines.push(format!(
        "{}Questions: {}",
        indent(1),
        join_ids(&ficha.questions.question_ids)
    ));
    lines.push(String::new());
    lines.push("Documents".to_string());
    lines.extend(format_documents(&ficha.documents));
    lines
}

pub fn print_ficha(ficha: &Ficha) {
    for line in format_ficha(ficha) {
        println!("{}", line);
    }
}

// ============================================================================
// Question navigation
// ============================================================================

fn join_ids(ids: &[NodeId]) -> String {
    if ids.is_empty() {
        return "(none)".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The pagination strip, with the active page in brackets: `1 [2] 3`.
pub fn format_pages(pages: &[PageLink]) -> String {
    pages
        .iter()
        .map(|p| {
            if p.active {
                format!("[{}]", p.number)
            } else {
                p.number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_navigation(state: &NavigationState) -> Vec<String> {
    let link = |id: Option<NodeId>| id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match state.position() {
        Some(position) => vec![
            format!("Position: {}", position + 1),
            format!("{}Previous: {}", indent(1), link(state.prev())),
            format!("{}Next: {}", indent(1), link(state.next())),
        ],
        None => vec![format!(
            "Position: not in this case (question {})",
            state.current_id()
        )],
    }
}

pub fn format_question(view: &QuestionView) -> Vec<String> {
    let mut lines = vec![format!("{} › {}", view.case_title, view.title)];
    lines.push(format!("{}Id: {}", indent(1), view.id));
    if let Some(desc) = &view.description {
        lines.push(format!("{}Statement: {}", indent(1), truncate_desc(desc, 60)));
    }
    if let Some(embed) = &view.embed {
        lines.push(format!("{}Embed: {}", indent(1), embed));
    }
    lines.push(format!("Pages: {}", format_pages(&view.pages)));
    lines.extend(format_navigation(&view.navigation));
    lines
}

pub fn print_question(view: &QuestionView) {
    for line in format_question(view) {
        println!("{}", line);
    }
}
