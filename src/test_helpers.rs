//! Shared test utilities.
//!
//! Two fixtures cover most tests:
//!
//! - [`case_tree`]: a hand-built in-memory tree with fixed ids, for navigator
//!   and view tests that care about exact ids.
//! - [`setup_content`]: a content directory on disk, for scanner tests.
//!
//! ```rust
//! let tree = case_tree();
//! let ctx = navigator::build(&tree, NodeId(1)).unwrap();
//! assert_eq!(ctx.question_ids, vec![NodeId(11), NodeId(12), NodeId(13)]);
//! ```

use serde_json::json;
use std::fs;
use tempfile::TempDir;

use crate::navigator;
use crate::tree::{MemoryTree, PageTree};
use crate::types::{Node, NodeId, fields};

// =========================================================================
// In-memory fixture
// =========================================================================

/// Root 0 with two cases.
///
/// ```text
/// 0 Estudio de Casos
/// ├── 1 Mercado Eléctrico (sort 10): ficha, video, 3 documents
/// │   ├── 11 Demanda (sort 1)
/// │   │   └── 111 Nota (sort 1)
/// │   ├── 12 Oferta (sort 2): embed "quiz-12"
/// │   └── 13 Equilibrio (sort 3)
/// └── 2 Caso Vacío (sort 20)
/// ```
///
/// Nodes are inserted out of order so tests exercise sorting.
pub fn case_tree() -> MemoryTree {
    MemoryTree::from_nodes(vec![
        Node::new(13, Some(1), "Equilibrio", 3),
        Node::new(2, Some(0), "Caso Vacío", 20),
        Node::new(11, Some(1), "Demanda", 1)
            .with_field(fields::DESCRIPTION, json!("¿Qué mueve la demanda?")),
        Node::new(0, None, "Estudio de Casos", 0),
        Node::new(111, Some(11), "Nota", 1),
        Node::new(12, Some(1), "Oferta", 2).with_field(fields::EMBED, json!("quiz-12")),
        Node::new(1, Some(0), "Mercado Eléctrico", 10)
            .with_field(fields::DESCRIPTION, json!("Oferta y demanda de energía."))
            .with_field(fields::VIDEO, json!("https://www.youtube.com/watch?v=abc123"))
            .with_field(
                fields::DOCUMENTS,
                json!([
                    {"kind": "PDF", "name": "Enunciado", "uploaded_url": "f.pdf"},
                    {"kind": "ENLACE WEB", "name": "Fuente", "external_url": "http://x"},
                    {"kind": "WORD", "name": "Plantilla"},
                ]),
            ),
    ])
    .unwrap()
}

// =========================================================================
// On-disk fixture
// =========================================================================

/// Write a small content directory to a temp dir and return it.
///
/// ```text
/// 010-Mercado-Electrico/   ficha.md, video.txt, documents.toml, enunciado.pdf
///     010-Demanda/         question.md
///     020-Oferta/          question.md, embed.txt
///     030-Equilibrio/
/// 020-Cambio-Climatico/    ficha.txt
///     010-Emisiones/
/// borrador/
/// ```
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let case = root.join("010-Mercado-Electrico");
    fs::create_dir_all(case.join("010-Demanda")).unwrap();
    fs::create_dir_all(case.join("020-Oferta")).unwrap();
    fs::create_dir_all(case.join("030-Equilibrio")).unwrap();
    fs::write(case.join("ficha.md"), "Oferta y demanda de energía.\n").unwrap();
    fs::write(case.join("video.txt"), "https://www.youtube.com/watch?v=abc123\n").unwrap();
    fs::write(case.join("enunciado.pdf"), "fake pdf").unwrap();
    fs::write(
        case.join("documents.toml"),
        r#"
[[document]]
kind = "PDF"
name = "Enunciado"
file = "enunciado.pdf"

[[document]]
kind = "ENLACE WEB"
name = "Operador del sistema"
link = "https://www.ree.es"

[[document]]
kind = "WORD"
name = "Plantilla de respuesta"
"#,
    )
    .unwrap();
    fs::write(case.join("010-Demanda/question.md"), "¿Qué mueve la demanda?").unwrap();
    fs::write(case.join("020-Oferta/question.md"), "¿Qué desplaza la curva?").unwrap();
    fs::write(case.join("020-Oferta/embed.txt"), "quiz-12\n").unwrap();

    let climate = root.join("020-Cambio-Climatico");
    fs::create_dir_all(climate.join("010-Emisiones")).unwrap();
    fs::write(climate.join("ficha.txt"), "Solo texto.").unwrap();

    fs::create_dir_all(root.join("borrador")).unwrap();

    tmp
}

// =========================================================================
// Tree lookups — panic with a clear message on miss
// =========================================================================

/// Titles of `parent`'s children in navigation order.
pub fn child_titles(tree: &MemoryTree, parent: NodeId) -> Vec<String> {
    navigator::build(tree, parent)
        .unwrap_or_else(|e| panic!("cannot list children of {parent}: {e}"))
        .question_ids
        .into_iter()
        .filter_map(|id| tree.get_node(id))
        .map(|n| n.title)
        .collect()
}

/// Find a child of `parent` by title. Panics if not found.
pub fn find_node(tree: &MemoryTree, parent: NodeId, title: &str) -> Node {
    tree.get_children(parent)
        .into_iter()
        .find(|n| n.title == title)
        .unwrap_or_else(|| {
            let titles = child_titles(tree, parent);
            panic!("node '{title}' not found under {parent}. Available: {titles:?}")
        })
}
