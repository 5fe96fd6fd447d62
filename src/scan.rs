//! Content directory scanning and manifest generation.
//!
//! Walks a content directory and turns it into a page tree, written as a JSON
//! manifest that every other command reads back.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                        # Site root (node 0)
//! ├── config.toml                 # Site configuration (optional)
//! ├── 010-Mercado-Electrico/      # Case
//! │   ├── ficha.md                # Ficha text (ficha.txt as fallback)
//! │   ├── video.txt               # Video URL for the case modal
//! │   ├── documents.toml          # Document list
//! │   ├── enunciado.pdf           # Uploaded file referenced from documents.toml
//! │   ├── 010-Demanda/            # Question
//! │   │   ├── question.md         # Question statement (question.txt as fallback)
//! │   │   └── embed.txt           # Interactive question reference
//! │   └── 020-Oferta/
//! └── borrador/                   # Unnumbered: kept, sorted after numbered siblings
//! ```
//!
//! ## Document List
//!
//! ```toml
//! [[document]]
//! kind = "PDF"
//! name = "Enunciado"
//! file = "enunciado.pdf"          # relative to the case directory
//!
//! [[document]]
//! kind = "ENLACE WEB"
//! name = "Operador del sistema"
//! link = "https://www.ree.es"
//! ```
//!
//! ## Ids
//!
//! The root is node 0. Every directory gets the next id in a depth-first walk
//! over siblings sorted by `(prefix, name)`, so rescanning unchanged content
//! yields the same ids.
//!
//! Only directories become nodes. Hidden entries and other files are ignored.

use crate::config::{self, SiteConfig};
use crate::metadata;
use crate::naming::{ParsedName, parse_entry_name};
use crate::tree::{MemoryTree, TreeError};
use crate::types::{Fields, Node, NodeId, RawDocumentEntry, fields};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Id of the site root node.
pub const ROOT_ID: NodeId = NodeId(0);

const FICHA_FILES: &[&str] = &["ficha.md", "ficha.txt"];
const QUESTION_FILES: &[&str] = &["question.md", "question.txt"];
const VIDEO_FILE: &str = "video.txt";
const EMBED_FILE: &str = "embed.txt";
const DOCUMENTS_FILE: &str = "documents.toml";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid document list {0}: {1}")]
    Documents(PathBuf, toml::de::Error),
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub root: NodeId,
    pub nodes: Vec<Node>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Rebuild the page tree from the flat node list.
    pub fn tree(&self) -> Result<MemoryTree, TreeError> {
        MemoryTree::from_nodes(self.nodes.clone())
    }
}

/// Siblings sharing a sort order. Ordering still works (ties go by id) but
/// the author probably meant something else.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateOrder {
    pub parent: PathBuf,
    pub sort_order: i64,
    pub titles: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentsFile {
    #[serde(default)]
    document: Vec<DocumentRow>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRow {
    kind: String,
    #[serde(default)]
    name: String,
    file: Option<String>,
    link: Option<String>,
}

/// Scan a content directory into a manifest.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    scan_with_report(root).map(|(manifest, _)| manifest)
}

/// Scan and also report siblings that share a sort order.
pub fn scan_with_report(root: &Path) -> Result<(Manifest, Vec<DuplicateOrder>), ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let config = config::load_config(root)?;
    let mut nodes = vec![Node {
        id: ROOT_ID,
        parent_id: None,
        title: config.site_title.clone(),
        sort_order: 0,
        fields: Fields::new(),
    }];
    let mut duplicates = Vec::new();
    let mut next_id = ROOT_ID.0 + 1;

    scan_directory(
        root,
        root,
        ROOT_ID,
        1,
        &mut next_id,
        &mut nodes,
        &mut duplicates,
    )?;

    // Round-trip through the tree to check ids and parent links.
    let tree = MemoryTree::from_nodes(nodes)?;
    info!(nodes = tree.len(), root = %root.display(), "scanned content");

    Ok((
        Manifest {
            root: ROOT_ID,
            nodes: tree.into_nodes(),
            config,
        },
        duplicates,
    ))
}

/// Scan and build the page tree in one step.
///
/// View commands go through here on every run so that a renamed or
/// reordered directory is picked up without an explicit rescan.
pub fn scan_tree(root: &Path) -> Result<(Manifest, MemoryTree), ScanError> {
    let manifest = scan(root)?;
    let tree = manifest.tree()?;
    Ok((manifest, tree))
}

/// Read a manifest written by a previous scan.
pub fn load_manifest(path: &Path) -> Result<Manifest, ScanError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn scan_directory(
    path: &Path,
    root: &Path,
    parent: NodeId,
    depth: usize,
    next_id: &mut u64,
    nodes: &mut Vec<Node>,
    duplicates: &mut Vec<DuplicateOrder>,
) -> Result<(), ScanError> {
    let mut subdirs: Vec<(ParsedName, PathBuf)> = collect_subdirs(path)?
        .into_iter()
        .map(|dir| (parse_entry_name(&entry_name(&dir)), dir))
        .collect();
    subdirs.sort_by(|(a, a_path), (b, b_path)| {
        (a.sort_order(), a_path).cmp(&(b.sort_order(), b_path))
    });

    if let Some(dup) = find_duplicate_orders(path, root, &subdirs) {
        duplicates.extend(dup);
    }

    for (parsed, dir) in subdirs {
        let id = NodeId(*next_id);
        *next_id += 1;

        let fields = read_fields(&dir, root, depth)?;
        debug!(id = %id, title = %parsed.title, depth, "found node");
        nodes.push(Node {
            id,
            parent_id: Some(parent),
            title: parsed.title.clone(),
            sort_order: parsed.sort_order(),
            fields,
        });

        scan_directory(&dir, root, id, depth + 1, next_id, nodes, duplicates)?;
    }

    Ok(())
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn collect_subdirs(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !entry_name(p).starts_with('.'))
        .collect();

    entries.sort();
    Ok(entries)
}

/// Numbered siblings sharing a prefix. Unnumbered entries share
/// [`UNNUMBERED`](crate::naming::UNNUMBERED) on purpose and are not reported.
fn find_duplicate_orders(
    path: &Path,
    root: &Path,
    subdirs: &[(ParsedName, PathBuf)],
) -> Option<Vec<DuplicateOrder>> {
    let mut by_order: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for (parsed, _) in subdirs {
        if let Some(number) = parsed.number {
            by_order.entry(number).or_default().push(parsed.title.clone());
        }
    }

    let parent = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let found: Vec<DuplicateOrder> = by_order
        .into_iter()
        .filter(|(_, titles)| titles.len() > 1)
        .map(|(sort_order, titles)| {
            warn!(
                parent = %parent.display(),
                sort_order,
                ?titles,
                "siblings share a sort order, ordering them by id"
            );
            DuplicateOrder {
                parent: parent.clone(),
                sort_order,
                titles,
            }
        })
        .collect();

    (!found.is_empty()).then_some(found)
}

/// Depth 1 directories are cases; anything deeper reads question sidecars.
fn read_fields(dir: &Path, root: &Path, depth: usize) -> Result<Fields, ScanError> {
    let mut out = Fields::new();

    if depth == 1 {
        if let Some(text) = metadata::read_sidecar(dir, FICHA_FILES) {
            out.insert(fields::DESCRIPTION.into(), text.into());
        }
        if let Some(video) = metadata::read_sidecar(dir, &[VIDEO_FILE]) {
            out.insert(fields::VIDEO.into(), video.into());
        }
        let documents = read_documents(dir, root)?;
        if !documents.is_empty() {
            out.insert(fields::DOCUMENTS.into(), serde_json::to_value(documents)?);
        }
    } else {
        if let Some(text) = metadata::read_sidecar(dir, QUESTION_FILES) {
            out.insert(fields::DESCRIPTION.into(), text.into());
        }
        if let Some(embed) = metadata::read_sidecar(dir, &[EMBED_FILE]) {
            out.insert(fields::EMBED.into(), embed.into());
        }
    }

    Ok(out)
}

/// Parse `documents.toml` into raw rows.
///
/// `file` entries are relative to the case directory and become paths
/// relative to the content root; absolute URLs are kept as written.
fn read_documents(dir: &Path, root: &Path) -> Result<Vec<RawDocumentEntry>, ScanError> {
    let path = dir.join(DOCUMENTS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)?;
    let parsed: DocumentsFile =
        toml::from_str(&content).map_err(|e| ScanError::Documents(path.clone(), e))?;

    let rel_dir = dir.strip_prefix(root).unwrap_or(dir);
    Ok(parsed
        .document
        .into_iter()
        .map(|row| RawDocumentEntry {
            kind: row.kind,
            name: row.name,
            uploaded_url: row
                .file
                .filter(|f| !f.trim().is_empty())
                .map(|f| file_url(rel_dir, f.trim())),
            external_url: row.link,
        })
        .collect())
}

fn file_url(rel_dir: &Path, file: &str) -> String {
    if file.contains("://") || file.starts_with('/') {
        file.to_string()
    } else {
        let joined = rel_dir.join(file);
        joined
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::tree::PageTree;
    use crate::types::DocumentKind;
    use tempfile::TempDir;

    #[test]
    fn scan_builds_root_cases_and_questions() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let tree = manifest.tree().unwrap();

        assert_eq!(manifest.root, ROOT_ID);
        assert_eq!(
            child_titles(&tree, ROOT_ID),
            vec!["Mercado Electrico", "Cambio Climatico", "borrador"]
        );
    }

    #[test]
    fn questions_ordered_by_prefix() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Mercado Electrico");
        assert_eq!(
            child_titles(&tree, case.id),
            vec!["Demanda", "Oferta", "Equilibrio"]
        );
    }

    #[test]
    fn ids_are_depth_first() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Mercado Electrico");
        assert_eq!(case.id, NodeId(1));
        let first = find_node(&tree, case.id, "Demanda");
        assert_eq!(first.id, NodeId(2));
    }

    #[test]
    fn rescan_is_stable() {
        let tmp = setup_content();
        let a = scan(tmp.path()).unwrap();
        let b = scan(tmp.path()).unwrap();
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn unnumbered_sorts_last() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let draft = find_node(&tree, ROOT_ID, "borrador");
        assert_eq!(draft.sort_order, crate::naming::UNNUMBERED);
    }

    #[test]
    fn root_title_from_config() {
        let tmp = setup_content();
        fs::write(tmp.path().join("config.toml"), "site_title = \"Casos UPV\"").unwrap();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        assert_eq!(tree.get_node(ROOT_ID).unwrap().title, "Casos UPV");
    }

    #[test]
    fn case_fields_read_from_sidecars() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Mercado Electrico");

        assert_eq!(
            case.text_field(fields::DESCRIPTION),
            Some("Oferta y demanda de energía.")
        );
        assert_eq!(
            case.text_field(fields::VIDEO),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn ficha_txt_fallback() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Cambio Climatico");
        assert_eq!(case.text_field(fields::DESCRIPTION), Some("Solo texto."));
    }

    #[test]
    fn question_fields_read_from_sidecars() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Mercado Electrico");
        let q = find_node(&tree, case.id, "Oferta");
        assert_eq!(q.text_field(fields::DESCRIPTION), Some("¿Qué desplaza la curva?"));
        assert_eq!(q.text_field(fields::EMBED), Some("quiz-12"));
    }

    #[test]
    fn documents_parsed_with_relative_file_urls() {
        let tmp = setup_content();
        let tree = scan(tmp.path()).unwrap().tree().unwrap();
        let case = find_node(&tree, ROOT_ID, "Mercado Electrico");
        let docs = crate::documents::documents_of(&tree, case.id, &Default::default());

        let summary: Vec<(DocumentKind, &str)> = docs
            .iter()
            .map(|d| (d.kind.clone(), d.resolved_url.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (DocumentKind::Pdf, "010-Mercado-Electrico/enunciado.pdf"),
                (DocumentKind::WebLink, "https://www.ree.es"),
                (DocumentKind::Word, "#"),
            ]
        );
    }

    #[test]
    fn invalid_documents_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let case = tmp.path().join("010-Caso");
        fs::create_dir_all(&case).unwrap();
        fs::write(case.join("documents.toml"), "[[document]]\nname = \"sin tipo\"").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::Documents(_, _))));
    }

    #[test]
    fn hidden_dirs_and_files_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        fs::create_dir_all(tmp.path().join("010-Caso")).unwrap();
        fs::write(tmp.path().join("notas.md"), "ignorado").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.nodes.len(), 2);
    }

    #[test]
    fn duplicate_prefixes_reported() {
        let tmp = TempDir::new().unwrap();
        let case = tmp.path().join("010-Caso");
        fs::create_dir_all(case.join("010-Uno")).unwrap();
        fs::create_dir_all(case.join("010-Dos")).unwrap();
        fs::create_dir_all(case.join("sin-numero")).unwrap();
        fs::create_dir_all(case.join("otro")).unwrap();

        let (manifest, duplicates) = scan_with_report(tmp.path()).unwrap();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].sort_order, 10);
        assert_eq!(duplicates[0].parent, PathBuf::from("010-Caso"));
        assert_eq!(duplicates[0].titles, vec!["Dos", "Uno"]);

        // Ties are still ordered: by path, which gave "Dos" the lower id
        let tree = manifest.tree().unwrap();
        let case_node = find_node(&tree, ROOT_ID, "Caso");
        assert_eq!(
            child_titles(&tree, case_node.id),
            vec!["Dos", "Uno", "otro", "sin numero"]
        );
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let path = tmp.path().join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded.nodes, manifest.nodes);
        assert_eq!(loaded.config, manifest.config);
    }

    #[test]
    fn scan_tree_sees_reordered_directories() {
        let tmp = TempDir::new().unwrap();
        let case = tmp.path().join("010-Caso");
        fs::create_dir_all(case.join("010-Uno")).unwrap();
        fs::create_dir_all(case.join("020-Dos")).unwrap();

        let (_, before) = scan_tree(tmp.path()).unwrap();
        let case_id = find_node(&before, ROOT_ID, "Caso").id;
        assert_eq!(child_titles(&before, case_id), vec!["Uno", "Dos"]);

        fs::rename(case.join("020-Dos"), case.join("005-Dos")).unwrap();

        let (_, after) = scan_tree(tmp.path()).unwrap();
        assert_eq!(child_titles(&after, case_id), vec!["Dos", "Uno"]);
    }

    #[test]
    fn file_url_keeps_absolute_urls() {
        let dir = Path::new("010-Caso");
        assert_eq!(file_url(dir, "https://x/y.pdf"), "https://x/y.pdf");
        assert_eq!(file_url(dir, "/uploads/y.pdf"), "/uploads/y.pdf");
        assert_eq!(file_url(dir, "y.pdf"), "010-Caso/y.pdf");
    }
}
