//! First-non-empty resolution of content fields.
//!
//! Several fields can come from more than one place. Each is resolved
//! independently, and the first non-blank value in priority order wins:
//!
//! - **Document URL**: uploaded file → external link → placeholder
//! - **Ficha text**: `ficha.md` → `ficha.txt`
//! - **Question text**: `question.md` → `question.txt`
//!
//! Blank and whitespace-only values count as missing, so an author clearing
//! a field in an editor falls through to the next source instead of
//! producing an empty link or an empty paragraph.

use std::path::Path;

/// Return the first non-None, non-blank value, trimmed.
///
/// ```text
/// url:    resolve(&[uploaded_url, external_url])
/// ficha:  resolve(&[ficha_md, ficha_txt])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Read the first non-empty sidecar file among `names` inside `dir`.
///
/// Missing or unreadable files are skipped; the result is trimmed.
pub fn read_sidecar(dir: &Path, names: &[&str]) -> Option<String> {
    let contents: Vec<Option<String>> = names
        .iter()
        .map(|name| std::fs::read_to_string(dir.join(name)).ok())
        .collect();
    let refs: Vec<Option<&str>> = contents.iter().map(|c| c.as_deref()).collect();
    resolve(&refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_source_wins() {
        assert_eq!(
            resolve(&[Some("f.pdf"), Some("http://x")]),
            Some("f.pdf".to_string())
        );
    }

    #[test]
    fn falls_through_missing_source() {
        assert_eq!(resolve(&[None, Some("http://x")]), Some("http://x".to_string()));
    }

    #[test]
    fn blank_counts_as_missing() {
        assert_eq!(resolve(&[Some("   "), Some("b")]), Some("b".to_string()));
        assert_eq!(resolve(&[Some(""), None]), None);
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(resolve(&[Some("  a \n")]), Some("a".to_string()));
    }

    #[test]
    fn empty_sources() {
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn sidecar_markdown_before_text() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ficha.md"), "Desde markdown\n").unwrap();
        fs::write(tmp.path().join("ficha.txt"), "Desde texto").unwrap();
        assert_eq!(
            read_sidecar(tmp.path(), &["ficha.md", "ficha.txt"]),
            Some("Desde markdown".to_string())
        );
    }

    #[test]
    fn sidecar_empty_file_falls_through() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ficha.md"), "  \n").unwrap();
        fs::write(tmp.path().join("ficha.txt"), "Texto").unwrap();
        assert_eq!(
            read_sidecar(tmp.path(), &["ficha.md", "ficha.txt"]),
            Some("Texto".to_string())
        );
    }

    #[test]
    fn sidecar_missing_everywhere() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_sidecar(tmp.path(), &["ficha.md"]), None);
    }
}
