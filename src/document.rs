//! In-place edits of the README: the Packages section and History entries.
//!
//! All functions take the whole document and return the whole new document,
//! so the caller can write it back in one step.

use log::debug;

use crate::catalog::find_history_heading;
use crate::error::{CatalogError, Result};
use crate::repo::RepoId;

pub const PACKAGES_HEADING: &str = "## Packages";
pub const HISTORY_HEADING: &str = "## History";

/// Lines of `doc` with their byte offsets, line terminators included.
fn line_spans(doc: &str) -> impl Iterator<Item = (usize, &str)> {
    doc.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

fn is_level_two_heading(line: &str) -> bool {
    line.starts_with("## ")
}

/// Push `head`, making sure it ends with a newline.
fn push_line_terminated(out: &mut String, head: &str) {
    out.push_str(head);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Replace everything between `## Packages` and the next `## ` heading.
///
/// Content outside that span is kept byte for byte. Running this twice with
/// the same catalog yields the same document.
pub fn splice_packages(doc: &str, catalog: &str) -> Result<String> {
    let mut spans = line_spans(doc);

    let heading_end = spans
        .by_ref()
        .find(|(_, line)| line.trim_end() == PACKAGES_HEADING)
        .map(|(start, line)| start + line.len())
        .ok_or_else(|| CatalogError::missing_heading(PACKAGES_HEADING))?;

    let section_end = spans
        .find(|(_, line)| is_level_two_heading(line))
        .map(|(start, _)| start)
        .unwrap_or(doc.len());
    debug!(
        "Replacing Packages section bytes {}..{}",
        heading_end, section_end
    );

    let mut out = String::with_capacity(doc.len() + catalog.len());
    push_line_terminated(&mut out, &doc[..heading_end]);
    out.push('\n');
    out.push_str(catalog);
    out.push_str("\n\n");
    out.push_str(&doc[section_end..]);
    Ok(out)
}

/// Build the History entry for one release.
pub fn build_history_entry(tag: &str, repo: &RepoId, body: &str) -> String {
    let lines = [
        format!("### {}", tag),
        String::new(),
        format!("[Release]({})", repo.release_url(tag)),
        String::new(),
        body.trim().to_string(),
    ];
    format!("{}\n\n", lines.join("\n").trim_end())
}

/// Remove every `### <tag>` entry, up to the next `### ` or `## ` heading.
pub fn remove_history_entry(doc: &str, tag: &str) -> String {
    let heading = format!("### {}", tag);
    let mut out = String::with_capacity(doc.len());
    let mut skipping = false;

    for (_, line) in line_spans(doc) {
        if skipping && (line.starts_with("### ") || is_level_two_heading(line)) {
            skipping = false;
        }
        if line.trim_end() == heading {
            debug!("Removing existing History entry for {}", tag);
            skipping = true;
        }
        if !skipping {
            out.push_str(line);
        }
    }
    out
}

/// Insert an entry right below the History heading, newest first.
pub fn insert_history_entry(doc: &str, entry: &str) -> Result<String> {
    let heading_idx =
        find_history_heading(doc).ok_or_else(|| CatalogError::missing_heading(HISTORY_HEADING))?;

    let insert_pos = line_spans(doc)
        .nth(heading_idx)
        .map(|(start, line)| start + line.len())
        .unwrap_or(doc.len());

    let mut out = String::with_capacity(doc.len() + entry.len() + 2);
    push_line_terminated(&mut out, &doc[..insert_pos]);
    out.push('\n');
    out.push_str(entry);
    out.push_str(doc[insert_pos..].trim_start_matches(['\n', '\r']));
    Ok(out)
}

/// Replace (or add) the History entry for `tag`.
pub fn update_history(doc: &str, tag: &str, entry: &str) -> Result<String> {
    insert_history_entry(&remove_history_entry(doc, tag), entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo() -> RepoId {
        "owner/repo".parse().unwrap()
    }

    #[test]
    fn test_splice_into_empty_section() {
        let doc = "# Title\n\nIntro.\n\n## Packages\n## History\n\n### v1\n";
        let out = splice_packages(doc, "CATALOG\n").unwrap();
        assert_eq!(
            out,
            "# Title\n\nIntro.\n\n## Packages\n\nCATALOG\n\n\n## History\n\n### v1\n"
        );
        assert!(out.starts_with("# Title\n\nIntro.\n\n## Packages\n"));
        assert!(out.ends_with("## History\n\n### v1\n"));
    }

    #[test]
    fn test_splice_replaces_existing_catalog() {
        let doc = "## Packages\n\n### Linux x86_64\n\nold\n\n## History\n";
        let out = splice_packages(doc, "new").unwrap();
        assert_eq!(out, "## Packages\n\nnew\n\n## History\n");
    }

    #[test]
    fn test_splice_to_end_of_document() {
        let out = splice_packages("## Packages\nold", "new").unwrap();
        assert_eq!(out, "## Packages\n\nnew\n\n");
        let out = splice_packages("## Packages", "new").unwrap();
        assert_eq!(out, "## Packages\n\nnew\n\n");
    }

    #[test]
    fn test_splice_is_idempotent() {
        let doc = "# T\n\n## Packages\n\nstale\n\n## History\n\nlog\n";
        let once = splice_packages(doc, "### Linux x86_64\n\nrows\n").unwrap();
        let twice = splice_packages(&once, "### Linux x86_64\n\nrows\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_splice_requires_exact_heading() {
        let err = splice_packages("## Packages list\n### Packages\n", "x").unwrap_err();
        assert_eq!(err, CatalogError::missing_heading(PACKAGES_HEADING));
    }

    #[test]
    fn test_build_history_entry() {
        let entry = build_history_entry("v0.1.0", &repo(), "\n#### Linux x86_64\n\n| t |\n\n");
        assert_eq!(
            entry,
            "### v0.1.0\n\n[Release](https://github.com/owner/repo/releases/tag/v0.1.0)\n\n#### Linux x86_64\n\n| t |\n\n"
        );
    }

    #[test]
    fn test_remove_history_entry() {
        let doc = "## History\n\n### v2\n\nbody2\n\n### v1\n\nbody1\n\n## License\n";
        assert_eq!(
            remove_history_entry(doc, "v2"),
            "## History\n\n### v1\n\nbody1\n\n## License\n"
        );
        assert_eq!(
            remove_history_entry(doc, "v1"),
            "## History\n\n### v2\n\nbody2\n\n## License\n"
        );
        assert_eq!(remove_history_entry(doc, "v3"), doc);
    }

    #[test]
    fn test_insert_history_entry() {
        let doc = "# T\n\n## History\n\n### v1\n\nbody1\n";
        let out = insert_history_entry(doc, "### v2\n\nbody2\n\n").unwrap();
        assert_eq!(out, "# T\n\n## History\n\n### v2\n\nbody2\n\n### v1\n\nbody1\n");
    }

    #[test]
    fn test_insert_history_entry_at_end() {
        let out = insert_history_entry("## History", "### v1\n\n").unwrap();
        assert_eq!(out, "## History\n\n### v1\n\n");
    }

    #[test]
    fn test_insert_history_requires_heading() {
        let err = insert_history_entry("# T\n", "### v1\n").unwrap_err();
        assert_eq!(err, CatalogError::missing_heading(HISTORY_HEADING));
    }

    #[test]
    fn test_update_history_replaces_entry() {
        let doc = "## History\n\n### v2\n\nold\n\n### v1\n\nbody1\n";
        let entry = build_history_entry("v2", &repo(), "new");
        let once = update_history(doc, "v2", &entry).unwrap();
        let twice = update_history(&once, "v2", &entry).unwrap();
        assert_eq!(once, twice);
        assert!(!once.contains("old"));
        assert_eq!(once.matches("### v2").count(), 1);
    }
}
