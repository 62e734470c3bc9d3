//! Markdown rendering of the merged catalog.

use super::record::{
    AggregatedEntry, COMPONENT_LABEL, FRAMEWORK_LABEL, RUNTIME_LABEL, TOOLKIT_LABEL,
};
use super::sort::sort_rows;

/// Output layout of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// `### <os>` sections with one collapsible table per Flash-Attention version.
    #[default]
    Hierarchical,
    /// Single table with every column, kept for older READMEs.
    Flat,
}

pub fn render(entries: &[AggregatedEntry], mode: RenderMode) -> String {
    match mode {
        RenderMode::Hierarchical => render_hierarchical(entries),
        RenderMode::Flat => render_flat(entries),
    }
}

/// Render the package cell: `-` without links, otherwise numbered release links.
pub fn package_cell(links: &[String]) -> String {
    if links.is_empty() {
        return "-".to_string();
    }
    links
        .iter()
        .enumerate()
        .map(|(i, url)| format!("[Release{}]({})", i + 1, url))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split rows into groups by `field`, in order of first appearance.
fn group_by<'a, F>(rows: Vec<&'a AggregatedEntry>, field: F) -> Vec<(&'a str, Vec<&'a AggregatedEntry>)>
where
    F: Fn(&'a AggregatedEntry) -> &'a str,
{
    let mut groups: Vec<(&'a str, Vec<&'a AggregatedEntry>)> = Vec::new();
    for row in rows {
        let value = field(row);
        match groups.iter_mut().find(|(name, _)| *name == value) {
            Some((_, members)) => members.push(row),
            None => groups.push((value, vec![row])),
        }
    }
    groups
}

/// Render the OS → Flash-Attention version → table hierarchy.
///
/// The shared sort is applied globally, then again inside each OS group and
/// each version group.
pub fn render_hierarchical(entries: &[AggregatedEntry]) -> String {
    let mut rows: Vec<&AggregatedEntry> = entries.iter().collect();
    sort_rows(&mut rows);

    let mut lines: Vec<String> = Vec::new();
    for (os_name, mut os_rows) in group_by(rows, |e| e.key.os_name.as_str()) {
        sort_rows(&mut os_rows);

        lines.push(format!("### {}", os_name));
        lines.push(String::new());

        for (version, mut version_rows) in group_by(os_rows, |e| e.key.component_version.as_str()) {
            sort_rows(&mut version_rows);

            lines.push(format!("#### {} {}", COMPONENT_LABEL, version));
            lines.push(String::new());
            lines.push("<details>".to_string());
            lines.push(format!(
                "<summary>Packages for {} {}</summary>",
                COMPONENT_LABEL, version
            ));
            lines.push(String::new());
            lines.push(format!(
                "| {} | {} | {} | package |",
                RUNTIME_LABEL, FRAMEWORK_LABEL, TOOLKIT_LABEL
            ));
            lines.push("| ------ | ------- | ---- | ------- |".to_string());
            for row in version_rows {
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    row.key.runtime_version,
                    row.key.framework_version,
                    row.key.toolkit_version,
                    package_cell(&row.links)
                ));
            }
            lines.push(String::new());
            lines.push("</details>".to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Render every entry as one row of a single table, in the given order.
pub fn render_flat(entries: &[AggregatedEntry]) -> String {
    let mut lines = vec![
        format!(
            "| {} | {} | {} | {} | OS | package |",
            COMPONENT_LABEL, RUNTIME_LABEL, FRAMEWORK_LABEL, TOOLKIT_LABEL
        ),
        "| --------------- | ------ | ------- | ------ | ---- | ------- |".to_string(),
    ];
    for entry in entries {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            entry.key.component_version,
            entry.key.runtime_version,
            entry.key.framework_version,
            entry.key.toolkit_version,
            entry.key.os_name,
            package_cell(&entry.links)
        ));
    }
    lines.join("\n")
}
