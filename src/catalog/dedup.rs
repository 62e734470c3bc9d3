use std::collections::HashMap;

use log::debug;

use super::record::{AggregatedEntry, PackageRecord};

/// Merge records that share the same identity key.
///
/// Entries come out in the order their identity was first seen. Links are
/// collected in input order, skipping empty and repeated ones; the input is
/// expected to be sorted already and nothing is re-sorted here.
pub fn merge_duplicates(records: &[PackageRecord]) -> Vec<AggregatedEntry> {
    let mut entries: Vec<AggregatedEntry> = Vec::new();
    let mut index_by_key = HashMap::new();

    for record in records {
        let key = record.identity();
        let idx = *index_by_key.entry(key.clone()).or_insert_with(|| {
            entries.push(AggregatedEntry::new(key));
            entries.len() - 1
        });

        if let Some(link) = record.link.as_deref().filter(|l| !l.is_empty()) {
            let links = &mut entries[idx].links;
            if !links.iter().any(|existing| existing == link) {
                links.push(link.to_string());
            }
        }
    }

    debug!(
        "Merged {} record(s) into {} catalog row(s)",
        records.len(),
        entries.len()
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(toolkit: &str, os_name: &str, link: Option<&str>) -> PackageRecord {
        PackageRecord {
            component_version: "2.7.4".into(),
            runtime_version: "3.11".into(),
            framework_version: "2.6".into(),
            toolkit_version: toolkit.into(),
            os_name: os_name.into(),
            link: link.map(String::from),
        }
    }

    #[test]
    fn test_merges_links_in_order() {
        let records = vec![
            record("12.4", "Linux x86_64", Some("L1")),
            record("12.4", "Linux x86_64", Some("L2")),
        ];
        let entries = merge_duplicates(&records);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].links, vec!["L1", "L2"]);
    }

    #[test]
    fn test_drops_repeated_and_empty_links() {
        let records = vec![
            record("12.4", "Linux x86_64", Some("L2")),
            record("12.4", "Linux x86_64", None),
            record("12.4", "Linux x86_64", Some("")),
            record("12.4", "Linux x86_64", Some("L1")),
            record("12.4", "Linux x86_64", Some("L2")),
        ];
        let entries = merge_duplicates(&records);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].links, vec!["L2", "L1"]);
    }

    #[test]
    fn test_no_links_yields_empty_list() {
        let entries = merge_duplicates(&[record("12.4", "Linux x86_64", None)]);
        assert!(entries[0].links.is_empty());
    }

    #[test]
    fn test_os_is_part_of_identity() {
        let records = vec![
            record("12.4", "Linux x86_64", Some("L1")),
            record("12.4", "Windows x86_64", Some("L1")),
            record("12.6", "Linux x86_64", Some("L1")),
        ];
        let entries = merge_duplicates(&records);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_first_seen_entry_order() {
        let records = vec![
            record("12.6", "Linux x86_64", Some("L1")),
            record("12.4", "Linux x86_64", Some("L1")),
            record("12.6", "Linux x86_64", Some("L2")),
        ];
        let entries = merge_duplicates(&records);
        let toolkits: Vec<&str> = entries
            .iter()
            .map(|e| e.key.toolkit_version.as_str())
            .collect();
        assert_eq!(toolkits, vec!["12.6", "12.4"]);
        assert_eq!(entries[0].links, vec!["L1", "L2"]);
    }
}
