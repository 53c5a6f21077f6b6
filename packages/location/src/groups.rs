//! Top-level grouping of the location table.

use risk_prevalence_location_models::LocationTable;

/// Buckets location keys by their `topLevelGroup`.
///
/// Groups appear in the order their first member appears in the table and
/// members keep table order. Records without a group are skipped.
#[must_use]
pub fn location_groups(table: &LocationTable) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for (key, record) in table.iter() {
        let Some(group) = record.top_level_group.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, members)) => members.push(key.to_string()),
            None => groups.push((group.to_string(), vec![key.to_string()])),
        }
    }

    groups
}
