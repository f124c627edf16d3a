//! Instance index extraction from raw discovery responses.

use crate::cache::InstanceIndices;

/// Extracts the instance numbers directly under `prefix`.
///
/// `prefix` is a discovery prefix as handed out by `PathExpander::next`: it
/// already ends with the separator, or is empty for a root-level wildcard.
/// For `prefix = "Device.WiFi.AccessPoint."` the identifiers
/// `Device.WiFi.AccessPoint.1`, `Device.WiFi.AccessPoint.2.Enable` and
/// `Device.WiFi.AccessPoint.2.` yield `[1, 2]`.
///
/// Identifiers outside the prefix and non-numeric segments are skipped, since
/// GetParameterNames responses routinely carry descendants and siblings.
pub fn extract_indices<S>(prefix: &str, identifiers: &[S], separator: char) -> InstanceIndices
where
    S: AsRef<str>,
{
    identifiers
        .iter()
        .filter_map(|identifier| {
            let identifier = identifier.as_ref();
            let index = index_under_prefix(prefix, identifier, separator);
            if index.is_none() {
                log::trace!("skipping {identifier:?} under {prefix:?}");
            }
            index
        })
        .collect()
}

fn index_under_prefix(prefix: &str, identifier: &str, separator: char) -> Option<u32> {
    let rest = identifier.strip_prefix(prefix)?;
    let segment = match rest.find(separator) {
        Some(end) => &rest[..end],
        None => rest,
    };
    parse_instance_number(segment)
}

/// Parses a segment made only of ASCII digits.
///
/// Signs and whitespace are rejected so that `-1` or `+2` never turn into
/// instance numbers.
pub(crate) fn parse_instance_number(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(prefix: &str, identifiers: &[&str]) -> Vec<u32> {
        extract_indices(prefix, identifiers, '.').iter().collect()
    }

    #[test]
    fn extracts_direct_children() {
        let found = extract(
            "Device.WiFi.AccessPoint.",
            &[
                "Device.WiFi.AccessPoint.1",
                "Device.WiFi.AccessPoint.2",
                "Device.WiFi.AccessPoint.3",
            ],
        );
        assert_eq!(found, vec![1, 2, 3]);
    }

    #[test]
    fn collapses_descendants_and_duplicates() {
        let found = extract(
            "A.B.",
            &["A.B.2.", "A.B.2.Enable", "A.B.2.Status", "A.B.1", "A.B.1."],
        );
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn ignores_foreign_and_non_numeric_identifiers() {
        let found = extract(
            "A.B.",
            &[
                "A.C.1",
                "A.Bx.4",
                "A.B.Stats",
                "A.B.-1",
                "A.B.+2",
                "A.B.",
                "A.B.7",
            ],
        );
        assert_eq!(found, vec![7]);
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let found = extract("A.", &["A.99999999999", "A.4294967295"]);
        assert_eq!(found, vec![u32::MAX]);
    }

    #[test]
    fn sorts_ascending() {
        let found = extract("A.", &["A.10", "A.2", "A.33", "A.1"]);
        assert_eq!(found, vec![1, 2, 10, 33]);
    }

    #[test]
    fn empty_prefix_reads_first_segment() {
        let found = extract("", &["1.Name", "2", "Device."]);
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn empty_response_yields_empty_set() {
        assert!(extract_indices::<&str>("A.", &[], '.').is_empty());
    }

    #[test]
    fn custom_separator() {
        let found: Vec<u32> = extract_indices("ports/", &["ports/4/status", "ports/8"], '/')
            .iter()
            .collect();
        assert_eq!(found, vec![4, 8]);
    }
}
