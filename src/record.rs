//! DNS record model for the portal's record-editing form.

/// One row of the portal's DNS table.
///
/// The portal's form encodes records positionally, not by stable ID: every
/// field of row `i` is named `records[i][...]`. `index` therefore must match
/// the record's position in the form it was scraped from. The writer builds
/// field names from `index` alone, so reordering records without reassigning
/// indices silently corrupts the submitted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Zero-based position within the form.
    pub index: usize,
    /// Subdomain label; the empty string denotes the domain apex.
    pub name: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// DNS record type string (e.g., "A").
    pub record_type: String,
    /// Record value (e.g., an IPv4 address string).
    pub value: String,
}

impl DnsRecord {
    /// Form fields for this record in the bulk "modify" submission.
    ///
    /// The `line` field is always submitted empty; the portal requires its
    /// presence but ignores its value.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let i = self.index;
        vec![
            (format!("records[{i}][line]"), String::new()),
            (format!("records[{i}][type]"), self.record_type.clone()),
            (format!("records[{i}][name]"), self.name.clone()),
            (format!("records[{i}][ttl]"), self.ttl.to_string()),
            (format!("records[{i}][value]"), self.value.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, name: &str, value: &str) -> DnsRecord {
        DnsRecord {
            index,
            name: name.to_string(),
            ttl: 3600,
            record_type: "A".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_form_fields_shape() {
        let fields = record(0, "", "1.2.3.4").form_fields();

        assert_eq!(
            fields,
            vec![
                ("records[0][line]".to_string(), String::new()),
                ("records[0][type]".to_string(), "A".to_string()),
                ("records[0][name]".to_string(), String::new()),
                ("records[0][ttl]".to_string(), "3600".to_string()),
                ("records[0][value]".to_string(), "1.2.3.4".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_use_own_index() {
        // The field names come from the record's index, not from its
        // position in whatever sequence it is submitted in.
        let fields = record(7, "www", "1.2.3.4").form_fields();

        assert!(fields.iter().all(|(k, _)| k.starts_with("records[7][")));
    }
}
