//! Update pipeline: point scraped records at the external IP and rewrite
//! them through the portal when they drift.

use crate::error::{DdnsError, Result};
use crate::portal::{DomainTarget, PortalClient};
use crate::record::DnsRecord;

/// TTL written to apex records on update.
pub const APEX_TTL: u32 = 14400;
/// TTL written to subdomain records on update.
pub const SUBDOMAIN_TTL: u32 = 7220;

/// Portal login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub passwd: String,
}

/// What a single update run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Every record already pointed at the external IP.
    RecordsCurrent,
    /// Records drifted and the portal accepted the rewrite.
    Updated,
    /// Records drifted but the portal rejected the rewrite.
    WriteFailed,
}

/// Point every record at `external_ip` and apply the TTL policy.
///
/// Returns whether any record's value actually differed, i.e. whether a
/// write is needed. Values and TTLs are rewritten unconditionally on every
/// record: 14400 seconds for the apex (empty name), 7220 for everything
/// else.
pub fn apply_external_ip(records: &mut [DnsRecord], external_ip: &str) -> bool {
    let mut changed = false;
    for record in records.iter_mut() {
        if record.value != external_ip {
            changed = true;
        }
        record.value = external_ip.to_string();
        record.ttl = if record.name.is_empty() {
            APEX_TTL
        } else {
            SUBDOMAIN_TTL
        };
    }
    changed
}

/// Run the login, read, compare, write pipeline once.
///
/// A rejected login or a management page without a logged-in session aborts
/// the run with an error. A write the portal refuses is an ordinary
/// [`SyncOutcome`], not an error: by then the records were readable and the
/// caller should report the failure and exit normally.
pub async fn run_once(
    portal: &PortalClient,
    credentials: &Credentials,
    target: &DomainTarget,
    external_ip: &str,
) -> Result<SyncOutcome> {
    if !portal.login(&credentials.email, &credentials.passwd).await? {
        return Err(DdnsError::Auth(
            "the portal rejected the login credentials".to_string(),
        ));
    }

    let mut records = portal.fetch_records(target).await?.ok_or_else(|| {
        DdnsError::Session(format!(
            "the management page for {} did not report a logged-in session \
             (stale session, wrong domain id, or no managed-DNS form)",
            target.domain
        ))
    })?;

    if !apply_external_ip(&mut records, external_ip) {
        tracing::debug!("All {} records already point at {}", records.len(), external_ip);
        return Ok(SyncOutcome::RecordsCurrent);
    }

    if portal.push_records(target, &records).await? {
        Ok(SyncOutcome::Updated)
    } else {
        Ok(SyncOutcome::WriteFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, name: &str, value: &str) -> DnsRecord {
        DnsRecord {
            index,
            name: name.to_string(),
            ttl: 300,
            record_type: "A".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_apply_reports_drift() {
        let mut records = vec![record(0, "", "5.6.7.8"), record(1, "www", "9.9.9.9")];

        assert!(apply_external_ip(&mut records, "9.9.9.9"));
        assert!(records.iter().all(|r| r.value == "9.9.9.9"));
    }

    #[test]
    fn test_apply_no_drift() {
        let mut records = vec![record(0, "", "9.9.9.9"), record(1, "www", "9.9.9.9")];

        assert!(!apply_external_ip(&mut records, "9.9.9.9"));
    }

    #[test]
    fn test_ttl_policy() {
        let mut records = vec![
            record(0, "", "5.6.7.8"),
            record(1, "www", "9.9.9.9"),
            record(2, "mail", "5.6.7.8"),
        ];

        apply_external_ip(&mut records, "9.9.9.9");

        assert_eq!(records[0].ttl, APEX_TTL);
        assert_eq!(records[1].ttl, SUBDOMAIN_TTL);
        assert_eq!(records[2].ttl, SUBDOMAIN_TTL);
    }

    #[test]
    fn test_apply_to_empty_set() {
        let mut records: Vec<DnsRecord> = Vec::new();
        assert!(!apply_external_ip(&mut records, "9.9.9.9"));
    }
}
