//! # freenom-ddns
//!
//! A one-shot dynamic DNS updater for Freenom-hosted domains.
//!
//! Freenom exposes no DNS API for free-tier domains, so this crate drives
//! the web portal the way a browser would: it submits the login form,
//! scrapes the managed DNS page's record-editing form into structured
//! records, and resubmits the full record set when the public IP has
//! drifted away from the record values.
//!
//! ## Usage
//!
//! ```bash
//! # Compare against a cached IP first and skip the portal when unchanged
//! freenom-ddns 1.2.3.4 me@example.com hunter2 example.tk 1234567890
//!
//! # Without a cached IP the portal records are always consulted
//! freenom-ddns me@example.com hunter2 example.tk 1234567890
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod portal;
pub mod record;
pub mod updater;

pub use config::Config;
pub use detector::IpDetector;
pub use error::{DdnsError, Result};
pub use portal::{DomainTarget, PortalClient};
pub use record::DnsRecord;
