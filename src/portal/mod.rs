//! Freenom portal client: login, record scraping, record submission.
//!
//! Freenom offers no DNS API for free-tier domains. The portal's managed DNS
//! page exposes the record set as an HTML form whose fields are named
//! positionally (`records[i][...]`), and this module replays exactly the
//! requests a browser would make against it: a login form POST, a GET of the
//! management page, and a bulk "modify" form POST.


use crate::config::{Config, PortalUrls};
use crate::error::{DdnsError, Result};
use crate::record::DnsRecord;
use reqwest::header;
use reqwest::redirect;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Domain selector for the client-area query string.
#[derive(Debug, Clone)]
pub struct DomainTarget {
    /// Domain name, e.g. "example.tk".
    pub domain: String,
    /// The registrar's numeric identifier for the domain.
    pub domain_id: String,
}

/// HTTP session against the Freenom portal.
///
/// The session cookies set by [`login`](Self::login) live in the client's
/// cookie jar and ride along on every later request, so one `PortalClient`
/// is one portal session.
pub struct PortalClient {
    client: reqwest::Client,
    urls: PortalUrls,
}

impl PortalClient {
    /// Create a portal client from configuration.
    ///
    /// Redirects are never followed (the login handshake is a raw 302
    /// check), and TLS certificate verification follows
    /// [`Config::verify_tls`].
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            urls: config.urls.clone(),
        })
    }

    /// Submit the login form.
    ///
    /// The portal answers a successful login with a 302 pointing at the
    /// client-area page; anything else is a rejected login. Transport
    /// failures are errors, a rejection is `Ok(false)`.
    pub async fn login(&self, email: &str, passwd: &str) -> Result<bool> {
        let response = self
            .client
            .post(self.urls.login_url())
            .header(header::ORIGIN, self.urls.base.as_str())
            .header(header::REFERER, self.urls.client_area_url())
            .form(&[("username", email), ("password", passwd)])
            .send()
            .await?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());

        let ok = response.status() == StatusCode::FOUND
            && location == Some(self.urls.client_area.as_str());

        if ok {
            tracing::debug!("Logged in as {}", email);
        } else {
            tracing::warn!(
                "Login rejected: status {}, location {:?}",
                response.status(),
                location
            );
        }

        Ok(ok)
    }

    /// Fetch and parse the managed DNS page for a domain.
    ///
    /// Returns `Ok(None)` when the page does not carry the logged-in
    /// marker, meaning the session/domain pairing is not authorized for
    /// this resource. The portal renders the same markerless page whether
    /// the session is stale or the domain id is wrong, so `None` cannot be
    /// told apart from "domain has no managed-DNS form".
    pub async fn fetch_records(&self, target: &DomainTarget) -> Result<Option<Vec<DnsRecord>>> {
        let response = self
            .client
            .get(self.urls.client_area_url())
            .query(&[
                ("domainid", target.domain_id.as_str()),
                ("managedns", target.domain.as_str()),
            ])
            .header(header::ORIGIN, self.urls.base.as_str())
            .header(header::REFERER, self.urls.client_area_url())
            .send()
            .await?;

        let html = response.text().await?;
        let records = parse_records(&html)?;

        match &records {
            Some(records) => {
                tracing::debug!("Scraped {} DNS records for {}", records.len(), target.domain);
            }
            None => tracing::warn!("Management page for {} is not logged in", target.domain),
        }

        Ok(records)
    }

    /// Submit the full record set as a bulk "modify" form post.
    ///
    /// Field names are rebuilt from each record's own `index`, so the input
    /// order is irrelevant but the indices are not. Success is an HTTP 200
    /// exactly; the response body is not inspected.
    pub async fn push_records(&self, target: &DomainTarget, records: &[DnsRecord]) -> Result<bool> {
        let mut payload: Vec<(String, String)> =
            vec![("dnsaction".to_string(), "modify".to_string())];
        for record in records {
            payload.extend(record.form_fields());
        }

        let response = self
            .client
            .post(self.urls.client_area_url())
            .query(&[
                ("domainid", target.domain_id.as_str()),
                ("managedns", target.domain.as_str()),
            ])
            .header(header::ORIGIN, self.urls.base.as_str())
            .header(header::REFERER, self.urls.client_area_url())
            .form(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Record submission for {} returned {}", target.domain, status);
        }

        Ok(status == StatusCode::OK)
    }
}

/// Parse the record-editing form out of a managed DNS page.
fn parse_records(html: &str) -> Result<Option<Vec<DnsRecord>>> {
    let doc = Html::parse_document(html);

    let body = doc
        .select(&sel("body"))
        .next()
        .ok_or_else(|| DdnsError::Scrape("page has no <body>".to_string()))?;

    if !body.value().classes().any(|c| c == "loggedIn") {
        return Ok(None);
    }

    let form = doc
        .select(&sel("form"))
        .next()
        .ok_or_else(|| DdnsError::Scrape("management page has no form".to_string()))?;
    let table = form
        .select(&sel("table"))
        .next()
        .ok_or_else(|| DdnsError::Scrape("record form has no table".to_string()))?;

    let mut records = Vec::new();
    for (i, row) in table.select(&sel("tbody tr")).enumerate() {
        let name = row_field(row, i, "name")?;
        let ttl_raw = row_field(row, i, "ttl")?;
        let record_type = row_field(row, i, "type")?;
        let value = row_field(row, i, "value")?;

        let ttl = ttl_raw.parse::<u32>().map_err(|_| DdnsError::Ttl {
            row: i,
            value: ttl_raw.clone(),
        })?;

        records.push(DnsRecord {
            index: i,
            name,
            ttl,
            record_type,
            value,
        });
    }

    Ok(Some(records))
}

/// Read the `value` attribute of one templated input in a table row.
fn row_field(row: ElementRef<'_>, index: usize, field: &str) -> Result<String> {
    let selector = sel(&format!(r#"input[name="records[{index}][{field}]"]"#));
    row.select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or_else(|| {
            DdnsError::Scrape(format!(
                "row {index} is missing records[{index}][{field}]"
            ))
        })
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}
