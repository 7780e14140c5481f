//! Public IP detection.

use crate::error::{DdnsError, Result};
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

/// IP detector backed by a single JSON "what is my IP" service.
pub struct IpDetector {
    client: reqwest::Client,
    service: String,
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    ip: String,
}

impl IpDetector {
    /// Create a detector for the given service URL.
    ///
    /// The service must answer `GET <url>` with a JSON object carrying a
    /// string field `ip`. There is no fallback service and no retry; a dead
    /// or misbehaving service fails the whole run.
    pub fn new(service: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            service: service.into(),
        }
    }

    /// Detect the public IP address.
    pub async fn detect(&self) -> Result<IpAddr> {
        let response = self.client.get(&self.service).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::IpDetection(format!(
                "HTTP {} from {}",
                response.status(),
                self.service
            )));
        }

        let info: IpInfo = response
            .json()
            .await
            .map_err(|e| DdnsError::IpDetection(format!("unexpected body: {}", e)))?;

        let ip: IpAddr = info
            .ip
            .trim()
            .parse()
            .map_err(|_| DdnsError::IpDetection(format!("invalid IP response: {}", info.ip)))?;

        tracing::debug!("Detected public IP {} from {}", ip, self.service);
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_detect_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"ip":"203.0.113.7","city":"Nowhere","country":"ZZ"}"#,
            ))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(mock_server.uri());
        let ip = detector.detect().await.unwrap();

        assert_eq!(ip.to_string(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_detect_non_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(mock_server.uri());
        let err = detector.detect().await.unwrap_err();

        assert!(matches!(err, DdnsError::IpDetection(_)));
    }

    #[tokio::test]
    async fn test_detect_garbage_ip_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"ip":"not-an-address"}"#),
            )
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(mock_server.uri());
        assert!(detector.detect().await.is_err());
    }

    #[tokio::test]
    async fn test_detect_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(mock_server.uri());
        assert!(detector.detect().await.is_err());
    }
}
