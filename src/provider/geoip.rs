//! IP geolocation client
//!
//! Resolves the visitor's country so the counselling form pre-selects
//! the right calling code. Best-effort only: any failure, a private
//! address, or a missing country code falls back to the configured
//! default.

use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

use crate::config::GeoIpConfig;

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    #[serde(default)]
    country_code: Option<String>,
}

/// Client for the IP-to-country lookup service.
pub struct GeoIpClient {
    client: reqwest::Client,
    base_url: String,
    default_country: String,
}

impl GeoIpClient {
    /// Build the client from configuration.
    pub fn new(config: &GeoIpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_country: config.default_country.clone(),
        })
    }

    /// The configured fallback country.
    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    /// Resolve an ISO country code for the visitor.
    pub async fn country_for(&self, ip: Option<IpAddr>) -> String {
        let Some(ip) = ip else {
            return self.default_country.clone();
        };
        if !is_public(&ip) {
            return self.default_country.clone();
        }

        let url = format!("{}/{}/json/", self.base_url, ip);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<GeoIpResponse>().await {
                    Ok(body) => body
                        .country_code
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| self.default_country.clone()),
                    Err(e) => {
                        tracing::debug!(error = %e, "geoip response failed to parse");
                        self.default_country.clone()
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "geoip lookup rejected");
                self.default_country.clone()
            }
            Err(e) => {
                tracing::debug!(error = %e, "geoip service unreachable");
                self.default_country.clone()
            }
        }
    }
}

/// Whether an address can meaningfully be geolocated.
fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !v4.is_loopback() && !v4.is_private() && !v4.is_link_local() && !v4.is_unspecified()
        }
        IpAddr::V6(v6) => !v6.is_loopback() && !v6.is_unspecified(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn client() -> GeoIpClient {
        GeoIpClient::new(&GeoIpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_ip_falls_back() {
        assert_eq!(client().country_for(None).await, "MZ");
    }

    #[tokio::test]
    async fn test_private_ip_falls_back_without_lookup() {
        let ip = IpAddr::from_str("192.168.1.10").unwrap();
        assert_eq!(client().country_for(Some(ip)).await, "MZ");

        let loopback = IpAddr::from_str("127.0.0.1").unwrap();
        assert_eq!(client().country_for(Some(loopback)).await, "MZ");
    }

    #[test]
    fn test_is_public() {
        assert!(is_public(&IpAddr::from_str("41.220.30.1").unwrap()));
        assert!(!is_public(&IpAddr::from_str("10.0.0.1").unwrap()));
        assert!(!is_public(&IpAddr::from_str("0.0.0.0").unwrap()));
        assert!(!is_public(&IpAddr::from_str("::1").unwrap()));
    }
}
