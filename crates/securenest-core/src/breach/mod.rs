//! Breach corpus lookup
//!
//! Determines how many times a password appears in a public breach
//! corpus without ever transmitting the password. The client follows
//! the k-anonymity range protocol: only the first five characters of
//! the password's SHA-1 digest are sent; the service returns every
//! known hash suffix sharing that prefix and the client does the final
//! match locally.

use std::time::Duration;

use reqwest::Client as HttpClient;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default breach range endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com";

/// Identifying client header sent with every request.
pub const DEFAULT_USER_AGENT: &str = "SecureNest/1.0";

/// Connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Overall request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Outcome of a breach lookup, with failures kept distinct from a
/// verified zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachQueryResult {
    /// The password appears in the corpus this many times.
    Found(u64),
    /// The lookup succeeded and found no occurrence.
    Clean,
    /// The lookup could not be completed.
    Unknown,
}

/// Client for the breach range endpoint.
///
/// Thread-safe and cheap to clone. Lookups have no side effects on
/// vault state, so an in-flight call can be abandoned freely.
#[derive(Debug, Clone)]
pub struct BreachClient {
    http_client: HttpClient,
    base_url: String,
    user_agent: String,
}

/// Builder for creating a [`BreachClient`].
pub struct BreachClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
}

impl Default for BreachClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BreachClientBuilder {
    /// Create a new builder with default endpoint and timeouts.
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Set the base URL of the range endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the User-Agent header value.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set the overall request timeout.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Build the [`BreachClient`].
    pub fn build(self) -> Result<BreachClient> {
        let http_client = HttpClient::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(Error::Network)?;

        Ok(BreachClient {
            http_client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

impl BreachClient {
    /// Create a client with default endpoint and timeouts.
    pub fn new() -> Result<Self> {
        BreachClientBuilder::new().build()
    }

    /// Create a new builder.
    pub fn builder() -> BreachClientBuilder {
        BreachClientBuilder::new()
    }

    /// Base URL this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the breach occurrence count for a password.
    ///
    /// Returns `Ok(0)` when the range response holds no matching
    /// suffix; transport and HTTP failures surface as errors.
    pub async fn lookup(&self, password: &str) -> Result<u64> {
        let hash = hash_password(password);
        let (prefix, suffix) = split_hash(&hash);
        let url = format!("{}/range/{}", self.base_url, prefix);

        debug!(prefix = %prefix, "querying breach range endpoint");

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::BreachLookup(format!(
                "range endpoint returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(Error::Network)?;
        Ok(scan_range_body(&body, suffix))
    }

    /// Look up a password, keeping lookup failure distinct from a
    /// verified clean result.
    pub async fn query(&self, password: &str) -> BreachQueryResult {
        match self.lookup(password).await {
            Ok(0) => BreachQueryResult::Clean,
            Ok(count) => BreachQueryResult::Found(count),
            Err(e) => {
                warn!(error = %e, "breach lookup failed");
                BreachQueryResult::Unknown
            }
        }
    }

    /// Look up a password, collapsing every failure to a count of 0.
    ///
    /// This mirrors the original contract: a failed lookup is
    /// indistinguishable from a password with zero known breaches.
    pub async fn check_count(&self, password: &str) -> u64 {
        match self.query(password).await {
            BreachQueryResult::Found(count) => count,
            BreachQueryResult::Clean | BreachQueryResult::Unknown => 0,
        }
    }
}

/// SHA-1 the exact password bytes and render as uppercase hex.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Split a 40-character digest into its 5-character range prefix and
/// 35-character suffix.
pub fn split_hash(hash: &str) -> (&str, &str) {
    hash.split_at(5)
}

/// Scan a range response body for the given suffix.
///
/// Lines are `SUFFIX:COUNT`; exactly two colon-separated fields, suffix
/// compared case-insensitively. The first matching line wins; a match
/// with a non-numeric count, or no match at all, yields 0.
fn scan_range_body(body: &str, suffix: &str) -> u64 {
    for line in body.lines() {
        let mut parts = line.splitn(2, ':');
        let (Some(api_suffix), Some(count)) = (parts.next(), parts.next()) else {
            continue;
        };
        if count.contains(':') {
            continue;
        }
        if api_suffix.to_uppercase() == suffix {
            return count.trim().parse().unwrap_or(0);
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-1("admin") = D033E22AE348AEB5660FC2140AEC35850C4DA997
    const ADMIN_HASH: &str = "D033E22AE348AEB5660FC2140AEC35850C4DA997";

    #[test]
    fn test_hash_password_known_digest() {
        assert_eq!(hash_password("admin"), ADMIN_HASH);
    }

    #[test]
    fn test_split_hash() {
        let (prefix, suffix) = split_hash(ADMIN_HASH);
        assert_eq!(prefix, "D033E");
        assert_eq!(suffix, "22AE348AEB5660FC2140AEC35850C4DA997");
        assert_eq!(suffix.len(), 35);
    }

    #[test]
    fn test_scan_range_body_matching_suffix() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:3\n\
                    22AE348AEB5660FC2140AEC35850C4DA997:53579\n\
                    011053FD0102E94D6AE2F8B83D76FAF94F6:1";
        let (_, suffix) = split_hash(ADMIN_HASH);

        assert_eq!(scan_range_body(body, suffix), 53579);
    }

    #[test]
    fn test_scan_range_body_no_match() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:3";
        assert_eq!(scan_range_body(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"), 0);
    }

    #[test]
    fn test_scan_range_body_is_case_insensitive() {
        let body = "22ae348aeb5660fc2140aec35850c4da997:7";
        let (_, suffix) = split_hash(ADMIN_HASH);

        assert_eq!(scan_range_body(body, suffix), 7);
    }

    #[test]
    fn test_scan_range_body_first_match_wins() {
        let body = "AAA:1\nAAA:2";
        assert_eq!(scan_range_body(body, "AAA"), 1);
    }

    #[test]
    fn test_scan_range_body_malformed_lines() {
        // Missing colon, too many fields, non-numeric count.
        let body = "no-colon-here\nAAA:1:extra\nBBB:not-a-number";
        assert_eq!(scan_range_body(body, "AAA"), 0);
        assert_eq!(scan_range_body(body, "BBB"), 0);
    }

    #[test]
    fn test_scan_range_body_handles_crlf() {
        let body = "AAA:4\r\nBBB:9\r\n";
        assert_eq!(scan_range_body(body, "BBB"), 9);
    }

    #[test]
    fn test_builder_defaults() {
        let client = BreachClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_builder_overrides() {
        let client = BreachClient::builder()
            .base_url("http://localhost:9")
            .user_agent("test-agent")
            .connect_timeout_secs(1)
            .request_timeout_secs(1)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9");
        assert_eq!(client.user_agent, "test-agent");
    }

    #[test]
    fn test_client_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BreachClient>();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_collapses_to_zero() {
        // Port 9 (discard) with nothing listening: connection refused
        // locally, no external network involved.
        let client = BreachClient::builder()
            .base_url("http://127.0.0.1:9")
            .connect_timeout_secs(1)
            .request_timeout_secs(1)
            .build()
            .unwrap();

        assert_eq!(client.query("admin").await, BreachQueryResult::Unknown);
        assert_eq!(client.check_count("admin").await, 0);
    }
}
