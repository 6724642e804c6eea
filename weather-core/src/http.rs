//! HTTP transport for the MGM service.

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{HOST, HeaderMap, HeaderValue, ORIGIN, REFERER},
};
use serde_json::Value;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, instrument};

use crate::{config::ClientConfig, error::TransportError};

/// Read-only access to the service.
///
/// `path` is relative to the configured base URL and already carries an
/// encoded query string; implementations must send it as-is.
#[async_trait]
pub trait HttpFetch: Send + Sync + Debug {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;
}

/// [`HttpFetch`] over a long-lived `reqwest` client.
///
/// TLS goes through rustls. The MGM server predates secure renegotiation
/// (RFC 5746); rustls never renegotiates and does not insist on the
/// extension, so no legacy-connect switch is needed here.
///
/// Not verified against the live `servis.mgm.gov.tr` yet. If that server
/// only offers RSA key exchange or CBC cipher suites, rustls refuses the
/// handshake and every call fails with [`TransportError::Request`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    http: Client,
    base_url: String,
}

impl ReqwestFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, header_value(&config.referer)?);
        headers.insert(ORIGIN, header_value(&config.origin)?);
        if !config.host.is_empty() {
            headers.insert(HOST, header_value(&config.host)?);
        }

        let http = Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url)
            .map_err(|e| TransportError::Client(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::Client(format!("invalid header value '{value}': {e}")))
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    #[instrument(skip(self))]
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| TransportError::Request {
            path: path.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let fetcher = ReqwestFetcher::new(&ClientConfig::with_base_url("http://127.0.0.1:9/web"))
            .expect("client builds");
        assert_eq!(fetcher.base_url(), "http://127.0.0.1:9/web/");
    }

    #[test]
    fn default_config_builds() {
        let fetcher = ReqwestFetcher::new(&ClientConfig::default()).expect("client builds");
        assert_eq!(fetcher.base_url(), "https://servis.mgm.gov.tr/web/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestFetcher::new(&ClientConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, TransportError::Client(_)));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let config = ClientConfig {
            referer: "bad\nvalue".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            ReqwestFetcher::new(&config),
            Err(TransportError::Client(_))
        ));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "ş".repeat(300);
        let truncated = truncate_body(&long);

        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
