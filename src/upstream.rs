use anyhow::{anyhow, bail, Context, Result};
use axum::body::Bytes;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

use crate::config::Config;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A completed exchange with the upstream orders API
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Shareable client for the upstream orders API
///
/// Every call is bounded by the configured timeout. Dropping the returned
/// future (e.g. because the inbound connection went away) aborts the
/// in-flight request and closes its connection.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    orders_url: Url,
}

impl UpstreamClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.upstream_timeout))
            .build()
            .context("Failed to build upstream HTTP client")?;

        let orders_url = Url::parse(&format!(
            "{}{}",
            config.upstream_base_url.trim_end_matches('/'),
            config.upstream_orders_path
        ))
        .context("Upstream orders URL is not a valid URL")?;
        if orders_url.cannot_be_a_base() {
            bail!("Upstream orders URL cannot take path segments: {}", orders_url);
        }

        tracing::info!("Upstream client ready for {}", orders_url);

        Ok(Self { http, orders_url })
    }

    /// `<base><orders-path>`, or `<base><orders-path>/<order_id>` when an id is given
    ///
    /// The id always lands in a single path segment: `/`, `?`, `#` and `%`
    /// are percent-encoded.
    pub fn orders_url(&self, order_id: Option<&str>) -> Result<Url> {
        let mut url = self.orders_url.clone();
        if let Some(id) = order_id {
            check_order_id(id)?;
            url.path_segments_mut()
                .map_err(|_| anyhow!("Upstream orders URL cannot take path segments: {}", self.orders_url))?
                .pop_if_empty()
                .push(id);
        }
        Ok(url)
    }

    pub async fn fetch_orders(&self) -> Result<UpstreamResponse> {
        self.get(self.orders_url(None)?).await
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<UpstreamResponse> {
        self.get(self.orders_url(Some(order_id))?).await
    }

    /// Perform a single GET and buffer the whole body
    ///
    /// Any completed exchange is `Ok`, whatever its status. Transport
    /// failures (connect, TLS, timeout) and body read failures are `Err`.
    pub async fn get(&self, url: Url) -> Result<UpstreamResponse> {
        let url_text = url.to_string();
        tracing::info!("Requesting upstream: {}", url_text);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Upstream request to {} failed", url_text))?;

        let status = response.status();
        tracing::info!("Upstream responded with status: {}", status.as_u16());

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read upstream response from {}", url_text))?;

        tracing::debug!("Read {} bytes from {}", body.len(), url_text);

        Ok(UpstreamResponse {
            url: url_text,
            status,
            body,
        })
    }
}

/// Reject ids that cannot stand as one literal path segment
///
/// URL serialization drops `.` and `..` segments and strips tabs and
/// newlines, so such ids would address a different upstream path.
pub fn check_order_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("orderId is required");
    }
    if id == "." || id == ".." {
        bail!("orderId '{}' is not a valid path segment", id);
    }
    if id.chars().any(char::is_control) {
        bail!("orderId must not contain control characters");
    }
    Ok(())
}
