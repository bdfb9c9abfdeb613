use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://tjufwmnunr.ap-northeast-1.awsapprunner.com/api/v1";
const DEFAULT_ORDERS_PATH: &str = "/orders";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_base_url: String,
    pub upstream_orders_path: String,
    pub upstream_timeout: Duration,
    /// Answer with the real upstream status instead of collapsing to 500
    pub upstream_status_passthrough: bool,
    pub cors_allowed_origins: Vec<String>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());
        let parsed = reqwest::Url::parse(&upstream_base_url)
            .context("UPSTREAM_BASE_URL must be an absolute URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("UPSTREAM_BASE_URL must use http or https, got '{}'", parsed.scheme());
        }
        let upstream_base_url = upstream_base_url.trim_end_matches('/').to_string();

        let upstream_orders_path = lookup("UPSTREAM_ORDERS_PATH")
            .unwrap_or_else(|| DEFAULT_ORDERS_PATH.to_string());
        if !upstream_orders_path.starts_with('/') {
            bail!("UPSTREAM_ORDERS_PATH must start with '/', got '{}'", upstream_orders_path);
        }

        let timeout_ms = lookup("UPSTREAM_TIMEOUT_MS")
            .unwrap_or_else(|| "10000".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_MS must be a positive number of milliseconds")?;
        if timeout_ms == 0 {
            bail!("UPSTREAM_TIMEOUT_MS must be greater than zero");
        }

        let upstream_status_passthrough = match lookup("UPSTREAM_STATUS_PASSTHROUGH") {
            Some(value) => parse_bool(&value)
                .context("UPSTREAM_STATUS_PASSTHROUGH must be true or false")?,
            None => false,
        };

        let cors_allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        if cors_allowed_origins.is_empty() {
            bail!("CORS_ALLOWED_ORIGINS must name at least one origin");
        }
        // Credentials are allowed, so browsers reject a wildcard origin.
        if cors_allowed_origins.iter().any(|origin| origin == "*") {
            bail!("CORS_ALLOWED_ORIGINS cannot contain '*' when credentials are allowed");
        }

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "5001".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            upstream_base_url,
            upstream_orders_path,
            upstream_timeout: Duration::from_millis(timeout_ms),
            upstream_status_passthrough,
            cors_allowed_origins,
            service_port,
            service_host,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Upstream base URL: {}", self.upstream_base_url);
        tracing::info!("  Upstream orders path: {}", self.upstream_orders_path);
        tracing::info!("  Upstream timeout: {:?}", self.upstream_timeout);
        tracing::info!(
            "  Upstream status: {}",
            if self.upstream_status_passthrough { "passed through" } else { "collapsed to 500" }
        );
        tracing::info!("  CORS allowed origins: {}", self.cors_allowed_origins.join(", "));
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: '{}'", other),
    }
}
