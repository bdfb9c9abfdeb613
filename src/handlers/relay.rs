use crate::error::ApiError;
use crate::upstream::UpstreamResponse;
use anyhow::Result;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Turn an upstream outcome into the proxy's reply
///
/// A 200 is relayed byte for byte as `application/json`. Everything else
/// becomes an `ApiError`. The byte count is logged either way.
pub(crate) fn relay(
    outcome: Result<UpstreamResponse>,
    passthrough: bool,
) -> Result<Response, ApiError> {
    let upstream = match outcome {
        Ok(upstream) => upstream,
        Err(err) => {
            tracing::error!("Failed to fetch from upstream API: {:#} (0 bytes relayed)", err);
            return Err(ApiError::Upstream(err));
        }
    };

    if upstream.status != StatusCode::OK {
        let body = upstream.body_text();
        tracing::warn!(
            "Upstream {} returned status {} ({} bytes): {}",
            upstream.url,
            upstream.status.as_u16(),
            upstream.body.len(),
            body
        );
        return Err(ApiError::UpstreamStatus {
            status: upstream.status,
            body,
            passthrough,
        });
    }

    tracing::info!(
        "Success: {} bytes relayed from {}",
        upstream.body.len(),
        upstream.url
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response())
}
