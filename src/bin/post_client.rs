//! One-shot client: POST a fixed JSON payload and print the decoded reply.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

const DEFAULT_POST_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPost {
    title: String,
    body: String,
    user_id: String,
}

impl Default for NewPost {
    fn default() -> Self {
        Self {
            title: "foo".to_string(),
            body: "bar".to_string(),
            user_id: "1".to_string(),
        }
    }
}

async fn send_post(client: &reqwest::Client, url: &str, post: &NewPost) -> Result<Map<String, JsonValue>> {
    tracing::info!("POST {}", url);

    let response = client
        .post(url)
        .json(post)
        .send()
        .await
        .with_context(|| format!("POST to {} failed", url))?;

    tracing::info!("Responded with status: {}", response.status().as_u16());

    response
        .json::<Map<String, JsonValue>>()
        .await
        .context("Response was not a JSON object")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let url = env::var("POST_CLIENT_URL").unwrap_or_else(|_| DEFAULT_POST_URL.to_string());
    let timeout_ms = env::var("POST_CLIENT_TIMEOUT_MS")
        .unwrap_or_else(|_| "10000".to_string())
        .parse::<u64>()
        .context("POST_CLIENT_TIMEOUT_MS must be a number of milliseconds")?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .context("Failed to build HTTP client")?;

    let result = send_post(&client, &url, &NewPost::default()).await?;
    println!("{}", JsonValue::Object(result));

    Ok(())
}
