use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::api::RunRequest;
use crate::error::Result;

pub async fn post_run(
    api_key: &str,
    api_endpoint: &str,
    request: &RunRequest,
) -> Result<reqwest::Response> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
            crate::error::FinchatError::Other(format!("Invalid authorization header: {}", e))
        })?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    let response = client.post(api_endpoint).json(&request).send().await?;
    Ok(response)
}
