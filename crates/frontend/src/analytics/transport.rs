//! HTTP seam of the analytics client.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::Value;

use super::error::FetchError;

/// JSON over HTTP
#[async_trait(?Send)]
pub trait Transport {
    /// GET `url`; succeeds only on a 2xx status
    async fn probe(&self, url: &str) -> Result<(), FetchError>;

    /// GET `url` and parse the body as JSON
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;

    /// POST `body` as JSON to `url` and parse the response body
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError>;
}

/// Browser `fetch` via gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

async fn read_json(response: Response) -> Result<Value, FetchError> {
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn probe(&self, url: &str) -> Result<(), FetchError> {
        let response = Request::get(url).send().await?;
        if response.ok() {
            Ok(())
        } else {
            Err(FetchError::Status(response.status()))
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = Request::get(url).send().await?;
        read_json(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        let response = Request::post(url).json(body)?.send().await?;
        read_json(response).await
    }
}
