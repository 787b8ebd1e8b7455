use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FetchError, PokedexError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: JsonTransport + ?Sized> JsonTransport for Arc<T> {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).get_json(url).await
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, PokedexError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pokedex-pipeline/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PokedexError::HttpClient(err.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| PokedexError::HttpClient(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| classify_reqwest_error(url, &err))?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| classify_reqwest_error(url, &err))
    }
}

fn classify_reqwest_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_decode() {
        FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Gateway<T: JsonTransport> {
    transport: T,
    timeout: Duration,
}

impl<T: JsonTransport> Gateway<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn fetch_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, FetchError> {
        tracing::debug!(url, "gateway.request");
        let start = std::time::Instant::now();
        let value = tokio::time::timeout(self.timeout, self.transport.get_json(url))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
            })??;
        let decoded = serde_json::from_value(value).map_err(|err| FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        tracing::debug!(url, latency_ms = start.elapsed().as_millis() as u64, "gateway.response");
        Ok(decoded)
    }
}
