use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::{ApiError, ErrorBody};

const TIMEOUT: Duration = Duration::from_secs(30);

/// Supplies the `Authorization` header value at request time.
pub trait AuthHeaderProvider: Send + Sync {
    fn authorization(&self) -> Option<String>;
}

/// Client for the Record Store REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthHeaderProvider>,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: Arc<dyn AuthHeaderProvider>) -> Result<Self, ApiError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|err| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                auth,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn has_credentials(&self) -> bool {
        self.inner.auth.authorization().is_some()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let request = self.inner.client.request(method, url);
        match self.inner.auth.authorization() {
            Some(authorization) => request.header(reqwest::header::AUTHORIZATION, authorization),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(parse_error(response).await)
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(parse_error(response).await);
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|err| ApiError::Parse(format!("Failed to parse response: {err}")))
}

async fn parse_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    if status == 401 || status == 403 {
        return ApiError::Unauthorized;
    }
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(text);
    ApiError::Status { status, message }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
