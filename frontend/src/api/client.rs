use reqwest::{Client, Method, Request};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::{ApiError, Envelope},
    config,
    utils::{browser, storage},
};

pub const ACCESS_TOKEN_KEY: &str = "pp_access_token";
pub const CURRENT_USER_KEY: &str = "pp_current_user";

/// Status and body of a finished HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
        }
    }

    pub async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn auth_header() -> Option<String> {
        storage::get_item(ACCESS_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
            .map(|token| format!("Bearer {}", token))
    }

    /// Drops the stored token and user so the next page load starts at login.
    pub fn clear_auth_session() {
        storage::remove_item(ACCESS_TOKEN_KEY);
        storage::remove_item(CURRENT_USER_KEY);
    }

    async fn build(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Request, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut builder = self
            .client
            .request(method, format!("{}{}", base_url, path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(header) = Self::auth_header() {
            builder = builder.header(reqwest::header::AUTHORIZATION, header);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))
    }

    async fn execute(&self, request: Request) -> Result<RawResponse, ApiError> {
        if let Some(intercepted) = test_hook::intercept(&request) {
            return intercepted;
        }
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        Ok(RawResponse { status, body })
    }

    /// Sends one request and turns non-2xx answers into [`ApiError`].
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, ApiError> {
        let request = self.build(method.clone(), path, query, body).await?;
        let response = self.execute(request).await.map_err(|err| {
            log::error!("{} {} failed: {}", method, path, err);
            err
        })?;
        if response.is_success() {
            return Ok(response);
        }
        let error = ApiError::from_response(response.status, &response.body);
        log::error!(
            "{} {} returned {}: {}",
            method,
            path,
            response.status,
            error.error
        );
        if error.is_unauthorized() {
            Self::clear_auth_session();
            browser::redirect_to_entry();
        }
        Err(error)
    }

    fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ApiError> {
        serde_json::from_str::<Envelope<T>>(&response.body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::unknown(format!("Failed to encode request: {}", e)))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, query, None).await?;
        Self::decode(&response)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(Method::POST, path, &[], Some(Self::encode(body)?))
            .await?;
        Self::decode(&response)
    }

    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(Method::PATCH, path, &[], Some(Self::encode(body)?))
            .await?;
        Self::decode(&response)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, &[], None).await.map(|_| ())
    }
}

#[cfg(not(all(test, not(target_arch = "wasm32"))))]
mod test_hook {
    use super::RawResponse;
    use crate::api::types::ApiError;

    #[inline]
    pub fn intercept(_request: &reqwest::Request) -> Option<Result<RawResponse, ApiError>> {
        None
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use test_hook::{register as register_mock, TestResponder};
