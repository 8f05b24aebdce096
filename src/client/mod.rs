//! Authenticated HTTP transport shared by every API call.
//!
//! Outgoing requests pick up the stored access token as a bearer header.
//! A 401 on a recoverable request hands control to the refresh coordinator
//! in [`refresh`]: the request joins the current refresh wave (opening one
//! if none is in flight), then replays itself once with the fresh token.

mod refresh;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{FlotillaError, Result};
use crate::store::{CredentialKey, CredentialStore};

use refresh::RefreshGate;

/// Token-issue endpoint; never subject to refresh recovery.
pub(crate) const LOGIN_PATH: &str = "token/";
/// Token-refresh endpoint; never subject to refresh recovery.
pub(crate) const REFRESH_PATH: &str = "token/refresh/";

/// Shared HTTP client for the fleet API.
///
/// Cloning is cheap; clones share the connection pool, the credential
/// store, and the refresh-wave state.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    store: Arc<dyn CredentialStore>,
    gate: Arc<RefreshGate>,
}

/// Everything needed to issue (and re-issue) one request.
#[derive(Debug, Clone)]
struct RequestParts {
    method: Method,
    path: String,
    body: Option<Value>,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                FlotillaError::Configuration(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            http,
            base_url: Arc::from(config.base_url()),
            store,
            gate: Arc::new(RefreshGate::new()),
        })
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// `POST` a JSON body, discarding the response payload.
    pub async fn post_discard<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    pub(crate) fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Issue one request, recovering from an expired access token when the
    /// endpoint allows it.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let parts = RequestParts {
            method,
            path: path.to_string(),
            body,
        };

        let response = self.send_once(&parts, None).await?;
        if response.status() != StatusCode::UNAUTHORIZED || is_auth_exempt(&parts.path) {
            return into_api_result(response).await;
        }

        // First 401 on a recoverable request: wait out the refresh wave,
        // then replay with the token it produced. The replay consumes this
        // request's single retry, so a second 401 surfaces as-is.
        let access_token = self.await_refresh_outcome().await?;
        let replay = self.send_once(&parts, Some(&access_token)).await?;
        into_api_result(replay).await
    }

    async fn send_once(&self, parts: &RequestParts, token_override: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, parts.path);
        let mut request = self.http.request(parts.method.clone(), &url);
        let token = match token_override {
            Some(token) => Some(token.to_string()),
            None => self.stored_access_token().await,
        };
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &parts.body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Request authenticator. A store read failure is logged and the
    /// request proceeds unauthenticated rather than failing outright.
    async fn stored_access_token(&self) -> Option<String> {
        match self.store.get(CredentialKey::AccessToken).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "credential store read failed; sending request without Authorization"
                );
                None
            }
        }
    }
}

/// Map a response to `Ok` on 2xx or an API error carrying the backend's
/// `detail` text otherwise.
pub(crate) async fn into_api_result(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FlotillaError::api(status.as_u16(), detail_message(&body)))
}

fn detail_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "error"].iter().find_map(|key| {
                value.get(key).and_then(Value::as_str).map(str::to_string)
            })
        })
        .unwrap_or_else(|| body.trim().to_string())
}

fn is_auth_exempt(path: &str) -> bool {
    path == LOGIN_PATH || path == REFRESH_PATH
}
