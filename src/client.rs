//! Authenticated HTTP transport for the Waitless admin API.
//!
//! [`AdminClient`] wraps a [`reqwest::Client`] and owns the concerns
//! every request shares: attaching the bearer token from the session
//! store, the fixed per-request timeout, slow-request diagnostics, and
//! the one-shot refresh-and-retry flow on a 401 response.

use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

use reqwest::{Method, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{Config, Environment};
use crate::error::{FieldError, Result, WaitlessError};
use crate::models::Envelope;
use crate::session::SessionStore;

/// Requests slower than this are logged outside production.
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(1000);

/// Path of the token refresh endpoint, relative to the base URL.
const REFRESH_PATH: &str = "auth/refresh";

/// Stage of the refresh-and-retry flow a request is in.
///
/// The flow is deliberately a two-state machine rather than a flag
/// threaded through callbacks: a request starts [`RefreshStage::Fresh`];
/// a 401 there triggers exactly one token refresh and moves the retry to
/// [`RefreshStage::Retried`], where a second 401 is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshStage {
    /// First attempt; a 401 may still be recovered by refreshing.
    Fresh,
    /// Already retried once after a refresh; a 401 is final.
    Retried,
}

/// Error body shape the API uses for non-success statuses.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    /// Summary message.
    #[serde(default)]
    message: Option<String>,
    /// Field-level validation failures (422 responses).
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// Payload of a successful token refresh.
#[derive(Debug, serde::Deserialize)]
struct TokenPair {
    /// New access token.
    token: String,
    /// Rotated refresh token, when the server rotates it.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Request body sent to the refresh endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    /// Current refresh token.
    refresh_token: &'a str,
}

/// Builder for [`AdminClient`].
#[derive(Debug)]
pub struct AdminClientBuilder<S> {
    /// Resolved client configuration.
    config: Config,
    /// Session store shared with the embedding application.
    session: Arc<S>,
}

impl<S: SessionStore> AdminClientBuilder<S> {
    /// Creates a builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new(session: Arc<S>) -> Self {
        Self {
            config: Config::default(),
            session,
        }
    }

    /// Sets the configuration.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    #[inline]
    pub fn build(self) -> Result<AdminClient<S>> {
        AdminClient::new(self.config, self.session)
    }
}

/// Authenticated HTTP client for the admin API.
///
/// Cheap to clone; clones share the connection pool and the session
/// store.
#[derive(Debug)]
pub struct AdminClient<S> {
    /// Underlying HTTP client with the configured timeout applied.
    http: reqwest::Client,
    /// API base URL, without a trailing slash.
    base_url: String,
    /// Deployment environment, gating slow-request diagnostics.
    environment: Environment,
    /// Session store providing tokens for every request.
    session: Arc<S>,
}

impl<S> Clone for AdminClient<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            environment: self.environment,
            session: Arc::clone(&self.session),
        }
    }
}

impl<S: SessionStore> AdminClient<S> {
    /// Creates a client from resolved configuration and a session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: Config, session: Arc<S>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            environment: config.environment,
            session,
        })
    }

    /// Returns a builder for step-by-step construction.
    #[inline]
    #[must_use]
    pub fn builder(session: Arc<S>) -> AdminClientBuilder<S> {
        AdminClientBuilder::new(session)
    }

    /// Sends a GET request with the given query pairs.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[inline]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Envelope<T>> {
        self.execute(Method::GET, path, query, None::<&()>).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[inline]
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[inline]
    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.execute(Method::PUT, path, &[], Some(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[inline]
    pub async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.execute(Method::PATCH, path, &[], Some(body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[inline]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.execute(Method::DELETE, path, &[], None::<&()>).await
    }

    // ── Request pipeline ────────────────────────────────────────────

    /// Runs a request through the refresh-and-retry state machine and
    /// deserializes the response envelope.
    async fn execute<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<Envelope<T>> {
        let mut stage = RefreshStage::Fresh;
        loop {
            let response = self.send_once(method.clone(), path, query, body).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && stage == RefreshStage::Fresh {
                // One refresh per request, never recursive.
                self.refresh_session().await?;
                stage = RefreshStage::Retried;
                continue;
            }
            if status.is_success() {
                return Ok(response.json::<Envelope<T>>().await?);
            }
            return Err(classify_failure(response).await);
        }
    }

    /// Sends a single attempt: builds the request, attaches the bearer
    /// token when a session exists, and logs slow responses.
    async fn send_once<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = self.url_for(path);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }
        if let Some(token) = self.session.access_token()? {
            request = request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let started = Instant::now();
        let response = request.send().await?;
        let elapsed = started.elapsed();
        tracing::debug!(
            method = %method,
            path,
            status = response.status().as_u16(),
            "request completed"
        );
        if elapsed > SLOW_REQUEST_THRESHOLD && self.environment != Environment::Production {
            tracing::warn!(
                method = %method,
                path,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "slow API request"
            );
        }
        Ok(response)
    }

    /// Exchanges the stored refresh token for a new token pair.
    ///
    /// Any failure along the way clears the session and surfaces as
    /// [`WaitlessError::SessionExpired`], signalling the embedder to
    /// send the user back to the login screen.
    async fn refresh_session(&self) -> Result<()> {
        match self.try_refresh().await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(error = %err, "token refresh failed");
                if let Err(clear_err) = self.session.clear() {
                    tracing::warn!(error = %clear_err, "failed to clear expired session");
                }
                Err(WaitlessError::SessionExpired)
            }
        }
    }

    /// Performs the refresh call itself. No bearer header: the refresh
    /// token in the body is the credential.
    async fn try_refresh(&self) -> Result<()> {
        let refresh = self
            .session
            .refresh_token()?
            .ok_or(WaitlessError::Unauthorized)?;
        let response = self
            .http
            .post(self.url_for(REFRESH_PATH))
            .json(&RefreshRequest {
                refresh_token: refresh.expose_secret(),
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(classify_failure(response).await);
        }
        let envelope = response.json::<Envelope<TokenPair>>().await?;
        let pair = envelope.data;
        self.session.store_tokens(
            SecretString::from(pair.token),
            pair.refresh_token.map(SecretString::from),
        )?;
        Ok(())
    }

    /// Joins a relative path onto the base URL.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Classifies a non-success response into an error variant, parsing the
/// `{message, errors}` body when the server provides one.
async fn classify_failure(response: reqwest::Response) -> WaitlessError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("request failed with status {status}"));
    WaitlessError::from_status(status, message, parsed.errors)
}
