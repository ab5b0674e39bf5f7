// ABOUTME: HTTP client for the hosted auth + row-store collaborator
// ABOUTME: Maps session and record operations onto its auth and REST endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! REST implementation of [`RemoteBackend`]
//!
//! - Auth: `POST auth/v1/token?grant_type=password|refresh_token`, `POST auth/v1/signup`,
//!   `POST auth/v1/logout`, `POST auth/v1/recover`
//! - Records: `GET|POST|PATCH rest/v1/{table}` with `column=op.value` filters and
//!   `order=column.asc|desc`
//!
//! Every request carries the public `apikey` header; record calls additionally
//! carry the session bearer token so the collaborator scopes rows to the user.

use super::http_client::shared_client;
use super::session_storage::SessionStorage;
use super::{
    AuthUser, Direction, Filter, Query, RemoteBackend, Session, SignUpResult, UserMetadata,
};
use crate::config::BackendConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// Backend name used in logs
const BACKEND_NAME: &str = "rest";

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: UserResponse,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            user: self.user.into(),
        }
    }
}

/// User object as returned by the auth endpoints
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            metadata: user.user_metadata.unwrap_or_default(),
        }
    }
}

/// Error body; different endpoints use different keys for the message
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Refine an auth failure using the collaborator's message
fn classify_auth_error(status: u16, message: &str) -> ErrorCode {
    let lower = message.to_lowercase();
    if lower.contains("invalid login credentials") || lower.contains("invalid grant") {
        ErrorCode::AuthInvalid
    } else if lower.contains("already registered") || lower.contains("already exists") {
        ErrorCode::AuthUserExists
    } else if lower.contains("not confirmed") {
        ErrorCode::AuthEmailUnverified
    } else if lower.contains("password")
        && (lower.contains("weak") || lower.contains("should be") || lower.contains("at least"))
    {
        ErrorCode::AuthWeakPassword
    } else {
        ErrorCode::from_http_status(status)
    }
}

/// Turn a non-success response into an `AppError`
async fn ensure_success(response: Response, resource: &str, auth: bool) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        });

    let code = if auth {
        classify_auth_error(status.as_u16(), &message)
    } else {
        ErrorCode::from_http_status(status.as_u16())
    };
    Err(AppError::new(code, message).with_resource(resource))
}

/// Collaborator client over HTTP
pub struct RestBackend {
    client: Client,
    base_url: Url,
    anon_key: String,
    storage: SessionStorage,
    session: RwLock<Option<Session>>,
}

impl RestBackend {
    /// Create a client from configuration, using the shared pooled HTTP client
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(shared_client().clone(), config)
    }

    /// Create a client with an explicit HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            storage: SessionStorage::new(config.session_file.clone()),
            session: RwLock::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::config_invalid("FIT28_BACKEND_URL", e.to_string()))
    }

    fn auth_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.anon_key)
    }

    async fn record_request(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.clone());
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    async fn store_session(&self, session: Session) -> AppResult<Session> {
        if let Err(e) = self.storage.save(&session).await {
            warn!(error = %e, "Failed to persist session, it will not survive a restart");
        }
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn forget_session(&self) {
        *self.session.write().await = None;
        if let Err(e) = self.storage.clear().await {
            warn!(error = %e, "Failed to remove stored session");
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<Session> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");

        let response = self
            .auth_request(self.client.post(url))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response, "auth/token", true)
            .await?
            .json()
            .await?;
        self.store_session(token.into_session()).await
    }

    fn rest_url(&self, table: &str, filters: &[Filter]) -> AppResult<Url> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        if !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for filter in filters {
                pairs.append_pair(
                    &filter.column,
                    &format!("{}.{}", filter.op.as_str(), filter.value_as_param()),
                );
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl RemoteBackend for RestBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn get_session(&self) -> AppResult<Option<Session>> {
        let current = self.session.read().await.clone();
        let session = match current {
            Some(session) => session,
            None => match self.storage.load().await? {
                Some(session) => session,
                None => return Ok(None),
            },
        };

        if !session.is_expired_at(Utc::now()) {
            *self.session.write().await = Some(session.clone());
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            self.forget_session().await;
            return Ok(None);
        };

        match self.refresh(refresh_token).await {
            Ok(session) => {
                debug!(user_id = %session.user.id, "Session refreshed");
                Ok(Some(session))
            }
            Err(e) if e.is_connectivity() => Err(e),
            Err(e) => {
                info!(error = %e, "Stored session could not be refreshed");
                self.forget_session().await;
                Ok(None)
            }
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .auth_request(self.client.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response, "auth/token", true)
            .await?
            .json()
            .await?;
        self.store_session(token.into_session()).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AppResult<SignUpResult> {
        let url = self.endpoint("auth/v1/signup")?;
        let response = self
            .auth_request(self.client.post(url))
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;
        let body: Value = ensure_success(response, "auth/signup", true)
            .await?
            .json()
            .await?;

        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)?;
            let session = self.store_session(token.into_session()).await?;
            return Ok(SignUpResult {
                user: session.user.clone(),
                session: Some(session),
            });
        }

        // Without a session the body is the user object, possibly wrapped
        let user_value = body.get("user").cloned().unwrap_or(body);
        let user: UserResponse = serde_json::from_value(user_value)?;
        Ok(SignUpResult {
            user: user.into(),
            session: None,
        })
    }

    async fn sign_out(&self) -> AppResult<()> {
        let url = self.endpoint("auth/v1/logout")?;
        let request = self.record_request(self.client.post(url)).await;
        self.forget_session().await;

        let response = request.send().await?;
        ensure_success(response, "auth/logout", true).await?;
        Ok(())
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let mut url = self.endpoint("auth/v1/recover")?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);

        let response = self
            .auth_request(self.client.post(url))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        ensure_success(response, "auth/recover", true).await?;
        Ok(())
    }

    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>> {
        let mut url = self.rest_url(table, &query.filters)?;
        url.query_pairs_mut().append_pair("select", "*");
        if let Some(order) = &query.order {
            let direction = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            url.query_pairs_mut()
                .append_pair("order", &format!("{}.{direction}", order.column));
        }

        let response = self.record_request(self.client.get(url)).await.send().await?;
        let rows = ensure_success(response, table, false)
            .await?
            .json::<Vec<Value>>()
            .await?;
        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Value) -> AppResult<Value> {
        let url = self.rest_url(table, &[])?;
        let response = self
            .record_request(self.client.post(url))
            .await
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let rows = ensure_success(response, table, false)
            .await?
            .json::<Vec<Value>>()
            .await?;
        Ok(rows.into_iter().next().unwrap_or(Value::Null))
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> AppResult<()> {
        if filters.is_empty() {
            return Err(AppError::invalid_input(format!(
                "refusing unfiltered update of {table}"
            )));
        }
        let url = self.rest_url(table, filters)?;
        let response = self
            .record_request(self.client.patch(url))
            .await
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await?;
        ensure_success(response, table, false).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FilterOp;
    use std::path::PathBuf;

    fn backend() -> RestBackend {
        let config = BackendConfig {
            url: Url::parse("https://project.example.co/").unwrap(),
            anon_key: "anon".to_owned(),
            password_reset_redirect: "fit28://reset-password".to_owned(),
            http_timeout_secs: 5,
            http_connect_timeout_secs: 5,
            session_file: PathBuf::from("/nonexistent/session.json"),
        };
        RestBackend::with_client(Client::new(), &config)
    }

    #[test]
    fn test_rest_url_encodes_filters() {
        let filters = vec![
            Filter::eq("user_id", "abc"),
            Filter {
                column: "created_at".to_owned(),
                op: FilterOp::Gte,
                value: json!("2026-10-19T00:00:00+00:00"),
            },
        ];
        let url = backend().rest_url("water_logs", &filters).unwrap();
        assert_eq!(url.path(), "/rest/v1/water_logs");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("user_id".to_owned(), "eq.abc".to_owned()));
        assert_eq!(
            pairs[1],
            (
                "created_at".to_owned(),
                "gte.2026-10-19T00:00:00+00:00".to_owned()
            )
        );
    }

    #[test]
    fn test_classify_auth_error() {
        assert_eq!(
            classify_auth_error(400, "Invalid login credentials"),
            ErrorCode::AuthInvalid
        );
        assert_eq!(
            classify_auth_error(422, "User already registered"),
            ErrorCode::AuthUserExists
        );
        assert_eq!(
            classify_auth_error(422, "Password should be at least 6 characters"),
            ErrorCode::AuthWeakPassword
        );
        assert_eq!(
            classify_auth_error(400, "Email not confirmed"),
            ErrorCode::AuthEmailUnverified
        );
        assert_eq!(
            classify_auth_error(429, "Too many requests"),
            ErrorCode::RateLimitExceeded
        );
    }

    #[test]
    fn test_token_response_into_session() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": {
                "id": "6f1c1f5e-7f0b-4f55-9f53-3f1f1b1d2a10",
                "email": "jane@example.com",
                "user_metadata": { "full_name": "Jane Doe" }
            }
        }))
        .unwrap();
        let session = token.into_session();
        assert_eq!(session.user.email, "jane@example.com");
        assert_eq!(session.user.metadata.full_name.as_deref(), Some("Jane Doe"));
        assert!(!session.is_expired_at(Utc::now()));
    }
}
