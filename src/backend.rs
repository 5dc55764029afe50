//! Client for the hosted backend: Supabase auth (`/auth/v1`) and the
//! `travel_logs` table behind PostgREST (`/rest/v1`).
//!
//! Every call is a single round trip. Failures are classified into
//! [`ErrorKind`] here so callers only ever see localized messages.

use crate::config::{Config, MAX_LOG_FETCH_LIMIT};
use crate::messages::ErrorKind;
use crate::models::{LogQuery, TravelLogDraft, TravelLogEntry, UserMetadata};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

pub const LOGS_TABLE: &str = "travel_logs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    /// The project requires e-mail confirmation before the first sign-in.
    ConfirmationRequired(AuthUser),
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{}", .kind.localized())]
    Rejected { status: u16, kind: ErrorKind },
    #[error("{}", ErrorKind::NetworkFailure.localized())]
    Transport(#[source] reqwest::Error),
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Rejected { kind, .. } => kind.clone(),
            BackendError::Transport(_) => ErrorKind::NetworkFailure,
            BackendError::Decode(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// The stored session is no longer accepted and must be dropped.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            BackendError::Rejected { status, kind } => {
                *status == 401
                    || matches!(kind, ErrorKind::SessionExpired | ErrorKind::SessionMissing)
            }
            _ => false,
        }
    }

    fn not_found() -> Self {
        BackendError::Rejected {
            status: StatusCode::NOT_FOUND.as_u16(),
            kind: ErrorKind::RecordNotFound,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Turns a non-2xx response into a classified error.
pub(crate) fn rejection(status: u16, body: &str) -> BackendError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty());

    let kind = match message {
        Some(message) => match ErrorKind::classify(&message) {
            ErrorKind::Untranslated(_) if status >= 500 => ErrorKind::ServiceUnavailable,
            kind => kind,
        },
        None => match status {
            401 => ErrorKind::SessionExpired,
            403 => ErrorKind::PermissionDenied,
            404 => ErrorKind::RecordNotFound,
            status if status >= 500 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Untranslated(format!("HTTP {status}")),
        },
    };
    BackendError::Rejected { status, kind }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// PostgREST query parameters for `query`, scoped to `user_id`.
pub(crate) fn log_filters(
    query: &LogQuery,
    user_id: &str,
    fetch_limit: usize,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("user_id".to_string(), format!("eq.{user_id}")),
    ];

    if let Some(country) = query.country.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        params.push(("country".into(), format!("eq.{}", country.to_ascii_uppercase())));
    }
    if let Some(from) = query.year_from {
        params.push(("start_date".into(), format!("gte.{from:04}-01-01")));
    }
    if let Some(to) = query.year_to {
        params.push(("start_date".into(), format!("lte.{to:04}-12-31")));
    }
    if let Some(purpose) = query.purpose {
        params.push(("purpose".into(), format!("eq.{}", purpose.as_str())));
    }
    if !query.tags.is_empty() {
        let tags: Vec<String> = query.tags.iter().map(|t| quote(t)).collect();
        params.push(("tags".into(), format!("ov.{{{}}}", tags.join(","))));
    }
    if let Some(text) = query.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = quote(&format!("*{text}*"));
        params.push((
            "or".into(),
            format!("(city.ilike.{pattern},memo.ilike.{pattern})"),
        ));
    }

    let cap = fetch_limit.min(MAX_LOG_FETCH_LIMIT);
    let limit = query.limit.unwrap_or(cap).min(cap);
    params.push(("order".into(), "start_date.desc,created_at.desc".into()));
    params.push(("limit".into(), limit.to_string()));
    if let Some(offset) = query.offset.filter(|o| *o > 0) {
        params.push(("offset".into(), offset.to_string()));
    }
    params
}

/// Metadata as sent on updates. The auth server merges `data` key by key,
/// so a cleared field has to go out as an explicit `null`.
#[derive(Serialize)]
struct MetadataChange<'a> {
    name: Option<&'a str>,
    residence_country: Option<&'a str>,
}

impl<'a> From<&'a UserMetadata> for MetadataChange<'a> {
    fn from(metadata: &'a UserMetadata) -> Self {
        Self {
            name: metadata.name.as_deref(),
            residence_country: metadata.residence_country.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct NewRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    draft: &'a TravelLogDraft,
}

#[derive(Serialize)]
struct ChangedRow<'a> {
    #[serde(flatten)]
    draft: &'a TravelLogDraft,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    fetch_limit: usize,
}

impl SupabaseClient {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        timeout: Duration,
        fetch_limit: usize,
    ) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            fetch_limit,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            config.backend_timeout,
            config.log_fetch_limit,
        )
    }

    pub fn fetch_limit(&self) -> usize {
        self.fetch_limit
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{LOGS_TABLE}", self.base_url)
    }

    fn authorize(&self, builder: RequestBuilder, session: Option<&AuthSession>) -> RequestBuilder {
        let token = session.map_or(self.anon_key.as_str(), |s| s.access_token.as_str());
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    async fn execute(builder: RequestBuilder) -> Result<String, BackendError> {
        let response = builder.send().await.map_err(|err| {
            warn!("backend request failed: {err}");
            BackendError::Transport(err)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(BackendError::Transport)?;
        if status.is_success() {
            return Ok(body);
        }

        let err = rejection(status.as_u16(), &body);
        warn!(status = status.as_u16(), "backend rejected request: {err}");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        let body = Self::execute(builder).await?;
        serde_json::from_str(&body).map_err(|err| BackendError::Decode(err.to_string()))
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, BackendError> {
        debug!(email, "signing up");
        let request = self
            .authorize(self.http.post(self.auth_url("signup")), None)
            .json(&json!({ "email": email, "password": password, "data": metadata }));
        let body: Value = Self::send_json(request).await?;

        let decode = |err: serde_json::Error| BackendError::Decode(err.to_string());
        if body.get("access_token").is_some() {
            return serde_json::from_value(body)
                .map(SignUpOutcome::SignedIn)
                .map_err(decode);
        }
        let user = body
            .get("user")
            .filter(|user| !user.is_null())
            .cloned()
            .unwrap_or(body);
        serde_json::from_value(user)
            .map(SignUpOutcome::ConfirmationRequired)
            .map_err(decode)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        debug!(email, "signing in");
        let request = self
            .authorize(self.http.post(self.auth_url("token")), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        Self::send_json(request).await
    }

    pub async fn sign_out(&self, session: &AuthSession) -> Result<(), BackendError> {
        let request = self.authorize(self.http.post(self.auth_url("logout")), Some(session));
        Self::execute(request).await.map(|_| ())
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), BackendError> {
        let request = self
            .authorize(self.http.post(self.auth_url("recover")), None)
            .json(&json!({ "email": email }));
        Self::execute(request).await.map(|_| ())
    }

    pub async fn current_user(&self, session: &AuthSession) -> Result<AuthUser, BackendError> {
        let request = self.authorize(self.http.get(self.auth_url("user")), Some(session));
        Self::send_json(request).await
    }

    pub async fn update_metadata(
        &self,
        session: &AuthSession,
        metadata: &UserMetadata,
    ) -> Result<AuthUser, BackendError> {
        let request = self
            .authorize(self.http.put(self.auth_url("user")), Some(session))
            .json(&json!({ "data": MetadataChange::from(metadata) }));
        Self::send_json(request).await
    }

    pub async fn list_logs(
        &self,
        session: &AuthSession,
        query: &LogQuery,
    ) -> Result<Vec<TravelLogEntry>, BackendError> {
        let params = log_filters(query, &session.user.id, self.fetch_limit);
        let request = self
            .authorize(self.http.get(self.table_url()), Some(session))
            .query(&params);
        let logs: Vec<TravelLogEntry> = Self::send_json(request).await?;
        debug!(count = logs.len(), "fetched travel logs");
        Ok(logs)
    }

    /// Every log of the signed-in user, up to the fetch limit.
    pub async fn all_logs(&self, session: &AuthSession) -> Result<Vec<TravelLogEntry>, BackendError> {
        self.list_logs(session, &LogQuery::default()).await
    }

    pub async fn search_logs(
        &self,
        session: &AuthSession,
        text: &str,
        limit: usize,
    ) -> Result<Vec<TravelLogEntry>, BackendError> {
        let query = LogQuery {
            text: Some(text.to_string()),
            limit: Some(limit),
            ..LogQuery::default()
        };
        self.list_logs(session, &query).await
    }

    pub async fn get_log(&self, session: &AuthSession, id: &str) -> Result<TravelLogEntry, BackendError> {
        let request = self
            .authorize(self.http.get(self.table_url()), Some(session))
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ]);
        let rows: Vec<TravelLogEntry> = Self::send_json(request).await?;
        rows.into_iter().next().ok_or_else(BackendError::not_found)
    }

    pub async fn create_log(
        &self,
        session: &AuthSession,
        draft: &TravelLogDraft,
    ) -> Result<TravelLogEntry, BackendError> {
        let row = NewRow {
            user_id: &session.user.id,
            draft,
        };
        let request = self
            .authorize(self.http.post(self.table_url()), Some(session))
            .header("Prefer", "return=representation")
            .json(&row);
        let rows: Vec<TravelLogEntry> = Self::send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no rows".into()))
    }

    pub async fn update_log(
        &self,
        session: &AuthSession,
        id: &str,
        draft: &TravelLogDraft,
    ) -> Result<TravelLogEntry, BackendError> {
        let row = ChangedRow {
            draft,
            updated_at: Utc::now(),
        };
        let request = self
            .authorize(self.http.patch(self.table_url()), Some(session))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&row);
        let rows: Vec<TravelLogEntry> = Self::send_json(request).await?;
        rows.into_iter().next().ok_or_else(BackendError::not_found)
    }

    pub async fn delete_log(&self, session: &AuthSession, id: &str) -> Result<(), BackendError> {
        let request = self
            .authorize(self.http.delete(self.table_url()), Some(session))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");
        let rows: Vec<Value> = Self::send_json(request).await?;
        if rows.is_empty() {
            return Err(BackendError::not_found());
        }
        Ok(())
    }
}
