//! HTTP client for the Predictus `/token`, `/importar` and `/achados` endpoints.

use async_trait::async_trait;
use predictus_core::{ErrorBody, FindingsResponse, ImportAck, ImportRequest, IDENTIFIER_FIELD};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::info;

/// Cookie the server keeps the session JWT in.
const SESSION_COOKIE: &str = "access_token";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Rejected {
        status: u16,
        /// The server's message from the response body, when there was one.
        message: Option<String>,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("login accepted but no access_token cookie was set")]
    NoSession,
}

impl ClientError {
    /// Message the server attached to a rejection.
    ///
    /// `None` for transport and parse failures, and for rejections whose
    /// body carried no message.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the server answered with a non-success status.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// The two calls an import cycle makes.
///
/// [`LookupClient`] is the network implementation; the UI controller only
/// sees this trait.
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Submit the import form. Success content beyond the status is not used
    /// by callers.
    async fn import(&self, request: &ImportRequest) -> Result<ImportAck, ClientError>;

    /// Fetch findings and the per-class summary for an identifier.
    async fn findings(&self, cpf_cnpj: &str) -> Result<FindingsResponse, ClientError>;
}

/// Connection settings for [`LookupClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Like `http://localhost:8000`; a trailing slash is tolerated.
    pub base_url: String,
    /// JWT sent as the `access_token` cookie.
    pub access_token: Option<String>,
}

impl ClientConfig {
    /// Anonymous settings for a server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
        }
    }

    /// Reuse a JWT from an earlier login.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// HTTP client for the login, import and findings endpoints.
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl LookupClient {
    /// Build a client; no request is made until the first call.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.access_token,
        }
    }

    /// The session JWT, from the config or the last successful login.
    pub fn access_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in with the `/token` form and keep the session cookie.
    ///
    /// A bare user name is sent as-is; the server appends its own domain.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let url = format!("{}/token", self.base_url);

        info!(url = %url, email, "logging in");
        let resp = self
            .client
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(rejection(resp, ErrorBody::message).await);
        }

        let token = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_token)
            .ok_or(ClientError::NoSession)?;
        self.token = Some(token);
        info!(email, "logged in");
        Ok(())
    }

    fn cookie_header(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{SESSION_COOKIE}=Bearer {token}"))
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.cookie_header() {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    fn import_form(request: &ImportRequest) -> Form {
        let mut form = Form::new();
        for (name, value) in request.fields() {
            form = form.text(name.clone(), value.clone());
        }
        if let Some(att) = request.attachment() {
            let part = Part::bytes(att.bytes.clone()).file_name(att.file_name.clone());
            form = form.part(att.field.clone(), part);
        }
        form
    }
}

/// Read a non-success response into a [`ClientError::Rejected`], taking the
/// message from the parsed body with `pick`.
async fn rejection(resp: reqwest::Response, pick: fn(ErrorBody) -> Option<String>) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Rejected {
        status,
        message: serde_json::from_str::<ErrorBody>(&body).ok().and_then(pick),
    }
}

/// The application's own `erro` field. Framework errors fall back to the
/// caller's generic message.
fn application_error(body: ErrorBody) -> Option<String> {
    body.erro
}

/// JWT out of a `Set-Cookie` value like `access_token="Bearer <jwt>"; HttpOnly`.
fn session_token(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    if name.trim() != SESSION_COOKIE {
        return None;
    }
    let value = value.trim().trim_matches('"');
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[async_trait]
impl LookupBackend for LookupClient {
    async fn import(&self, request: &ImportRequest) -> Result<ImportAck, ClientError> {
        let url = format!("{}/importar", self.base_url);

        info!(
            url = %url,
            fields = request.fields().len(),
            attachment = request.attachment().is_some(),
            "submitting import"
        );
        let form = Self::import_form(request);
        let resp = self
            .with_auth(self.client.post(&url).multipart(form))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(rejection(resp, application_error).await);
        }

        let body = resp.text().await?;
        let ack: ImportAck = serde_json::from_str(&body)?;
        info!(mensagem = ack.mensagem.as_deref().unwrap_or(""), "import accepted");
        Ok(ack)
    }

    async fn findings(&self, cpf_cnpj: &str) -> Result<FindingsResponse, ClientError> {
        let url = format!("{}/achados", self.base_url);

        info!(url = %url, "fetching findings");
        let resp = self
            .with_auth(self.client.get(&url).query(&[(IDENTIFIER_FIELD, cpf_cnpj)]))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(rejection(resp, application_error).await);
        }

        let body = resp.text().await?;
        let findings: FindingsResponse = serde_json::from_str(&body)?;
        info!(
            total = findings.total,
            summary_rows = findings.resumo.len(),
            achados = findings.achados.len(),
            "fetched findings"
        );
        Ok(findings)
    }
}
