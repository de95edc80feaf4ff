use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};

use super::endpoints;
use super::models::{AccountView, Domain, MessageDetail, MessageSummary};

const MAILTM_API_BASE_URL: &str = "https://api.mail.tm";

/// Domains kept selectable even when the provider's domain listing is thin.
const FALLBACK_DOMAINS: &[&str] = &[
    "bugfoo.com",
    "cloudns.asia",
    "cloudns.club",
    "cloudns.eu",
    "email.de",
    "guerrillamail.com",
    "guerrillamailblock.com",
    "haribu.net",
    "vomoto.com",
    "disposable.com",
];

#[derive(Debug, Clone)]
pub struct MailClient {
    http: Client,
    base_url: String,
}

impl MailClient {
    pub fn new() -> Self {
        Self::with_base_url(MAILTM_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_domains(&self) -> AppResult<Vec<Domain>> {
        let collection: Collection<Domain> = self
            .get_json(endpoints::domains_endpoint(), None)
            .await?;
        Ok(merge_fallback_domains(collection.into_items()))
    }

    pub async fn create_account(&self, address: &str, password: &str) -> AppResult<AccountView> {
        let request = CredentialsRequest { address, password };
        self.post_json(endpoints::accounts_endpoint(), &request)
            .await
    }

    /// Exchanges mailbox credentials for an opaque bearer token.
    pub async fn authenticate(&self, address: &str, password: &str) -> AppResult<String> {
        let request = CredentialsRequest { address, password };
        let response: TokenResponse = self.post_json(endpoints::token_endpoint(), &request).await?;
        Ok(response.token)
    }

    pub async fn list_messages(&self, token: &str) -> AppResult<Vec<MessageSummary>> {
        let collection: Collection<MessageSummary> = self
            .get_json(endpoints::messages_endpoint(), Some(token))
            .await?;
        Ok(collection.into_items())
    }

    pub async fn get_message(&self, token: &str, id: &str) -> AppResult<MessageDetail> {
        let endpoint = endpoints::message_endpoint(id);
        self.get_json(&endpoint, Some(token)).await
    }

    /// Best-effort: callers apply local removal regardless of the outcome,
    /// since the provider may not support deletion at all.
    pub async fn delete_message(&self, token: &str, id: &str) -> AppResult<()> {
        let url = self.endpoint_url(&endpoints::message_endpoint(id))?;
        let response = self.http.delete(url).bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.http.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.parse_json_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let response = self.http.post(url).json(body).send().await?;
        self.parse_json_response(response).await
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(endpoint.trim_start_matches('/'));
        Ok(url)
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

impl Default for MailClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The provider wraps collections under a `hydra:member` key, but response
/// shapes vary; a bare array is accepted as the collection itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Collection<T> {
    Wrapped {
        #[serde(rename = "hydra:member")]
        member: Vec<T>,
    },
    Raw(Vec<T>),
}

impl<T> Collection<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Collection::Wrapped { member } => member,
            Collection::Raw(items) => items,
        }
    }
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    address: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default, rename = "hydra:description")]
    hydra_description: Option<String>,
}

fn merge_fallback_domains(mut domains: Vec<Domain>) -> Vec<Domain> {
    for fallback in FALLBACK_DOMAINS {
        if !domains.iter().any(|known| known.domain == *fallback) {
            domains.push(Domain {
                domain: (*fallback).to_string(),
            });
        }
    }
    domains
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AppError::RateLimited;
    }

    let message = parse_provider_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!("authentication failed ({status}): {message}"));
    }

    if status == StatusCode::NOT_FOUND {
        return AppError::NotFound(message);
    }

    AppError::Provider(format!("provider request failed ({status}): {message}"))
}

fn parse_provider_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ProviderErrorBody>(body).ok()?;
    parsed
        .message
        .or(parsed.hydra_description)
        .or(parsed.detail)
        .filter(|message| !message.trim().is_empty())
}
