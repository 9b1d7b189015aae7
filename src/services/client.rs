//! HTTP client service
//!
//! Encapsulates HTTP communication with the Relay API: one execution
//! chokepoint shared by every endpoint method, with retry, backoff, timeout
//! enforcement, and rate-limit header parsing.

use reqwest::header::{HeaderMap, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::api_keys::{ApiKeySummary, CreateApiKeyRequest, CreateApiKeyResponse};
use crate::models::audiences::{Audience, CreateAudienceRequest};
use crate::models::broadcasts::{
    Broadcast, BroadcastIdResponse, CreateBroadcastRequest, SendBroadcastRequest,
    UpdateBroadcastRequest,
};
use crate::models::contacts::{
    Contact, ContactIdResponse, CreateContactRequest, UpdateContactRequest,
};
use crate::models::domains::{CreateDomainRequest, Domain, UpdateDomainRequest, VerifyDomainResponse};
use crate::models::emails::{
    Email, EmailIdResponse, SendBatchResponse, SendEmailRequest, SendEmailResponse,
    UpdateEmailRequest,
};
use crate::models::webhooks::{CreateWebhookRequest, CreateWebhookResponse, UpdateWebhookRequest, Webhook};
use crate::models::{Deleted, ListParams, ListResponse};
use crate::services::retry::{backoff_delay, classify_status, Disposition};
use crate::utils::error::ApiError;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.relay.com";

/// Default per-attempt timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default total attempt budget
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const RATELIMIT_LIMIT: &str = "ratelimit-limit";
const RATELIMIT_REMAINING: &str = "ratelimit-remaining";
const RATELIMIT_RESET: &str = "ratelimit-reset";

/// Immutable engine configuration, owned by one [`Client`] instance.
///
/// Worst-case latency of a single logical call is an emergent property of
/// these values: `timeout_ms * max_retries` plus the cumulative backoff
/// between attempts (with defaults, 30000 * 3 + 1000 + 2000 = 93 seconds).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credential; must not be empty
    pub api_key: String,
    /// Base URL all paths are resolved against
    pub base_url: String,
    /// Wall-clock timeout per attempt, in milliseconds
    pub timeout_ms: u64,
    /// Total number of attempts for retryable failures
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Rate-limit state parsed from response headers.
///
/// Present only when all three headers arrived and parsed as integers;
/// there is no partial snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Total requests allowed in the window
    pub limit: u64,
    /// Requests remaining in the window
    pub remaining: u64,
    /// Unix time the window resets at
    pub reset: u64,
}

/// Successful result of one logical API operation
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Endpoint-specific payload
    pub data: T,
    /// Rate-limit snapshot, when the response carried one
    pub rate_limit: Option<RateLimit>,
}

/// Result type alias for engine operations
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Relay API client
///
/// Stateless beyond its configuration; safe to construct fresh per command
/// invocation. Attempts for one logical call are strictly sequential, and
/// the engine never dispatches calls in parallel on its own.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client instance
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        if config.api_key.is_empty() {
            return Err(ApiError::network("API key must not be empty"));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform one logical API operation.
    ///
    /// Each attempt is a fresh HTTP exchange: URL built from the configured
    /// base, fixed headers attached, per-attempt timeout enforced. Responses
    /// with status >= 500 and failures that produced no response are retried
    /// under the attempt budget with exponential backoff; every 4xx is
    /// terminal immediately. 429 is 4xx and is therefore not retried here —
    /// callers inspect the rate-limit snapshot and pace themselves.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.config.base_url, path);
        let attempts = self.config.max_retries.max(1);
        let mut last_err: Option<ApiError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt - 1);
                debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .http
                .request(method.clone(), &url)
                .timeout(Duration::from_millis(self.config.timeout_ms))
                .bearer_auth(&self.config.api_key)
                .header(CONTENT_TYPE, "application/json")
                .header(
                    USER_AGENT,
                    concat!("relay-cli/", env!("CARGO_PKG_VERSION")),
                );
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(%method, %url, %status, attempt, "received API response");

                    match classify_status(status.as_u16()) {
                        Disposition::Success => return self.success(response).await,
                        Disposition::Retry => {
                            let err = error_from_response(status, response).await;
                            warn!(%status, attempt, "server error, will retry if budget remains");
                            last_err = Some(err);
                        }
                        Disposition::Fail => {
                            return Err(error_from_response(status, response).await);
                        }
                    }
                }
                Err(err) => {
                    let err = if err.is_timeout() {
                        ApiError::timeout(self.config.timeout_ms)
                    } else {
                        ApiError::network(format!("request failed: {}", err))
                    };
                    warn!(error = %err, attempt, "request failed before a response arrived");
                    last_err = Some(err);
                }
            }
        }

        // Budget exhausted: surface the most recently captured failure.
        Err(last_err
            .unwrap_or_else(|| ApiError::network("request failed with no attempts executed")))
    }

    /// Parse a success response into the typed payload plus snapshot
    async fn success<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();
        let rate_limit = parse_rate_limit(response.headers());
        if let Some(snapshot) = &rate_limit {
            debug!(
                limit = snapshot.limit,
                remaining = snapshot.remaining,
                reset = snapshot.reset,
                "rate limit snapshot"
            );
        }

        let data = response.json::<T>().await.map_err(|e| {
            ApiError::http(
                status.as_u16(),
                format!("failed to decode response body: {}", e),
                None,
            )
        })?;

        Ok(ApiResponse { data, rate_limit })
    }

    fn body<B: Serialize>(payload: &B) -> Result<Value, ApiError> {
        serde_json::to_value(payload)
            .map_err(|e| ApiError::network(format!("failed to encode request body: {}", e)))
    }

    // --- Emails ---

    /// `POST /emails`
    pub async fn send_email(&self, request: &SendEmailRequest) -> ApiResult<SendEmailResponse> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/emails", &[], Some(&body)).await
    }

    /// `POST /emails/batch` — up to 100 emails in one call
    pub async fn send_batch(&self, requests: &[SendEmailRequest]) -> ApiResult<SendBatchResponse> {
        let body = Self::body(&requests)?;
        self.execute(Method::POST, "/emails/batch", &[], Some(&body))
            .await
    }

    /// `GET /emails/:id`
    pub async fn get_email(&self, id: &str) -> ApiResult<Email> {
        self.execute(Method::GET, &format!("/emails/{}", id), &[], None)
            .await
    }

    /// `GET /emails`
    pub async fn list_emails(&self, params: &ListParams) -> ApiResult<ListResponse<Email>> {
        self.execute(Method::GET, "/emails", &params.to_query(), None)
            .await
    }

    /// `PATCH /emails/:id` — reschedule a scheduled email
    pub async fn update_email(
        &self,
        id: &str,
        request: &UpdateEmailRequest,
    ) -> ApiResult<EmailIdResponse> {
        let body = Self::body(request)?;
        self.execute(Method::PATCH, &format!("/emails/{}", id), &[], Some(&body))
            .await
    }

    /// `POST /emails/:id/cancel`
    pub async fn cancel_email(&self, id: &str) -> ApiResult<EmailIdResponse> {
        self.execute(Method::POST, &format!("/emails/{}/cancel", id), &[], None)
            .await
    }

    // --- Domains ---

    /// `GET /domains`
    pub async fn list_domains(&self, params: &ListParams) -> ApiResult<ListResponse<Domain>> {
        self.execute(Method::GET, "/domains", &params.to_query(), None)
            .await
    }

    /// `POST /domains`
    pub async fn create_domain(&self, request: &CreateDomainRequest) -> ApiResult<Domain> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/domains", &[], Some(&body)).await
    }

    /// `GET /domains/:id`
    pub async fn get_domain(&self, id: &str) -> ApiResult<Domain> {
        self.execute(Method::GET, &format!("/domains/{}", id), &[], None)
            .await
    }

    /// `PATCH /domains/:id`
    pub async fn update_domain(
        &self,
        id: &str,
        request: &UpdateDomainRequest,
    ) -> ApiResult<Domain> {
        let body = Self::body(request)?;
        self.execute(Method::PATCH, &format!("/domains/{}", id), &[], Some(&body))
            .await
    }

    /// `DELETE /domains/:id`
    pub async fn delete_domain(&self, id: &str) -> ApiResult<Deleted> {
        self.execute(Method::DELETE, &format!("/domains/{}", id), &[], None)
            .await
    }

    /// `POST /domains/:id/verify` — trigger DNS verification
    pub async fn verify_domain(&self, id: &str) -> ApiResult<VerifyDomainResponse> {
        self.execute(Method::POST, &format!("/domains/{}/verify", id), &[], None)
            .await
    }

    // --- Audiences ---

    /// `GET /audiences`
    pub async fn list_audiences(&self, params: &ListParams) -> ApiResult<ListResponse<Audience>> {
        self.execute(Method::GET, "/audiences", &params.to_query(), None)
            .await
    }

    /// `POST /audiences`
    pub async fn create_audience(&self, request: &CreateAudienceRequest) -> ApiResult<Audience> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/audiences", &[], Some(&body))
            .await
    }

    /// `GET /audiences/:id`
    pub async fn get_audience(&self, id: &str) -> ApiResult<Audience> {
        self.execute(Method::GET, &format!("/audiences/{}", id), &[], None)
            .await
    }

    /// `DELETE /audiences/:id`
    pub async fn delete_audience(&self, id: &str) -> ApiResult<Deleted> {
        self.execute(Method::DELETE, &format!("/audiences/{}", id), &[], None)
            .await
    }

    // --- Contacts ---

    /// `GET /audiences/:id/contacts`
    pub async fn list_contacts(
        &self,
        audience_id: &str,
        params: &ListParams,
    ) -> ApiResult<ListResponse<Contact>> {
        self.execute(
            Method::GET,
            &format!("/audiences/{}/contacts", audience_id),
            &params.to_query(),
            None,
        )
        .await
    }

    /// `POST /audiences/:id/contacts`
    pub async fn create_contact(
        &self,
        audience_id: &str,
        request: &CreateContactRequest,
    ) -> ApiResult<ContactIdResponse> {
        let body = Self::body(request)?;
        self.execute(
            Method::POST,
            &format!("/audiences/{}/contacts", audience_id),
            &[],
            Some(&body),
        )
        .await
    }

    /// `GET /audiences/:id/contacts/:id`
    pub async fn get_contact(&self, audience_id: &str, id: &str) -> ApiResult<Contact> {
        self.execute(
            Method::GET,
            &format!("/audiences/{}/contacts/{}", audience_id, id),
            &[],
            None,
        )
        .await
    }

    /// `PATCH /audiences/:id/contacts/:id`
    pub async fn update_contact(
        &self,
        audience_id: &str,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ApiResult<ContactIdResponse> {
        let body = Self::body(request)?;
        self.execute(
            Method::PATCH,
            &format!("/audiences/{}/contacts/{}", audience_id, id),
            &[],
            Some(&body),
        )
        .await
    }

    /// `DELETE /audiences/:id/contacts/:id`
    pub async fn delete_contact(&self, audience_id: &str, id: &str) -> ApiResult<Deleted> {
        self.execute(
            Method::DELETE,
            &format!("/audiences/{}/contacts/{}", audience_id, id),
            &[],
            None,
        )
        .await
    }

    // --- Broadcasts ---

    /// `GET /broadcasts`
    pub async fn list_broadcasts(&self, params: &ListParams) -> ApiResult<ListResponse<Broadcast>> {
        self.execute(Method::GET, "/broadcasts", &params.to_query(), None)
            .await
    }

    /// `POST /broadcasts`
    pub async fn create_broadcast(
        &self,
        request: &CreateBroadcastRequest,
    ) -> ApiResult<BroadcastIdResponse> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/broadcasts", &[], Some(&body))
            .await
    }

    /// `GET /broadcasts/:id`
    pub async fn get_broadcast(&self, id: &str) -> ApiResult<Broadcast> {
        self.execute(Method::GET, &format!("/broadcasts/{}", id), &[], None)
            .await
    }

    /// `PATCH /broadcasts/:id`
    pub async fn update_broadcast(
        &self,
        id: &str,
        request: &UpdateBroadcastRequest,
    ) -> ApiResult<BroadcastIdResponse> {
        let body = Self::body(request)?;
        self.execute(
            Method::PATCH,
            &format!("/broadcasts/{}", id),
            &[],
            Some(&body),
        )
        .await
    }

    /// `DELETE /broadcasts/:id`
    pub async fn delete_broadcast(&self, id: &str) -> ApiResult<Deleted> {
        self.execute(Method::DELETE, &format!("/broadcasts/{}", id), &[], None)
            .await
    }

    /// `POST /broadcasts/:id/send`
    pub async fn send_broadcast(
        &self,
        id: &str,
        request: &SendBroadcastRequest,
    ) -> ApiResult<BroadcastIdResponse> {
        let body = Self::body(request)?;
        self.execute(
            Method::POST,
            &format!("/broadcasts/{}/send", id),
            &[],
            Some(&body),
        )
        .await
    }

    // --- Webhooks ---

    /// `GET /webhooks`
    pub async fn list_webhooks(&self, params: &ListParams) -> ApiResult<ListResponse<Webhook>> {
        self.execute(Method::GET, "/webhooks", &params.to_query(), None)
            .await
    }

    /// `POST /webhooks`
    pub async fn create_webhook(
        &self,
        request: &CreateWebhookRequest,
    ) -> ApiResult<CreateWebhookResponse> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/webhooks", &[], Some(&body))
            .await
    }

    /// `GET /webhooks/:id`
    pub async fn get_webhook(&self, id: &str) -> ApiResult<Webhook> {
        self.execute(Method::GET, &format!("/webhooks/{}", id), &[], None)
            .await
    }

    /// `PATCH /webhooks/:id`
    pub async fn update_webhook(
        &self,
        id: &str,
        request: &UpdateWebhookRequest,
    ) -> ApiResult<Webhook> {
        let body = Self::body(request)?;
        self.execute(
            Method::PATCH,
            &format!("/webhooks/{}", id),
            &[],
            Some(&body),
        )
        .await
    }

    /// `DELETE /webhooks/:id`
    pub async fn delete_webhook(&self, id: &str) -> ApiResult<Deleted> {
        self.execute(Method::DELETE, &format!("/webhooks/{}", id), &[], None)
            .await
    }

    // --- API keys ---

    /// `GET /api-keys`
    pub async fn list_api_keys(&self, params: &ListParams) -> ApiResult<ListResponse<ApiKeySummary>> {
        self.execute(Method::GET, "/api-keys", &params.to_query(), None)
            .await
    }

    /// `POST /api-keys`
    pub async fn create_api_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> ApiResult<CreateApiKeyResponse> {
        let body = Self::body(request)?;
        self.execute(Method::POST, "/api-keys", &[], Some(&body))
            .await
    }

    /// `DELETE /api-keys/:id`
    pub async fn delete_api_key(&self, id: &str) -> ApiResult<Deleted> {
        self.execute(Method::DELETE, &format!("/api-keys/{}", id), &[], None)
            .await
    }
}

/// Build the typed error for a completed non-success response.
///
/// The body is parsed as JSON for a `message` and kept verbatim as details;
/// a non-JSON body falls back to a synthesized message with absent details.
/// A body read or parse failure never masks the original HTTP failure.
async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&body) {
        Ok(details) => {
            let message = details
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("API request failed with status {}", status.as_u16()));
            ApiError::http(status.as_u16(), message, Some(details))
        }
        Err(_) => ApiError::http(
            status.as_u16(),
            format!("API request failed with status {}", status.as_u16()),
            None,
        ),
    }
}

/// Parse the rate-limit header triple as a unit
fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimit> {
    let parse = |name: &str| -> Option<u64> {
        headers.get(name)?.to_str().ok()?.trim().parse().ok()
    };

    Some(RateLimit {
        limit: parse(RATELIMIT_LIMIT)?,
        remaining: parse(RATELIMIT_REMAINING)?,
        reset: parse(RATELIMIT_RESET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(entries: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_client_rejects_empty_api_key() {
        let result = Client::new(ClientConfig::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new(ClientConfig::new("re_test123"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("re_test123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_rate_limit_requires_all_three_headers() {
        let full = headers(&[
            ("ratelimit-limit", "10"),
            ("ratelimit-remaining", "9"),
            ("ratelimit-reset", "1700000000"),
        ]);
        assert_eq!(
            parse_rate_limit(&full),
            Some(RateLimit {
                limit: 10,
                remaining: 9,
                reset: 1700000000
            })
        );

        // Any missing header means no snapshot, not a partial one
        let partial = headers(&[("ratelimit-limit", "10"), ("ratelimit-reset", "1700000000")]);
        assert_eq!(parse_rate_limit(&partial), None);

        let empty = headers(&[]);
        assert_eq!(parse_rate_limit(&empty), None);
    }

    #[test]
    fn test_rate_limit_requires_integer_values() {
        let bad = headers(&[
            ("ratelimit-limit", "10"),
            ("ratelimit-remaining", "lots"),
            ("ratelimit-reset", "1700000000"),
        ]);
        assert_eq!(parse_rate_limit(&bad), None);
    }
}
