//! Outbound KakaoTalk message channel.
//!
//! Delivery is strictly best-effort: the [`Messenger`] contract is a
//! boolean outcome and implementations never surface errors to the
//! request path. Notification computation succeeds or fails on its own
//! merits regardless of whether anything was actually delivered.

use std::future::Future;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Default base URL for the Kakao REST API.
const DEFAULT_BASE_URL: &str = "https://kapi.kakao.com";

/// Link embedded in sent messages, pointing back at the web frontend.
const DEFAULT_LINK_URL: &str = "http://localhost:3000";

/// A capability for delivering a notification to the user.
///
/// `send` must not fail the caller: implementations log failures and
/// report them as `false`.
pub trait Messenger: Send + Sync {
    fn send(&self, title: &str, message: &str) -> impl Future<Output = bool> + Send;
}

/// Messenger that writes notifications to the log and always succeeds.
///
/// The default channel during development, standing in for real
/// KakaoTalk delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    async fn send(&self, title: &str, message: &str) -> bool {
        tracing::info!(%title, %message, "shuttle notification");
        true
    }
}

/// Errors from the Kakao API client.
#[derive(Debug, thiserror::Error)]
pub enum KakaoError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials are missing from the environment
    #[error("Kakao API not configured: set KAKAO_REST_API_KEY, KAKAO_SENDER_KEY and KAKAO_TEMPLATE_CODE")]
    Unconfigured,

    /// API key cannot be used as a header value
    #[error("invalid API key format")]
    InvalidKey,

    /// API returned an error status
    #[error("Kakao API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Configuration for the Kakao API client.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    /// REST API key, sent as a bearer token.
    pub rest_api_key: String,
    /// Alimtalk sender key. Required to be present before any send is
    /// attempted, matching the deployed setup.
    pub sender_key: String,
    /// Alimtalk template code, same requirement as the sender key.
    pub template_code: String,
    /// Base URL for the API.
    pub base_url: String,
    /// URL embedded in message links.
    pub link_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl KakaoConfig {
    /// Read credentials from `KAKAO_REST_API_KEY`, `KAKAO_SENDER_KEY`
    /// and `KAKAO_TEMPLATE_CODE`. Missing variables yield empty strings;
    /// the client then reports sends as failed instead of erroring.
    pub fn from_env() -> Self {
        Self {
            rest_api_key: std::env::var("KAKAO_REST_API_KEY").unwrap_or_default(),
            sender_key: std::env::var("KAKAO_SENDER_KEY").unwrap_or_default(),
            template_code: std::env::var("KAKAO_TEMPLATE_CODE").unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            link_url: DEFAULT_LINK_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// True when every credential is present.
    pub fn is_complete(&self) -> bool {
        !self.rest_api_key.is_empty()
            && !self.sender_key.is_empty()
            && !self.template_code.is_empty()
    }
}

/// Client for the KakaoTalk memo API.
#[derive(Debug, Clone)]
pub struct KakaoClient {
    http: reqwest::Client,
    base_url: String,
    link_url: String,
    configured: bool,
}

impl KakaoClient {
    /// Create a new Kakao API client.
    pub fn new(config: KakaoConfig) -> Result<Self, KakaoError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.rest_api_key))
            .map_err(|_| KakaoError::InvalidKey)?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let configured = config.is_complete();

        Ok(Self {
            http,
            base_url: config.base_url,
            link_url: config.link_url,
            configured,
        })
    }

    /// Whether credentials were present at construction.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Send a self-memo through the Kakao API.
    pub async fn send_memo(&self, title: &str, message: &str) -> Result<(), KakaoError> {
        if !self.configured {
            return Err(KakaoError::Unconfigured);
        }

        let url = format!("{}/v2/api/talk/memo/default/send", self.base_url);

        let template = serde_json::json!({
            "object_type": "text",
            "text": format!("{title}\n\n{message}"),
            "link": {
                "web_url": self.link_url,
                "mobile_web_url": self.link_url,
            },
            "button_title": "Open app",
        });

        let response = self
            .http
            .post(&url)
            .form(&[("template_object", template.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KakaoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

impl Messenger for KakaoClient {
    async fn send(&self, title: &str, message: &str) -> bool {
        match self.send_memo(title, message).await {
            Ok(()) => {
                tracing::info!(%title, "Kakao notification sent");
                true
            }
            Err(e) => {
                tracing::warn!(%title, error = %e, "Kakao notification failed");
                false
            }
        }
    }
}
