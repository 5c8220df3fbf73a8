use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::timeout;

use crate::config::ProviderConfig;
use crate::provider::error::ProviderError;
use crate::provider::types::{Card, ProviderPage, ProviderRequest};
use crate::provider::SearchProvider;

/// Success body of the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Card>,
    #[serde(default)]
    total_cards: Option<u64>,
    #[serde(default)]
    has_more: bool,
}

/// Error body of the search endpoint.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: String,
}

/// Search provider backed by a Scryfall-style HTTP endpoint.
pub struct HttpProvider {
    client: Client,
    endpoint: String,
    extra_params: Vec<(String, String)>,
    request_timeout: Duration,
}

impl HttpProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ProviderError::InvalidRequest(format!("Failed to build HTTP client: {}", e))
            })?;

        let endpoint = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.search_path
        );

        Ok(Self {
            client,
            endpoint,
            extra_params: config
                .extra_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            request_timeout: Duration::from_secs(config.timeout_seconds as u64),
        })
    }

    /// Full URL of the search endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn do_search(&self, request: &ProviderRequest) -> Result<ProviderPage, ProviderError> {
        let mut params: Vec<(String, String)> = vec![
            ("q".to_string(), request.query.clone()),
            ("page".to_string(), request.page.to_string()),
            ("order".to_string(), request.sort.field.to_string()),
            ("dir".to_string(), request.sort.direction.as_str().to_string()),
        ];
        params.extend(self.extra_params.iter().cloned());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Connection { source: e })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Connection { source: e })?;

        if status.is_success() {
            let parsed: SearchResponse = serde_json::from_slice(&body)
                .map_err(|e| ProviderError::Decode(e.to_string()))?;
            let total_count = parsed.total_cards.unwrap_or(parsed.data.len() as u64);
            return Ok(ProviderPage {
                items: parsed.data,
                total_count,
                has_more: parsed.has_more,
            });
        }

        let error_body: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        classify_failure(status, error_body)
    }
}

/// Map a non-success response to a page or an error.
///
/// The provider answers "no cards matched" with a 404, which is an empty
/// result set rather than a failure.
fn classify_failure(status: StatusCode, body: ErrorBody) -> Result<ProviderPage, ProviderError> {
    match status {
        StatusCode::NOT_FOUND if body.code == "not_found" => Ok(ProviderPage::empty()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(ProviderError::Rejected {
                status: status.as_u16(),
                code: body.code,
                details: body.details,
            })
        }
        _ => Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: if body.details.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            } else {
                body.details
            },
        }),
    }
}

#[async_trait]
impl SearchProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn search(&self, request: &ProviderRequest) -> Result<ProviderPage, ProviderError> {
        match timeout(self.request_timeout, self.do_search(request)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }
}
