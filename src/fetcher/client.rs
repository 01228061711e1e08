use crate::error::Result;
use crate::trial::RawTrial;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://clinicaltrials.gov/api/v2/studies";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters of one page request against the registry.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub term: String,
    pub page_size: usize,
    pub statuses: Vec<String>,
    pub page_token: Option<String>,
}

/// One page of raw records plus the continuation token, if any.
#[derive(Debug, Default)]
pub struct TrialPage {
    pub trials: Vec<RawTrial>,
    pub next_page_token: Option<String>,
}

/// The opaque paginated query capability. The pagination loop only depends on
/// this seam, so tests drive it with a stub instead of the network.
#[async_trait]
pub trait TrialSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<TrialPage>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryPage {
    #[serde(default)]
    studies: Vec<Value>,
    next_page_token: Option<String>,
}

/// HTTP client for the ClinicalTrials.gov v2 studies endpoint.
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("trialscout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl TrialSource for RegistryClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<TrialPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("query.term", request.term.clone()),
            ("pageSize", request.page_size.to_string()),
            ("format", "json".to_string()),
            ("countTotal", "true".to_string()),
        ];
        if !request.statuses.is_empty() {
            params.push(("filter.overallStatus", request.statuses.join(",")));
        }
        if let Some(ref token) = request.page_token {
            params.push(("pageToken", token.clone()));
        }

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let page: RegistryPage = response.json().await?;
        Ok(TrialPage {
            trials: page.studies.into_iter().map(RawTrial::new).collect(),
            next_page_token: page.next_page_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        assert!(RegistryClient::new("not a url").is_err());
        assert!(RegistryClient::new(DEFAULT_BASE_URL).is_ok());
    }

    #[test]
    fn test_registry_page_deserialization() {
        let page: RegistryPage = serde_json::from_value(json!({
            "studies": [ { "protocolSection": {} } ],
            "nextPageToken": "abc"
        }))
        .unwrap();
        assert_eq!(page.studies.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_registry_page_defaults_when_fields_absent() {
        let page: RegistryPage = serde_json::from_value(json!({ "totalCount": 0 })).unwrap();
        assert!(page.studies.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
