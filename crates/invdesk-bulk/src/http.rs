//! HTTP implementation of the endpoint traits.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use invdesk_mask::normalize_search_term;
use invdesk_model::{BulkRequest, BulkResponse, FilterSnapshot, ListViewKey, Page, RecordId};
use regex::Regex;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, ViewEndpoints};
use crate::endpoint::{MutationEndpoint, PagingCollaborator};
use crate::error::{BulkError, Result};

/// User agent string for requests.
const USER_AGENT_VALUE: &str = concat!("invdesk/", env!("CARGO_PKG_VERSION"));

static DATA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-id\s*=\s*["']([^"']+)["']"#).expect("data-id regex"));

/// Client for one list view's server routes.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    base_url: Url,
    view: ListViewKey,
    endpoints: ViewEndpoints,
}

impl HttpEndpoint {
    pub fn new(config: &ClientConfig, view: ListViewKey) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/html"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = &config.csrf_token {
            let name = HeaderName::from_bytes(config.csrf_header.as_bytes()).map_err(|e| {
                BulkError::Config(format!("invalid CSRF header name {:?}: {e}", config.csrf_header))
            })?;
            let value = HeaderValue::from_str(token)
                .map_err(|e| BulkError::Config(format!("invalid CSRF token: {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| BulkError::Network(format!("failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BulkError::Config(format!("invalid base URL {:?}: {e}", config.base_url)))?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints(&view),
            view,
        })
    }

    pub fn view(&self) -> &ListViewKey {
        &self.view
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BulkError::Config(format!("invalid endpoint path {path:?}: {e}")))
    }
}

/// Body of an `ids_all` request.
#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    q_raw: Option<String>,
    filters: &'a BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    ids: Vec<RecordId>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
}

impl MutationEndpoint for HttpEndpoint {
    async fn delete(&self, request: &BulkRequest) -> Result<BulkResponse> {
        let url = self.url(&self.endpoints.delete)?;
        tracing::debug!(view = %self.view, %url, "sending bulk delete");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_delete_response(status, &body)
    }

    async fn count_matching(&self, filter: &FilterSnapshot) -> Result<u64> {
        let url = self.url(&self.endpoints.ids_all)?;
        let term = normalize_search_term(&filter.q);
        let request = MatchRequest {
            q: term.q,
            q_raw: term.q_raw,
            filters: &filter.filters,
        };
        tracing::debug!(view = %self.view, %url, "counting matching records");

        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        let matched: MatchResponse = serde_json::from_str(&body)
            .map_err(|e| BulkError::InvalidResponse(format!("expected an `ids` array: {e}")))?;
        Ok(matched.ids.len() as u64)
    }
}

impl PagingCollaborator for HttpEndpoint {
    async fn fetch_page(&self, page: u32, filter: &FilterSnapshot) -> Result<Page> {
        let mut url = self.url(&self.endpoints.list)?;
        {
            let term = normalize_search_term(&filter.q);
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if !term.q.is_empty() {
                query.append_pair("q", &term.q);
            }
            if let Some(raw) = &term.q_raw {
                query.append_pair("q_raw", raw);
            }
            for (key, value) in &filter.filters {
                query.append_pair(key, value);
            }
        }
        tracing::debug!(view = %self.view, page, "fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        Ok(Page {
            number: page,
            ids: extract_record_ids(&body),
        })
    }
}

/// Decode a bulk-delete response body.
///
/// A success body that is empty (`204 No Content`) or not JSON decodes to an
/// empty response, which classification treats as ambiguous.
pub fn decode_delete_response(status: StatusCode, body: &str) -> Result<BulkResponse> {
    if !status.is_success() {
        return Err(http_error(status, body));
    }
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(BulkResponse::default());
    }
    match serde_json::from_str(body) {
        Ok(response) => Ok(response),
        Err(error) => {
            tracing::warn!(%error, "bulk delete response is not JSON; outcome unknown");
            Ok(BulkResponse::default())
        }
    }
}

fn http_error(status: StatusCode, body: &str) -> BulkError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.msg)
        .unwrap_or_default();
    BulkError::Http {
        status: status.as_u16(),
        message,
    }
}

/// Record ids carried by `data-id` attributes of a listing fragment, in
/// document order, each once.
pub fn extract_record_ids(html: &str) -> Vec<RecordId> {
    let mut seen = std::collections::BTreeSet::new();
    DATA_ID
        .captures_iter(html)
        .filter_map(|caps| RecordId::new(&caps[1]).ok())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
