//! Client configuration for the HTTP endpoints.

use std::collections::BTreeMap;
use std::time::Duration;

use invdesk_model::ListViewKey;
use serde::{Deserialize, Serialize};

/// Header carrying the CSRF token unless configured otherwise.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Paths of one list view's server routes, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEndpoints {
    /// Bulk delete (`POST`, JSON body).
    pub delete: String,
    /// Paginated listing (`GET`, HTML fragment).
    pub list: String,
    /// Every id matching a filter (`POST`, JSON body).
    pub ids_all: String,
}

impl ViewEndpoints {
    /// The routes every list view exposes by convention.
    pub fn conventional(view: &ListViewKey) -> Self {
        Self {
            delete: format!("/{view}/excluir"),
            list: format!("/{view}/listar"),
            ids_all: format!("/{view}/ids_all"),
        }
    }
}

/// How to reach the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub csrf_header: String,
    pub timeout_secs: u64,
    /// Rows per page the server renders; informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_hint: Option<u32>,
    /// Per-view route overrides. Views not listed use
    /// [`ViewEndpoints::conventional`].
    pub views: BTreeMap<String, ViewEndpoints>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            csrf_token: None,
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size_hint: None,
            views: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: &ListViewKey, endpoints: ViewEndpoints) -> Self {
        self.views.insert(view.to_string(), endpoints);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoints(&self, view: &ListViewKey) -> ViewEndpoints {
        self.views
            .get(view.as_str())
            .cloned()
            .unwrap_or_else(|| ViewEndpoints::conventional(view))
    }
}
