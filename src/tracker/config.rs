use std::time::Duration;

use crate::tracker::constants::{COLLECT_URL, DEBUG_COLLECT_URL};

/// HTTP method used to deliver hits to the collection endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Supported collection endpoints.
#[derive(Clone, Debug)]
pub enum CollectionEndpoint {
    /// Production collection endpoint: <https://www.google-analytics.com/collect>
    Collect,
    /// Debugging endpoint: <https://www.google-analytics.com/debug/collect>
    DebugCollect,
    /// Custom endpoint (primarily for testing).
    Custom(String),
}

impl CollectionEndpoint {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            CollectionEndpoint::Collect => COLLECT_URL,
            CollectionEndpoint::DebugCollect => DEBUG_COLLECT_URL,
            CollectionEndpoint::Custom(url) => url,
        }
    }
}

/// Configuration used to construct a [`Tracker`](crate::tracker::Tracker).
///
/// The property ID is validated when the tracker is built; everything else
/// has a working default. Hits are POSTed unless [`with_method`] selects GET,
/// and cache busting only applies to GET delivery.
///
/// [`with_method`]: TrackerConfig::with_method
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    property_id: String,
    client_id: Option<String>,
    method: HttpMethod,
    cache_buster: bool,
    endpoint: CollectionEndpoint,
    timeout: Duration,
}

impl TrackerConfig {
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            client_id: None,
            method: HttpMethod::Post,
            cache_buster: false,
            endpoint: CollectionEndpoint::Collect,
            timeout: Duration::from_secs(10),
        }
    }

    /// Supplies a visitor-id hint fed into client-id resolution. Values that
    /// match neither the cookie-style nor the UUID grammar are ignored.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a random cache-buster parameter to GET requests.
    pub fn with_cache_buster(mut self, enabled: bool) -> Self {
        self.cache_buster = enabled;
        self
    }

    pub fn with_endpoint(mut self, endpoint: CollectionEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub(crate) fn client_id_hint(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub(crate) fn method(&self) -> HttpMethod {
        self.method
    }

    pub(crate) fn cache_buster(&self) -> bool {
        self.cache_buster
    }

    pub(crate) fn endpoint(&self) -> &CollectionEndpoint {
        &self.endpoint
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }
}
