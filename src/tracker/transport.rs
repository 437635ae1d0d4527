use std::collections::BTreeMap;

use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use url::form_urlencoded;
use url::Url;

use crate::tracker::config::{HttpMethod, TrackerConfig};
use crate::tracker::constants::{
    PARAM_CACHE_BUSTER, PARAM_CLIENT_ID, PARAM_PROTOCOL_VERSION, PARAM_TRACKING_ID,
    PROTOCOL_VERSION,
};
use crate::tracker::error::{internal_error, network_error, TrackerResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Delivers assembled hits to the collection endpoint.
///
/// One blocking request per hit, no retries. The response body is handed
/// back verbatim; the status code is not inspected, only transport-level
/// failures become errors.
#[derive(Clone, Debug)]
pub(crate) struct HitDispatcher {
    client: Client,
    config: TrackerConfig,
}

impl HitDispatcher {
    pub fn new(config: TrackerConfig) -> TrackerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| internal_error(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    /// Sends one hit. The hit's own parameters win over session parameters;
    /// the protocol version and identity parameters are appended last.
    pub fn send(
        &self,
        client_id: &str,
        hit_params: BTreeMap<String, String>,
        session_params: BTreeMap<String, String>,
        user_agent: Option<&str>,
    ) -> TrackerResult<String> {
        let mut params = hit_params;
        for (key, value) in session_params {
            params.entry(key).or_insert(value);
        }
        params.insert(
            PARAM_PROTOCOL_VERSION.to_string(),
            PROTOCOL_VERSION.to_string(),
        );
        params.insert(
            PARAM_TRACKING_ID.to_string(),
            self.config.property_id().to_string(),
        );
        params.insert(PARAM_CLIENT_ID.to_string(), client_id.to_string());

        let request = match self.config.method() {
            HttpMethod::Get => {
                let mut url = Url::parse(self.config.endpoint().as_str())
                    .map_err(|err| internal_error(format!("invalid collection endpoint: {err}")))?;
                {
                    let mut pairs = url.query_pairs_mut();
                    pairs.extend_pairs(params.iter());
                    if self.config.cache_buster() {
                        pairs.append_pair(PARAM_CACHE_BUSTER, &cache_buster_value());
                    }
                }
                self.client.get(url)
            }
            HttpMethod::Post => {
                let body = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params.iter())
                    .finish();
                self.client
                    .post(self.config.endpoint().as_str())
                    .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body)
            }
        };

        let request = match user_agent {
            Some(agent) => request.header(USER_AGENT, agent),
            None => request,
        };

        let response = request
            .send()
            .map_err(|err| network_error(format!("failed to deliver hit: {err}")))?;

        response
            .text()
            .map_err(|err| network_error(format!("failed to read collection response: {err}")))
    }
}

/// 14-digit zero-padded random decimal, fresh per request.
fn cache_buster_value() -> String {
    let n: u64 = rand::thread_rng().gen_range(0..100_000_000_000_000);
    format!("{n:014}")
}
