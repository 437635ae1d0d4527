//! One parameter struct per Measurement Protocol hit type.
//!
//! Required fields are constructor arguments; optional fields start unset
//! and are supplied through `with_*` builders. Unset optional fields never
//! reach the wire. Explicitly supplied zeros and empty optional strings are
//! sent as-is; only required fields reject the empty string.

use std::collections::BTreeMap;

use crate::tracker::constants::*;
use crate::tracker::error::{missing_argument, TrackerResult};

/// Parameter set rendered by a single hit: the fixed hit-type discriminator
/// plus the mandatory fields, and every declared optional field (present but
/// unset fields carry `None`).
pub(crate) struct HitParams {
    required: Vec<(&'static str, String)>,
    optional: Vec<(&'static str, Option<String>)>,
}

impl HitParams {
    fn for_hit_type(hit_type: &'static str) -> Self {
        Self {
            required: vec![(PARAM_HIT_TYPE, hit_type.to_string())],
            optional: Vec::new(),
        }
    }

    fn require(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.required.push((key, value.into()));
        self
    }

    fn opt(mut self, key: &'static str, value: Option<String>) -> Self {
        self.optional.push((key, value));
        self
    }

    /// Merges required and optional parameters, stripping unset optionals.
    pub fn assemble(self) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = self
            .required
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        for (key, value) in self.optional {
            if let Some(value) = value {
                params.insert(key.to_string(), value);
            }
        }
        params
    }
}

/// A sendable hit: validates its mandatory fields and renders its parameter
/// set.
pub(crate) trait Hit {
    fn validate(&self) -> TrackerResult<()>;
    fn params(&self) -> HitParams;
}

fn require_field(hit_type: &str, field: &str, value: &str) -> TrackerResult<()> {
    if value.trim().is_empty() {
        return Err(missing_argument(format!(
            "{hit_type} hits require a non-empty `{field}`"
        )));
    }
    Ok(())
}

/// An `event` hit: a user interaction bucketed by category and action.
#[derive(Clone, Debug)]
pub struct EventHit {
    category: String,
    action: String,
    label: Option<String>,
    value: Option<i64>,
}

impl EventHit {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: None,
            value: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

impl Hit for EventHit {
    fn validate(&self) -> TrackerResult<()> {
        require_field(HIT_TYPE_EVENT, "category", &self.category)?;
        require_field(HIT_TYPE_EVENT, "action", &self.action)
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_EVENT)
            .require(PARAM_EVENT_CATEGORY, &self.category)
            .require(PARAM_EVENT_ACTION, &self.action)
            .opt(PARAM_EVENT_LABEL, self.label.clone())
            .opt(PARAM_EVENT_VALUE, self.value.map(|v| v.to_string()))
    }
}

/// A `pageview` hit. All fields are optional; the page is usually described
/// through `path` plus `host`, or through a full `location` URL.
#[derive(Clone, Debug, Default)]
pub struct PageviewHit {
    path: Option<String>,
    title: Option<String>,
    host: Option<String>,
    location: Option<String>,
    description: Option<String>,
}

impl PageviewHit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Hit for PageviewHit {
    fn validate(&self) -> TrackerResult<()> {
        Ok(())
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_PAGEVIEW)
            .opt(PARAM_DOCUMENT_PATH, self.path.clone())
            .opt(PARAM_DOCUMENT_TITLE, self.title.clone())
            .opt(PARAM_DOCUMENT_HOST, self.host.clone())
            .opt(PARAM_DOCUMENT_LOCATION, self.location.clone())
            .opt(PARAM_CONTENT_DESCRIPTION, self.description.clone())
    }
}

/// A `transaction` hit opening an e-commerce transaction; its items follow
/// as separate [`ItemHit`]s sharing the transaction id.
#[derive(Clone, Debug)]
pub struct TransactionHit {
    transaction_id: String,
    affiliation: Option<String>,
    revenue: Option<f64>,
    shipping: Option<f64>,
    tax: Option<f64>,
    currency: Option<String>,
}

impl TransactionHit {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            affiliation: None,
            revenue: None,
            shipping: None,
            tax: None,
            currency: None,
        }
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn with_shipping(mut self, shipping: f64) -> Self {
        self.shipping = Some(shipping);
        self
    }

    pub fn with_tax(mut self, tax: f64) -> Self {
        self.tax = Some(tax);
        self
    }

    /// ISO 4217 currency code, e.g. `EUR`.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl Hit for TransactionHit {
    fn validate(&self) -> TrackerResult<()> {
        require_field(HIT_TYPE_TRANSACTION, "transaction_id", &self.transaction_id)
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_TRANSACTION)
            .require(PARAM_TRANSACTION_ID, &self.transaction_id)
            .opt(PARAM_TRANSACTION_AFFILIATION, self.affiliation.clone())
            .opt(PARAM_TRANSACTION_REVENUE, self.revenue.map(render_decimal))
            .opt(PARAM_TRANSACTION_SHIPPING, self.shipping.map(render_decimal))
            .opt(PARAM_TRANSACTION_TAX, self.tax.map(render_decimal))
            .opt(PARAM_CURRENCY_CODE, self.currency.clone())
    }
}

/// An `item` hit: one line item of a previously opened transaction.
#[derive(Clone, Debug)]
pub struct ItemHit {
    transaction_id: String,
    name: String,
    price: Option<f64>,
    quantity: Option<i64>,
    code: Option<String>,
    category: Option<String>,
    currency: Option<String>,
}

impl ItemHit {
    pub fn new(transaction_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            name: name.into(),
            price: None,
            quantity: None,
            code: None,
            category: None,
            currency: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// SKU or other item code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl Hit for ItemHit {
    fn validate(&self) -> TrackerResult<()> {
        require_field(HIT_TYPE_ITEM, "transaction_id", &self.transaction_id)?;
        require_field(HIT_TYPE_ITEM, "name", &self.name)
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_ITEM)
            .require(PARAM_TRANSACTION_ID, &self.transaction_id)
            .require(PARAM_ITEM_NAME, &self.name)
            .opt(PARAM_ITEM_PRICE, self.price.map(render_decimal))
            .opt(PARAM_ITEM_QUANTITY, self.quantity.map(|v| v.to_string()))
            .opt(PARAM_ITEM_CODE, self.code.clone())
            .opt(PARAM_ITEM_CATEGORY, self.category.clone())
            .opt(PARAM_CURRENCY_CODE, self.currency.clone())
    }
}

/// A `social` hit: an interaction with a social network button.
#[derive(Clone, Debug)]
pub struct SocialHit {
    network: String,
    action: String,
    target: String,
}

impl SocialHit {
    pub fn new(
        network: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            action: action.into(),
            target: target.into(),
        }
    }
}

impl Hit for SocialHit {
    fn validate(&self) -> TrackerResult<()> {
        require_field(HIT_TYPE_SOCIAL, "network", &self.network)?;
        require_field(HIT_TYPE_SOCIAL, "action", &self.action)?;
        require_field(HIT_TYPE_SOCIAL, "target", &self.target)
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_SOCIAL)
            .require(PARAM_SOCIAL_NETWORK, &self.network)
            .require(PARAM_SOCIAL_ACTION, &self.action)
            .require(PARAM_SOCIAL_TARGET, &self.target)
    }
}

/// A browser `timing` hit carrying navigation timing figures, all in
/// milliseconds.
#[derive(Clone, Debug, Default)]
pub struct TimingHit {
    page_load_time: Option<u64>,
    dns_time: Option<u64>,
    page_download_time: Option<u64>,
    redirect_response_time: Option<u64>,
    tcp_connect_time: Option<u64>,
    server_response_time: Option<u64>,
}

impl TimingHit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_load_time(mut self, millis: u64) -> Self {
        self.page_load_time = Some(millis);
        self
    }

    pub fn with_dns_time(mut self, millis: u64) -> Self {
        self.dns_time = Some(millis);
        self
    }

    pub fn with_page_download_time(mut self, millis: u64) -> Self {
        self.page_download_time = Some(millis);
        self
    }

    pub fn with_redirect_response_time(mut self, millis: u64) -> Self {
        self.redirect_response_time = Some(millis);
        self
    }

    pub fn with_tcp_connect_time(mut self, millis: u64) -> Self {
        self.tcp_connect_time = Some(millis);
        self
    }

    pub fn with_server_response_time(mut self, millis: u64) -> Self {
        self.server_response_time = Some(millis);
        self
    }
}

impl Hit for TimingHit {
    fn validate(&self) -> TrackerResult<()> {
        Ok(())
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_TIMING)
            .opt(PARAM_PAGE_LOAD_TIME, self.page_load_time.map(|v| v.to_string()))
            .opt(PARAM_DNS_TIME, self.dns_time.map(|v| v.to_string()))
            .opt(
                PARAM_PAGE_DOWNLOAD_TIME,
                self.page_download_time.map(|v| v.to_string()),
            )
            .opt(
                PARAM_REDIRECT_RESPONSE_TIME,
                self.redirect_response_time.map(|v| v.to_string()),
            )
            .opt(
                PARAM_TCP_CONNECT_TIME,
                self.tcp_connect_time.map(|v| v.to_string()),
            )
            .opt(
                PARAM_SERVER_RESPONSE_TIME,
                self.server_response_time.map(|v| v.to_string()),
            )
    }
}

/// A user `timing` hit: a caller-defined duration measurement. Shares the
/// `timing` discriminator with [`TimingHit`] but uses the `ut*` key family.
#[derive(Clone, Debug, Default)]
pub struct UserTimingHit {
    category: Option<String>,
    variable: Option<String>,
    time: Option<u64>,
    label: Option<String>,
}

impl UserTimingHit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Measured duration in milliseconds.
    pub fn with_time(mut self, millis: u64) -> Self {
        self.time = Some(millis);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Hit for UserTimingHit {
    fn validate(&self) -> TrackerResult<()> {
        Ok(())
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_TIMING)
            .opt(PARAM_USER_TIMING_CATEGORY, self.category.clone())
            .opt(PARAM_USER_TIMING_VARIABLE, self.variable.clone())
            .opt(PARAM_USER_TIMING_TIME, self.time.map(|v| v.to_string()))
            .opt(PARAM_USER_TIMING_LABEL, self.label.clone())
    }
}

/// An `exception` hit describing a crash or handled error.
#[derive(Clone, Debug, Default)]
pub struct ExceptionHit {
    description: Option<String>,
    fatal: Option<bool>,
}

impl ExceptionHit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fatal(mut self, fatal: bool) -> Self {
        self.fatal = Some(fatal);
        self
    }
}

impl Hit for ExceptionHit {
    fn validate(&self) -> TrackerResult<()> {
        Ok(())
    }

    fn params(&self) -> HitParams {
        HitParams::for_hit_type(HIT_TYPE_EXCEPTION)
            .opt(PARAM_EXCEPTION_DESCRIPTION, self.description.clone())
            .opt(
                PARAM_EXCEPTION_FATAL,
                self.fatal
                    .map(|fatal| String::from(if fatal { "1" } else { "0" })),
            )
    }
}

fn render_decimal(value: f64) -> String {
    value.to_string()
}
