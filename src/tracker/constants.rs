//! Measurement Protocol key table and fixed endpoint constants.

pub const PROTOCOL_VERSION: &str = "1";

pub const COLLECT_URL: &str = "https://www.google-analytics.com/collect";
pub const DEBUG_COLLECT_URL: &str = "https://www.google-analytics.com/debug/collect";

// General / identity.
pub const PARAM_PROTOCOL_VERSION: &str = "v";
pub const PARAM_TRACKING_ID: &str = "tid";
pub const PARAM_CLIENT_ID: &str = "cid";
pub const PARAM_ANONYMIZE_IP: &str = "aip";
pub const PARAM_CACHE_BUSTER: &str = "z";
pub const PARAM_HIT_TYPE: &str = "t";

// Pageview.
pub const PARAM_DOCUMENT_PATH: &str = "dp";
pub const PARAM_DOCUMENT_TITLE: &str = "dt";
pub const PARAM_DOCUMENT_HOST: &str = "dh";
pub const PARAM_DOCUMENT_LOCATION: &str = "dl";
pub const PARAM_CONTENT_DESCRIPTION: &str = "cd";

// Event.
pub const PARAM_EVENT_CATEGORY: &str = "ec";
pub const PARAM_EVENT_ACTION: &str = "ea";
pub const PARAM_EVENT_LABEL: &str = "el";
pub const PARAM_EVENT_VALUE: &str = "ev";

// Transaction.
pub const PARAM_TRANSACTION_ID: &str = "ti";
pub const PARAM_TRANSACTION_AFFILIATION: &str = "ta";
pub const PARAM_TRANSACTION_REVENUE: &str = "tr";
pub const PARAM_TRANSACTION_SHIPPING: &str = "ts";
pub const PARAM_TRANSACTION_TAX: &str = "tt";
pub const PARAM_CURRENCY_CODE: &str = "cu";

// Item.
pub const PARAM_ITEM_NAME: &str = "in";
pub const PARAM_ITEM_PRICE: &str = "ip";
pub const PARAM_ITEM_QUANTITY: &str = "iq";
pub const PARAM_ITEM_CODE: &str = "ic";
pub const PARAM_ITEM_CATEGORY: &str = "iv";

// Social.
pub const PARAM_SOCIAL_NETWORK: &str = "sn";
pub const PARAM_SOCIAL_ACTION: &str = "sa";
pub const PARAM_SOCIAL_TARGET: &str = "st";

// Browser timing.
pub const PARAM_PAGE_LOAD_TIME: &str = "plt";
pub const PARAM_DNS_TIME: &str = "dns";
pub const PARAM_PAGE_DOWNLOAD_TIME: &str = "pdt";
pub const PARAM_REDIRECT_RESPONSE_TIME: &str = "rrt";
pub const PARAM_TCP_CONNECT_TIME: &str = "tcp";
pub const PARAM_SERVER_RESPONSE_TIME: &str = "srt";

// User timing.
pub const PARAM_USER_TIMING_CATEGORY: &str = "utc";
pub const PARAM_USER_TIMING_VARIABLE: &str = "utv";
pub const PARAM_USER_TIMING_TIME: &str = "utt";
pub const PARAM_USER_TIMING_LABEL: &str = "utl";

// Exception.
pub const PARAM_EXCEPTION_DESCRIPTION: &str = "exd";
pub const PARAM_EXCEPTION_FATAL: &str = "exf";

// Hit type discriminators.
pub const HIT_TYPE_PAGEVIEW: &str = "pageview";
pub const HIT_TYPE_EVENT: &str = "event";
pub const HIT_TYPE_TRANSACTION: &str = "transaction";
pub const HIT_TYPE_ITEM: &str = "item";
pub const HIT_TYPE_SOCIAL: &str = "social";
pub const HIT_TYPE_TIMING: &str = "timing";
pub const HIT_TYPE_EXCEPTION: &str = "exception";

/// The inbound cookie Universal Analytics sets on browser clients. Its value
/// looks like `GA1.2.<client-id>`.
pub const GA_COOKIE_PREFIX_LEN: usize = 6;
