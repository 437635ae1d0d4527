/// Request-scoped state of the calling environment.
///
/// Server-side callers usually sit behind an inbound HTTP request that may
/// carry a `_ga` cookie and a user-agent header. Both are passed in
/// explicitly rather than read from ambient state, so the tracker stays
/// testable without a simulated request context.
#[derive(Clone, Debug, Default)]
pub struct CallerEnvironment {
    /// Value of the inbound `_ga` cookie (`GA1.2.<client-id>`), if any.
    pub ga_cookie: Option<String>,
    /// User-agent string of the calling client, forwarded on outbound hits.
    pub user_agent: Option<String>,
}

impl CallerEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ga_cookie(mut self, value: impl Into<String>) -> Self {
        self.ga_cookie = Some(value.into());
        self
    }

    pub fn with_user_agent(mut self, value: impl Into<String>) -> Self {
        self.user_agent = Some(value.into());
        self
    }
}
