use std::collections::BTreeMap;
use std::fmt;

use crate::tracker::config::TrackerConfig;
use crate::tracker::environment::CallerEnvironment;
use crate::tracker::error::TrackerResult;
use crate::tracker::hits::{
    EventHit, ExceptionHit, Hit, ItemHit, PageviewHit, SocialHit, TimingHit, TransactionHit,
    UserTimingHit,
};
use crate::tracker::identity::{resolve_client_id, validate_property_id};
use crate::tracker::session::SessionParams;
use crate::tracker::transport::HitDispatcher;

/// Server-side Universal Analytics tracker.
///
/// A tracker resolves its property and client identity once, at
/// construction, then submits hits synchronously — one blocking HTTP
/// round-trip per `send_*` call, returning the raw response body.
///
/// Session parameters set through [`set_dimensions`], [`set_metrics`] and
/// [`anonymize_ip`] ride along with the next hit only; every send drains
/// them.
///
/// All mutation goes through `&mut self`, so a single instance cannot be
/// shared across threads. Callers submitting concurrently use one tracker
/// per thread.
///
/// [`set_dimensions`]: Tracker::set_dimensions
/// [`set_metrics`]: Tracker::set_metrics
/// [`anonymize_ip`]: Tracker::anonymize_ip
pub struct Tracker {
    config: TrackerConfig,
    client_id: String,
    environment: CallerEnvironment,
    session: SessionParams,
    dispatcher: HitDispatcher,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("property_id", &self.config.property_id())
            .field("client_id", &self.client_id)
            .finish()
    }
}

impl Tracker {
    /// Builds a tracker, validating the property ID and resolving the
    /// client id from the configured hint and the environment's `_ga`
    /// cookie.
    pub fn new(config: TrackerConfig, environment: CallerEnvironment) -> TrackerResult<Self> {
        validate_property_id(config.property_id())?;
        let client_id =
            resolve_client_id(config.client_id_hint(), environment.ga_cookie.as_deref());
        let dispatcher = HitDispatcher::new(config.clone())?;

        Ok(Self {
            config,
            client_id,
            environment,
            session: SessionParams::default(),
            dispatcher,
        })
    }

    pub fn property_id(&self) -> &str {
        self.config.property_id()
    }

    /// The resolved visitor identifier sent as `cid` on every hit.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Queues custom dimensions (`cd<index>`) for the next hit. Keys that do
    /// not match the dimension grammar are dropped.
    pub fn set_dimensions(&mut self, dimensions: BTreeMap<String, String>) {
        self.session.set_dimensions(dimensions);
    }

    /// Queues custom metrics (`cm<index>`) for the next hit. Keys that do
    /// not match the metric grammar are dropped.
    pub fn set_metrics(&mut self, metrics: BTreeMap<String, i64>) {
        self.session.set_metrics(metrics);
    }

    /// Asks the collection endpoint to anonymize the sender's IP address on
    /// the next hit.
    pub fn anonymize_ip(&mut self, enabled: bool) {
        self.session.set_anonymize_ip(enabled);
    }

    pub fn send_event(&mut self, hit: EventHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_pageview(&mut self, hit: PageviewHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_transaction(&mut self, hit: TransactionHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_item(&mut self, hit: ItemHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_social(&mut self, hit: SocialHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_timing(&mut self, hit: TimingHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_user_timing(&mut self, hit: UserTimingHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    pub fn send_exception(&mut self, hit: ExceptionHit) -> TrackerResult<String> {
        self.send(&hit)
    }

    fn send(&mut self, hit: &dyn Hit) -> TrackerResult<String> {
        hit.validate()?;
        let params = hit.params().assemble();
        // Session parameters are consumed even when delivery fails; they are
        // scoped to the attempt, not to a successful round-trip.
        let session = self.session.take();
        self.dispatcher.send(
            &self.client_id,
            params,
            session,
            self.environment.user_agent.as_deref(),
        )
    }

    #[cfg(test)]
    pub(crate) fn pending_session_params(&self) -> &std::collections::BTreeMap<String, String> {
        self.session.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::config::TrackerConfig;

    fn tracker(config: TrackerConfig) -> Tracker {
        Tracker::new(config, CallerEnvironment::default()).unwrap()
    }

    #[test]
    fn construction_validates_the_property_id() {
        let err = Tracker::new(
            TrackerConfig::new("UA-123456"),
            CallerEnvironment::default(),
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "tracker/invalid-configuration");

        assert!(Tracker::new(
            TrackerConfig::new("UA-123456-1"),
            CallerEnvironment::default()
        )
        .is_ok());
    }

    #[test]
    fn construction_resolves_client_id_from_hint() {
        let tracker = tracker(
            TrackerConfig::new("UA-123456-1").with_client_id("GA1.2.123456789.987654321"),
        );
        assert_eq!(tracker.client_id(), "123456789.987654321");
    }

    #[test]
    fn construction_resolves_client_id_from_cookie() {
        let tracker = Tracker::new(
            TrackerConfig::new("UA-123456-1"),
            CallerEnvironment::new().with_ga_cookie("GA1.2.111111111.222222222"),
        )
        .unwrap();
        assert_eq!(tracker.client_id(), "111111111.222222222");
    }

    #[test]
    fn construction_synthesizes_distinct_fallback_ids() {
        let first = tracker(TrackerConfig::new("UA-123456-1"));
        let second = tracker(TrackerConfig::new("UA-123456-1"));
        assert!(!first.client_id().is_empty());
        assert_ne!(first.client_id(), second.client_id());
    }

    #[test]
    fn setters_accumulate_into_session_params() {
        let mut tracker = tracker(TrackerConfig::new("UA-123456-1"));
        tracker.set_dimensions(BTreeMap::from([
            ("cd1".to_string(), "x".to_string()),
            ("bad_key".to_string(), "y".to_string()),
        ]));
        tracker.set_metrics(BTreeMap::from([("cm3".to_string(), 4)]));
        tracker.anonymize_ip(true);

        let pending = tracker.pending_session_params();
        assert_eq!(pending.get("cd1"), Some(&"x".to_string()));
        assert_eq!(pending.get("cm3"), Some(&"4".to_string()));
        assert_eq!(pending.get("aip"), Some(&"1".to_string()));
        assert!(!pending.contains_key("bad_key"));
    }

    #[test]
    fn invalid_hit_fails_before_touching_session_params() {
        let mut tracker = tracker(TrackerConfig::new("UA-123456-1"));
        tracker.set_dimensions(BTreeMap::from([("cd1".to_string(), "x".to_string())]));

        let err = tracker.send_event(EventHit::new("", "a")).unwrap_err();
        assert_eq!(err.code_str(), "tracker/missing-argument");
        // The failed hit never reached the transport stage.
        assert_eq!(tracker.pending_session_params().len(), 1);
    }
}
