//! Session parameter accumulation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tracker::constants::PARAM_ANONYMIZE_IP;

static DIMENSION_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^cd[1-9][0-9]*$").expect("dimension key pattern"));

static METRIC_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^cm[1-9][0-9]*$").expect("metric key pattern"));

/// Parameters that ride along with the next hit.
///
/// Custom dimensions, custom metrics and the anonymize-IP flag accumulate
/// here between sends. The collection is drained by every send, so each
/// entry is delivered on exactly the next hit; callers wanting a value on
/// every hit re-set it after each send. The protocol assigns some of these
/// keys a longer-lived scope server-side, but this client does not track
/// scope and clears uniformly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionParams {
    entries: BTreeMap<String, String>,
}

impl SessionParams {
    /// Merges custom dimensions (`cd<index>`). Keys that do not match the
    /// dimension grammar are dropped; matching keys overwrite earlier values.
    pub fn set_dimensions(&mut self, dimensions: BTreeMap<String, String>) {
        self.merge(dimensions, &DIMENSION_KEY_RE, "dimension");
    }

    /// Merges custom metrics (`cm<index>`). Same key handling as dimensions.
    pub fn set_metrics(&mut self, metrics: BTreeMap<String, i64>) {
        let rendered = metrics
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        self.merge(rendered, &METRIC_KEY_RE, "metric");
    }

    pub fn set_anonymize_ip(&mut self, enabled: bool) {
        if enabled {
            self.entries
                .insert(PARAM_ANONYMIZE_IP.to_string(), "1".to_string());
        } else {
            self.entries.remove(PARAM_ANONYMIZE_IP);
        }
    }

    /// Removes and returns every pending entry.
    pub fn take(&mut self) -> BTreeMap<String, String> {
        std::mem::take(&mut self.entries)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn merge(&mut self, values: BTreeMap<String, String>, pattern: &Regex, kind: &str) {
        for (key, value) in values {
            if !pattern.is_match(&key) {
                log::warn!("dropping custom {kind} with malformed key `{key}`");
                continue;
            }
            self.entries.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_conforming_dimension_keys_only() {
        let mut session = SessionParams::default();
        session.set_dimensions(BTreeMap::from([
            ("cd1".to_string(), "x".to_string()),
            ("bad_key".to_string(), "y".to_string()),
        ]));

        assert_eq!(
            session.entries(),
            &BTreeMap::from([("cd1".to_string(), "x".to_string())])
        );
    }

    #[test]
    fn rejects_zero_indexed_and_prefixed_keys() {
        let mut session = SessionParams::default();
        session.set_dimensions(BTreeMap::from([
            ("cd0".to_string(), "x".to_string()),
            ("cd01".to_string(), "x".to_string()),
            ("xcd1".to_string(), "x".to_string()),
            ("cd".to_string(), "x".to_string()),
        ]));
        assert!(session.entries().is_empty());

        session.set_dimensions(BTreeMap::from([("cd10".to_string(), "x".to_string())]));
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn metrics_render_as_integers_and_overwrite() {
        let mut session = SessionParams::default();
        session.set_metrics(BTreeMap::from([("cm2".to_string(), 5)]));
        session.set_metrics(BTreeMap::from([("cm2".to_string(), -7), ("cm9".to_string(), 0)]));

        assert_eq!(
            session.entries(),
            &BTreeMap::from([
                ("cm2".to_string(), "-7".to_string()),
                ("cm9".to_string(), "0".to_string()),
            ])
        );
    }

    #[test]
    fn metric_keys_must_match_grammar() {
        let mut session = SessionParams::default();
        session.set_metrics(BTreeMap::from([
            ("cm0".to_string(), 1),
            ("cd1".to_string(), 1),
        ]));
        assert!(session.entries().is_empty());
    }

    #[test]
    fn anonymize_ip_toggles_the_flag() {
        let mut session = SessionParams::default();
        session.set_anonymize_ip(true);
        assert_eq!(session.entries().get("aip"), Some(&"1".to_string()));

        session.set_anonymize_ip(false);
        assert!(session.entries().get("aip").is_none());
    }

    #[test]
    fn take_drains_all_entries() {
        let mut session = SessionParams::default();
        session.set_dimensions(BTreeMap::from([("cd1".to_string(), "x".to_string())]));

        let drained = session.take();
        assert_eq!(drained.len(), 1);
        assert!(session.entries().is_empty());
    }
}
