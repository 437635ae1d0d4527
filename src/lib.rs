//! Server-side client for the Universal Analytics Measurement Protocol.
//!
//! Browser pages get the JavaScript snippet; backends, CLIs and batch jobs
//! do not. This crate submits pageviews, events, e-commerce transactions,
//! social interactions, timing figures and exceptions straight to the
//! collection endpoint over the documented key-value wire protocol.
//!
//! ```no_run
//! use universal_analytics_rs::tracker::{CallerEnvironment, EventHit, Tracker, TrackerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tracker = Tracker::new(
//!     TrackerConfig::new("UA-98765-1"),
//!     CallerEnvironment::new().with_user_agent("my-service/1.0"),
//! )?;
//!
//! tracker.send_event(EventHit::new("signup", "completed").with_label("invite"))?;
//! # Ok(())
//! # }
//! ```

pub mod tracker;

#[cfg(test)]
pub mod test_support;
