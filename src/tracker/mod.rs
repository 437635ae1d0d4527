mod api;
mod config;
mod constants;
mod environment;
pub mod error;
mod hits;
mod identity;
mod session;
mod transport;

pub use api::Tracker;
pub use config::{CollectionEndpoint, HttpMethod, TrackerConfig};
pub use environment::CallerEnvironment;
pub use hits::{
    EventHit, ExceptionHit, ItemHit, PageviewHit, SocialHit, TimingHit, TransactionHit,
    UserTimingHit,
};
