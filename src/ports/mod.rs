//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! core and the outside world; adapters implement them.
//!
//! - `RegistrationGateway` - one-shot writes to the registration endpoint
//! - `EventFeed` - framed text messages from the real-time feed
//! - `StatusReporter` - user-visible countdown and per-course observations

mod event_feed;
mod registration_gateway;
mod status_reporter;

pub use event_feed::{EventFeed, FeedError};
pub use registration_gateway::{GatewayError, RegistrationGateway, RegistrationRequest};
pub use status_reporter::StatusReporter;
