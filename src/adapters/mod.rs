//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest gateway to the registration endpoint
//! - `websocket` - tokio-tungstenite real-time feed
//! - `console` - colored per-course output

pub mod console;
pub mod http;
pub mod websocket;

pub use console::ConsoleReporter;
pub use http::{HttpGatewayBuildError, HttpRegistrationGateway};
pub use websocket::WsEventFeed;
