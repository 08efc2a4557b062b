//! RegistrationGateway port - the write path to the registration endpoint.
//!
//! The gateway performs exactly one request per call; the attempt loop and
//! retry policy live in the application layer. Implementations attach the
//! session's fixed header set (including the bearer credential) themselves.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::RegistrationAction;

/// Body of one outbound registration request.
///
/// The endpoint expects `units` as a string, including `"0"` for courses the
/// catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub action: RegistrationAction,
    pub course: String,
    pub units: String,
}

impl RegistrationRequest {
    pub fn new(action: RegistrationAction, course: impl Into<String>, units: u32) -> Self {
        Self {
            action,
            course: course.into(),
            units: units.to_string(),
        }
    }
}

/// Failures a single submit can produce. Both variants are terminal for the
/// owning course: a gateway that cannot reach or is rejected by the HTTP
/// layer is not retried, unlike a business-level rejection in the body.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Could not send the request or read the response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered outside the 2xx range.
    #[error("Status Code: {0}")]
    Status(u16),
}

/// Port for submitting registration requests.
///
/// Implementations: `adapters::http::HttpRegistrationGateway` (reqwest), plus
/// scripted mocks in tests.
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Sends one registration request and returns the raw 2xx response body.
    async fn submit(&self, request: &RegistrationRequest) -> Result<Vec<u8>, GatewayError>;
}
