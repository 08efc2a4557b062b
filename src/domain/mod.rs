//! Domain layer - registration semantics with no I/O.
//!
//! - `action` - add/drop request kind
//! - `catalog` - course id to credit-unit lookup
//! - `outcome` - per-course terminal results
//! - `reason` - endpoint error payload normalization
//! - `retry` - bounded/unbounded attempt policy
//! - `session` - coordinator-owned state and dispatch snapshots

mod action;
mod catalog;
mod outcome;
mod reason;
mod retry;
mod session;

pub use action::{RegistrationAction, UnknownAction};
pub use catalog::CatalogSnapshot;
pub use outcome::{RegistrationOutcome, RegistrationStatus};
pub use reason::extract_reason;
pub use retry::{RetryPolicy, MAX_RETRIES_REACHED};
pub use session::{DispatchSnapshot, SessionPhase, SessionState};
