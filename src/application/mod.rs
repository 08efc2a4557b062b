//! Application layer - the timed concurrent registration engine.
//!
//! - `events` - inbound feed protocol
//! - `coordinator` - session state machine, countdown, dispatch trigger
//! - `dispatcher` - per-course fan-out and outcome aggregation
//! - `worker` - single-course attempt loop

mod coordinator;
mod dispatcher;
mod events;
mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::Coordinator;
pub use dispatcher::dispatch;
pub use events::{parse_event, EventParseError, InboundEvent, CATALOG_UPDATE_TYPE, SESSION_INFO_TYPE};
pub use worker::register_course;
