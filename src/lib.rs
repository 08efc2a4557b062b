//! course-sniper - timed concurrent course registration.
//!
//! Listens to the university's real-time feed for session and catalog
//! signals, optionally counts down to the announced registration instant,
//! then fires one concurrent, retried registration request per favorite
//! course and aggregates the per-course outcomes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
