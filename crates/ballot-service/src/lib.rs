//! Ballot service library entry.
//!
//! Wires the vote store into an HTTP API and runs the periodic health/load
//! reporter next to it. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod health;
pub mod obs;
pub mod ops;
pub mod router;
pub mod runtime;
