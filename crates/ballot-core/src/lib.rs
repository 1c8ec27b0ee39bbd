//! Ballot core: the concurrent vote store, the request counter, and the
//! error surface shared by the service crate.
//!
//! This crate carries no transport or runtime dependencies so the store can be
//! exercised in isolation (plain threads, no executor).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `BallotError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod store;

pub use counter::RequestCounter;
/// Shared result type.
pub use error::{BallotError, Result};
pub use store::CounterStore;
