//! Vote HTTP API (`/api/votes`).

pub mod error;
pub mod votes;

pub use error::ApiError;
pub use votes::VoteEntry;
