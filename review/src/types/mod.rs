//! Strongly typed identifiers.

pub mod id;

pub use id::RequestId;
