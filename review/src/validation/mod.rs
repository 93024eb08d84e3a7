//! Validation framework for reviewer input.
//!
//! Rule functions here are shared by the payload types and the review service
//! so the same checks apply however a decision arrives.

pub mod rules;

pub use validator::Validate;
