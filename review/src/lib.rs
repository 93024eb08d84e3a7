//! Employee review and manager approval pipeline for submitted utility records.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;
pub mod validation;
pub mod workflow;
