//! Integration test utilities for the Slack cache
//!
//! This crate provides a scripted remote API, log capture and Slack payload
//! fixtures for running end-to-end tests against `CachedSlack`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
