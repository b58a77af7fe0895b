//! HTTP client for the platform API
//!
//! Provides async methods for the integrations, store and graphs endpoints.

pub mod client;
pub mod types;

pub use client::*;
