// ABOUTME: Remote API access layer
// ABOUTME: HTTP plumbing and the wire models of the executor service

pub mod client;
pub mod models;

pub use client::{ensure_success, map_response, ApiClient};
