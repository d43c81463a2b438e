//! Blog Proxy - aggregates tagged blog posts from an upstream API
//!
//! This crate fetches posts for several tags concurrently, merges and
//! deduplicates them, and serves the sorted result over HTTP.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod posts;
pub mod routes;
