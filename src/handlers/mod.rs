//! HTTP request handlers not tied to a single feature.

pub mod http;

pub use http::*;
