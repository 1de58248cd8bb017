//! Synchronous client core for the HTTP function routes.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, so every route's request shape and status check
//! can be tested without a server.
//!
//! # Design
//! - `FunctionClient` is stateless; it holds only `base_url`.
//! - Each route has a `build_*` (produces request) and a `parse_*` (consumes
//!   response and checks the route's status code).
//! - DTOs are defined independently from the function-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::FunctionClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{HeaderReply, Point};
