//! Payload DTOs for the function routes.
//!
//! # Design
//! `Point` mirrors the server's schema but is defined independently so the
//! client does not depend on axum. The live-server integration test catches
//! drift between the two.

use serde::{Deserialize, Serialize};

/// An `{x, y}` pair. `Hash` lets callers compare array results as sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Parsed result of `/httpHandleHeaders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReply {
    pub body: String,
    pub test_header: String,
}
