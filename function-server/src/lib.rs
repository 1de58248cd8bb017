//! HTTP function endpoints.
//!
//! Each route is a stateless handler that applies one fixed transform to its
//! body or query parameter and answers with a route-specific status code.
//! Several of those codes (280-286) are outside the registered ranges and are
//! part of the contract.

pub mod config;
pub mod error;

use std::future::Future;

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection, StringRejection},
        Query,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::normalize_prefix;
use crate::error::FunctionError;

pub const ECHO_BODY_STATUS: u16 = 202;
pub const HANDLE_STRING_STATUS: u16 = 280;
pub const HANDLE_INT_STATUS: u16 = 281;
pub const HANDLE_INT_ARRAY_STATUS: u16 = 282;
pub const HANDLE_POJO_STATUS: u16 = 283;
pub const HANDLE_POJO_ARRAY_STATUS: u16 = 284;
pub const HANDLE_LEGACY_STATUS: u16 = 285;
pub const HANDLE_HEADERS_STATUS: u16 = 286;

pub const INT_OFFSET: i32 = 111;
pub const INT_ARRAY_OFFSET: i32 = 222;
pub const POJO_OFFSET: i32 = 333;
pub const POJO_ARRAY_OFFSET: i32 = 444;

pub const TEST_HEADER_NAME: &str = "test-header";
pub const TEST_HEADER_VALUE: &str = "test response header value";
pub const HEADERS_BODY: &str = "Check header value";

/// A plain `{x, y}` pair. Equality is field-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Add `delta` to both coordinates.
    pub fn shifted(&self, delta: i32) -> Result<Point, FunctionError> {
        Ok(Point {
            x: self.x.checked_add(delta).ok_or(FunctionError::Overflow)?,
            y: self.y.checked_add(delta).ok_or(FunctionError::Overflow)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EchoQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SameNameQuery {
    pub req: Option<String>,
}

pub fn greeting(name: &str) -> String {
    format!("Hello {name}!")
}

pub fn describe_string(content: &str) -> String {
    format!("HttpFunction string content \"{content}\"!")
}

pub fn shift_int(raw: &str) -> Result<i32, FunctionError> {
    let value: i32 = raw
        .trim()
        .parse()
        .map_err(|_| FunctionError::InvalidPayload(format!("{raw:?} is not an integer")))?;
    value.checked_add(INT_OFFSET).ok_or(FunctionError::Overflow)
}

pub fn shift_int_array(values: &[i32]) -> Result<Vec<i32>, FunctionError> {
    values
        .iter()
        .map(|v| v.checked_add(INT_ARRAY_OFFSET).ok_or(FunctionError::Overflow))
        .collect()
}

/// Input order is preserved even though callers only rely on membership.
pub fn shift_points(points: &[Point]) -> Result<Vec<Point>, FunctionError> {
    points.iter().map(|p| p.shifted(POJO_ARRAY_OFFSET)).collect()
}

/// Routes mounted at the root, with request tracing.
pub fn app() -> Router {
    app_with_prefix("")
}

/// Routes nested under `prefix`. `""` and `"/"` mount at the root.
pub fn app_with_prefix(prefix: &str) -> Router {
    let prefix = normalize_prefix(prefix);
    let router = if prefix.is_empty() {
        routes()
    } else {
        Router::new().nest(&prefix, routes())
    };
    router.layer(TraceLayer::new_for_http())
}

fn routes() -> Router {
    Router::new()
        .route("/httpEcho", get(echo_query).post(echo_body))
        .route("/httpSameName", get(same_name))
        .route("/httpHandleString", post(handle_string))
        .route("/httpHandleInt", post(handle_int))
        .route("/httpHandleIntArray", post(handle_int_array))
        .route("/httpHandlePojo", post(handle_pojo))
        .route("/httpHandlePojoArray", post(handle_pojo_array))
        .route("/httpHandleLegacy", post(handle_legacy))
        .route("/httpHandleHeaders", get(handle_headers))
}

/// Serve until the process is killed.
pub async fn run(listener: TcpListener, route_prefix: &str) -> Result<(), std::io::Error> {
    serve(listener, route_prefix, std::future::pending()).await
}

/// Serve until `shutdown` resolves, letting in-flight requests finish.
pub async fn serve<F>(
    listener: TcpListener,
    route_prefix: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app_with_prefix(route_prefix))
        .with_graceful_shutdown(shutdown)
        .await
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn echo_body(
    body: Result<String, StringRejection>,
) -> Result<(StatusCode, String), FunctionError> {
    let body = body?;
    debug!(len = body.len(), "httpEcho body");
    Ok((status(ECHO_BODY_STATUS), body))
}

async fn echo_query(
    query: Result<Query<EchoQuery>, QueryRejection>,
) -> Result<String, FunctionError> {
    let Query(query) = query?;
    let name = query.name.ok_or(FunctionError::MissingQueryParam("name"))?;
    Ok(greeting(&name))
}

async fn same_name(
    query: Result<Query<SameNameQuery>, QueryRejection>,
) -> Result<String, FunctionError> {
    let Query(query) = query?;
    query.req.ok_or(FunctionError::MissingQueryParam("req"))
}

async fn handle_string(
    body: Result<String, StringRejection>,
) -> Result<(StatusCode, String), FunctionError> {
    Ok((status(HANDLE_STRING_STATUS), describe_string(&body?)))
}

async fn handle_int(
    body: Result<String, StringRejection>,
) -> Result<(StatusCode, String), FunctionError> {
    let shifted = shift_int(&body?)?;
    debug!(result = shifted, "httpHandleInt");
    Ok((status(HANDLE_INT_STATUS), shifted.to_string()))
}

async fn handle_int_array(
    payload: Result<Json<Vec<i32>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<i32>>), FunctionError> {
    let Json(values) = payload?;
    debug!(len = values.len(), "httpHandleIntArray");
    Ok((status(HANDLE_INT_ARRAY_STATUS), Json(shift_int_array(&values)?)))
}

async fn handle_pojo(
    payload: Result<Json<Point>, JsonRejection>,
) -> Result<(StatusCode, Json<Point>), FunctionError> {
    let Json(point) = payload?;
    Ok((status(HANDLE_POJO_STATUS), Json(point.shifted(POJO_OFFSET)?)))
}

async fn handle_pojo_array(
    payload: Result<Json<Vec<Point>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Point>>), FunctionError> {
    let Json(points) = payload?;
    debug!(len = points.len(), "httpHandlePojoArray");
    Ok((status(HANDLE_POJO_ARRAY_STATUS), Json(shift_points(&points)?)))
}

// A bare `Body` carries no content-type header.
async fn handle_legacy(
    body: Result<String, StringRejection>,
) -> Result<(StatusCode, Body), FunctionError> {
    Ok((status(HANDLE_LEGACY_STATUS), Body::from(body?)))
}

async fn handle_headers() -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    (
        status(HANDLE_HEADERS_STATUS),
        [(TEST_HEADER_NAME, TEST_HEADER_VALUE)],
        HEADERS_BODY,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn point_serializes_to_json() {
        let json = serde_json::to_value(Point::new(55, 66)).unwrap();
        assert_eq!(json["x"], 55);
        assert_eq!(json["y"], 66);
    }

    #[test]
    fn point_rejects_missing_field() {
        let result: Result<Point, _> = serde_json::from_str(r#"{"x":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn point_rejects_fractional_coordinates() {
        let result: Result<Point, _> = serde_json::from_str(r#"{"x":1.5,"y":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn greeting_wraps_name() {
        assert_eq!(greeting("value"), "Hello value!");
        assert_eq!(greeting(""), "Hello !");
    }

    #[test]
    fn describe_string_quotes_content() {
        assert_eq!(
            describe_string("lorem ipsum et al"),
            "HttpFunction string content \"lorem ipsum et al\"!"
        );
    }

    #[test]
    fn shift_int_adds_offset() {
        assert_eq!(shift_int("10").unwrap(), 121);
        assert_eq!(shift_int(" -200\n").unwrap(), -89);
    }

    #[test]
    fn shift_int_rejects_text() {
        assert!(matches!(shift_int("ten"), Err(FunctionError::InvalidPayload(_))));
    }

    #[test]
    fn shift_int_rejects_overflow() {
        assert_eq!(shift_int(&i32::MAX.to_string()), Err(FunctionError::Overflow));
    }

    #[test]
    fn shift_int_array_keeps_order() {
        let shifted = shift_int_array(&[10, 11, 12, 13, 14, 15]).unwrap();
        assert_eq!(shifted, vec![232, 233, 234, 235, 236, 237]);
        assert!(shift_int_array(&[]).unwrap().is_empty());
    }

    #[test]
    fn point_shifted_adds_offset_to_both_fields() {
        assert_eq!(Point::new(55, 66).shifted(POJO_OFFSET).unwrap(), Point::new(388, 399));
        assert_eq!(Point::new(i32::MAX, 0).shifted(1), Err(FunctionError::Overflow));
    }

    #[test]
    fn shift_points_matches_as_set() {
        let shifted = shift_points(&[Point::new(77, 88), Point::new(99, 100)]).unwrap();
        let set: HashSet<Point> = shifted.into_iter().collect();
        assert!(set.contains(&Point::new(521, 532)));
        assert!(set.contains(&Point::new(543, 544)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn custom_status_codes_are_preserved() {
        assert_eq!(status(HANDLE_STRING_STATUS).as_u16(), 280);
        assert_eq!(status(HANDLE_HEADERS_STATUS).as_u16(), 286);
    }
}
