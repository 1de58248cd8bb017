//! Stateless HTTP request builder and response parser for the function routes.
//!
//! # Design
//! `FunctionClient` holds only a `base_url`. Each route is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse` and checks the route's status code. The caller
//! executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HeaderReply, Point};

pub const BASE_URL_ENV: &str = "FUNCTIONS_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:7071/api";

pub const TEST_HEADER: &str = "test-header";

/// Synchronous, stateless client for the function routes.
#[derive(Debug, Clone)]
pub struct FunctionClient {
    base_url: String,
}

impl FunctionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL from `FUNCTIONS_BASE_URL`, or the local function host default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_echo_body(&self, body: &str) -> HttpRequest {
        self.post_text("/httpEcho", body, "application/json")
    }

    pub fn build_echo_query(&self, name: &str) -> HttpRequest {
        self.get_with_query("/httpEcho", "name", name)
    }

    pub fn build_same_name(&self, req: &str) -> HttpRequest {
        self.get_with_query("/httpSameName", "req", req)
    }

    pub fn build_handle_string(&self, content: &str) -> HttpRequest {
        self.post_text("/httpHandleString", content, "application/json")
    }

    pub fn build_handle_int(&self, value: i32) -> HttpRequest {
        self.post_text("/httpHandleInt", &value.to_string(), "application/json")
    }

    pub fn build_handle_int_array(&self, values: &[i32]) -> Result<HttpRequest, ApiError> {
        self.post_json("/httpHandleIntArray", values)
    }

    pub fn build_handle_pojo(&self, point: &Point) -> Result<HttpRequest, ApiError> {
        self.post_json("/httpHandlePojo", point)
    }

    pub fn build_handle_pojo_array(&self, points: &[Point]) -> Result<HttpRequest, ApiError> {
        self.post_json("/httpHandlePojoArray", points)
    }

    pub fn build_handle_legacy(&self, body: &str) -> HttpRequest {
        self.post_text("/httpHandleLegacy", body, "text/plain")
    }

    pub fn build_handle_headers(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/httpHandleHeaders", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_echo_body(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_text(response, 202)
    }

    pub fn parse_echo_query(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_text(response, 200)
    }

    pub fn parse_same_name(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_text(response, 200)
    }

    pub fn parse_handle_string(&self, response: HttpResponse) -> Result<String, ApiError> {
        parse_text(response, 280)
    }

    pub fn parse_handle_int(&self, response: HttpResponse) -> Result<i32, ApiError> {
        let body = parse_text(response, 281)?;
        body.trim()
            .parse()
            .map_err(|_| ApiError::DeserializationError(format!("{body:?} is not an integer")))
    }

    pub fn parse_handle_int_array(&self, response: HttpResponse) -> Result<Vec<i32>, ApiError> {
        parse_json(response, 282)
    }

    pub fn parse_handle_pojo(&self, response: HttpResponse) -> Result<Point, ApiError> {
        parse_json(response, 283)
    }

    /// Order of the returned points is not part of the route's contract.
    pub fn parse_handle_pojo_array(&self, response: HttpResponse) -> Result<Vec<Point>, ApiError> {
        parse_json(response, 284)
    }

    pub fn parse_handle_legacy(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 285)?;
        if let Some(content_type) = response.header("content-type").filter(|v| !v.is_empty()) {
            return Err(ApiError::UnexpectedContentType(content_type.to_string()));
        }
        Ok(response.body)
    }

    pub fn parse_handle_headers(&self, response: HttpResponse) -> Result<HeaderReply, ApiError> {
        check_status(&response, 286)?;
        let test_header = response
            .header(TEST_HEADER)
            .ok_or_else(|| ApiError::MissingHeader(TEST_HEADER.to_string()))?
            .to_string();
        Ok(HeaderReply {
            body: response.body,
            test_header,
        })
    }

    fn post_text(&self, route: &str, body: &str, content_type: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{route}", self.base_url),
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: Some(body.to_string()),
        }
    }

    fn post_json<T: Serialize + ?Sized>(
        &self,
        route: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.post_text(route, &body, "application/json"))
    }

    fn get_with_query(&self, route: &str, key: &str, value: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{route}?{key}={}", self.base_url, urlencoding::encode(value)),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Map a status other than `expected` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        expected,
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_text(response: HttpResponse, expected: u16) -> Result<String, ApiError> {
    check_status(&response, expected)?;
    Ok(response.body)
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
