//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names a route operation, its input, the request the client must
//! build, a simulated response and the parsed result. JSON bodies are
//! compared as parsed values so field order does not matter.

use http_functions_core::{FunctionClient, HttpMethod, HttpRequest, HttpResponse, Point};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:7071/api";

fn client() -> FunctionClient {
    FunctionClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn build(c: &FunctionClient, operation: &str, input: &Value) -> HttpRequest {
    match operation {
        "echo_body" => c.build_echo_body(input.as_str().unwrap()),
        "echo_query" => c.build_echo_query(input.as_str().unwrap()),
        "same_name" => c.build_same_name(input.as_str().unwrap()),
        "handle_string" => c.build_handle_string(input.as_str().unwrap()),
        "handle_int" => {
            let value = i32::try_from(input.as_i64().unwrap()).expect("handle_int input fits i32");
            c.build_handle_int(value)
        }
        "handle_int_array" => {
            let values: Vec<i32> = serde_json::from_value(input.clone()).unwrap();
            c.build_handle_int_array(&values).unwrap()
        }
        "handle_pojo" => {
            let point: Point = serde_json::from_value(input.clone()).unwrap();
            c.build_handle_pojo(&point).unwrap()
        }
        "handle_pojo_array" => {
            let points: Vec<Point> = serde_json::from_value(input.clone()).unwrap();
            c.build_handle_pojo_array(&points).unwrap()
        }
        "handle_legacy" => c.build_handle_legacy(input.as_str().unwrap()),
        "handle_headers" => c.build_handle_headers(),
        other => panic!("unknown operation: {other}"),
    }
}

/// Parse the simulated response and render the result back to JSON.
fn parse(c: &FunctionClient, operation: &str, response: HttpResponse) -> Value {
    match operation {
        "echo_body" => json!(c.parse_echo_body(response).unwrap()),
        "echo_query" => json!(c.parse_echo_query(response).unwrap()),
        "same_name" => json!(c.parse_same_name(response).unwrap()),
        "handle_string" => json!(c.parse_handle_string(response).unwrap()),
        "handle_int" => json!(c.parse_handle_int(response).unwrap()),
        "handle_int_array" => json!(c.parse_handle_int_array(response).unwrap()),
        "handle_pojo" => json!(c.parse_handle_pojo(response).unwrap()),
        "handle_pojo_array" => json!(c.parse_handle_pojo_array(response).unwrap()),
        "handle_legacy" => json!(c.parse_handle_legacy(response).unwrap()),
        "handle_headers" => {
            let reply = c.parse_handle_headers(response).unwrap();
            json!({ "body": reply.body, "test_header": reply.test_header })
        }
        other => panic!("unknown operation: {other}"),
    }
}

fn parse_fails(c: &FunctionClient, operation: &str, response: HttpResponse) -> bool {
    match operation {
        "echo_body" => c.parse_echo_body(response).is_err(),
        "echo_query" => c.parse_echo_query(response).is_err(),
        "same_name" => c.parse_same_name(response).is_err(),
        "handle_string" => c.parse_handle_string(response).is_err(),
        "handle_int" => c.parse_handle_int(response).is_err(),
        "handle_int_array" => c.parse_handle_int_array(response).is_err(),
        "handle_pojo" => c.parse_handle_pojo(response).is_err(),
        "handle_pojo_array" => c.parse_handle_pojo_array(response).is_err(),
        "handle_legacy" => c.parse_handle_legacy(response).is_err(),
        "handle_headers" => c.parse_handle_headers(response).is_err(),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn route_test_vectors() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    let cases = vectors["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 10, "one case per route");

    for case in cases {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = build(&c, operation, &case["input"]);
        let method = parse_method(expected_req["method"].as_str().unwrap());
        assert_eq!(req.method, method, "{name}: method");
        let path = format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap());
        assert_eq!(req.path, path, "{name}: path");
        assert_eq!(req.headers, pairs(&expected_req["headers"]), "{name}: headers");

        match &expected_req["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            Value::String(text) => {
                assert_eq!(req.body.as_deref(), Some(text.as_str()), "{name}: body")
            }
            structured => {
                let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&body, structured, "{name}: body");
            }
        }

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: u16::try_from(sim["status"].as_u64().unwrap()).unwrap(),
            headers: pairs(&sim["headers"]),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = parse(&c, operation, response);
        assert_eq!(result, case["expected_result"], "{name}: parsed result");
    }
}

#[test]
fn every_vector_rejects_wrong_status() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: 500,
            headers: pairs(&sim["headers"]),
            body: "internal error".to_string(),
        };
        assert!(
            parse_fails(&c, case["operation"].as_str().unwrap(), response),
            "{name}: status 500 must not parse"
        );
    }
}
