use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{get, post_json, send};

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn health_returns_exact_ok() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn root_reports_ok_true() {
    let (status, body) = send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["ok"], json!(true));
    assert_eq!(parse(&body)["service"], json!("devsecops-node-demo"));
}

#[tokio::test]
async fn hello_contains_caller_name() {
    let (status, body) = send(get("/api/hello?name=Tran")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tran"));
    assert_eq!(body, r#"{"message":"Hello, Tran!"}"#);
}

#[tokio::test]
async fn hello_without_name_greets_world() {
    let (_, body) = send(get("/api/hello")).await;
    assert_eq!(parse(&body)["message"], json!("Hello, world!"));

    let (_, body) = send(get("/api/hello?other=1")).await;
    assert_eq!(parse(&body)["message"], json!("Hello, world!"));
}

#[tokio::test]
async fn hello_interpolates_any_string() {
    let cases = [
        ("", ""),
        ("Tran", "Tran"),
        ("%C3%A9l%C3%A8ve", "élève"),
        ("%E4%BD%A0%E5%A5%BD", "你好"),
        ("a+b", "a b"),
        ("a%2Bb", "a+b"),
        ("%3Cscript%3Ealert(1)%3C%2Fscript%3E", "<script>alert(1)</script>"),
        ("%22quoted%22", "\"quoted\""),
    ];

    for (encoded, decoded) in cases {
        let uri = format!("/api/hello?name={encoded}");
        let (status, body) = send(get(&uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(
            parse(&body)["message"],
            json!(format!("Hello, {decoded}!")),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn hello_joins_repeated_names() {
    let (status, body) = send(get("/api/hello?name=a&name=b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["message"], json!("Hello, a,b!"));
}

#[tokio::test]
async fn echo_returns_object_body() {
    let (status, body) = send(post_json("/api/echo", r#"{"a":1}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"echo":{"a":1}}"#);
}

#[tokio::test]
async fn echo_round_trips_any_json_value() {
    let values = [
        json!(null),
        json!(true),
        json!(0),
        json!(-12.5),
        json!("plain string"),
        json!("unicode ✓ 你好"),
        json!([]),
        json!([1, "two", [3], {"four": 4}]),
        json!({}),
        json!({"nested": {"deep": [null, false, {"k": "v"}]}}),
    ];

    for value in values {
        let (status, body) = send(post_json("/api/echo", value.to_string())).await;
        assert_eq!(status, StatusCode::OK, "{value}");
        assert_eq!(parse(&body)["echo"], value);
    }
}

#[tokio::test]
async fn echo_round_trips_deeply_nested_values() {
    for depth in [200, 40_000] {
        let nested = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let (status, body) = send(post_json("/api/echo", nested.clone())).await;
        assert_eq!(status, StatusCode::OK, "depth {depth}");
        assert!(
            body == format!(r#"{{"echo":{nested}}}"#),
            "depth {depth} was not echoed unchanged"
        );
    }
}

#[tokio::test]
async fn echo_without_body_returns_null() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/echo")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"echo":null}"#);
}

#[tokio::test]
async fn echo_with_invalid_json_returns_null() {
    let (status, body) = send(post_json("/api/echo", "{\"a\":")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"echo":null}"#);
}

#[tokio::test]
async fn echo_ignores_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/echo")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("[1,2]"))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"echo":[1,2]}"#);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let requests: [fn() -> Request<Body>; 4] = [
        || get("/"),
        || get("/health"),
        || get("/api/hello?name=Tran"),
        || post_json("/api/echo", r#"{"a":1}"#),
    ];

    for build in requests {
        let first = send(build()).await;
        for _ in 0..3 {
            assert_eq!(send(build()).await, first);
        }
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(get("/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
