//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("taken"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_parts(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON parses");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn envelope_carries_trace_and_details(expected_trace_id: String) {
    let error = Error::conflict("Email already exists: a@x.com")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "email" }));

    let (status, header, body) = response_parts(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body,
        json!({
            "code": "conflict",
            "message": "Email already exists: a@x.com",
            "traceId": expected_trace_id,
            "details": { "field": "email" },
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_omit_the_error_field() {
    let (_, _, body) = response_parts(&Error::not_found("missing")).await;

    assert!(body.get("error").is_none());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_their_message() {
    let (status, header, body) = response_parts(&Error::internal("database error")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(header.is_none());
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "database error",
            "error": "database error",
        })
    );
}

#[derive(Deserialize)]
struct Payload {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    name: String,
}

#[derive(Deserialize)]
struct Params {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    page: i64,
}

#[rstest]
#[case("/json", "invalid_json")]
#[case("/query?page=abc", "invalid_query")]
#[case("/path/abc", "invalid_path")]
#[actix_web::test]
async fn extractor_failures_use_the_envelope(#[case] uri: &str, #[case] kind: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config(DEFAULT_JSON_LIMIT_BYTES))
            .app_data(query_config())
            .app_data(path_config())
            .route(
                "/json",
                web::post().to(|_: web::Json<Payload>| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/query",
                web::get().to(|_: web::Query<Params>| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/path/{id}",
                web::get().to(|_: web::Path<i64>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;

    let request = if kind == "invalid_json" {
        actix_test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request()
    } else {
        actix_test::TestRequest::get().uri(uri).to_request()
    };
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!(kind));
}

#[actix_web::test]
async fn json_bodies_over_the_limit_are_rejected() {
    let app = actix_test::init_service(App::new().app_data(json_config(64)).route(
        "/json",
        web::post().to(|_: web::Json<Value>| async { HttpResponse::Ok().finish() }),
    ))
    .await;
    let oversized = json!({ "name": "x".repeat(128) });

    let request = actix_test::TestRequest::post()
        .uri("/json")
        .set_json(&oversized)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], json!("invalid_json"));
}
