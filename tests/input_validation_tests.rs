mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{TEST_KEY, body_json, create, get_json, json_request, request, send, spawn_app};

async fn assert_validation_error(app: &axum::Router, req: Request<Body>) {
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn create_rejects_bad_bodies() {
    let app = spawn_app("create-bodies").await;

    let bad_invoice_bodies = [
        r#"{"accepted_invoice_number":"TEST123","extra_field":"nope"}"#,
        r#"{"accepted_invoice_number":12345}"#,
        r#"{"accepted_invoice_number":null}"#,
        r#"{"accepted_invoice_number":["a"]}"#,
        r#"{"invoice_number":"TEST123"}"#,
        r#"{"Accepted_Invoice_Number":"TEST123"}"#,
        r#"{}"#,
        r#"{"accepted_invoice_number":""}"#,
        r#"{"accepted_invoice_number": "TEST123""#,
        "invalid json",
    ];
    for body in bad_invoice_bodies {
        let req = json_request("POST", "/accepted_invoice_numbers", Some(TEST_KEY), body);
        assert_validation_error(&app.router, req).await;
    }

    let bad_vendor_bodies = [
        r#"{"accepted_vendor_name":"TestVendor","id":999}"#,
        r#"{"accepted_vendor_name":42}"#,
        r#"{"vendor_name":"TestVendor"}"#,
        r#"{"accepted_vendor_name":""}"#,
    ];
    for body in bad_vendor_bodies {
        let req = json_request("POST", "/accepted_vendor_names", Some(TEST_KEY), body);
        assert_validation_error(&app.router, req).await;
    }

    let (_, invoices) = get_json(&app.router, "/accepted_invoice_numbers").await;
    let (_, vendors) = get_json(&app.router, "/accepted_vendor_names").await;
    assert_eq!(invoices, serde_json::json!([]));
    assert_eq!(vendors, serde_json::json!([]));
}

#[tokio::test]
async fn create_requires_json_content_type() {
    let app = spawn_app("content-type").await;

    let req = Request::builder()
        .method("POST")
        .uri("/accepted_invoice_numbers")
        .header("x-api-key", TEST_KEY)
        .header("content-type", "text/plain")
        .body(Body::from("not json data"))
        .expect("failed to build request");
    assert_validation_error(&app.router, req).await;

    let req = Request::builder()
        .method("POST")
        .uri("/accepted_invoice_numbers")
        .header("x-api-key", TEST_KEY)
        .body(Body::from(r#"{"accepted_invoice_number":"TEST123"}"#))
        .expect("failed to build request");
    assert_validation_error(&app.router, req).await;
}

#[tokio::test]
async fn whitespace_only_values_are_accepted() {
    let app = spawn_app("whitespace").await;

    let (status, created) = create(
        &app.router,
        "/accepted_invoice_numbers",
        "accepted_invoice_number",
        "   ",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["accepted_invoice_number"], "   ");

    let (status, created) = create(
        &app.router,
        "/accepted_vendor_names",
        "accepted_vendor_name",
        "  Padded Vendor  ",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["accepted_vendor_name"], "  Padded Vendor  ");
}

#[tokio::test]
async fn update_requires_non_empty_query_param() {
    let app = spawn_app("update-param").await;
    let (_, invoice) = create(
        &app.router,
        "/accepted_invoice_numbers",
        "accepted_invoice_number",
        "TEST123",
    )
    .await;
    let (_, vendor) = create(
        &app.router,
        "/accepted_vendor_names",
        "accepted_vendor_name",
        "TestVendor",
    )
    .await;

    let invoice_uri = format!("/accepted_invoice_numbers/{}", invoice["id"]);
    let vendor_uri = format!("/accepted_vendor_names/{}", vendor["id"]);
    for uri in [
        invoice_uri.clone(),
        format!("{invoice_uri}?invoice_number="),
        format!("{invoice_uri}?vendor_name=Wrong"),
        vendor_uri.clone(),
        format!("{vendor_uri}?vendor_name="),
        format!("{vendor_uri}?invoice_number=Wrong"),
    ] {
        assert_validation_error(&app.router, request("PUT", &uri, Some(TEST_KEY))).await;
    }

    let (_, invoices) = get_json(&app.router, "/accepted_invoice_numbers").await;
    assert_eq!(invoices, serde_json::json!([invoice]));
}

#[tokio::test]
async fn update_reads_value_from_query_not_body() {
    let app = spawn_app("update-body").await;
    let (_, invoice) = create(
        &app.router,
        "/accepted_invoice_numbers",
        "accepted_invoice_number",
        "TEST123",
    )
    .await;

    let uri = format!("/accepted_invoice_numbers/{}", invoice["id"]);
    let req = json_request(
        "PUT",
        &uri,
        Some(TEST_KEY),
        r#"{"accepted_invoice_number":"FROM_BODY"}"#,
    );
    assert_validation_error(&app.router, req).await;
}

#[tokio::test]
async fn non_integer_ids_are_validation_errors() {
    let app = spawn_app("bad-ids").await;

    for req in [
        request(
            "PUT",
            "/accepted_invoice_numbers/not_an_integer?invoice_number=TEST123",
            Some(TEST_KEY),
        ),
        request(
            "PUT",
            "/accepted_vendor_names/not_an_integer?vendor_name=TestVendor",
            Some(TEST_KEY),
        ),
        request("DELETE", "/accepted_invoice_numbers/not_an_integer", Some(TEST_KEY)),
        request("DELETE", "/accepted_vendor_names/1.5", Some(TEST_KEY)),
    ] {
        assert_validation_error(&app.router, req).await;
    }
}

#[tokio::test]
async fn lookup_requires_its_query_param() {
    let app = spawn_app("lookup-param").await;
    for uri in [
        "/vendor_name_lookup",
        "/invoice_number_lookup",
        "/invoice_number_lookup?vendor_name=x",
    ] {
        assert_validation_error(&app.router, request("GET", uri, Some(TEST_KEY))).await;
    }
}

#[tokio::test]
async fn responses_have_exactly_the_output_fields() {
    let app = spawn_app("output-shape").await;
    for value in ["TEST1", "TEST2"] {
        create(
            &app.router,
            "/accepted_invoice_numbers",
            "accepted_invoice_number",
            value,
        )
        .await;
    }

    let (_, listed) = get_json(&app.router, "/accepted_invoice_numbers").await;
    let rows = listed.as_array().expect("list body");
    assert_eq!(rows.len(), 2);
    for row in rows {
        let obj = row.as_object().expect("row object");
        assert_eq!(obj.len(), 3);
        assert!(obj["id"].is_i64());
        assert!(obj["accepted_invoice_number"].is_string());
        assert!(obj["created_at"].is_string());
    }
}
