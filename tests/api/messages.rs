use reqwest::{Method, StatusCode};

use serde_json::{json, Value};

use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{NewContactMessage, TestApp};

fn stored_collection(app: &TestApp) -> Vec<Value> {
    let raw = std::fs::read_to_string(app.collection_path())
        .expect("No collection file was persisted");
    serde_json::from_str(&raw).expect("Persisted collection is not valid JSON")
}

#[tokio::test]
async fn send_returns_success_for_valid_request() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .send_message(&NewContactMessage::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!(true), body["success"]);
    assert_eq!(json!("Message saved successfully"), body["message"]);

    let messages = stored_collection(&app);
    assert_eq!(1, messages.len());
    assert_eq!(json!("Jane"), messages[0]["name"]);
    assert_eq!(json!("jane@x.com"), messages[0]["email"]);
    assert_eq!(json!("No Subject"), messages[0]["subject"]);
    assert_eq!(json!(false), messages[0]["read"]);
}

#[tokio::test]
async fn send_returns_bad_request_for_missing_data() {
    let app = TestApp::spawn().await;

    let test_cases: Vec<(String, NewContactMessage)> = vec![
        (
            "missing name".into(),
            NewContactMessage {
                name: None,
                ..NewContactMessage::valid()
            },
        ),
        (
            "blank name".into(),
            NewContactMessage {
                name: Some("   ".into()),
                ..NewContactMessage::valid()
            },
        ),
        (
            "missing email".into(),
            NewContactMessage {
                email: None,
                ..NewContactMessage::valid()
            },
        ),
        (
            "missing message".into(),
            NewContactMessage {
                message: None,
                ..NewContactMessage::valid()
            },
        ),
        (
            "malformed email".into(),
            NewContactMessage {
                email: Some("not-an-email".into()),
                ..NewContactMessage::valid()
            },
        ),
    ];

    for (desc, new_message) in test_cases {
        let res = app
            .send_message(&new_message)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );

        let body: Value = res.json().await.expect("Body was not JSON");
        assert_eq!(json!(false), body["success"], "for payload {}", desc);
    }

    // Nothing was persisted by any of the rejected submissions
    assert!(!app.collection_path().exists());
}

#[tokio::test]
async fn rejected_email_names_the_email_kind() {
    let app = TestApp::spawn().await;

    let res = app
        .send_message(&NewContactMessage {
            email: Some("not-an-email".into()),
            ..NewContactMessage::valid()
        })
        .await
        .expect("Failed to execute request");

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!("Invalid email address"), body["message"]);
}

#[tokio::test]
async fn send_escapes_markup_in_stored_messages() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .send_message(&NewContactMessage {
            message: Some("<script>alert(1)</script>".into()),
            ..NewContactMessage::valid()
        })
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let messages = stored_collection(&app);
    let stored = messages[0]["message"].as_str().unwrap();

    assert!(!stored.contains("<script>"));
    assert!(stored.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn send_triggers_owner_notification() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .send_message(&NewContactMessage::valid())
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let requests = app.wait_for_email_requests(1).await;
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(json!("owner@test.com"), body["To"]);
    assert_eq!(json!("New Portfolio Message from Jane"), body["Subject"]);
}

#[tokio::test]
async fn send_succeeds_even_when_email_delivery_fails() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let res = app
        .send_message(&NewContactMessage::valid())
        .await
        .expect("Failed to execute request");

    // The store operation's outcome is independent of notification
    assert!(res.status().is_success());
    assert_eq!(1, stored_collection(&app).len());

    // The failed delivery attempt did happen
    app.wait_for_email_requests(1).await;
    assert_eq!(1, stored_collection(&app).len());
}

#[tokio::test]
async fn get_messages_returns_empty_array_before_first_message() {
    let app = TestApp::spawn().await;

    let res = app.get_messages().await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!(true), body["success"]);
    assert_eq!(json!([]), body["messages"]);
}

#[tokio::test]
async fn get_messages_returns_stored_messages_in_order() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    for name in ["First", "Second", "Third"] {
        app.send_message(&NewContactMessage {
            name: Some(name.into()),
            ..NewContactMessage::valid()
        })
        .await
        .expect("Failed to execute request");
    }

    let res = app.get_messages().await.expect("Failed to execute request");
    let body: Value = res.json().await.expect("Body was not JSON");

    let names: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();

    assert_eq!(vec!["First", "Second", "Third"], names);
}

#[tokio::test]
async fn delete_with_missing_id_is_bad_request() {
    let app = TestApp::spawn().await;

    for body in [json!({}), json!({ "id": "" })] {
        let res = app
            .delete_message(&body)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::BAD_REQUEST, res.status());

        let body: Value = res.json().await.expect("Body was not JSON");
        assert_eq!(json!("Missing message ID"), body["message"]);
    }
}

#[tokio::test]
async fn delete_before_any_message_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .delete_message(&json!({ "id": "does-not-exist" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!("No messages found"), body["message"]);
}

#[tokio::test]
async fn delete_of_absent_id_reports_success_without_changes() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    app.send_message(&NewContactMessage::valid())
        .await
        .expect("Failed to execute request");

    let before = stored_collection(&app);

    let res = app
        .delete_message(&json!({ "id": "does-not-exist" }))
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    assert_eq!(before, stored_collection(&app));
}

#[tokio::test]
async fn submitted_messages_can_be_listed_and_deleted() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .send_message(&NewContactMessage::valid())
        .await
        .expect("Failed to execute request");
    assert!(res.status().is_success());

    let res = app.get_messages().await.expect("Failed to execute request");
    let body: Value = res.json().await.expect("Body was not JSON");
    let listed = body["messages"].as_array().unwrap();

    assert_eq!(1, listed.len());
    assert_eq!(json!(false), listed[0]["read"]);
    assert_eq!(json!("No Subject"), listed[0]["subject"]);

    let id = listed[0]["id"].as_str().unwrap();

    let res = app
        .delete_message(&json!({ "id": id }))
        .await
        .expect("Failed to execute request");
    assert!(res.status().is_success());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!("Message deleted successfully"), body["message"]);

    let res = app.get_messages().await.expect("Failed to execute request");
    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!([]), body["messages"]);
}

#[tokio::test]
async fn wrong_methods_get_a_json_method_not_allowed() {
    let app = TestApp::spawn().await;

    let cases = [
        (Method::GET, "send-message"),
        (Method::DELETE, "delete-message"),
        (Method::POST, "get-messages"),
    ];

    for (http_method, route) in cases {
        let res = app
            .request(http_method.clone(), route)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::METHOD_NOT_ALLOWED,
            res.status(),
            "for {} {}",
            http_method,
            route
        );

        let body: Value = res.json().await.expect("Body was not JSON");
        assert_eq!(json!(false), body["success"]);
        assert_eq!(json!("Method Not Allowed"), body["message"]);
    }
}

#[tokio::test]
async fn submit_preflight_is_permitted() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::OPTIONS, "send-message")
        .header("Origin", "https://portfolio.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));

    let body = res.bytes().await.expect("Failed to read body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn undecodable_body_is_bad_request() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "send-message")
        .header("Content-Type", "application/json")
        .body("this is not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!("Missing required fields"), body["message"]);
}

#[tokio::test]
async fn unknown_routes_get_a_json_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "no-such-route")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    let body: Value = res.json().await.expect("Body was not JSON");
    assert_eq!(json!(false), body["success"]);
}
