use anyhow::Result;
use mail_console::{
    client::MailApiClient,
    config::Config,
    console::{self, Command},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

fn client_for(server: &MockServer) -> Result<MailApiClient> {
    let config = Config {
        api_base_url: server.uri(),
    };
    MailApiClient::new(&config)
}

/// Test: The send command parses the form and posts the assembled payload
#[tokio::test]
async fn test_send_command_posts_parsed_form() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_partial_json(json!({
            "tenant_id": "tenant-1",
            "recipient": {"email": "alice@example.com", "name": "Alice"},
            "template_id": "tpl-1",
            "variables": {"name": "Alice"},
            "idempotency_key": "send-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email_id": "em_1",
            "status": "queued",
            "idempotency_reused": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "recipient_email": "alice@example.com",
        "recipient_name": "Alice",
        "template_id": "tpl-1",
        "variables": r#"{"name":"Alice"}"#,
        "idempotency_key": "send-1"
    })
    .to_string();

    let body = console::run(Command::Send, &input, &client).await?;

    assert_eq!(body["email_id"], json!("em_1"));
    assert_eq!(body["status"], json!("queued"));

    Ok(())
}

/// Test: A malformed free-text field stops the send before any request
#[tokio::test]
async fn test_send_command_stops_on_malformed_json_field() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "recipient_email": "alice@example.com",
        "template_id": "tpl-1",
        "variables": "{bad"
    })
    .to_string();

    let error = console::run(Command::Send, &input, &client)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "variables must be a valid JSON object");
    server.verify().await;

    Ok(())
}

/// Test: A blank recipients field stops the bulk send before any request
#[tokio::test]
async fn test_bulk_command_stops_on_blank_recipients() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "template_id": "tpl-1",
        "recipients": " , "
    })
    .to_string();

    let error = console::run(Command::Bulk, &input, &client)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Add at least one recipient email");
    server.verify().await;

    Ok(())
}

/// Test: The bulk command expands recipient text into recipient objects
#[tokio::test]
async fn test_bulk_command_expands_recipient_text() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send/bulk"))
        .and(body_partial_json(json!({
            "recipients": [
                {"email": "a@example.com"},
                {"email": "b@example.com"}
            ],
            "batch_size": 50
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bulk_id": "b1",
            "queued_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "template_id": "tpl-1",
        "recipients": "a@example.com, b@example.com",
        "batch_size": 50
    })
    .to_string();

    let body = console::run(Command::Bulk, &input, &client).await?;

    assert_eq!(body["bulk_id"], json!("b1"));

    Ok(())
}

/// Test: The lookup command issues a tenant-scoped GET
#[tokio::test]
async fn test_lookup_command_issues_scoped_get() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/emails/email-123"))
        .and(query_param("tenant_id", "tenant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "email-123",
            "status": "delivered"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "email_id": "email-123"
    })
    .to_string();

    let body = console::run(Command::Lookup, &input, &client).await?;

    assert_eq!(body["status"], json!("delivered"));

    Ok(())
}

/// Test: The analytics command drops empty filters from the query
#[tokio::test]
async fn test_analytics_command_drops_empty_filters() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics"))
        .and(query_param("tenant_id", "tenant-1"))
        .and(query_param("group_by", "day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totals": {"sent": 3},
            "rates": {"open_rate": 0.5},
            "series": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-1",
        "from": "",
        "to": "",
        "template_id": ""
    })
    .to_string();

    let body = console::run(Command::Analytics, &input, &client).await?;
    assert_eq!(body["totals"]["sent"], json!(3));

    let requests = server.received_requests().await.unwrap();
    let mut keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(key, _)| key.into_owned())
        .collect();
    keys.sort();

    assert_eq!(keys, vec!["group_by", "tenant_id"]);

    Ok(())
}

/// Test: A server-reported failure propagates through the console layer
#[tokio::test]
async fn test_server_failure_propagates_through_console() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "unknown tenant"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let input = json!({
        "tenant_id": "tenant-x",
        "recipient_email": "alice@example.com",
        "template_id": "tpl-1"
    })
    .to_string();

    let error = console::run(Command::Send, &input, &client)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "unknown tenant");

    Ok(())
}

/// Test: Unparseable form input reports which form was malformed
#[tokio::test]
async fn test_malformed_form_input_names_the_form() -> Result<()> {
    let server = MockServer::start().await;
    let client = client_for(&server)?;

    let error = console::run(Command::Send, "not json", &client)
        .await
        .unwrap_err();

    assert!(error.to_string().starts_with("Invalid send form"));

    Ok(())
}
