use breach_audit::utils::error::{AuditError, ErrorCategory, ErrorSeverity};
use breach_audit::{AuditConfig, AuditEngine, BreachPipeline};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn valid_breach(name: &str, added_date: &str) -> Value {
    json!({
        "Name": name,
        "Title": name,
        "Domain": format!("{}.example.com", name.to_lowercase()),
        "BreachDate": "2013-10-04",
        "AddedDate": added_date,
        "ModifiedDate": "2022-05-15T23:52:49Z",
        "PwnCount": 152445165,
        "Description": format!("The {} breach.", name),
        "LogoPath": format!("{}.png", name),
        "LogoUrl": format!("https://monitor.cdn.mozilla.net/img/logos/{}.png", name),
        "DataClasses": ["Email addresses", "Passwords"],
        "IsVerified": true,
        "IsFabricated": false,
        "IsSensitive": false,
        "IsRetired": false,
        "IsSpamList": false,
        "IsMalware": false
    })
}

fn audit_config(server: &MockServer, limit: usize) -> AuditConfig {
    AuditConfig {
        endpoint: server.url("/hibp/breaches"),
        cdn_base: "https://monitor.cdn.mozilla.net/img/logos/".to_string(),
        limit,
    }
}

#[tokio::test]
async fn test_end_to_end_audit_with_clean_feed() {
    let server = MockServer::start();
    let mock_data = json!([
        valid_breach("Adobe", "2013-12-04T00:00:00Z"),
        valid_breach("Dropbox", "2016-08-31T00:00:00Z")
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    api_mock.assert();
    assert!(report.is_clean());
    assert_eq!(report.checked, 2);
    assert_eq!(report.summary(), "0/20");
}

#[tokio::test]
async fn test_end_to_end_audit_reports_violations() {
    let server = MockServer::start();

    // Newest record is valid, the middle one lost its logo fields,
    // the oldest has an empty DataClasses array.
    let mut no_logo = valid_breach("NoLogo", "2023-01-01T00:00:00Z");
    no_logo.as_object_mut().unwrap().remove("LogoUrl");
    no_logo.as_object_mut().unwrap().remove("LogoPath");
    let mut empty_classes = valid_breach("EmptyClasses", "2022-01-01T00:00:00Z");
    empty_classes["DataClasses"] = json!([]);

    let mock_data = json!([
        empty_classes,
        valid_breach("Fresh", "2024-01-01T00:00:00Z"),
        no_logo
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    api_mock.assert();
    assert!(!report.is_clean());
    assert_eq!(report.checked, 3);
    // Sorted newest-first: Fresh, NoLogo, EmptyClasses.
    // NoLogo misses two required fields, EmptyClasses has one bad field.
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.summary(), "3/20");

    let rendered = report.render();
    assert!(rendered.contains("LogoUrl"));
    assert!(rendered.contains("LogoPath"));
    assert!(rendered.contains("/2/DataClasses"));
}

#[tokio::test]
async fn test_end_to_end_backfill_makes_feed_valid() {
    let server = MockServer::start();

    // LogoUrl absent but LogoPath present: normalization must repair the
    // record before validation sees it.
    let mut breach = valid_breach("Repairable", "2021-06-01T00:00:00Z");
    breach.as_object_mut().unwrap().remove("LogoUrl");

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([breach]));
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    api_mock.assert();
    assert!(report.is_clean(), "violations: {}", report.render());
}

#[tokio::test]
async fn test_end_to_end_limit_drops_oldest_records() {
    let server = MockServer::start();

    // The oldest record is broken, but with limit 2 it never reaches
    // the validator.
    let mut broken = valid_breach("Ancient", "2010-01-01T00:00:00Z");
    broken["PwnCount"] = json!("not a number");

    let mock_data = json!([
        valid_breach("Newer", "2023-01-01T00:00:00Z"),
        broken,
        valid_breach("Newest", "2024-01-01T00:00:00Z")
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 2)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    api_mock.assert();
    assert!(report.is_clean());
    assert_eq!(report.checked, 2);
    assert_eq!(report.summary(), "0/2");
}

#[tokio::test]
async fn test_end_to_end_fetch_failure_is_reported_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(500);
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, AuditError::ApiError(_)), "got: {:?}", err);
    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(err.severity(), ErrorSeverity::Medium);
}

#[tokio::test]
async fn test_end_to_end_non_array_payload_is_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"status": "degraded"}));
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    api_mock.assert();
    assert!(
        matches!(err, AuditError::PayloadError { .. }),
        "got: {:?}",
        err
    );
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hibp/breaches");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([valid_breach("Solo", "2020-01-01T00:00:00Z")]));
    });

    let pipeline = BreachPipeline::new(audit_config(&server, 20)).unwrap();
    let engine = AuditEngine::new_with_monitoring(pipeline, true);

    let report = engine.run().await.unwrap();

    api_mock.assert();
    assert!(report.is_clean());
    assert_eq!(report.checked, 1);
}
