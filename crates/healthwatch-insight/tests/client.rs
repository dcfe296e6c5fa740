//! Integration tests for `InsightClient` using wiremock HTTP mocks.

use healthwatch_core::{MonitorState, Patient, VitalsRecord};
use healthwatch_insight::{InsightClient, InsightError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> InsightClient {
    InsightClient::with_base_url("hf-test-key", "openai/gpt-oss-120b:groq", 20, base_url)
        .expect("client construction should not fail")
}

fn patient() -> Patient {
    Patient {
        id: 1,
        name: "Esther Wanjiku".to_owned(),
        age: 78,
        address: "14 Riverside Dr, Nairobi, Kenya".to_owned(),
        device_name: "Fitbit Sense 2".to_owned(),
        device_status: "Connected".to_owned(),
        device_battery: "72%".to_owned(),
        caregiver_name: "Amina Odhiambo".to_owned(),
        caregiver_relationship: "Daughter".to_owned(),
        caregiver_phone: "+254 712 345 678".to_owned(),
        caregiver_email: "amina.o@email.com".to_owned(),
        current_state: MonitorState::Risk,
    }
}

fn risk_vitals() -> VitalsRecord {
    VitalsRecord {
        state: MonitorState::Risk,
        hr: 88,
        sleep_hours: 4.1,
        steps: 1200,
        fatigue: "High".to_owned(),
        stability_score: 42,
        status: "High Risk".to_owned(),
        bp_sys: 135,
        bp_dia: 88,
        resting_hr: 75,
        activity_min: 12,
        last_updated: None,
    }
}

#[tokio::test]
async fn generate_returns_completion_content() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [
            { "message": { "role": "assistant",
                "content": "  Esther needs urgent attention right away.  " } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer hf-test-key"))
        .and(body_string_contains("openai/gpt-oss-120b:groq"))
        .and(body_string_contains("warning signs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let insight = client
        .generate(&patient(), &risk_vitals())
        .await
        .expect("should return the completion");

    assert_eq!(insight, "Esther needs urgent attention right away.");
}

#[tokio::test]
async fn empty_completion_falls_back_to_rule_based_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": "   " } } ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let insight = client
        .generate(&patient(), &risk_vitals())
        .await
        .expect("fallback should not be an error");

    assert!(insight.contains("Esther is currently showing signs that require attention."));
    assert!(insight.contains("Amina Odhiambo"));
}

#[tokio::test]
async fn missing_choices_falls_back_to_rule_based_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let insight = client
        .generate(&patient(), &risk_vitals())
        .await
        .expect("fallback should not be an error");
    assert!(insight.contains("require attention"));
}

#[tokio::test]
async fn server_error_is_typed_with_advisory() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate(&patient(), &risk_vitals())
        .await
        .expect_err("500 must not produce an insight");

    assert!(
        matches!(err, InsightError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert_eq!(
        err.advisory(),
        "AI service error (500). Please check your HF_API_KEY."
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate(&patient(), &risk_vitals())
        .await
        .expect_err("garbage body must not produce an insight");

    assert!(matches!(err, InsightError::Deserialize { .. }));
}
