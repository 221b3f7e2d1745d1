use crate::common::{TestClient, TestStateBuilder};
use axum::http::StatusCode;
use lpp_api::scoring::model::EvaluateResponse;
use lpp_scoring::PolicyTable;
use serde_json::json;

/// Read-aloud averaged over three 5-point traits on a /10 scale
const AVERAGED_READ_ALOUD: &str = r#"{
    "read-aloud": {
        "strategy": "positional_with_extras",
        "content": {
            "kind": "match_ratio",
            "bands": [
                { "when": { "at_least": 100.0 }, "score": 5.0 },
                { "when": { "at_least": 50.0 }, "score": 3.0 },
                { "when": { "above": 0.0 }, "score": 1.0 }
            ]
        },
        "max_content": 5.0,
        "max_pronunciation": 5.0,
        "max_fluency": 5.0,
        "combination": "average",
        "public_scale": 10.0
    }
}"#;

#[tokio::test]
async fn test_overridden_policy_is_used() {
    let policies = PolicyTable::from_json(AVERAGED_READ_ALOUD).expect("valid policy file");
    let client = TestClient::with_state(TestStateBuilder::new().policies(policies).build());

    let response = client
        .post_json(
            "/v1/scoring/read-aloud/evaluate",
            &json!({
                "reference_text": "good morning everyone",
                "candidate_transcript": "good morning everyone"
            }),
        )
        .await;
    response.assert_status(StatusCode::OK);

    let body: EvaluateResponse = response.json();
    assert_eq!(body.scores.total, 5.0);
    assert_eq!(body.scaled_total, Some(10.0));
}

#[tokio::test]
async fn test_overridden_policy_reports_extras() {
    let policies = PolicyTable::from_json(AVERAGED_READ_ALOUD).expect("valid policy file");
    let client = TestClient::with_state(TestStateBuilder::new().policies(policies).build());

    let body: serde_json::Value = client
        .post_json(
            "/v1/scoring/read-aloud/evaluate",
            &json!({
                "reference_text": "good morning",
                "candidate_transcript": "good morning everyone"
            }),
        )
        .await
        .json();

    assert_eq!(body["alignment"].as_array().unwrap().len(), 3);
    assert_eq!(body["alignment"][2]["status"], "extra");
    assert_eq!(body["alignment"][2]["word"], "everyone");
}

#[tokio::test]
async fn test_other_modules_keep_presets() {
    let policies = PolicyTable::from_json(AVERAGED_READ_ALOUD).expect("valid policy file");
    let client = TestClient::with_state(TestStateBuilder::new().policies(policies).build());

    let body: serde_json::Value = client.get("/v1/scoring/modules/repeat-sentence").await.json();
    assert_eq!(body["policy"]["combination"], "sum");
    assert_eq!(body["max_total"], 13.0);
}

#[tokio::test]
async fn test_module_missing_from_table() {
    let policies: PolicyTable = serde_json::from_str("{}").expect("empty table");
    let client = TestClient::with_state(TestStateBuilder::new().policies(policies).build());

    let response = client
        .post_json(
            "/v1/scoring/read-aloud/evaluate",
            &json!({ "reference_text": "a", "candidate_transcript": "a" }),
        )
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("read-aloud"));

    let response = client.get("/v1/scoring/modules/read-aloud").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let modules: Vec<serde_json::Value> = client.get("/v1/scoring/modules").await.json();
    assert!(modules.is_empty());
}
