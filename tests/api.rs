use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use medscribe::{
    api::{load_state, router, AppState},
    config::Settings,
    nlp::ModelSet,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(&ModelSet::lexical(), Settings::default()))
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn state_loads_off_the_runtime() {
    let state = load_state(Settings::default()).await.unwrap();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn analyze_returns_pipeline_result() {
    let (status, body) = post(
        "/analyze",
        json!({
            "transcript": "Doctor: How are you?\nPatient: I'm worried about my neck pain.",
            "patient_name": "Alex Kim"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Medical_Summary"]["Patient_Name"], "Alex Kim");
    assert_eq!(body["Patient_Intent"], "Seeking reassurance");
    assert_eq!(body["Patient_Sentiment"], "Anxious");
}

#[tokio::test]
async fn soap_and_keywords_are_exposed() {
    let (status, body) = post("/soap", json!({ "transcript": "Patient: My back aches." })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Subjective"]["History_of_Present_Illness"], "My back aches.");

    let (status, body) = post(
        "/keywords",
        json!({ "text": "persistent neck pain after whiplash", "top_n": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keywords"].as_array().unwrap().len(), 2);
}
