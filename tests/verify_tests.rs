use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use gateway_ops::api::gateway::GatewayApi;
use gateway_ops::service::verifier::Verifier;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

const TARGET: &str = "gemini-pro-load-balanced";

#[derive(Clone)]
struct StubState {
    include_target: bool,
    completions_seen: Arc<AtomicUsize>,
}

async fn readiness() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn models(State(state): State<StubState>) -> Json<Value> {
    let mut data = vec![json!({"id": "wildcard-model", "object": "model"})];
    if state.include_target {
        data.push(json!({"id": TARGET, "object": "model"}));
    }
    Json(json!({"object": "list", "data": data}))
}

async fn completions(State(state): State<StubState>) -> Json<Value> {
    let seen = state.completions_seen.fetch_add(1, Ordering::SeqCst);
    // The second POST overall is the first cache probe. Slowing it down makes
    // the follow-up probe clear the 80% bar deterministically.
    if seen == 1 {
        tokio::time::sleep(Duration::from_millis(400)).await;
    }
    Json(json!({
        "choices": [
            {"message": {"role": "assistant", "content": "4"}}
        ]
    }))
}

async fn spawn_stub(include_target: bool) -> Url {
    let state = StubState {
        include_target,
        completions_seen: Arc::new(AtomicUsize::new(0)),
    };
    let app = Router::new()
        .route("/health/readiness", get(readiness))
        .route("/v1/models", get(models))
        .route("/chat/completions", post(completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server died");
    });

    Url::parse(&format!("http://{addr}/")).expect("stub url")
}

fn verifier_for(base_url: Url, timeout: Duration) -> Verifier {
    let api = GatewayApi::new(base_url, "sk-master-test", timeout).expect("client build failed");
    Verifier::new(api, TARGET).with_pause(Duration::ZERO)
}

fn outcome_by_name(report: &gateway_ops::service::verifier::VerifyReport, name: &str) -> bool {
    report
        .checks
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("check '{name}' missing from report"))
        .outcome
        .passed()
}

#[tokio::test]
async fn healthy_deployment_passes_all_four_checks() {
    let base_url = spawn_stub(true).await;
    let report = verifier_for(base_url, Duration::from_secs(5)).run().await;

    assert_eq!(report.checks.len(), 4);
    assert_eq!(report.passed(), 4);
    assert!(report.all_passed());
}

#[tokio::test]
async fn missing_target_model_fails_only_the_catalog_check() {
    let base_url = spawn_stub(false).await;
    let report = verifier_for(base_url, Duration::from_secs(5)).run().await;

    assert!(outcome_by_name(&report, "liveness"));
    assert!(!outcome_by_name(&report, "catalog"));
    assert!(outcome_by_name(&report, "traffic"));
    assert!(outcome_by_name(&report, "cache"));
    assert_eq!(report.passed(), 3);
    assert!(!report.all_passed());
}

#[tokio::test]
async fn unreachable_gateway_fails_every_check_without_crashing() {
    // Nothing listens here; every request errors out and each check reports
    // its own failure instead of aborting the run.
    let base_url = Url::parse("http://127.0.0.1:9/").expect("url");
    let report = verifier_for(base_url, Duration::from_millis(500)).run().await;

    assert_eq!(report.checks.len(), 4);
    assert_eq!(report.passed(), 0);
    assert!(!report.all_passed());
    assert!(report.checks.iter().all(|c| !c.outcome.passed()));
}
