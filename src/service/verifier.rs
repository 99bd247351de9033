//! Black-box smoke verification of a deployed gateway.
//!
//! Four independent checks run in a fixed order and never short-circuit:
//! liveness, model catalog, one completion round trip, and a two-request
//! cache-latency heuristic. Network errors and timeouts become check
//! failures, not run failures.

use crate::api::gateway::GatewayApi;
use crate::types::openai::{ChatCompletionRequest, ChatMessage};
use std::time::{Duration, Instant};
use tracing::{error, info};

const TRAFFIC_PROMPT: &str = "What is the distance between Earth and the Moon?";
const CACHE_PROMPT: &str = "What is 2+2? Please answer with just the number.";
const TRAFFIC_MAX_TOKENS: u32 = 100;
const CACHE_MAX_TOKENS: u32 = 10;

/// Second request must complete within this fraction of the first for the
/// cache heuristic to count as a hit.
const CACHE_SPEEDUP_RATIO: f64 = 0.8;

pub const TOTAL_CHECKS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Pass,
    Fail(String),
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }

    fn fail(reason: impl Into<String>) -> Self {
        CheckOutcome::Fail(reason.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: CheckOutcome,
}

/// In-memory aggregation of one verification run. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReport {
    pub checks: Vec<CheckResult>,
}

impl VerifyReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.passed()).count()
    }

    pub fn total(&self) -> usize {
        TOTAL_CHECKS
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Cache heuristic predicate: the second wall-clock duration is no more than
/// 80% of the first. Single sample; network jitter can flip it either way.
pub fn cache_speedup_ok(first: Duration, second: Duration) -> bool {
    second.as_secs_f64() <= first.as_secs_f64() * CACHE_SPEEDUP_RATIO
}

pub struct Verifier {
    api: GatewayApi,
    target_model: String,
    /// Pause between the two cache-probe requests.
    pause: Duration,
}

impl Verifier {
    pub fn new(api: GatewayApi, target_model: impl Into<String>) -> Self {
        Self {
            api,
            target_model: target_model.into(),
            pause: Duration::from_secs(1),
        }
    }

    /// Shorten (or remove) the inter-request pause. Test hook.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Run all four checks in order, logging each result, regardless of
    /// earlier failures.
    pub async fn run(&self) -> VerifyReport {
        let mut checks = Vec::with_capacity(TOTAL_CHECKS);
        checks.push(self.report("liveness", self.check_liveness().await));
        checks.push(self.report("catalog", self.check_catalog().await));
        checks.push(self.report("traffic", self.check_traffic().await));
        checks.push(self.report("cache", self.check_cache().await));
        VerifyReport { checks }
    }

    fn report(&self, name: &'static str, outcome: CheckOutcome) -> CheckResult {
        match &outcome {
            CheckOutcome::Pass => info!(check = name, "check passed"),
            CheckOutcome::Fail(reason) => error!(check = name, reason = %reason, "check failed"),
        }
        CheckResult { name, outcome }
    }

    /// Check 1: `GET /health/readiness` answers 200.
    async fn check_liveness(&self) -> CheckOutcome {
        match self.api.readiness().await {
            Ok(resp) if resp.status().is_success() => CheckOutcome::Pass,
            Ok(resp) => CheckOutcome::fail(format!("readiness returned {}", resp.status())),
            Err(e) => CheckOutcome::fail(format!("readiness request failed: {e}")),
        }
    }

    /// Check 2: the catalog lists the target model.
    async fn check_catalog(&self) -> CheckOutcome {
        let list = match self.api.list_models().await {
            Ok(list) => list,
            Err(e) => return CheckOutcome::fail(format!("model listing failed: {e}")),
        };
        info!(models = list.data.len(), "catalog fetched");
        if list.contains(&self.target_model) {
            CheckOutcome::Pass
        } else {
            CheckOutcome::fail(format!("target model '{}' not listed", self.target_model))
        }
    }

    /// Check 3: one completion round trip yields extractable content.
    async fn check_traffic(&self) -> CheckOutcome {
        let body = ChatCompletionRequest {
            model: self.target_model.clone(),
            messages: vec![ChatMessage::user(TRAFFIC_PROMPT)],
            max_tokens: TRAFFIC_MAX_TOKENS,
            temperature: None,
        };
        match self.api.chat_completion(&body).await {
            Ok(resp) => match resp.first_content() {
                Some(content) => {
                    info!(preview = truncate(content, 200), "completion content received");
                    CheckOutcome::Pass
                }
                None => CheckOutcome::fail("completion response carried no choice content"),
            },
            Err(e) => CheckOutcome::fail(format!("completion request failed: {e}")),
        }
    }

    /// Check 4: two identical deterministic requests, the second one
    /// measurably faster than the first.
    async fn check_cache(&self) -> CheckOutcome {
        let body = ChatCompletionRequest {
            model: self.target_model.clone(),
            messages: vec![ChatMessage::user(CACHE_PROMPT)],
            max_tokens: CACHE_MAX_TOKENS,
            temperature: Some(0.0),
        };

        let start = Instant::now();
        if let Err(e) = self.api.chat_completion(&body).await {
            return CheckOutcome::fail(format!("first cache probe failed: {e}"));
        }
        let first = start.elapsed();
        info!(secs = first.as_secs_f64(), "first cache probe timed");

        tokio::time::sleep(self.pause).await;

        let start = Instant::now();
        if let Err(e) = self.api.chat_completion(&body).await {
            return CheckOutcome::fail(format!("second cache probe failed: {e}"));
        }
        let second = start.elapsed();
        info!(secs = second.as_secs_f64(), "second cache probe timed");

        if cache_speedup_ok(first, second) {
            let speedup = (first.as_secs_f64() - second.as_secs_f64()) / first.as_secs_f64();
            info!(speedup_pct = speedup * 100.0, "cache heuristic satisfied");
            CheckOutcome::Pass
        } else {
            CheckOutcome::fail(format!(
                "second probe not faster (first {:.2}s, second {:.2}s)",
                first.as_secs_f64(),
                second.as_secs_f64()
            ))
        }
    }
}

/// Run a full verification and log the summary. The caller maps
/// `all_passed` onto the process exit code.
pub async fn verify_deployment(verifier: &Verifier) -> VerifyReport {
    let report = verifier.run().await;
    info!(
        passed = report.passed(),
        total = report.total(),
        "verification finished"
    );
    report
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
