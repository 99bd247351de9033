use gateway_ops::api::gateway::GatewayApi;
use gateway_ops::service::verifier::{self, Verifier, VerifyReport};
use gateway_ops::{Config, OpsError};
use mimalloc::MiMalloc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    match run(&cfg).await {
        Ok(report) if report.all_passed() => {
            info!("all checks passed; deployment is operational");
        }
        Ok(report) => {
            error!(
                passed = report.passed(),
                total = report.total(),
                "verification failed"
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "verification aborted");
            std::process::exit(1);
        }
    }
}

async fn run(cfg: &Config) -> Result<VerifyReport, OpsError> {
    let base_url = cfg.require_base_url()?.clone();
    let master_key = cfg.require_master_key()?;

    info!(
        base_url = %base_url,
        target_model = %cfg.group_name,
        timeout_secs = cfg.timeout_secs,
        "starting deployment verification"
    );

    let api = GatewayApi::new(base_url, master_key, cfg.timeout())?;
    let verifier = Verifier::new(api, cfg.group_name.clone());
    Ok(verifier::verify_deployment(&verifier).await)
}
