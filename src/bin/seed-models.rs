use gateway_ops::db::store::ModelStorage;
use gateway_ops::service::{key_loader, seeder};
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

    if let Err(e) = run(&cfg).await {
        error!(error = %e, "seeding failed");
        std::process::exit(1);
    }
}

async fn run(cfg: &Config) -> Result<(), OpsError> {
    // Config and input validation happen before any database side effect.
    let database_url = cfg.require_database_url()?;

    info!(
        keys_file = %cfg.keys_file.display(),
        group = %cfg.group_name,
        upstream_model = %cfg.upstream_model,
        "starting model seeding"
    );

    let keys = key_loader::load_keys(&cfg.keys_file)?;
    info!(
        count = keys.len(),
        group = %cfg.group_name,
        "existing rows under the group name will be replaced"
    );

    let storage = ModelStorage::connect(database_url).await?;
    let report = seeder::seed_models(&storage, &cfg.group_name, &cfg.upstream_model, keys).await?;

    info!(
        deleted = report.deleted,
        inserted = report.inserted,
        final_count = report.final_count,
        group = %cfg.group_name,
        "seeding complete; group is ready to serve"
    );
    Ok(())
}
