//! Layered configuration for both operational binaries.
//!
//! Defaults are merged first, then environment variables prefixed with
//! `GATEWAY_OPS_`, plus the bare `DATABASE_URL` the deployment platform
//! injects. Each binary loads a `Config` at startup and passes the fields it
//! needs into the procedures explicitly; nothing reads the environment after
//! this point.

use crate::error::OpsError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seeder only. Fatal if absent when seeding.
    pub database_url: Option<String>,
    /// Newline-delimited credential file consumed by the seeder.
    pub keys_file: PathBuf,
    /// Verifier only. Base URL of the deployed gateway.
    pub base_url: Option<Url>,
    /// Verifier only. Bearer credential for authenticated endpoints.
    pub master_key: Option<String>,
    /// Logical group name all seeded rows share; doubles as the routable
    /// model name the verifier requests.
    pub group_name: String,
    /// Provider model identifier embedded in every row's params blob.
    pub upstream_model: String,
    /// Per-request timeout applied to every outbound HTTP call.
    pub timeout_secs: u64,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            keys_file: PathBuf::from("gemini_keys.txt"),
            base_url: None,
            master_key: None,
            group_name: "gemini-pro-load-balanced".to_string(),
            upstream_model: "gemini/gemini-2.5-pro".to_string(),
            timeout_secs: 30,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, OpsError> {
        let cfg = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("GATEWAY_OPS_"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .extract()?;
        Ok(cfg)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_database_url(&self) -> Result<&str, OpsError> {
        self.database_url
            .as_deref()
            .ok_or(OpsError::MissingSetting("DATABASE_URL"))
    }

    pub fn require_base_url(&self) -> Result<&Url, OpsError> {
        self.base_url
            .as_ref()
            .ok_or(OpsError::MissingSetting("GATEWAY_OPS_BASE_URL"))
    }

    pub fn require_master_key(&self) -> Result<&str, OpsError> {
        self.master_key
            .as_deref()
            .ok_or(OpsError::MissingSetting("GATEWAY_OPS_MASTER_KEY"))
    }
}
