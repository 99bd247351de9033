use crate::db::models::ModelRegistration;
use crate::db::store::ModelStorage;
use crate::error::OpsError;
use tracing::info;

/// Outcome of one seeding run, for operator-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedReport {
    /// Rows removed by the idempotency sweep.
    pub deleted: u64,
    /// Rows inserted in this run, one per credential.
    pub inserted: usize,
    /// Read-back count under the group name after commit.
    pub final_count: i64,
}

/// Derive one registration row per key, in input order. Position is 1-based
/// and flows into each row's generated id and description; duplicate key
/// strings still yield distinct rows.
pub fn build_rows(
    group_name: &str,
    upstream_model: &str,
    api_keys: Vec<String>,
) -> Vec<ModelRegistration> {
    api_keys
        .into_iter()
        .enumerate()
        .map(|(i, key)| ModelRegistration::for_credential(group_name, upstream_model, key, i + 1))
        .collect()
}

/// Converge the group to exactly one row per key: clear every row under the
/// group name, insert the fresh batch, commit once, then read the count
/// back. The read-back is feedback only, not a correctness gate.
pub async fn seed_models(
    storage: &ModelStorage,
    group_name: &str,
    upstream_model: &str,
    api_keys: Vec<String>,
) -> Result<SeedReport, OpsError> {
    let rows = build_rows(group_name, upstream_model, api_keys);
    let outcome = storage.replace_group(group_name, &rows).await?;
    let final_count = storage.count_group(group_name).await?;

    info!(
        group = group_name,
        deleted = outcome.deleted,
        inserted = outcome.inserted,
        final_count,
        "seeding committed"
    );

    Ok(SeedReport {
        deleted: outcome.deleted,
        inserted: outcome.inserted,
        final_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_input_order_with_one_based_positions() {
        let rows = build_rows(
            "gemini-pro-load-balanced",
            "gemini/gemini-2.5-pro",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].info.id, "gemini-pro-key-001");
        assert_eq!(rows[0].params.api_key, "a");
        assert_eq!(rows[2].info.id, "gemini-pro-key-003");
        assert_eq!(rows[2].params.api_key, "c");
    }

    #[test]
    fn duplicate_keys_get_distinct_ids() {
        let rows = build_rows("g", "m", vec!["same".to_string(), "same".to_string()]);
        assert_eq!(rows[0].params.api_key, rows[1].params.api_key);
        assert_ne!(rows[0].info.id, rows[1].info.id);
    }
}
