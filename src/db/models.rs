use serde::{Deserialize, Serialize};

/// Params blob stored per row: which provider model to call and with which
/// credential. The external gateway reads this verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentParams {
    pub model: String,
    pub api_key: String,
}

/// Metadata blob stored per row. `id` and `description` embed the row's
/// 1-based position in the seeded batch; the position carries no meaning
/// beyond making rows distinguishable to an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub description: String,
    pub load_balanced: bool,
}

/// One row of the model registration table, blobs decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRegistration {
    pub model_name: String,
    pub params: DeploymentParams,
    pub info: ModelInfo,
}

impl ModelRegistration {
    /// Build the row for the credential at 1-based `position` within a batch.
    pub fn for_credential(
        group_name: &str,
        upstream_model: &str,
        api_key: String,
        position: usize,
    ) -> Self {
        Self {
            model_name: group_name.to_string(),
            params: DeploymentParams {
                model: upstream_model.to_string(),
                api_key,
            },
            info: ModelInfo {
                id: format!("gemini-pro-key-{position:03}"),
                description: format!("Gemini Pro API Key #{position:03}"),
                load_balanced: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_fields_derive_from_the_one_based_position() {
        let row = ModelRegistration::for_credential(
            "gemini-pro-load-balanced",
            "gemini/gemini-2.5-pro",
            "sk-test".to_string(),
            7,
        );
        assert_eq!(row.model_name, "gemini-pro-load-balanced");
        assert_eq!(row.params.model, "gemini/gemini-2.5-pro");
        assert_eq!(row.params.api_key, "sk-test");
        assert_eq!(row.info.id, "gemini-pro-key-007");
        assert_eq!(row.info.description, "Gemini Pro API Key #007");
        assert!(row.info.load_balanced);
    }

    #[test]
    fn positions_beyond_the_pad_width_keep_their_digits() {
        let row = ModelRegistration::for_credential("g", "m", "k".to_string(), 120);
        assert_eq!(row.info.id, "gemini-pro-key-120");
        let row = ModelRegistration::for_credential("g", "m", "k".to_string(), 1000);
        assert_eq!(row.info.id, "gemini-pro-key-1000");
    }

    #[test]
    fn params_blob_serializes_to_the_gateway_wire_shape() {
        let row = ModelRegistration::for_credential("g", "gemini/gemini-2.5-pro", "sk".into(), 1);
        let json = serde_json::to_value(&row.params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "gemini/gemini-2.5-pro", "api_key": "sk"})
        );
    }
}
