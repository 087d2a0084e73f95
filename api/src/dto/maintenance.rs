use serde::{Deserialize, Serialize};

/// Which cache entries a clear request removes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearAction {
    #[default]
    Single,
    All,
    Orphaned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCacheRequest {
    #[serde(default)]
    pub action_type: ClearAction,

    /// Required for `single`
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub action_type: ClearAction,
    pub cleared: usize,
    pub message: String,
}

impl ClearCacheResponse {
    pub fn single(removed: bool) -> Self {
        Self {
            action_type: ClearAction::Single,
            cleared: usize::from(removed),
            message: "Cache cleared for phone number".to_string(),
        }
    }

    pub fn all(cleared: usize) -> Self {
        Self {
            action_type: ClearAction::All,
            cleared,
            message: format!("Cleared cache for {} verification records", cleared),
        }
    }

    pub fn orphaned(cleared: usize) -> Self {
        Self {
            action_type: ClearAction::Orphaned,
            cleared,
            message: format!("Cleared {} orphaned cache entries", cleared),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVerificationResponse {
    pub phone_number: String,
    pub deleted: u64,
    pub message: String,
}
