use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to search listings by free-text address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchListingsRequest {
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
}
