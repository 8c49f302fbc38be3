use serde::{Deserialize, Serialize};

pub mod bonus;
pub mod quote;
pub mod sidebar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
