use serde::{Deserialize, Serialize};

/// Display payload shared by the ad and sponsor widgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoPayload {
    pub title: String,
    pub body: String,
    pub link: String,
    #[serde(alias = "buttonText")]
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Response for GET /api/sidebar
#[derive(Debug, Clone, Serialize)]
pub struct SidebarResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad: Option<PromoPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<PromoPayload>,
}
