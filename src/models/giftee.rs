//! Giftee model matching the frontend Giftee interface.

use serde::{Deserialize, Serialize};

/// A person gifts are tracked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giftee {
    pub id: String,
    pub name: String,
    /// Calendar date of birth (YYYY-MM-DD). The year is inferred from a
    /// separately supplied age; age itself is never stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Digits only, no leading '+'
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_christmas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_birthday: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new giftee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGifteeRequest {
    pub name: String,
}

/// Request body for updating a giftee's details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGifteeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub on_christmas: Option<bool>,
    #[serde(default)]
    pub on_birthday: Option<bool>,
}

/// Compact giftee reference attached to ideas in cross-giftee listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GifteeSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}
