//! Idea model matching the frontend Idea interface.

use serde::{Deserialize, Serialize};

use super::GifteeSummary;

/// A candidate or realized gift for one giftee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub giftee_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Null = not yet purchased. Presence is the sole "bought" signal.
    pub purchased_at: Option<String>,
    /// 1-5 satisfaction rating, meaningful once purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl Idea {
    /// Purchased state is derived solely from the timestamp.
    pub fn is_purchased(&self) -> bool {
        self.purchased_at.is_some()
    }
}

/// An idea joined with its parent giftee, for cross-giftee listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaWithGiftee {
    #[serde(flatten)]
    pub idea: Idea,
    pub giftee: GifteeSummary,
}

/// Request body for creating a new idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Request body for updating an existing idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// true stamps `purchased_at = now`, false nulls it. The rating is left
    /// untouched either way.
    #[serde(default)]
    pub purchased: Option<bool>,
    #[serde(default)]
    pub rating: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(purchased_at: Option<&str>) -> Idea {
        Idea {
            id: "i1".into(),
            giftee_id: "g1".into(),
            name: "Moleskine notebook".into(),
            url: None,
            purchased_at: purchased_at.map(String::from),
            rating: None,
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_purchased_derived_from_timestamp() {
        assert!(!idea(None).is_purchased());
        assert!(idea(Some("2025-06-01T12:00:00Z")).is_purchased());
    }

    #[test]
    fn test_purchased_at_always_serialized() {
        // The frontend distinguishes "not purchased" by an explicit null.
        let value = serde_json::to_value(idea(None)).unwrap();
        assert!(value.get("purchasedAt").is_some());
        assert!(value["purchasedAt"].is_null());
        // rating is omitted entirely when unset
        assert!(value.get("rating").is_none());
    }
}
