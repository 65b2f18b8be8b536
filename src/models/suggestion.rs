//! Ephemeral suggestion types produced by the remote model.
//!
//! Nothing here is persisted; a suggestion becomes an [`super::Idea`] only
//! when the user accepts it.

use serde::{Deserialize, Serialize};

/// Coarse cost tier for a suggestion, one of three ordinal bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

impl CostTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostTier::Low => "low",
            CostTier::Medium => "medium",
            CostTier::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(CostTier::Low),
            "medium" => Some(CostTier::Medium),
            "high" => Some(CostTier::High),
            _ => None,
        }
    }
}

/// A model-generated candidate gift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Specific, named product/experience (never a bare category).
    pub description: String,
    /// Short category label shown above the description.
    pub short_description: String,
    pub cost: CostTier,
}

/// A short (<=3 words) refinement label returned alongside a suggestion batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowUpQuestion {
    pub text: String,
}

/// One successful model invocation: 3 suggestions and 3 follow-up tags.
/// The counts are the model's contract, enforced by the declared schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,
    pub follow_up_questions: Vec<FollowUpQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_tier_round_trip() {
        for tier in [CostTier::Low, CostTier::Medium, CostTier::High] {
            assert_eq!(CostTier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(CostTier::from_str("luxury"), None);
    }

    #[test]
    fn test_suggestion_field_names() {
        let s = Suggestion {
            description: "Blue Note 'Somethin' Else' vinyl".into(),
            short_description: "Jazz record".into(),
            cost: CostTier::Medium,
        };
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["shortDescription"], "Jazz record");
        assert_eq!(value["cost"], "medium");
    }
}
