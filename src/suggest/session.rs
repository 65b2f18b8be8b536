//! Per-giftee refinement session.
//!
//! Tracks which refinement tag is active and what the last suggestion batch
//! was, as a single discriminated state value rather than independent flags.
//! Sessions live in memory only; nothing survives a restart.

use serde::Serialize;

use crate::models::{FollowUpQuestion, Suggestion, SuggestionBatch};

/// Session state. `active_tag` travels with the state so a tag can never be
/// "active" while the machine is idle.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SessionState {
    #[default]
    Idle,
    #[serde(rename_all = "camelCase")]
    Loading { active_tag: Option<String> },
    #[serde(rename_all = "camelCase")]
    Loaded {
        suggestions: Vec<Suggestion>,
        follow_up_questions: Vec<FollowUpQuestion>,
        active_tag: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        message: String,
        active_tag: Option<String>,
    },
}

/// State machine driving suggestion fetches for one giftee.
///
/// Each fetch carries a monotonically increasing token; completions carrying
/// a stale token are discarded, so when fetches overlap the last one begun
/// wins regardless of arrival order.
#[derive(Debug, Default)]
pub struct RefinementSession {
    state: SessionState,
    next_token: u64,
    inflight: Option<u64>,
}

impl RefinementSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The currently active refinement tag, if any.
    pub fn active_tag(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Loading { active_tag }
            | SessionState::Loaded { active_tag, .. }
            | SessionState::Error { active_tag, .. } => active_tag.as_deref(),
        }
    }

    /// Suggestions from the last successful fetch, if the session is loaded.
    pub fn suggestions(&self) -> Option<&[Suggestion]> {
        match &self.state {
            SessionState::Loaded { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Start a fetch. `Some(tag)` narrows the next set to that tag;
    /// `None` is the "back to general suggestions" action. Any in-flight
    /// fetch is invalidated.
    pub fn begin_fetch(&mut self, tag: Option<String>) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.inflight = Some(token);
        self.state = SessionState::Loading { active_tag: tag };
        token
    }

    /// Record the outcome of the fetch identified by `token`. Returns false
    /// and leaves the state untouched when the token is stale.
    pub fn complete(
        &mut self,
        token: u64,
        result: Result<SuggestionBatch, String>,
    ) -> bool {
        if self.inflight != Some(token) {
            return false;
        }
        self.inflight = None;

        let active_tag = self.active_tag().map(str::to_string);
        self.state = match result {
            Ok(batch) => SessionState::Loaded {
                suggestions: batch.suggestions,
                follow_up_questions: batch.follow_up_questions,
                active_tag,
            },
            Err(message) => SessionState::Error {
                message,
                active_tag,
            },
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostTier;

    fn batch(label: &str) -> SuggestionBatch {
        SuggestionBatch {
            suggestions: vec![Suggestion {
                description: label.to_string(),
                short_description: "Label".to_string(),
                cost: CostTier::Low,
            }],
            follow_up_questions: vec![FollowUpQuestion {
                text: "Cheaper gifts".to_string(),
            }],
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = RefinementSession::new();
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.active_tag(), None);
        assert!(session.suggestions().is_none());
    }

    #[test]
    fn test_fetch_cycle() {
        let mut session = RefinementSession::new();
        let token = session.begin_fetch(None);
        assert!(matches!(session.state(), SessionState::Loading { .. }));

        assert!(session.complete(token, Ok(batch("first"))));
        assert!(matches!(session.state(), SessionState::Loaded { .. }));
        assert_eq!(session.suggestions().unwrap()[0].description, "first");
        assert_eq!(session.active_tag(), None);
    }

    #[test]
    fn test_follow_up_tag_round_trip() {
        let mut session = RefinementSession::new();
        let t1 = session.begin_fetch(None);
        session.complete(t1, Ok(batch("general")));

        // selecting a follow-up tag
        let t2 = session.begin_fetch(Some("vinyl records".to_string()));
        assert_eq!(session.active_tag(), Some("vinyl records"));
        session.complete(t2, Ok(batch("refined")));
        assert_eq!(session.active_tag(), Some("vinyl records"));

        // back to general suggestions
        let t3 = session.begin_fetch(None);
        session.complete(t3, Ok(batch("general again")));
        assert_eq!(session.active_tag(), None);
    }

    #[test]
    fn test_error_state_is_recoverable() {
        let mut session = RefinementSession::new();
        let t1 = session.begin_fetch(Some("books".to_string()));
        session.complete(t1, Err("Model API returned 500".to_string()));
        match session.state() {
            SessionState::Error {
                message,
                active_tag,
            } => {
                assert_eq!(message, "Model API returned 500");
                assert_eq!(active_tag.as_deref(), Some("books"));
            }
            other => panic!("expected error state, got {:?}", other),
        }

        let t2 = session.begin_fetch(Some("books".to_string()));
        assert!(session.complete(t2, Ok(batch("recovered"))));
        assert!(session.suggestions().is_some());
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut session = RefinementSession::new();
        let first = session.begin_fetch(None);
        let second = session.begin_fetch(Some("plants".to_string()));

        // the slow first response arrives after the second fetch began
        assert!(!session.complete(first, Ok(batch("stale"))));
        assert!(matches!(session.state(), SessionState::Loading { .. }));
        assert_eq!(session.active_tag(), Some("plants"));

        assert!(session.complete(second, Ok(batch("fresh"))));
        assert_eq!(session.suggestions().unwrap()[0].description, "fresh");
    }

    #[test]
    fn test_completion_after_success_ignored() {
        let mut session = RefinementSession::new();
        let token = session.begin_fetch(None);
        assert!(session.complete(token, Ok(batch("first"))));
        // duplicate completion with the same token
        assert!(!session.complete(token, Ok(batch("second"))));
        assert_eq!(session.suggestions().unwrap()[0].description, "first");
    }

    #[test]
    fn test_state_serialization_shape() {
        let mut session = RefinementSession::new();
        let token = session.begin_fetch(Some("jazz".to_string()));
        session.complete(token, Ok(batch("loaded")));

        let value = serde_json::to_value(session.state()).unwrap();
        assert_eq!(value["status"], "loaded");
        assert_eq!(value["activeTag"], "jazz");
        assert!(value["suggestions"].is_array());
        assert!(value["followUpQuestions"].is_array());

        let idle = serde_json::to_value(SessionState::Idle).unwrap();
        assert_eq!(idle["status"], "idle");
    }
}
