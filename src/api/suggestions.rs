//! Gift-suggestion API endpoints.
//!
//! Drives the per-giftee refinement session: fetches go through the session's
//! token guard so overlapping requests resolve last-begun-wins.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{success, ApiResult};
use crate::analytics::events;
use crate::dates;
use crate::errors::AppError;
use crate::models::{CreateIdeaRequest, Idea, SuggestionBatch};
use crate::suggest::SessionState;
use crate::AppState;

/// Request body for fetching suggestions.
#[derive(Debug, Default, Deserialize)]
pub struct FetchSuggestionsRequest {
    /// Follow-up tag (or free-text custom follow-up) narrowing the next set.
    /// Absent or blank means general suggestions.
    #[serde(default)]
    pub refinement: Option<String>,
}

/// POST /api/giftees/:id/suggestions - Fetch a fresh suggestion batch.
pub async fn fetch_suggestions(
    State(state): State<AppState>,
    Path(giftee_id): Path<String>,
    Json(request): Json<FetchSuggestionsRequest>,
) -> ApiResult<SuggestionBatch> {
    let giftee = state
        .repo
        .get_giftee(&giftee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", giftee_id)))?;

    // Configuration failure happens before any network call
    let client = state.suggest.as_ref().ok_or_else(|| {
        AppError::Config("No model API key configured (OPENAI_API_KEY)".to_string())
    })?;

    let refinement = request
        .refinement
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    // Age is derived from the date of birth at call time, never stored
    let age = giftee
        .date_of_birth
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(|dob| dates::age_from_dob(dob, Utc::now().date_naive()));

    state.analytics.capture(
        events::GIFT_SUGGESTIONS_REQUESTED,
        json!({
            "giftee_id": giftee.id,
            "has_bio": giftee.bio.is_some(),
            "has_refinement": refinement.is_some(),
        }),
    );

    let token = state
        .sessions
        .lock()
        .await
        .entry(giftee_id.clone())
        .or_default()
        .begin_fetch(refinement.clone());

    let result = client
        .fetch_suggestions(
            &giftee.name,
            giftee.bio.as_deref(),
            age,
            refinement.as_deref(),
        )
        .await;

    {
        let mut sessions = state.sessions.lock().await;
        if let Some(session) = sessions.get_mut(&giftee_id) {
            let outcome = match &result {
                Ok(batch) => Ok(batch.clone()),
                Err(e) => Err(e.message()),
            };
            session.complete(token, outcome);
        }
    }

    match result {
        Ok(batch) => {
            state.analytics.capture(
                events::GIFT_SUGGESTIONS_RECEIVED,
                json!({
                    "giftee_id": giftee.id,
                    "suggestion_count": batch.suggestions.len(),
                    "follow_up_count": batch.follow_up_questions.len(),
                }),
            );
            success(batch)
        }
        Err(e) => {
            state.analytics.capture(
                events::GIFT_SUGGESTIONS_ERROR,
                json!({ "giftee_id": giftee.id, "error": e.message() }),
            );
            Err(e)
        }
    }
}

/// GET /api/giftees/:id/suggestions - Current refinement-session state.
pub async fn get_suggestion_session(
    State(state): State<AppState>,
    Path(giftee_id): Path<String>,
) -> ApiResult<SessionState> {
    state
        .repo
        .get_giftee(&giftee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", giftee_id)))?;

    let sessions = state.sessions.lock().await;
    let snapshot = sessions
        .get(&giftee_id)
        .map(|session| session.state().clone())
        .unwrap_or_default();
    success(snapshot)
}

/// Request body for accepting a suggestion.
#[derive(Debug, Deserialize)]
pub struct AcceptSuggestionRequest {
    /// Index into the currently loaded suggestion batch.
    pub index: usize,
}

/// POST /api/giftees/:id/suggestions/accept - Promote a suggestion to a
/// persisted idea. The refinement session is left untouched, so the
/// suggestion list stays visible after acceptance.
pub async fn accept_suggestion(
    State(state): State<AppState>,
    Path(giftee_id): Path<String>,
    Json(request): Json<AcceptSuggestionRequest>,
) -> ApiResult<Idea> {
    let description = {
        let sessions = state.sessions.lock().await;
        let suggestions = sessions
            .get(&giftee_id)
            .and_then(|session| session.suggestions())
            .ok_or_else(|| {
                AppError::Validation("No loaded suggestion batch to accept from".to_string())
            })?;
        suggestions
            .get(request.index)
            .map(|s| s.description.clone())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Suggestion index {} out of range",
                    request.index
                ))
            })?
    };

    let idea = state
        .repo
        .create_idea(
            &giftee_id,
            &CreateIdeaRequest {
                name: description,
                url: None,
            },
        )
        .await?;

    state.analytics.capture(
        events::IDEA_ADDED,
        json!({
            "idea_id": idea.id,
            "giftee_id": idea.giftee_id,
            "source": "suggestion",
        }),
    );

    success(idea)
}
