//! Idea API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use super::{success, ApiResult};
use crate::analytics::events;
use crate::errors::AppError;
use crate::models::{CreateIdeaRequest, Idea, IdeaWithGiftee, UpdateIdeaRequest};
use crate::AppState;

/// GET /api/ideas - List all ideas with their parent giftee.
pub async fn list_ideas(State(state): State<AppState>) -> ApiResult<Vec<IdeaWithGiftee>> {
    let ideas = state.repo.list_ideas_with_giftees().await?;
    success(ideas)
}

/// GET /api/giftees/:id/ideas - List ideas for one giftee.
pub async fn list_ideas_for_giftee(
    State(state): State<AppState>,
    Path(giftee_id): Path<String>,
) -> ApiResult<Vec<Idea>> {
    // 404 for an unknown giftee rather than an empty list
    state
        .repo
        .get_giftee(&giftee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", giftee_id)))?;

    let ideas = state.repo.list_ideas_for_giftee(&giftee_id).await?;
    success(ideas)
}

/// POST /api/giftees/:id/ideas - Create a new idea by manual entry.
pub async fn create_idea(
    State(state): State<AppState>,
    Path(giftee_id): Path<String>,
    Json(request): Json<CreateIdeaRequest>,
) -> ApiResult<Idea> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let idea = state.repo.create_idea(&giftee_id, &request).await?;

    state.analytics.capture(
        events::IDEA_ADDED,
        json!({
            "idea_id": idea.id,
            "giftee_id": idea.giftee_id,
            "source": "manual",
        }),
    );

    success(idea)
}

/// PUT /api/ideas/:id - Edit an idea: name/url, purchased state, rating.
pub async fn update_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateIdeaRequest>,
) -> ApiResult<Idea> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be empty".to_string()));
        }
    }
    if let Some(rating) = request.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
    }

    let idea = state.repo.update_idea(&id, &request).await?;

    if request.purchased.is_some() {
        state.analytics.capture(
            events::IDEA_STATUS_TOGGLED,
            json!({
                "idea_id": idea.id,
                "giftee_id": idea.giftee_id,
                "purchased": idea.is_purchased(),
            }),
        );
    }
    if request.url.is_some() {
        state.analytics.capture(
            events::IDEA_URL_UPDATED,
            json!({ "idea_id": idea.id, "giftee_id": idea.giftee_id }),
        );
    }

    success(idea)
}

/// DELETE /api/ideas/:id - Delete an idea.
pub async fn delete_idea(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_idea(&id).await?;
    success(())
}
