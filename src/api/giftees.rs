//! Giftee API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{success, ApiResult};
use crate::analytics::events;
use crate::dates;
use crate::errors::AppError;
use crate::models::{CreateGifteeRequest, Giftee, UpdateGifteeRequest};
use crate::AppState;

/// GET /api/giftees - List all giftees.
pub async fn list_giftees(State(state): State<AppState>) -> ApiResult<Vec<Giftee>> {
    let giftees = state.repo.list_giftees().await?;
    success(giftees)
}

/// GET /api/giftees/:id - Get a single giftee.
pub async fn get_giftee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Giftee> {
    let giftee = state
        .repo
        .get_giftee(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", id)))?;
    success(giftee)
}

/// POST /api/giftees - Create a new giftee.
pub async fn create_giftee(
    State(state): State<AppState>,
    Json(request): Json<CreateGifteeRequest>,
) -> ApiResult<Giftee> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let giftee = state.repo.create_giftee(&request).await?;

    state.analytics.capture(
        events::GIFTEE_ADDED,
        json!({ "giftee_id": giftee.id, "giftee_name": giftee.name }),
    );

    success(giftee)
}

/// PUT /api/giftees/:id - Update a giftee's details.
pub async fn update_giftee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut request): Json<UpdateGifteeRequest>,
) -> ApiResult<Giftee> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be empty".to_string()));
        }
    }
    if let Some(dob) = &request.date_of_birth {
        if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            return Err(AppError::Validation(
                "dateOfBirth must be formatted YYYY-MM-DD".to_string(),
            ));
        }
    }
    // Stored phone numbers carry no leading '+'
    if let Some(phone) = &request.phone_number {
        request.phone_number = Some(phone.trim_start_matches('+').to_string());
    }

    match state.repo.update_giftee(&id, &request).await {
        Ok(giftee) => {
            state.analytics.capture(
                events::GIFTEE_DETAILS_UPDATED,
                json!({
                    "giftee_id": giftee.id,
                    "giftee_name": giftee.name,
                    "has_date_of_birth": giftee.date_of_birth.is_some(),
                    "has_bio": giftee.bio.is_some(),
                    "has_phone_number": giftee.phone_number.is_some(),
                }),
            );
            success(giftee)
        }
        Err(e) => {
            state.analytics.capture(
                events::GIFTEE_UPDATE_FAILED,
                json!({ "giftee_id": id, "error": e.message() }),
            );
            Err(e)
        }
    }
}

/// DELETE /api/giftees/:id - Delete a giftee and its ideas.
pub async fn delete_giftee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_giftee(&id).await?;
    // Drop any refinement session held for the deleted giftee
    state.sessions.lock().await.remove(&id);
    success(())
}

/// Query parameters for the upcoming-occasions report.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Size of the birthday lookahead window in days (default 30).
    pub days: Option<i64>,
}

/// Upcoming-occasions report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReport {
    pub days_to_christmas: i64,
    pub birthdays: Vec<Giftee>,
}

/// GET /api/upcoming - Days to Christmas plus giftees with birthdays in the
/// next N days, soonest first.
pub async fn get_upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> ApiResult<UpcomingReport> {
    let window = query.days.unwrap_or(30);
    if window < 0 {
        return Err(AppError::Validation(
            "days must be non-negative".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    let giftees = state.repo.list_giftees().await?;

    let mut upcoming: Vec<(NaiveDate, Giftee)> = giftees
        .into_iter()
        .filter_map(|giftee| {
            let dob = giftee
                .date_of_birth
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?;
            dates::birthday_within(dob, today, window)
                .then(|| (dates::next_birthday(dob, today), giftee))
        })
        .collect();
    upcoming.sort_by_key(|(next, _)| *next);

    success(UpcomingReport {
        days_to_christmas: dates::days_until_christmas(today),
        birthdays: upcoming.into_iter().map(|(_, giftee)| giftee).collect(),
    })
}
