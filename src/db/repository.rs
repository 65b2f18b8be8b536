//! Database repository for CRUD operations.
//!
//! Uses prepared statements; writes are last-write-wins at row granularity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateGifteeRequest, CreateIdeaRequest, Giftee, GifteeSummary, Idea, IdeaWithGiftee,
    UpdateGifteeRequest, UpdateIdeaRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== GIFTEE OPERATIONS ====================

    /// List all giftees.
    pub async fn list_giftees(&self) -> Result<Vec<Giftee>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, date_of_birth, bio, phone_number, on_christmas, on_birthday, created_at, updated_at FROM giftees ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(giftee_from_row).collect())
    }

    /// Get a giftee by ID.
    pub async fn get_giftee(&self, id: &str) -> Result<Option<Giftee>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, date_of_birth, bio, phone_number, on_christmas, on_birthday, created_at, updated_at FROM giftees WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(giftee_from_row))
    }

    /// Create a new giftee.
    pub async fn create_giftee(&self, request: &CreateGifteeRequest) -> Result<Giftee, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO giftees (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Giftee {
            id,
            name: request.name.clone(),
            date_of_birth: None,
            bio: None,
            phone_number: None,
            on_christmas: None,
            on_birthday: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a giftee's details. Missing fields keep their current values.
    pub async fn update_giftee(
        &self,
        id: &str,
        request: &UpdateGifteeRequest,
    ) -> Result<Giftee, AppError> {
        let existing = self
            .get_giftee(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let date_of_birth = request
            .date_of_birth
            .clone()
            .or(existing.date_of_birth.clone());
        let bio = request.bio.clone().or(existing.bio.clone());
        let phone_number = request
            .phone_number
            .clone()
            .or(existing.phone_number.clone());
        let on_christmas = request.on_christmas.or(existing.on_christmas);
        let on_birthday = request.on_birthday.or(existing.on_birthday);

        sqlx::query(
            "UPDATE giftees SET name = ?, date_of_birth = ?, bio = ?, phone_number = ?, on_christmas = ?, on_birthday = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(&date_of_birth)
        .bind(&bio)
        .bind(&phone_number)
        .bind(on_christmas.map(|b| b as i32))
        .bind(on_birthday.map(|b| b as i32))
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Giftee {
            id: id.to_string(),
            name: name.clone(),
            date_of_birth,
            bio,
            phone_number,
            on_christmas,
            on_birthday,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a giftee. Its ideas are removed by the foreign key cascade.
    pub async fn delete_giftee(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM giftees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Giftee {} not found", id)));
        }

        Ok(())
    }

    // ==================== IDEA OPERATIONS ====================

    /// List all ideas for one giftee.
    pub async fn list_ideas_for_giftee(&self, giftee_id: &str) -> Result<Vec<Idea>, AppError> {
        let rows = sqlx::query(
            "SELECT id, giftee_id, name, url, purchased_at, rating, created_at, updated_at FROM ideas WHERE giftee_id = ? ORDER BY created_at"
        )
        .bind(giftee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(idea_from_row).collect())
    }

    /// List all ideas with their parent giftee attached.
    pub async fn list_ideas_with_giftees(&self) -> Result<Vec<IdeaWithGiftee>, AppError> {
        let rows = sqlx::query(
            r#"SELECT i.id, i.giftee_id, i.name, i.url, i.purchased_at, i.rating,
                      i.created_at, i.updated_at,
                      g.name AS giftee_name, g.date_of_birth AS giftee_date_of_birth
               FROM ideas i
               JOIN giftees g ON g.id = i.giftee_id
               ORDER BY i.created_at"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| IdeaWithGiftee {
                idea: idea_from_row(row),
                giftee: GifteeSummary {
                    id: row.get("giftee_id"),
                    name: row.get("giftee_name"),
                    date_of_birth: row.get("giftee_date_of_birth"),
                },
            })
            .collect())
    }

    /// Get an idea by ID.
    pub async fn get_idea(&self, id: &str) -> Result<Option<Idea>, AppError> {
        let row = sqlx::query(
            "SELECT id, giftee_id, name, url, purchased_at, rating, created_at, updated_at FROM ideas WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(idea_from_row))
    }

    /// Create a new idea for a giftee.
    pub async fn create_idea(
        &self,
        giftee_id: &str,
        request: &CreateIdeaRequest,
    ) -> Result<Idea, AppError> {
        // Surface a clean NOT_FOUND instead of a foreign key violation
        self.get_giftee(giftee_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Giftee {} not found", giftee_id)))?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO ideas (id, giftee_id, name, url, purchased_at, rating, created_at, updated_at) VALUES (?, ?, ?, ?, NULL, NULL, ?, ?)"
        )
        .bind(&id)
        .bind(giftee_id)
        .bind(&request.name)
        .bind(&request.url)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Idea {
            id,
            giftee_id: giftee_id.to_string(),
            name: request.name.clone(),
            url: request.url.clone(),
            purchased_at: None,
            rating: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update an idea: edit name/url, toggle purchased state, or rate it.
    ///
    /// Un-purchasing nulls the timestamp but leaves any existing rating in
    /// place (observed product behavior).
    pub async fn update_idea(
        &self,
        id: &str,
        request: &UpdateIdeaRequest,
    ) -> Result<Idea, AppError> {
        let existing = self
            .get_idea(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Idea {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let url = request.url.clone().or(existing.url.clone());
        let purchased_at = match request.purchased {
            Some(true) => existing.purchased_at.clone().or_else(|| Some(now.clone())),
            Some(false) => None,
            None => existing.purchased_at.clone(),
        };
        let rating = request.rating.or(existing.rating);

        sqlx::query(
            "UPDATE ideas SET name = ?, url = ?, purchased_at = ?, rating = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(&url)
        .bind(&purchased_at)
        .bind(rating)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Idea {
            id: id.to_string(),
            giftee_id: existing.giftee_id,
            name: name.clone(),
            url,
            purchased_at,
            rating,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an idea.
    pub async fn delete_idea(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Idea {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn giftee_from_row(row: &sqlx::sqlite::SqliteRow) -> Giftee {
    let on_christmas: Option<i32> = row.get("on_christmas");
    let on_birthday: Option<i32> = row.get("on_birthday");
    Giftee {
        id: row.get("id"),
        name: row.get("name"),
        date_of_birth: row.get("date_of_birth"),
        bio: row.get("bio"),
        phone_number: row.get("phone_number"),
        on_christmas: on_christmas.map(|v| v != 0),
        on_birthday: on_birthday.map(|v| v != 0),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn idea_from_row(row: &sqlx::sqlite::SqliteRow) -> Idea {
    Idea {
        id: row.get("id"),
        giftee_id: row.get("giftee_id"),
        name: row.get("name"),
        url: row.get("url"),
        purchased_at: row.get("purchased_at"),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
