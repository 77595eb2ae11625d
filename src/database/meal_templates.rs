// ABOUTME: Meal template storage: reusable presets with macro breakdown
// ABOUTME: Plain per-user CRUD; logs reference templates by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::parse_uuid;
use crate::errors::{AppError, AppResult};
use crate::models::MealTemplate;

/// Fields accepted when creating or updating a template
#[derive(Debug, Clone)]
pub struct WriteMealTemplateRequest {
    /// Template name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams
    pub protein_g: Option<f64>,
    /// Carbohydrate grams
    pub carbs_g: Option<f64>,
    /// Fat grams
    pub fat_g: Option<f64>,
}

/// Meal template database operations
pub struct MealTemplateManager {
    pool: SqlitePool,
}

impl MealTemplateManager {
    /// Create a new meal template manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new template
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &WriteMealTemplateRequest,
    ) -> AppResult<MealTemplate> {
        let template = MealTemplate {
            id: Uuid::new_v4(),
            user_id,
            name: request.name.clone(),
            calories: request.calories,
            protein_g: request.protein_g,
            carbs_g: request.carbs_g,
            fat_g: request.fat_g,
        };

        sqlx::query(
            r"
            INSERT INTO meal_templates (id, user_id, name, calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(template.id.to_string())
        .bind(user_id.to_string())
        .bind(&template.name)
        .bind(template.calories)
        .bind(template.protein_g)
        .bind(template.carbs_g)
        .bind(template.fat_g)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal template: {e}")))?;

        Ok(template)
    }

    /// Replace a template owned by the user
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &WriteMealTemplateRequest,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE meal_templates
            SET name = $3, calories = $4, protein_g = $5, carbs_g = $6, fat_g = $7
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&request.name)
        .bind(request.calories)
        .bind(request.protein_g)
        .bind(request.carbs_g)
        .bind(request.fat_g)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update meal template: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// List the user's templates by name
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<MealTemplate>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g
            FROM meal_templates
            WHERE user_id = $1
            ORDER BY name
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list meal templates: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(MealTemplate {
                    id: parse_uuid(&row.get::<String, _>("id"))?,
                    user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
                    name: row.get("name"),
                    calories: row.get("calories"),
                    protein_g: row.get("protein_g"),
                    carbs_g: row.get("carbs_g"),
                    fat_g: row.get("fat_g"),
                })
            })
            .collect()
    }

    /// Delete a template owned by the user
    ///
    /// # Errors
    ///
    /// Returns a database error on storage failure.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meal_templates WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete meal template: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}
