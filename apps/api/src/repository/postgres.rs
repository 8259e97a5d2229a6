use async_trait::async_trait;
use sqlx::PgPool;

use super::Repository;
use crate::errors::AppError;
use crate::models::{Candidate, Rfp};

/// PostgreSQL-backed store for both record kinds. Schema: `migrations/0001_init.sql`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Candidate> for PgStore {
    async fn list(&self) -> Result<Vec<Candidate>, AppError> {
        let cvs = sqlx::query_as::<_, Candidate>(
            "SELECT id, name, first_name, last_name, content FROM cvs ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cvs)
    }

    async fn get(&self, id: &str) -> Result<Option<Candidate>, AppError> {
        let cv = sqlx::query_as::<_, Candidate>(
            "SELECT id, name, first_name, last_name, content FROM cvs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cv)
    }

    async fn insert(&self, cv: Candidate) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO cvs (id, name, first_name, last_name, content)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&cv.id)
        .bind(&cv.name)
        .bind(&cv.first_name)
        .bind(&cv.last_name)
        .bind(&cv.content)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, cv: Candidate) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE cvs
               SET name = $2, first_name = $3, last_name = $4, content = $5
             WHERE id = $1
            "#,
        )
        .bind(&cv.id)
        .bind(&cv.name)
        .bind(&cv.first_name)
        .bind(&cv.last_name)
        .bind(&cv.content)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Repository<Rfp> for PgStore {
    async fn list(&self) -> Result<Vec<Rfp>, AppError> {
        let rfps = sqlx::query_as::<_, Rfp>(
            "SELECT id, title, description, requirements FROM rfps ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rfps)
    }

    async fn get(&self, id: &str) -> Result<Option<Rfp>, AppError> {
        let rfp = sqlx::query_as::<_, Rfp>(
            "SELECT id, title, description, requirements FROM rfps WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rfp)
    }

    async fn insert(&self, rfp: Rfp) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO rfps (id, title, description, requirements)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&rfp.id)
        .bind(&rfp.title)
        .bind(&rfp.description)
        .bind(&rfp.requirements)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, rfp: Rfp) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE rfps
               SET title = $2, description = $3, requirements = $4
             WHERE id = $1
            "#,
        )
        .bind(&rfp.id)
        .bind(&rfp.title)
        .bind(&rfp.description)
        .bind(&rfp.requirements)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rfps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
