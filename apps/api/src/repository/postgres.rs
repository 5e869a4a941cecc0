//! PostgreSQL-backed record stores. Postgres row-level locking gives the
//! per-record write serialization the store contract asks for.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CvRepository, JobRepository, MatchRepository};
use crate::errors::AppError;
use crate::models::cv::CvRow;
use crate::models::job::JobRow;
use crate::models::matching::MatchRow;

pub struct PgCvRepository {
    pool: PgPool,
}

impl PgCvRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvRepository for PgCvRepository {
    async fn create(&self, row: CvRow) -> Result<CvRow, AppError> {
        sqlx::query(
            "INSERT INTO cvs (id, filename, raw_text, profile, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(row.id)
        .bind(&row.filename)
        .bind(&row.raw_text)
        .bind(&row.profile)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CvRow>, AppError> {
        let row = sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<CvRow>, AppError> {
        let rows = sqlx::query_as::<_, CvRow>("SELECT * FROM cvs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create(&self, row: JobRow) -> Result<JobRow, AppError> {
        sqlx::query(
            "INSERT INTO jobs (id, title, company, location, description, requirements, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(row.id)
        .bind(&row.title)
        .bind(&row.company)
        .bind(&row.location)
        .bind(&row.description)
        .bind(&row.requirements)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<JobRow>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn create(&self, row: MatchRow) -> Result<MatchRow, AppError> {
        sqlx::query(
            "INSERT INTO matches (id, cv_id, job_id, analysis, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(row.id)
        .bind(row.cv_id)
        .bind(row.job_id)
        .bind(&row.analysis)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<MatchRow>, AppError> {
        let row = sqlx::query_as::<_, MatchRow>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
