//! In-memory record stores used by the test suite. The `RwLock` around each
//! map serializes writes per store while allowing concurrent reads.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CvRepository, JobRepository, MatchRepository};
use crate::errors::AppError;
use crate::models::cv::CvRow;
use crate::models::job::JobRow;
use crate::models::matching::MatchRow;

#[derive(Default)]
pub struct InMemoryCvRepository {
    rows: RwLock<HashMap<Uuid, CvRow>>,
}

#[async_trait]
impl CvRepository for InMemoryCvRepository {
    async fn create(&self, row: CvRow) -> Result<CvRow, AppError> {
        self.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CvRow>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<CvRow>, AppError> {
        let mut rows: Vec<CvRow> = self.rows.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    rows: RwLock<HashMap<Uuid, JobRow>>,
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, row: JobRow) -> Result<JobRow, AppError> {
        self.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<JobRow>, AppError> {
        let mut rows: Vec<JobRow> = self.rows.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryMatchRepository {
    rows: RwLock<HashMap<Uuid, MatchRow>>,
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn create(&self, row: MatchRow) -> Result<MatchRow, AppError> {
        self.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<MatchRow>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sqlx::types::Json;

    use crate::models::cv::CvProfile;

    fn cv_row(created_offset_secs: i64) -> CvRow {
        CvRow {
            id: Uuid::new_v4(),
            filename: "resume.pdf".to_string(),
            raw_text: "raw".to_string(),
            profile: Json(CvProfile::default()),
            created_at: Utc::now() + Duration::seconds(created_offset_secs),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let repo = InMemoryCvRepository::default();
        let row = repo.create(cv_row(0)).await.unwrap();

        let fetched = repo.get(row.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, row.id);
        assert_eq!(fetched.filename, "resume.pdf");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let repo = InMemoryCvRepository::default();
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryCvRepository::default();
        let older = repo.create(cv_row(-60)).await.unwrap();
        let newer = repo.create(cv_row(0)).await.unwrap();

        let rows = repo.list().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, newer.id);
        assert_eq!(rows[1].id, older.id);
    }
}
