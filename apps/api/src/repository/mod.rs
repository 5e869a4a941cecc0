//! Keyed record-store capabilities. Create/get/list is the whole contract;
//! the backing technology is an implementation detail behind these traits.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::CvRow;
use crate::models::job::JobRow;
use crate::models::matching::MatchRow;

#[async_trait]
pub trait CvRepository: Send + Sync {
    async fn create(&self, row: CvRow) -> Result<CvRow, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<CvRow>, AppError>;
    async fn list(&self) -> Result<Vec<CvRow>, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, row: JobRow) -> Result<JobRow, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError>;
    async fn list(&self) -> Result<Vec<JobRow>, AppError>;
}

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, row: MatchRow) -> Result<MatchRow, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<MatchRow>, AppError>;
}
