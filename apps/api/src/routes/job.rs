//! Axum route handlers for job description analysis.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as DbJson;
use uuid::Uuid;

use crate::analysis::extractor::analyze_job_description;
use crate::errors::AppError;
use crate::models::job::{JobRequirements, JobRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobAnalyzeRequest {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobAnalyzeResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub requirements: JobRequirements,
}

#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub required_skill_count: usize,
    pub min_experience_years: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&JobRow> for JobSummary {
    fn from(row: &JobRow) -> Self {
        JobSummary {
            id: row.id,
            title: row.title.clone(),
            company: row.company.clone(),
            location: row.location.clone(),
            required_skill_count: row.requirements.required_skills.len(),
            min_experience_years: row.requirements.min_experience_years,
            created_at: row.created_at,
        }
    }
}

/// POST /api/v1/job/analyze
///
/// Analyzes a job description and stores the structured requirements.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<JobAnalyzeRequest>,
) -> Result<(StatusCode, Json<JobAnalyzeResponse>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let full_text = format!(
        "Job Title: {}\nCompany: {}\nLocation: {}\n\n{}",
        request.title,
        request.company,
        request.location.as_deref().unwrap_or("Not specified"),
        request.description,
    );

    let requirements = analyze_job_description(&full_text, state.llm.as_ref()).await?;

    let row = state
        .jobs
        .create(JobRow {
            id: Uuid::new_v4(),
            title: request.title,
            company: request.company,
            location: request.location,
            description: request.description,
            requirements: DbJson(requirements),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("analyzed job {} ({})", row.id, row.title);

    Ok((
        StatusCode::CREATED,
        Json(JobAnalyzeResponse {
            id: row.id,
            title: row.title.clone(),
            company: row.company.clone(),
            requirements: row.requirements.0.clone(),
        }),
    ))
}

/// GET /api/v1/job/
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let rows = state.jobs.list().await?;
    Ok(Json(rows.iter().map(JobSummary::from).collect()))
}

/// GET /api/v1/job/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let row = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(row))
}
