//! Axum route handlers for CV upload and retrieval.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json as DbJson;
use uuid::Uuid;

use crate::analysis::extractor::extract_cv_profile;
use crate::errors::AppError;
use crate::extraction;
use crate::models::cv::{CvProfile, CvRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub experience_years: f64,
    pub extracted_data: CvProfile,
}

#[derive(Debug, Serialize)]
pub struct CvSummary {
    pub id: Uuid,
    pub filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub skill_count: usize,
    pub experience_years: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&CvRow> for CvSummary {
    fn from(row: &CvRow) -> Self {
        CvSummary {
            id: row.id,
            filename: row.filename.clone(),
            name: row.profile.name.clone(),
            email: row.profile.email.clone(),
            skill_count: row.profile.skills.len(),
            experience_years: row.profile.total_experience_years(),
            created_at: row.created_at,
        }
    }
}

/// POST /api/v1/cv/upload
///
/// Multipart upload (field `file`, PDF only). Extracts text, asks the AI
/// service for a structured profile, archives the original PDF and stores
/// the record.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CvUploadResponse>), AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read file field: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "only PDF files are supported".to_string(),
        ));
    }
    if data.len() > state.config.max_upload_bytes() {
        return Err(AppError::PayloadTooLarge(format!(
            "file exceeds the {}MB upload limit",
            state.config.max_upload_mb
        )));
    }

    // CPU-bound extraction goes to the blocking pool
    let pdf_bytes = data.clone();
    let raw_text = tokio::task::spawn_blocking(move || extraction::extract_text(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let profile = extract_cv_profile(&raw_text, state.llm.as_ref()).await?;

    let id = Uuid::new_v4();
    let key = format!("cv/{id}/{filename}");
    state.files.put(&key, data, "application/pdf").await?;

    let row = state
        .cvs
        .create(CvRow {
            id,
            filename,
            raw_text,
            profile: DbJson(profile),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("processed CV upload {id} ({})", row.filename);

    Ok((
        StatusCode::CREATED,
        Json(CvUploadResponse {
            id: row.id,
            filename: row.filename.clone(),
            experience_years: row.profile.total_experience_years(),
            extracted_data: row.profile.0.clone(),
        }),
    ))
}

/// GET /api/v1/cv/
pub async fn handle_list_cvs(
    State(state): State<AppState>,
) -> Result<Json<Vec<CvSummary>>, AppError> {
    let rows = state.cvs.list().await?;
    Ok(Json(rows.iter().map(CvSummary::from).collect()))
}

/// GET /api/v1/cv/:cv_id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(cv_id): Path<Uuid>,
) -> Result<Json<CvRow>, AppError> {
    let row = state
        .cvs
        .get(cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {cv_id} not found")))?;
    Ok(Json(row))
}
