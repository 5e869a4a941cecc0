//! Axum route handlers for CV-job matching.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json as DbJson;
use tracing::info;
use uuid::Uuid;

use crate::analysis::recommendation::{build_tips, recommend, RecommendationThresholds};
use crate::analysis::scoring::{score_match, MatchWeights};
use crate::errors::AppError;
use crate::models::matching::{MatchAnalysis, MatchRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchAnalyzeRequest {
    pub cv_id: Uuid,
    pub job_id: Uuid,
}

/// POST /api/v1/match/analyze
///
/// Both references must resolve before any scoring happens; an unknown id is
/// a 404, never a partial record.
pub async fn handle_analyze_match(
    State(state): State<AppState>,
    Json(request): Json<MatchAnalyzeRequest>,
) -> Result<(StatusCode, Json<MatchRow>), AppError> {
    let cv = state
        .cvs
        .get(request.cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {} not found", request.cv_id)))?;
    let job = state
        .jobs
        .get(request.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", request.job_id)))?;

    let report = score_match(&cv.profile, &job.requirements, &MatchWeights::default());
    let recommendation = recommend(report.overall_score, &RecommendationThresholds::default());
    let tips = build_tips(&report.gaps);

    let analysis = MatchAnalysis {
        overall_score: report.overall_score,
        skills_score: report.skills_score,
        experience_score: report.experience_score,
        education_score: report.education_score,
        skill_matches: report.skill_matches,
        gaps: report.gaps,
        recommendation,
        tips,
    };

    let row = state
        .matches
        .create(MatchRow {
            id: Uuid::new_v4(),
            cv_id: cv.id,
            job_id: job.id,
            analysis: DbJson(analysis),
            created_at: Utc::now(),
        })
        .await?;

    info!(
        "scored match {} (cv {} vs job {}): {}",
        row.id, row.cv_id, row.job_id, row.analysis.overall_score
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/match/:match_id
pub async fn handle_get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchRow>, AppError> {
    let row = state
        .matches
        .get(match_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;
    Ok(Json(row))
}
