use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::cv::SkillLevel;

fn default_true() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

/// One skill the job asks for, with the minimum expected proficiency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    pub required_level: SkillLevel,
    #[serde(default = "default_true")]
    pub is_mandatory: bool,
    /// Importance weight in (0.0, 1.0] for scoring.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Structured fields extracted from one job posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub preferred_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub min_experience_years: u32,
    #[serde(default)]
    pub education_requirements: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
}

/// A stored job record. Created on job analysis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub requirements: Json<JobRequirements>,
    pub created_at: DateTime<Utc>,
}
