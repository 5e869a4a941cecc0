use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::cv::SkillLevel;

/// Qualitative hiring recommendation derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationLevel {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Possible Fit")]
    PossibleFit,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

/// One unmet job requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gap {
    Skill {
        name: String,
        required_level: SkillLevel,
        /// None when the skill is absent, Some when it is below the required level.
        cv_level: Option<SkillLevel>,
    },
    Experience {
        required_years: f64,
        cv_years: f64,
    },
    Education {
        requirement: String,
    },
    Certification {
        name: String,
    },
}

/// How one requested skill compares against the CV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatch {
    pub name: String,
    pub required_level: SkillLevel,
    pub cv_level: Option<SkillLevel>,
    pub satisfied: bool,
}

/// Full scoring result for one CV against one job. Scores are in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub skill_matches: Vec<SkillMatch>,
    pub gaps: Vec<Gap>,
    pub recommendation: RecommendationLevel,
    pub tips: Vec<String>,
}

/// A stored match record. References must resolve at creation time;
/// immutable once computed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub job_id: Uuid,
    pub analysis: Json<MatchAnalysis>,
    pub created_at: DateTime<Utc>,
}
