use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Skill proficiency ladder. Variant order defines the ordering:
/// `Expert > Advanced > Intermediate > Beginner`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

/// A skill with its proficiency level, as extracted from a CV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub years_experience: Option<u32>,
    /// e.g. "programming", "soft_skills", "tools", "domain_knowledge"
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub duration_months: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills_used: Vec<String>,
}

/// Structured fields extracted from one résumé.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl CvProfile {
    /// Total experience in years, derived from per-position durations.
    pub fn total_experience_years(&self) -> f64 {
        self.experience
            .iter()
            .map(|e| f64::from(e.duration_months))
            .sum::<f64>()
            / 12.0
    }
}

/// A stored CV record. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRow {
    pub id: Uuid,
    pub filename: String,
    pub raw_text: String,
    pub profile: Json<CvProfile>,
    pub created_at: DateTime<Utc>,
}
