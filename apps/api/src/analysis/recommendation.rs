//! Recommendation builder: maps an overall score to a qualitative level and
//! turns the gap list into actionable tips.

use serde::{Deserialize, Serialize};

use crate::models::matching::{Gap, RecommendationLevel};

/// Score thresholds for the recommendation ladder:
/// >= highly_recommended, >= recommended, >= possible_fit, else Not Recommended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub highly_recommended: f64,
    pub recommended: f64,
    pub possible_fit: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            highly_recommended: 85.0,
            recommended: 65.0,
            possible_fit: 40.0,
        }
    }
}

/// One tip per gap, capped at this many.
pub const MAX_TIPS: usize = 8;

/// Pure function from overall score to recommendation level.
pub fn recommend(
    overall_score: f64,
    thresholds: &RecommendationThresholds,
) -> RecommendationLevel {
    if overall_score >= thresholds.highly_recommended {
        RecommendationLevel::HighlyRecommended
    } else if overall_score >= thresholds.recommended {
        RecommendationLevel::Recommended
    } else if overall_score >= thresholds.possible_fit {
        RecommendationLevel::PossibleFit
    } else {
        RecommendationLevel::NotRecommended
    }
}

/// Builds one human-readable tip per gap, in gap order, bounded by `MAX_TIPS`.
pub fn build_tips(gaps: &[Gap]) -> Vec<String> {
    gaps.iter().take(MAX_TIPS).map(tip_for).collect()
}

fn tip_for(gap: &Gap) -> String {
    match gap {
        Gap::Skill {
            name,
            required_level,
            cv_level: Some(level),
        } => format!(
            "Deepen {name} from {} to {} level",
            level.label(),
            required_level.label()
        ),
        Gap::Skill {
            name,
            required_level,
            cv_level: None,
        } => format!(
            "Consider learning {name} ({} level is expected)",
            required_level.label()
        ),
        Gap::Experience {
            required_years,
            cv_years,
        } => format!(
            "Gain {:.1} more years of relevant experience",
            required_years - cv_years
        ),
        Gap::Education { requirement } => format!("Consider pursuing: {requirement}"),
        Gap::Certification { name } => format!("Consider obtaining the {name} certification"),
    }
}
