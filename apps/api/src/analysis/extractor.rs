//! Structured-data extraction: turns raw CV or job text into typed records
//! via the completion capability.
//!
//! This is the only place non-determinism enters the system. Replies must
//! still satisfy the schema invariants in `models` or they are rejected.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::analysis::prompts::{
    CV_EXTRACT_PROMPT_TEMPLATE, CV_EXTRACT_SYSTEM, JOB_ANALYZE_PROMPT_TEMPLATE,
    JOB_ANALYZE_SYSTEM, STRICT_RETRY_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, CompletionService};
use crate::models::cv::CvProfile;
use crate::models::job::JobRequirements;

const MAX_JOB_EXPERIENCE_YEARS: u32 = 60;
const MAX_POSITION_MONTHS: u32 = 720;

/// Extracts a structured profile from raw CV text.
pub async fn extract_cv_profile(
    raw_text: &str,
    llm: &dyn CompletionService,
) -> Result<CvProfile, AppError> {
    let prompt = CV_EXTRACT_PROMPT_TEMPLATE.replace("{cv_text}", raw_text);
    parse_with_retry(&prompt, CV_EXTRACT_SYSTEM, llm, validate_cv_profile).await
}

/// Extracts structured hiring requirements from raw job posting text.
pub async fn analyze_job_description(
    raw_text: &str,
    llm: &dyn CompletionService,
) -> Result<JobRequirements, AppError> {
    let prompt = JOB_ANALYZE_PROMPT_TEMPLATE.replace("{job_text}", raw_text);
    parse_with_retry(&prompt, JOB_ANALYZE_SYSTEM, llm, validate_job_requirements).await
}

/// Calls the completion service and parses the reply into `T`.
/// One retry with a stricter system prompt on a parse or validation failure,
/// then `MalformedAiResponse`.
async fn parse_with_retry<T, V>(
    prompt: &str,
    system: &str,
    llm: &dyn CompletionService,
    validate: V,
) -> Result<T, AppError>
where
    T: DeserializeOwned,
    V: Fn(&T) -> Result<(), String>,
{
    let mut last_issue = String::new();

    for (attempt, sys) in [system, STRICT_RETRY_SYSTEM].into_iter().enumerate() {
        let reply = llm.complete(prompt, sys).await?;
        let cleaned = strip_json_fences(&reply);

        match serde_json::from_str::<T>(cleaned) {
            Ok(value) => match validate(&value) {
                Ok(()) => return Ok(value),
                Err(issue) => {
                    warn!("AI reply failed validation on attempt {}: {issue}", attempt + 1);
                    last_issue = issue;
                }
            },
            Err(e) => {
                warn!("AI reply failed to parse on attempt {}: {e}", attempt + 1);
                last_issue = e.to_string();
            }
        }
    }

    Err(AppError::MalformedAiResponse(last_issue))
}

fn validate_cv_profile(profile: &CvProfile) -> Result<(), String> {
    for skill in &profile.skills {
        if skill.name.trim().is_empty() {
            return Err("skill with empty name".to_string());
        }
    }
    for exp in &profile.experience {
        if exp.duration_months > MAX_POSITION_MONTHS {
            return Err(format!(
                "implausible position duration: {} months",
                exp.duration_months
            ));
        }
    }
    for edu in &profile.education {
        if edu.degree.trim().is_empty() {
            return Err("education entry with empty degree".to_string());
        }
    }
    Ok(())
}

fn validate_job_requirements(req: &JobRequirements) -> Result<(), String> {
    if req.min_experience_years > MAX_JOB_EXPERIENCE_YEARS {
        return Err(format!(
            "implausible minimum experience: {} years",
            req.min_experience_years
        ));
    }
    for sr in req.required_skills.iter().chain(&req.preferred_skills) {
        if sr.skill.trim().is_empty() {
            return Err("skill requirement with empty name".to_string());
        }
        if !(sr.weight > 0.0 && sr.weight <= 1.0) {
            return Err(format!("weight {} out of range (0, 1]", sr.weight));
        }
    }
    Ok(())
}
