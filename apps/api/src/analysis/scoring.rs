//! Deterministic CV-vs-job scorer.
//!
//! No AI call happens here: given the same structured inputs the output is
//! identical on every invocation. Dimension weights are explicit
//! configuration, not prompt text, so every formula below is testable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::cv::{CvProfile, SkillLevel};
use crate::models::job::JobRequirements;
use crate::models::matching::{Gap, SkillMatch};

/// Relative weight of each scoring dimension. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

/// Credit for holding a required skill below the required level.
const BELOW_LEVEL_CREDIT: f64 = 0.5;
/// Preferred skills count at half their stated weight and never produce gaps.
const PREFERRED_WEIGHT_FACTOR: f64 = 0.5;

/// Dimension scores plus the gap evidence they were derived from.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub skill_matches: Vec<SkillMatch>,
    pub gaps: Vec<Gap>,
}

/// Scores one CV against one job.
///
/// overall = skills_weight * skills + experience_weight * experience +
/// education_weight * education, each dimension in [0, 100].
pub fn score_match(cv: &CvProfile, job: &JobRequirements, weights: &MatchWeights) -> ScoreReport {
    let mut gaps = Vec::new();

    let (skills_score, skill_matches) = score_skills(cv, job, &mut gaps);
    let experience_score = score_experience(cv, job, &mut gaps);
    let education_score = score_education(cv, job, &mut gaps);
    collect_certification_gaps(cv, job, &mut gaps);

    let overall = weights.skills * skills_score
        + weights.experience * experience_score
        + weights.education * education_score;

    ScoreReport {
        overall_score: round1(overall.clamp(0.0, 100.0)),
        skills_score: round1(skills_score),
        experience_score: round1(experience_score),
        education_score: round1(education_score),
        skill_matches,
        gaps,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills dimension
// ────────────────────────────────────────────────────────────────────────────

fn score_skills(
    cv: &CvProfile,
    job: &JobRequirements,
    gaps: &mut Vec<Gap>,
) -> (f64, Vec<SkillMatch>) {
    // best level per normalized skill name on the CV side
    let mut cv_levels: HashMap<String, SkillLevel> = HashMap::new();
    for skill in &cv.skills {
        let key = normalize_skill(&skill.name);
        let entry = cv_levels.entry(key).or_insert(skill.level);
        if skill.level > *entry {
            *entry = skill.level;
        }
    }

    let mut earned = 0.0;
    let mut total = 0.0;
    let mut matches = Vec::new();

    for req in &job.required_skills {
        let weight = req.weight.max(0.0);
        total += weight;

        let cv_level = cv_levels.get(&normalize_skill(&req.skill)).copied();
        let credit = credit_for(cv_level, req.required_level);
        earned += credit * weight;

        matches.push(SkillMatch {
            name: req.skill.clone(),
            required_level: req.required_level,
            cv_level,
            satisfied: credit >= 1.0,
        });

        if credit < 1.0 {
            gaps.push(Gap::Skill {
                name: req.skill.clone(),
                required_level: req.required_level,
                cv_level,
            });
        }
    }

    for req in &job.preferred_skills {
        let weight = req.weight.max(0.0) * PREFERRED_WEIGHT_FACTOR;
        total += weight;

        let cv_level = cv_levels.get(&normalize_skill(&req.skill)).copied();
        let credit = credit_for(cv_level, req.required_level);
        earned += credit * weight;

        matches.push(SkillMatch {
            name: req.skill.clone(),
            required_level: req.required_level,
            cv_level,
            satisfied: credit >= 1.0,
        });
    }

    let score = if total > 0.0 {
        earned / total * 100.0
    } else {
        100.0
    };

    (score, matches)
}

fn credit_for(cv_level: Option<SkillLevel>, required: SkillLevel) -> f64 {
    match cv_level {
        Some(level) if level >= required => 1.0,
        Some(_) => BELOW_LEVEL_CREDIT,
        None => 0.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience and education dimensions
// ────────────────────────────────────────────────────────────────────────────

fn score_experience(cv: &CvProfile, job: &JobRequirements, gaps: &mut Vec<Gap>) -> f64 {
    let cv_years = cv.total_experience_years();
    let required = f64::from(job.min_experience_years);

    if required <= 0.0 || cv_years >= required {
        return 100.0;
    }

    gaps.push(Gap::Experience {
        required_years: required,
        cv_years,
    });
    (cv_years / required * 100.0).clamp(0.0, 100.0)
}

fn score_education(cv: &CvProfile, job: &JobRequirements, gaps: &mut Vec<Gap>) -> f64 {
    if job.education_requirements.is_empty() {
        return 100.0;
    }

    let cv_rank = cv
        .education
        .iter()
        .filter_map(|e| degree_rank(&e.degree))
        .max();

    let mut satisfied = 0usize;
    for requirement in &job.education_requirements {
        let met = match degree_rank(requirement) {
            Some(required_rank) => cv_rank.is_some_and(|r| r >= required_rank),
            // unranked requirement: fall back to normalized containment
            None => {
                let req_norm = normalize_text(requirement);
                !req_norm.is_empty()
                    && cv.education.iter().any(|e| {
                        let deg = normalize_text(&e.degree);
                        !deg.is_empty() && (deg.contains(&req_norm) || req_norm.contains(&deg))
                    })
            }
        };

        if met {
            satisfied += 1;
        } else {
            gaps.push(Gap::Education {
                requirement: requirement.clone(),
            });
        }
    }

    satisfied as f64 / job.education_requirements.len() as f64 * 100.0
}

fn collect_certification_gaps(cv: &CvProfile, job: &JobRequirements, gaps: &mut Vec<Gap>) {
    let held: Vec<String> = cv
        .certifications
        .iter()
        .map(|c| normalize_text(c))
        .filter(|c| !c.is_empty())
        .collect();

    for wanted in &job.certifications {
        let wanted_norm = normalize_text(wanted);
        if wanted_norm.is_empty() {
            continue;
        }
        let covered = held
            .iter()
            .any(|h| h.contains(&wanted_norm) || wanted_norm.contains(h));
        if !covered {
            gaps.push(Gap::Certification {
                name: wanted.clone(),
            });
        }
    }
}

/// Degree ladder used for education matching: phd=4, master=3, bachelor=2,
/// associate=1. Requirements without a recognizable rank use containment.
fn degree_rank(text: &str) -> Option<u8> {
    let t = text.to_lowercase();
    const PHD: &[&str] = &["phd", "ph.d", "doctor"];
    const MASTER: &[&str] = &["master", "m.sc", "msc", "m.s", "m.tech", "mtech", "mba"];
    const BACHELOR: &[&str] = &["bachelor", "b.sc", "bsc", "b.s", "b.tech", "btech", "b.e.", "undergraduate"];
    const ASSOCIATE: &[&str] = &["associate", "diploma"];

    if PHD.iter().any(|k| t.contains(k)) {
        Some(4)
    } else if MASTER.iter().any(|k| t.contains(k)) {
        Some(3)
    } else if BACHELOR.iter().any(|k| t.contains(k)) {
        Some(2)
    } else if ASSOCIATE.iter().any(|k| t.contains(k)) {
        Some(1)
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill-name normalization
// ────────────────────────────────────────────────────────────────────────────

/// Skill-name synonym table, applied after normalization. Both columns are
/// already in normalized (lowercase, separator-free) form.
const SKILL_SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("golang", "go"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("nodejs", "node"),
    ("reactjs", "react"),
    ("vuejs", "vue"),
    ("amazonwebservices", "aws"),
    ("googlecloudplatform", "gcp"),
    ("googlecloud", "gcp"),
    ("cpp", "c++"),
    ("csharp", "c#"),
];

/// Lowercases, trims, strips separator punctuation, then applies the synonym
/// table. "Node.js", "nodejs" and "node" all normalize to the same key.
pub fn normalize_skill(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '_' | ' ' | '/'))
        .collect();

    for (from, to) in SKILL_SYNONYMS {
        if stripped == *from {
            return (*to).to_string();
        }
    }
    stripped
}

/// Looser normalization for free-text fields (degrees, certifications):
/// lowercase, punctuation to spaces, whitespace collapsed.
fn normalize_text(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Education, Experience, Skill};
    use crate::models::job::SkillRequirement;

    fn skill(name: &str, level: SkillLevel) -> Skill {
        Skill {
            name: name.to_string(),
            level,
            years_experience: None,
            category: None,
        }
    }

    fn requirement(name: &str, level: SkillLevel) -> SkillRequirement {
        SkillRequirement {
            skill: name.to_string(),
            required_level: level,
            is_mandatory: true,
            weight: 1.0,
        }
    }

    fn cv_with(skills: Vec<Skill>, months: u32) -> CvProfile {
        CvProfile {
            skills,
            experience: vec![Experience {
                position: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration_months: months,
                description: String::new(),
                skills_used: vec![],
            }],
            ..Default::default()
        }
    }

    /// The worked example from the scoring contract: one full skill match,
    /// one missing skill, experience satisfied, no education requirements.
    #[test]
    fn test_worked_example_python_aws() {
        let cv = cv_with(
            vec![
                skill("Python", SkillLevel::Advanced),
                skill("SQL", SkillLevel::Intermediate),
            ],
            60,
        );
        let job = JobRequirements {
            required_skills: vec![
                requirement("Python", SkillLevel::Advanced),
                requirement("AWS", SkillLevel::Intermediate),
            ],
            min_experience_years: 3,
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());

        assert!((report.skills_score - 50.0).abs() < 0.01);
        assert!((report.experience_score - 100.0).abs() < 0.01);
        assert!((report.education_score - 100.0).abs() < 0.01);
        // 0.5*50 + 0.3*100 + 0.2*100 = 75
        assert!((report.overall_score - 75.0).abs() < 0.01);
        assert_eq!(
            report.gaps,
            vec![Gap::Skill {
                name: "AWS".to_string(),
                required_level: SkillLevel::Intermediate,
                cv_level: None,
            }]
        );
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let cv = cv_with(vec![skill("python", SkillLevel::Advanced)], 0);
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Advanced)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.skills_score - 100.0).abs() < 0.01);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_skill_synonyms_match() {
        let cv = cv_with(vec![skill("JS", SkillLevel::Expert)], 0);
        let job = JobRequirements {
            required_skills: vec![requirement("JavaScript", SkillLevel::Advanced)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!(report.skill_matches[0].satisfied);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_node_js_variants_normalize_to_same_key() {
        assert_eq!(normalize_skill("Node.js"), normalize_skill("nodejs"));
        assert_eq!(normalize_skill("Node.js"), normalize_skill("node"));
        assert_eq!(normalize_skill("K8s"), "kubernetes");
        assert_eq!(normalize_skill("C++"), "c++");
    }

    #[test]
    fn test_below_required_level_gets_partial_credit_and_a_gap() {
        let cv = cv_with(vec![skill("Python", SkillLevel::Beginner)], 0);
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Advanced)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.skills_score - 50.0).abs() < 0.01);
        assert_eq!(
            report.gaps,
            vec![Gap::Skill {
                name: "Python".to_string(),
                required_level: SkillLevel::Advanced,
                cv_level: Some(SkillLevel::Beginner),
            }]
        );
    }

    #[test]
    fn test_level_above_requirement_is_a_full_match() {
        let cv = cv_with(vec![skill("Python", SkillLevel::Expert)], 0);
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Intermediate)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.skills_score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_preferred_skills_affect_score_but_not_gaps() {
        let cv = cv_with(vec![], 0);
        let job = JobRequirements {
            preferred_skills: vec![requirement("Docker", SkillLevel::Intermediate)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.skills_score - 0.0).abs() < 0.01);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_no_skill_requirements_scores_full() {
        let cv = cv_with(vec![skill("Python", SkillLevel::Advanced)], 0);
        let job = JobRequirements::default();

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.skills_score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_experience_shortfall_is_proportional() {
        let cv = cv_with(vec![], 12);
        let job = JobRequirements {
            min_experience_years: 4,
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.experience_score - 25.0).abs() < 0.01);
        assert_eq!(
            report.gaps,
            vec![Gap::Experience {
                required_years: 4.0,
                cv_years: 1.0,
            }]
        );
    }

    #[test]
    fn test_education_rank_satisfies_requirement() {
        let cv = CvProfile {
            education: vec![Education {
                degree: "B.Sc. Computer Science".to_string(),
                institution: "MIT".to_string(),
                field_of_study: None,
                graduation_year: None,
            }],
            ..Default::default()
        };
        let job = JobRequirements {
            education_requirements: vec!["Bachelor's degree in Computer Science".to_string()],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.education_score - 100.0).abs() < 0.01);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_higher_degree_satisfies_lower_requirement() {
        let cv = CvProfile {
            education: vec![Education {
                degree: "Master of Science".to_string(),
                institution: "ETH".to_string(),
                field_of_study: None,
                graduation_year: None,
            }],
            ..Default::default()
        };
        let job = JobRequirements {
            education_requirements: vec!["Bachelor's degree".to_string()],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.education_score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_unmet_education_requirement_creates_gap() {
        let cv = CvProfile::default();
        let job = JobRequirements {
            education_requirements: vec!["PhD in Machine Learning".to_string()],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!((report.education_score - 0.0).abs() < 0.01);
        assert_eq!(
            report.gaps,
            vec![Gap::Education {
                requirement: "PhD in Machine Learning".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_certification_creates_gap() {
        let cv = CvProfile::default();
        let job = JobRequirements {
            certifications: vec!["AWS Certified Developer".to_string()],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert_eq!(
            report.gaps,
            vec![Gap::Certification {
                name: "AWS Certified Developer".to_string(),
            }]
        );
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let cv = cv_with(vec![skill("Python", SkillLevel::Expert)], 600);
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Beginner)],
            min_experience_years: 1,
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        for score in [
            report.overall_score,
            report.skills_score,
            report.experience_score,
            report.education_score,
        ] {
            assert!((0.0..=100.0).contains(&score), "score {score} out of bounds");
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let cv = cv_with(
            vec![
                skill("Python", SkillLevel::Advanced),
                skill("Kubernetes", SkillLevel::Beginner),
            ],
            48,
        );
        let job = JobRequirements {
            required_skills: vec![
                requirement("python", SkillLevel::Intermediate),
                requirement("k8s", SkillLevel::Advanced),
                requirement("Terraform", SkillLevel::Intermediate),
            ],
            preferred_skills: vec![requirement("Go", SkillLevel::Beginner)],
            min_experience_years: 5,
            education_requirements: vec!["Bachelor's degree".to_string()],
            ..Default::default()
        };

        let first = serde_json::to_value(score_match(&cv, &job, &MatchWeights::default())).unwrap();
        let second =
            serde_json::to_value(score_match(&cv, &job, &MatchWeights::default())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overall_equals_weighted_combination() {
        let cv = cv_with(vec![skill("Python", SkillLevel::Beginner)], 12);
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Expert)],
            min_experience_years: 4,
            education_requirements: vec!["Bachelor's degree".to_string()],
            ..Default::default()
        };
        let weights = MatchWeights::default();

        let report = score_match(&cv, &job, &weights);
        let expected = weights.skills * report.skills_score
            + weights.experience * report.experience_score
            + weights.education * report.education_score;
        assert!((report.overall_score - round1(expected)).abs() < 0.1);
    }

    #[test]
    fn test_duplicate_cv_skills_use_best_level() {
        let cv = cv_with(
            vec![
                skill("Python", SkillLevel::Beginner),
                skill("python", SkillLevel::Expert),
            ],
            0,
        );
        let job = JobRequirements {
            required_skills: vec![requirement("Python", SkillLevel::Advanced)],
            ..Default::default()
        };

        let report = score_match(&cv, &job, &MatchWeights::default());
        assert!(report.skill_matches[0].satisfied);
        assert_eq!(report.skill_matches[0].cv_level, Some(SkillLevel::Expert));
    }
}
