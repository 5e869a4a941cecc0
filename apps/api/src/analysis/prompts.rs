// All LLM prompt constants for the analysis module.
// Templates embed the output schema directly so the reply can be parsed
// straight into the typed records in `models`.

/// System prompt for CV extraction - enforces JSON-only output.
pub const CV_EXTRACT_SYSTEM: &str =
    "You are an expert technical recruiter analyzing résumés. \
    Extract structured information from CV text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for job description analysis - enforces JSON-only output.
pub const JOB_ANALYZE_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract structured hiring requirements from a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Retry system prompt used after a schema mismatch. One retry, then fail.
pub const STRICT_RETRY_SYSTEM: &str =
    "You are a precise, structured assistant. Your previous reply did not \
    match the required JSON schema. \
    Respond with a single valid JSON object matching the schema EXACTLY. \
    Every field must have the exact name and type shown in the schema. \
    Do NOT add fields. Do NOT wrap the object in markdown code fences. \
    Do NOT output anything except the JSON object.";

/// CV extraction prompt template. Replace `{cv_text}` before sending.
pub const CV_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured information from the following CV text.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Full Name",
  "email": "email@example.com",
  "phone": "phone number",
  "location": "city, country",
  "skills": [
    {"name": "Python", "level": "advanced", "years_experience": 3, "category": "programming"}
  ],
  "education": [
    {"degree": "Bachelor of Science", "institution": "University Name", "field_of_study": "Computer Science", "graduation_year": 2020}
  ],
  "experience": [
    {"position": "Software Developer", "company": "Company Name", "duration_months": 24, "description": "What they did there", "skills_used": ["Python", "SQL"]}
  ],
  "certifications": ["AWS Certified Developer"],
  "languages": ["English", "Spanish"]
}

Rules:
- "level" must be exactly one of: "beginner", "intermediate", "advanced", "expert"
- "category" is one of: "programming", "soft_skills", "tools", "domain_knowledge"
- Durations are in months
- Use null for missing scalar fields and [] for missing lists
- Do NOT invent information that is not present in the CV text

CV TEXT:
{cv_text}"#;

/// Job analysis prompt template. Replace `{job_text}` before sending.
pub const JOB_ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze the following job posting and extract its hiring requirements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "required_skills": [
    {"skill": "Python", "required_level": "advanced", "is_mandatory": true, "weight": 1.0}
  ],
  "preferred_skills": [
    {"skill": "Docker", "required_level": "intermediate", "is_mandatory": false, "weight": 0.5}
  ],
  "min_experience_years": 3,
  "education_requirements": ["Bachelor's degree in Computer Science"],
  "certifications": ["AWS Certified Developer"],
  "salary_range": "$80,000 - $120,000"
}

Rules:
- "required_level" must be exactly one of: "beginner", "intermediate", "advanced", "expert"
- "weight" is the importance of the skill, between 0.1 and 1.0
- Put explicit must-haves ("required", "must have", minimum years) in required_skills
- Put nice-to-haves ("preferred", "bonus", "a plus") in preferred_skills
- Use null for missing scalar fields and [] for missing lists

JOB POSTING:
{job_text}"#;
