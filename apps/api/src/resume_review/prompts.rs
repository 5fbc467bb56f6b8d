// Prompt constants for resume review.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::Sampling;

pub const REVIEW_SAMPLING: Sampling = Sampling {
    max_tokens: 1200,
    temperature: 0.1,
};

/// Role description for the reviewer. `JSON_ONLY_SYSTEM` is appended by
/// `review_system_prompt`.
pub const REVIEW_SYSTEM: &str = "You are an experienced technical recruiter and resume coach. \
    You review a candidate's resume against a job description and give specific, \
    actionable feedback grounded in the resume text. Never invent experience the \
    resume does not show.";

/// Output schema and scoring rules. `build_review_prompt` appends the resume
/// and job description after it.
pub const REVIEW_INSTRUCTIONS: &str = r#"Review the resume below against the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills_match": {"score": 0, "suggestions": ["...", "..."]},
  "experience_relevance": {"score": 0, "suggestions": ["...", "..."]},
  "impact_and_achievements": {"score": 0, "suggestions": ["...", "..."]},
  "formatting_and_clarity": {"score": 0, "suggestions": ["...", "..."]},
  "feedback": "..."
}

Rules:
- Every score is an integer from 0 to 100.
- Every "suggestions" array has EXACTLY two short, actionable strings.
- skills_match: overlap between the resume's skills and the job's requirements.
- experience_relevance: how closely past roles match the responsibilities of the job.
- impact_and_achievements: whether results are quantified (numbers, %, time saved).
- formatting_and_clarity: structure, concision, readability.
- "feedback" is one paragraph of overall advice.
- If the job description is empty or meaningless, score against general industry expectations."#;

pub fn review_system_prompt() -> String {
    format!("{REVIEW_SYSTEM} {JSON_ONLY_SYSTEM}")
}

pub fn build_review_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{REVIEW_INSTRUCTIONS}\n\n\
         <resume_content>\n{resume_text}\n</resume_content>\n\n\
         <job_description>\n{job_description}\n</job_description>"
    )
}
