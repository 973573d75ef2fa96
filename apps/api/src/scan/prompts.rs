// All completion prompt templates for the scan pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Skill extraction prompt. Replace `{source_label}` (JOB DESCRIPTION / RESUME) and `{text}`.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = "Extract only hard skills or technologies \
mentioned in the following {source_label}. Respond with a JSON array of strings and nothing else.

{text}";

pub const JOB_DESCRIPTION_LABEL: &str = "JOB DESCRIPTION";
pub const RESUME_LABEL: &str = "RESUME";

/// Resume summarization prompt. Replace `{resume_text}`.
pub const SUMMARIZE_PROMPT_TEMPLATE: &str = r#"Summarize this resume into a JSON object with EXACTLY these keys:
{
  "objective": "one or two sentence career objective",
  "experience": ["concise bullet per role or achievement"],
  "education": ["degree, institution, year"],
  "skillsTechnical": ["technical skill"],
  "skillsSoft": ["soft skill"],
  "projects": ["project name: one line description"]
}
Keep each entry concise but specific.

RESUME:
{resume_text}"#;

/// ATS rewrite prompt.
/// Replace: {truthfulness_instruction}, {missing_keywords}, {resume_text}, {job_description}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are optimizing a resume for Applicant Tracking Systems (ATS).
Rewrite the resume content so it better aligns with the job description.

{truthfulness_instruction}

Return a JSON object with EXACTLY these keys:
{
  "improvedResume": "the full rewritten resume as plain text",
  "suggestions": ["specific, actionable change the candidate should make"],
  "objective": "rewritten career objective",
  "experience": ["rewritten experience bullet"],
  "education": ["education entry"],
  "skillsTechnical": ["technical skill"],
  "skillsSoft": ["soft skill"],
  "projects": ["project entry"]
}

Naturally include these missing keywords where the candidate's experience supports them: {missing_keywords}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
