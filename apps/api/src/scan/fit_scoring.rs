//! Fit Scoring — partitions JD skills into matched / missing against resume skills.
//!
//! Pure-Rust, deterministic, no model call. A JD skill counts as matched when any
//! resume skill is `equivalent` to it (token-set containment, see `tokenizer`).

use serde::{Deserialize, Serialize};

use crate::scan::tokenizer::{equivalent, SkillPhrase};

/// How many resume skills are quoted in the missing-keyword explanation.
const MAX_HIGHLIGHTS: usize = 5;

/// Outcome of matching JD skills against resume skills.
///
/// `matched_skills` and `missing_keywords` partition the JD skill list in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillFit {
    pub matched_skills: Vec<SkillPhrase>,
    pub missing_keywords: Vec<SkillPhrase>,
    /// round(100 * matched / jd), 0 when the JD yielded no skills
    pub score: u32,
}

pub fn compute_skill_fit(jd_skills: &[SkillPhrase], resume_skills: &[SkillPhrase]) -> SkillFit {
    if jd_skills.is_empty() {
        return SkillFit::default();
    }

    let (matched_skills, missing_keywords): (Vec<SkillPhrase>, Vec<SkillPhrase>) = jd_skills
        .iter()
        .cloned()
        .partition(|jd_skill| {
            resume_skills
                .iter()
                .any(|resume_skill| equivalent(jd_skill, resume_skill))
        });

    let score = ((matched_skills.len() as f64 / jd_skills.len() as f64) * 100.0).round() as u32;

    SkillFit {
        matched_skills,
        missing_keywords,
        score,
    }
}

/// Builds the single explanation sentence for missing keywords.
/// Returns an empty list when nothing is missing.
pub fn build_missing_keyword_reasons(
    missing_keywords: &[SkillPhrase],
    resume_skills: &[SkillPhrase],
) -> Vec<String> {
    if missing_keywords.is_empty() {
        return vec![];
    }

    let highlights: Vec<&str> = resume_skills
        .iter()
        .take(MAX_HIGHLIGHTS)
        .map(String::as_str)
        .collect();
    let resume_summary = if highlights.is_empty() {
        "[]".to_string()
    } else {
        let ellipsis = if resume_skills.len() > MAX_HIGHLIGHTS {
            ", …"
        } else {
            ""
        };
        format!("[{}{ellipsis}]", highlights.join(", "))
    };

    vec![format!(
        "Missing {}: The job description calls these out, but your resume highlights {resume_summary}",
        missing_keywords.join(", ")
    )]
}
