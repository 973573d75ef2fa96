use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::llm_client::repair::{coerce_string_list, coerce_text};
use crate::scan::tokenizer::SkillPhrase;

/// Structured resume sections as produced by summarization or rewriting.
/// Every list is a flat sequence of strings whatever shape the model returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSections {
    pub objective: String,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills_technical: Vec<String>,
    pub skills_soft: Vec<String>,
    pub projects: Vec<String>,
}

impl ResumeSections {
    /// Reads the six section keys from a parsed model response.
    /// Missing keys become empty; snake_case spellings are accepted too.
    pub fn from_value(value: &Value) -> Self {
        Self {
            objective: coerce_text(field(value, &["objective"])),
            experience: coerce_string_list(field(value, &["experience"])),
            education: coerce_string_list(field(value, &["education"])),
            skills_technical: coerce_string_list(field(
                value,
                &["skillsTechnical", "skills_technical"],
            )),
            skills_soft: coerce_string_list(field(value, &["skillsSoft", "skills_soft"])),
            projects: coerce_string_list(field(value, &["projects"])),
        }
    }

    /// Field-wise merge: non-empty fields of `preferred` replace those of `self`.
    ///
    /// A section the rewrite left out keeps its summarized value instead of being
    /// blanked, which is softer than replacing the whole section set with the rewrite.
    pub fn overlay(self, preferred: ResumeSections) -> ResumeSections {
        fn pick<T: Default + PartialEq>(base: T, preferred: T) -> T {
            if preferred == T::default() {
                base
            } else {
                preferred
            }
        }
        ResumeSections {
            objective: pick(self.objective, preferred.objective),
            experience: pick(self.experience, preferred.experience),
            education: pick(self.education, preferred.education),
            skills_technical: pick(self.skills_technical, preferred.skills_technical),
            skills_soft: pick(self.skills_soft, preferred.skills_soft),
            projects: pick(self.projects, preferred.projects),
        }
    }
}

/// Looks up the first present key among `keys`, or `Null`.
pub fn field<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .find_map(|key| value.get(key))
        .unwrap_or(&Value::Null)
}

/// Stages whose failure is absorbed rather than aborting the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedStage {
    Summarizing,
    Rewriting,
}

/// The fully populated result of one scan. Every field has a fallback value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub jd_skills: Vec<SkillPhrase>,
    pub resume_skills: Vec<SkillPhrase>,
    pub matched_skills: Vec<SkillPhrase>,
    pub missing_keywords: Vec<SkillPhrase>,
    pub missing_keyword_reasons: Vec<String>,
    pub score: u32,
    #[serde(flatten)]
    pub sections: ResumeSections,
    pub improved_resume_content: String,
    pub rewrite_suggestions: Vec<String>,
    pub degraded_stages: Vec<DegradedStage>,
}

/// What the persistence collaborator stores for a completed scan.
#[derive(Debug, Clone)]
pub struct NewScanRecord<'a> {
    pub owner_id: Option<Uuid>,
    pub resume_file_url: &'a str,
    pub job_description: &'a str,
    pub result: &'a ScanResult,
}

/// Identity assigned by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavedScan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}
