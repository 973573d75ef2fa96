//! Skill Set Extractor — asks the completion service for the hard skills in a JD or resume.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::llm_client::prompts::fill_template;
use crate::llm_client::repair::{
    coerce_string_list, parse_comma_list, parse_fragment, parse_strict, parse_with, split_commas,
    Parser,
};
use crate::llm_client::{CompletionService, LlmError};
use crate::scan::prompts::{JOB_DESCRIPTION_LABEL, RESUME_LABEL, SKILL_EXTRACTION_PROMPT_TEMPLATE};
use crate::scan::tokenizer::SkillPhrase;

/// Strict JSON, then embedded fragment, then comma split of the raw text.
const SKILL_LIST_PARSERS: [Parser; 3] = [parse_strict, parse_fragment, parse_comma_list];

pub async fn extract_from_job_description(
    text: &str,
    llm: &dyn CompletionService,
) -> Result<Vec<SkillPhrase>, LlmError> {
    extract_skills(JOB_DESCRIPTION_LABEL, text, llm).await
}

pub async fn extract_from_resume(
    text: &str,
    llm: &dyn CompletionService,
) -> Result<Vec<SkillPhrase>, LlmError> {
    extract_skills(RESUME_LABEL, text, llm).await
}

/// Shared routine. Only a completion-level failure is an error; malformed but present
/// output is repaired or yields an empty list.
async fn extract_skills(
    source_label: &str,
    text: &str,
    llm: &dyn CompletionService,
) -> Result<Vec<SkillPhrase>, LlmError> {
    let prompt = fill_template(
        SKILL_EXTRACTION_PROMPT_TEMPLATE,
        &[("source_label", source_label), ("text", text)],
    );

    let raw = llm.complete(&prompt).await?;
    let skills = parse_skill_list(&raw);
    debug!("Extracted {} skills from {}", skills.len(), source_label);
    Ok(skills)
}

/// Turns a raw completion into a de-duplicated skill list.
pub fn parse_skill_list(raw: &str) -> Vec<SkillPhrase> {
    let items = match parse_with(raw, &SKILL_LIST_PARSERS) {
        Some(value @ Value::Array(_)) => coerce_string_list(&value),
        Some(Value::String(s)) => split_commas(&s),
        _ => vec![],
    };
    dedup_case_insensitive(items)
}

/// Drops repeats that differ only in case or surrounding whitespace; first spelling wins.
fn dedup_case_insensitive(items: Vec<String>) -> Vec<SkillPhrase> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .collect()
}
