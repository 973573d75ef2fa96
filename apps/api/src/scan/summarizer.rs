//! Resume Summarizer — decomposes resume text into structured sections.

use crate::llm_client::prompts::fill_template;
use crate::llm_client::repair::parse_structured;
use crate::llm_client::{CompletionService, LlmError};
use crate::models::scan::ResumeSections;
use crate::scan::prompts::SUMMARIZE_PROMPT_TEMPLATE;

/// Blank input short-circuits to empty sections without a completion call.
/// Unparseable output also yields empty sections; only the call itself can fail.
pub async fn summarize(
    resume_text: &str,
    llm: &dyn CompletionService,
) -> Result<ResumeSections, LlmError> {
    if resume_text.trim().is_empty() {
        return Ok(ResumeSections::default());
    }

    let prompt = fill_template(SUMMARIZE_PROMPT_TEMPLATE, &[("resume_text", resume_text)]);
    let raw = llm.complete(&prompt).await?;

    Ok(parse_structured(&raw)
        .map(|value| ResumeSections::from_value(&value))
        .unwrap_or_default())
}
