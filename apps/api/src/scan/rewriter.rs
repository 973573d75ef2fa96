//! Resume Rewriter — ATS-aligned rewrite that works missing keywords in truthfully.
//!
//! Best-effort: the pipeline keeps the original resume when this stage fails.

use serde::Serialize;

use crate::llm_client::prompts::{fill_template, TRUTHFULNESS_INSTRUCTION};
use crate::llm_client::repair::{coerce_string_list, coerce_text, parse_structured};
use crate::llm_client::{CompletionService, LlmError};
use crate::models::scan::{field, ResumeSections};
use crate::scan::prompts::REWRITE_PROMPT_TEMPLATE;
use crate::scan::tokenizer::SkillPhrase;

pub struct RewriteRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub missing_keywords: &'a [SkillPhrase],
}

/// Parsed rewrite. `improved_resume` is `None` when the model omitted it or left it blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RewriteOutcome {
    pub improved_resume: Option<String>,
    pub suggestions: Vec<String>,
    pub sections: ResumeSections,
}

/// Fails with `LlmError` when the call fails; `Ok(None)` when the response held no
/// recoverable structure.
pub async fn rewrite(
    request: RewriteRequest<'_>,
    llm: &dyn CompletionService,
) -> Result<Option<RewriteOutcome>, LlmError> {
    let missing_keywords = request.missing_keywords.join(", ");
    let prompt = fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("truthfulness_instruction", TRUTHFULNESS_INSTRUCTION),
            ("missing_keywords", &missing_keywords),
            ("resume_text", request.resume_text),
            ("job_description", request.job_description),
        ],
    );

    let raw = llm.complete(&prompt).await?;

    Ok(parse_structured(&raw)
        .filter(|value| value.is_object())
        .map(|value| {
            let improved = coerce_text(field(&value, &["improvedResume", "improved_resume"]));
            RewriteOutcome {
                improved_resume: (!improved.is_empty()).then_some(improved),
                suggestions: coerce_string_list(field(&value, &["suggestions"])),
                sections: ResumeSections::from_value(&value),
            }
        }))
}
