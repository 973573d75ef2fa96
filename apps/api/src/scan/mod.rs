// Scan pipeline: skill extraction, token-level matching, scoring, summarization, rewrite.
// All completion calls go through the llm_client::CompletionService trait.

pub mod fit_scoring;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod rewriter;
pub mod skill_extractor;
pub mod summarizer;
pub mod tokenizer;
