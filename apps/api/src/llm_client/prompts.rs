// Shared prompt constants.
// Each scan stage that needs a completion call defines its own prompt in scan/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output for every completion call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that feeds resume content back to the model.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    CRITICAL: Stay truthful to the candidate's resume. Do NOT invent employers, \
    dates, degrees, or achievements. Only rephrase, reorder, and emphasize what is present.";

/// Substitutes `{name}` placeholders in a single left-to-right pass.
/// Inserted values are never rescanned, so user text containing `{name}` stays literal.
/// Braces that do not name a known placeholder (JSON examples) are kept as is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let hit = values.iter().find_map(|(name, value)| {
            after_brace
                .strip_prefix(name)?
                .strip_prefix('}')
                .map(|remaining| (*value, remaining))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }
    out.push_str(rest);
    out
}
