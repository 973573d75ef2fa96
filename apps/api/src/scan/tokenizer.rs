//! Skill tokenizer and equivalence matcher.
//!
//! Skill phrases surfaced by extraction are free-form ("React.js framework", "Node",
//! "PostgreSQL 14"). They are compared as token sets, never as raw strings:
//! two phrases denote the same skill when one token set contains the other.
//! Tokens are only used for comparison and are never displayed.

use std::collections::HashSet;
use std::fmt;

/// Tokens that carry no identity on their own ("React.js framework" is just React).
const STOP_WORDS: [&str; 4] = ["js", "javascript", "framework", "library"];

/// A raw skill string as returned by extraction. Kept verbatim for display.
pub type SkillPhrase = String;

/// A lowercase, punctuation-free, suffix-normalized atom of a skill phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillToken(String);

impl fmt::Display for SkillToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a phrase into comparable tokens.
///
/// Lowercases, collapses every run outside `[a-z0-9+]` into a separator, then strips a
/// trailing `js` from each piece and drops stop-words. If that leaves nothing, the
/// un-normalized pieces are returned instead so "JavaScript" still tokenizes to
/// `["javascript"]`.
pub fn tokenize(phrase: &str) -> Vec<SkillToken> {
    let lower = phrase.to_lowercase();
    let raw: Vec<&str> = lower
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+'))
        .filter(|piece| !piece.is_empty())
        .collect();

    let normalized: Vec<SkillToken> = raw
        .iter()
        .map(|piece| normalize_piece(piece))
        .filter(|token| !token.is_empty() && !STOP_WORDS.contains(&token.as_str()))
        .map(SkillToken)
        .collect();

    if normalized.is_empty() {
        raw.into_iter().map(|piece| SkillToken(piece.to_string())).collect()
    } else {
        normalized
    }
}

fn normalize_piece(piece: &str) -> String {
    let stripped = piece
        .strip_suffix(".js")
        .or_else(|| piece.strip_suffix("js"))
        .unwrap_or(piece);
    stripped
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
        .collect()
}

/// True when the two phrases name the same skill under token-set containment.
///
/// Order-, case- and whitespace-insensitive, and symmetric: `a` matches `b` iff the
/// tokens of one are a subset of the tokens of the other. Empty phrases never match.
pub fn equivalent(a: &str, b: &str) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    let set_a: HashSet<SkillToken> = tokenize(a).into_iter().collect();
    let set_b: HashSet<SkillToken> = tokenize(b).into_iter().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return false;
    }
    set_a.is_subset(&set_b) || set_b.is_subset(&set_a)
}
