//! Design predicates and the restriction grammar
//!
//! A restriction string filters the candidate pool for random selection.
//! Parsing never fails: malformed input degrades to the most permissive
//! safe interpretation (a plain substring match over the whole token).
//! The grammar is hand-parsed; a regex dependency is not warranted in the
//! domain layer.
//!
//! Grammar:
//! - `""` - empty predicate sequence (callers treat it as match-all)
//! - `{a; b; c}` - several tokens, `;`-separated, trimmed, case-insensitively
//!   deduplicated preserving first occurrence; a missing closing `}` makes
//!   the whole string one literal token instead
//! - `/some/path` - prefix match on the design's folder path
//! - `"n?text"` - typed exact match; the type character is one of
//!   `n` (name), `p` (path), `i` (identifier), `t` (tag), `c` (color);
//!   without a closing quote the token falls back to a substring match
//! - anything else - substring match over name, identifier, and path

use std::fmt;

use serde::{Deserialize, Serialize};

/// One matchable filter rule over a design's facts
///
/// Immutable value object; all carried text is lowercase-normalized at
/// construction so equality is case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DesignPredicate {
    /// Path starts with the given prefix
    StartsWith(String),
    /// Name, identifier, or path contains the given text
    Contains(String),
    ExactName(String),
    ExactPath(String),
    ExactIdentifier(String),
    ExactTag(String),
    ExactColor(String),
}

/// Lowercase views of one candidate design, computed once per filter pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignFacts {
    name: String,
    identifier: String,
    path: String,
    tags: Vec<String>,
    color: String,
}

impl DesignFacts {
    pub fn new(
        name: &str,
        identifier: &str,
        path: &str,
        tags: &[String],
        color: &str,
    ) -> Self {
        Self {
            name: name.to_lowercase(),
            identifier: identifier.to_lowercase(),
            path: path.to_lowercase(),
            tags: tags.iter().map(|t| t.to_lowercase()).collect(),
            color: color.to_lowercase(),
        }
    }
}

impl DesignPredicate {
    /// True if this predicate accepts the candidate
    pub fn matches(&self, facts: &DesignFacts) -> bool {
        match self {
            Self::StartsWith(prefix) => facts.path.starts_with(prefix),
            Self::Contains(text) => {
                facts.name.contains(text)
                    || facts.identifier.contains(text)
                    || facts.path.contains(text)
            }
            Self::ExactName(text) => facts.name == *text,
            Self::ExactPath(text) => facts.path == *text,
            Self::ExactIdentifier(text) => facts.identifier == *text,
            Self::ExactTag(text) => facts.tags.iter().any(|tag| tag == text),
            Self::ExactColor(text) => facts.color == *text,
        }
    }
}

impl fmt::Display for DesignPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartsWith(prefix) => write!(f, "/{prefix}"),
            Self::Contains(text) => write!(f, "{text}"),
            Self::ExactName(text) => write!(f, "\"n?{text}\""),
            Self::ExactPath(text) => write!(f, "\"p?{text}\""),
            Self::ExactIdentifier(text) => write!(f, "\"i?{text}\""),
            Self::ExactTag(text) => write!(f, "\"t?{text}\""),
            Self::ExactColor(text) => write!(f, "\"c?{text}\""),
        }
    }
}

/// True if any predicate accepts the candidate
///
/// An empty sequence matches nothing here; callers short-circuit the
/// empty restriction to "everything" before filtering.
pub fn matches_any(predicates: &[DesignPredicate], facts: &DesignFacts) -> bool {
    predicates.iter().any(|p| p.matches(facts))
}

/// Parse a restriction string into an ordered predicate sequence
pub fn parse_restrictions(text: &str) -> Vec<DesignPredicate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Some(body) = trimmed.strip_prefix('{') {
        if let Some(body) = body.strip_suffix('}') {
            let mut seen: Vec<String> = Vec::new();
            let mut predicates = Vec::new();
            for token in body.split(';') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                let lower = token.to_lowercase();
                if seen.contains(&lower) {
                    continue;
                }
                seen.push(lower);
                predicates.push(parse_single(token));
            }
            return predicates;
        }
        // Missing closing brace: the whole string is one literal token.
        return vec![parse_single(trimmed)];
    }

    vec![parse_single(trimmed)]
}

/// Format a predicate sequence back into a restriction string
///
/// Inverse of [`parse_restrictions`]: `parse(format(p)) == p` for any
/// sequence `p` produced by `parse`.
pub fn format_restrictions(predicates: &[DesignPredicate]) -> String {
    match predicates {
        [] => String::new(),
        [single] => single.to_string(),
        many => {
            let tokens: Vec<String> = many.iter().map(ToString::to_string).collect();
            format!("{{{}}}", tokens.join("; "))
        }
    }
}

fn parse_single(token: &str) -> DesignPredicate {
    if let Some(rest) = token.strip_prefix('/') {
        return DesignPredicate::StartsWith(rest.to_lowercase());
    }
    if let Some(predicate) = parse_typed_exact(token) {
        return predicate;
    }
    DesignPredicate::Contains(token.to_lowercase())
}

/// Typed exact tokens look like `"n?text"`. Returns None when the shape
/// does not match; the caller then degrades to a substring predicate.
fn parse_typed_exact(token: &str) -> Option<DesignPredicate> {
    let bytes = token.as_bytes();
    if bytes.len() < 4 || bytes[0] != b'"' || bytes[2] != b'?' {
        return None;
    }
    // bytes[0..=2] are ASCII here, so byte index 3 is a char boundary.
    let close = token[3..].find('"')? + 3;
    let text = token[3..close].to_lowercase();
    match bytes[1].to_ascii_lowercase() {
        b'n' => Some(DesignPredicate::ExactName(text)),
        b'p' => Some(DesignPredicate::ExactPath(text)),
        b'i' => Some(DesignPredicate::ExactIdentifier(text)),
        b't' => Some(DesignPredicate::ExactTag(text)),
        b'c' => Some(DesignPredicate::ExactColor(text)),
        _ => None,
    }
}
