//! Path normalization and explanation lookup
//!
//! Resolution order, first hit wins:
//! 1. exact match of the raw path
//! 2. exact match of the normalized path (numeric segments folded to `[]`)
//! 3. fallback scan of the table against the normalized path, see [`MatchPolicy`]
//! 4. keyword heuristics on the raw path
//!
//! | Raw path                                  | Normalized                              |
//! |-------------------------------------------|-----------------------------------------|
//! | `spec.template.spec.containers.0.image`   | `spec.template.spec.containers[].image` |
//! | `spec.ports.1`                            | `spec.ports[]`                          |
//! | `spec.volumes.0.items.2.key`              | `spec.volumes[].items[].key`            |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::table::{FIELD_EXPLANATIONS, KEYWORD_FALLBACKS};

/// How the fallback scan picks among several matching table keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Keys found at segment boundaries; suffix matches beat inner matches,
    /// longer keys beat shorter ones, declaration order breaks ties
    #[default]
    LongestMatch,
    /// First key in declaration order that the path ends with or contains
    DeclarationOrder,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongestMatch => "longest-match",
            Self::DeclarationOrder => "declaration-order",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "longest-match" => Ok(Self::LongestMatch),
            "declaration-order" => Ok(Self::DeclarationOrder),
            other => Err(format!(
                "unknown match policy '{}', expected 'longest-match' or 'declaration-order'",
                other
            )),
        }
    }
}

/// Fold every all-digit segment into a `[]` marker on the segment before it
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());

    for (i, segment) in path.split('.').enumerate() {
        if is_index(segment) {
            normalized.push_str("[]");
        } else {
            if i > 0 {
                normalized.push('.');
            }
            normalized.push_str(segment);
        }
    }

    normalized
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve a field path to its explanation text
pub fn lookup(path: &str, policy: MatchPolicy) -> Option<&'static str> {
    if let Some(text) = FIELD_EXPLANATIONS.get(path) {
        return Some(*text);
    }

    let normalized = normalize_path(path);
    if let Some(text) = FIELD_EXPLANATIONS.get(normalized.as_str()) {
        return Some(*text);
    }

    let fallback = match policy {
        MatchPolicy::LongestMatch => longest_match(&normalized),
        MatchPolicy::DeclarationOrder => first_match(&normalized),
    };
    if fallback.is_some() {
        return fallback;
    }

    keyword_fallback(path)
}

fn first_match(normalized: &str) -> Option<&'static str> {
    FIELD_EXPLANATIONS
        .entries()
        .find(|(key, _)| normalized.ends_with(**key) || normalized.contains(**key))
        .map(|(key, text)| {
            tracing::debug!(path = normalized, key = *key, "partial match");
            *text
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Suffix,
    Inner,
}

fn longest_match(normalized: &str) -> Option<&'static str> {
    let mut best_suffix: Option<(&str, &'static str)> = None;
    let mut best_inner: Option<(&str, &'static str)> = None;

    for (&key, &text) in FIELD_EXPLANATIONS.entries() {
        let slot = match placement(normalized, key) {
            Some(Placement::Suffix) => &mut best_suffix,
            Some(Placement::Inner) => &mut best_inner,
            None => continue,
        };
        // Strictly longer only, so the earlier key keeps a tie
        if slot.is_none_or(|(best, _)| key.len() > best.len()) {
            *slot = Some((key, text));
        }
    }

    best_suffix.or(best_inner).map(|(key, text)| {
        tracing::debug!(path = normalized, key, "partial match");
        text
    })
}

/// Where `key` sits inside `path`, counting only whole-segment occurrences
fn placement(path: &str, key: &str) -> Option<Placement> {
    let mut found = None;

    for (start, _) in path.match_indices(key) {
        let end = start + key.len();
        let starts_clean = start == 0 || path.as_bytes()[start - 1] == b'.';
        let ends_clean = end == path.len() || matches!(path.as_bytes()[end], b'.' | b'[');
        if !(starts_clean && ends_clean) {
            continue;
        }
        if end == path.len() {
            return Some(Placement::Suffix);
        }
        found = Some(Placement::Inner);
    }

    found
}

fn keyword_fallback(path: &str) -> Option<&'static str> {
    let lower = path.to_lowercase();
    KEYWORD_FALLBACKS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, text)| *text)
}
