//! Free-text query parsing and pattern compilation
//!
//! A raw query mixes free text, double-quoted exact phrases and `key:value`
//! directives (`type:`, `status:`, `country:`, `from:`, `to:`). Directives and
//! phrases are extracted first; whatever text remains is tokenized into
//! search terms.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

static PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());
static TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)type:(\w+)").unwrap());
static STATUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)status:(\w+)").unwrap());
static COUNTRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)country:(\w+)").unwrap());
static FROM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)from:(\d{4}-\d{2}-\d{2})").unwrap());
static TO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)to:(\d{4}-\d{2}-\d{2})").unwrap());

/// Structured filters extracted from query directives
///
/// Directive values are not validated here; an unknown `status:bogus` is
/// carried through and simply matches nothing at the adapter layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    /// Lowercased `type:` values, duplicates permitted
    pub types: Vec<String>,

    /// Lowercased `status:` value, last occurrence wins
    pub status: Option<String>,

    /// `country:` value, original case preserved
    pub country: Option<String>,

    pub date_from: Option<NaiveDate>,

    pub date_to: Option<NaiveDate>,
}

/// The structured form of a raw search query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Free-text tokens of length >= 2, in input order
    pub search_terms: Vec<String>,

    /// Double-quoted phrases, in input order, case preserved
    pub exact_phrases: Vec<String>,

    pub filters: QueryFilters,
}

/// Parse a raw query string; never fails, empty input gives an empty query
pub fn parse(raw: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    if raw.trim().is_empty() {
        return parsed;
    }

    // Quoted phrases come out first so their content is never scanned for
    // directives or tokens.
    for caps in PHRASE_RE.captures_iter(raw) {
        parsed.exact_phrases.push(caps[1].to_string());
    }
    let mut working = PHRASE_RE.replace_all(raw, " ").into_owned();

    for caps in TYPE_RE.captures_iter(&working) {
        parsed.filters.types.push(caps[1].to_lowercase());
    }
    working = TYPE_RE.replace_all(&working, " ").into_owned();

    for caps in STATUS_RE.captures_iter(&working) {
        parsed.filters.status = Some(caps[1].to_lowercase());
    }
    working = STATUS_RE.replace_all(&working, " ").into_owned();

    for caps in COUNTRY_RE.captures_iter(&working) {
        parsed.filters.country = Some(caps[1].to_string());
    }
    working = COUNTRY_RE.replace_all(&working, " ").into_owned();

    for caps in FROM_RE.captures_iter(&working) {
        parsed.filters.date_from = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    }
    working = FROM_RE.replace_all(&working, " ").into_owned();

    for caps in TO_RE.captures_iter(&working) {
        parsed.filters.date_to = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    }
    working = TO_RE.replace_all(&working, " ").into_owned();

    parsed.search_terms = working
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect();

    parsed
}

/// Compile terms and phrases into one case-insensitive alternation
///
/// Returns `None` when there is nothing to match textually (a filter-only
/// query). Every token is escaped, so regex metacharacters in the input
/// match literally. Phrases are listed before terms by convention; matching
/// is order-independent.
pub fn compile_pattern(terms: &[String], phrases: &[String]) -> Option<Regex> {
    if terms.is_empty() && phrases.is_empty() {
        return None;
    }

    let alternation = phrases
        .iter()
        .chain(terms.iter())
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .ok()
}

impl ParsedQuery {
    /// Compiled substring pattern for this query, if it has any text
    pub fn pattern(&self) -> Option<Regex> {
        compile_pattern(&self.search_terms, &self.exact_phrases)
    }
}
