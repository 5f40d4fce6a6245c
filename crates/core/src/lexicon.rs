//! Lexicon matching.
//!
//! A project's lexicon is its symbols plus their synonyms. A scenario
//! "uses" a symbol when any of the symbol's terms occurs in the scenario
//! text as a whole word or phrase, ignoring case.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::entities::scenario::Scenario;
use crate::entities::symbol::Symbol;
use crate::types::DbId;

/// A project symbol mentioned by a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconMatch {
    pub symbol_id: DbId,
    pub name: String,
    pub classification: String,
    /// Distinct terms (name or synonyms) found in the scenario, sorted.
    pub terms: Vec<String>,
}

/// Collect every piece of free text a scenario carries.
pub fn scenario_text(scenario: &Scenario) -> Vec<&str> {
    let mut text = vec![scenario.title.as_str(), scenario.goal.as_str()];

    if let Some(ctx) = &scenario.context {
        text.extend(
            [&ctx.geographic_location, &ctx.temporal_location, &ctx.precondition]
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
    }
    text.extend(scenario.exceptions.iter().map(|e| e.description.as_str()));
    text.extend(scenario.restrictions.iter().map(|r| r.description.as_str()));
    text.extend(scenario.resources.iter().map(|r| r.name.as_str()));
    text.extend(scenario.episodes.iter().map(|e| e.description.as_str()));
    text.extend(scenario.actors.iter().map(|a| a.name.as_str()));
    text
}

/// Characters that may border a term whose edge is punctuation.
const DELIMITERS: &str = r#"\s,;:!?()\[\]"'"#;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build a case-insensitive, word-bounded matcher for a term.
///
/// A word-character edge is bounded by `\b`. A punctuation edge ("C++",
/// ".NET") must sit next to whitespace, a delimiter or the end of the text,
/// so "c+" does not match inside "C++".
///
/// Returns `None` for blank terms.
fn term_matcher(term: &str) -> Option<Regex> {
    let trimmed = term.trim();
    let (first, last) = (trimmed.chars().next()?, trimmed.chars().last()?);

    let lead = if is_word_char(first) {
        r"\b".to_string()
    } else {
        format!("(?:^|[{DELIMITERS}])")
    };
    let trail = if is_word_char(last) {
        r"\b".to_string()
    } else {
        format!("(?:[{DELIMITERS}.]|$)")
    };

    // Collapse internal whitespace so "use case" also matches "use  case".
    let words: Vec<String> = trimmed.split_whitespace().map(regex::escape).collect();
    let pattern = format!("{lead}{}{trail}", words.join(r"\s+"));
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

/// Find the symbols of `lexicon` mentioned anywhere in `scenario`.
///
/// Each symbol appears at most once; results are sorted by symbol name,
/// then id.
pub fn match_lexicon(scenario: &Scenario, lexicon: &[Symbol]) -> Vec<LexiconMatch> {
    let text = scenario_text(scenario);

    let mut matches: Vec<LexiconMatch> = lexicon
        .iter()
        .filter_map(|symbol| {
            let terms: BTreeSet<String> = symbol
                .terms()
                .filter(|term| {
                    term_matcher(term)
                        .map(|re| text.iter().any(|chunk| re.is_match(chunk)))
                        .unwrap_or(false)
                })
                .map(str::to_string)
                .collect();

            if terms.is_empty() {
                return None;
            }
            Some(LexiconMatch {
                symbol_id: symbol.id,
                name: symbol.name.clone(),
                classification: symbol.classification.clone(),
                terms: terms.into_iter().collect(),
            })
        })
        .collect();

    matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.symbol_id.cmp(&b.symbol_id)));
    matches
}
