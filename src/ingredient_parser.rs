//! # Ingredient Line Parser
//!
//! Turns one raw ingredient line ("1 1/2 cups flour, sifted") into a
//! structured [`ParsedIngredientLine`]: quantity, canonical unit, name, and
//! free-text notes.
//!
//! ## Features
//!
//! - Leading quantity extraction with fraction, glyph, and range support
//! - Two-word unit tokens ("fl oz") matched before one-word tokens
//! - Parenthetical and post-comma text captured as notes
//! - "to taste" / "as needed" phrases short-circuit to a no-quantity result
//! - Bare counts ("3 eggs") default to the `piece` unit
//!
//! Parsing never fails: missing quantity or unit is `None`, an empty line
//! yields an empty name. Callers validate the result for their own purposes.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_planner::ingredient_parser::parse_ingredient_string;
//! use pantry_planner::units::CanonicalUnit;
//! use rust_decimal_macros::dec;
//!
//! let line = parse_ingredient_string("1 1/2 cups flour, sifted");
//! assert_eq!(line.quantity, Some(dec!(1.5)));
//! assert_eq!(line.unit, Some(CanonicalUnit::Cup));
//! assert_eq!(line.name, "flour");
//! assert_eq!(line.notes.as_deref(), Some("sifted"));
//! ```

use crate::model::ParsedIngredientLine;
use crate::quantity::parse_quantity;
use crate::units::{lookup_unit_alias, CanonicalUnit};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::collections::HashSet;

/// Configuration options for ingredient line parsing.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum length of the fallback ingredient name (truncated if longer).
    pub max_ingredient_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_ingredient_length: 100,
        }
    }
}

lazy_static! {
    /// Phrases that mean "no measurable quantity"; their presence
    /// short-circuits parsing to a `to_taste` result.
    static ref NO_QUANTITY_PHRASES: Vec<&'static str> = vec![
        "to taste",
        "as needed",
        "to garnish",
        "for garnish",
        "for serving",
    ];

    /// Nouns commonly counted without a unit ("3 eggs", "2 onions").
    static ref COUNTABLE_NOUNS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for noun in [
            "egg", "onion", "shallot", "apple", "banana", "carrot", "potato",
            "tomato", "lemon", "lime", "orange", "avocado", "cucumber",
            "zucchini", "eggplant", "pepper", "chili", "leek", "scallion",
        ] {
            set.insert(noun);
        }
        set
    };

    /// Leading quantity token: digits, vulgar-fraction glyphs, `.`, `/`,
    /// `-`, and internal spaces. Anchored at the start of the line.
    static ref LEADING_QUANTITY: Regex = Regex::new(
        r"^[0-9.¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞][0-9¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞./\-\s]*"
    )
    .unwrap();

    /// Parenthetical text captured as notes.
    static ref PARENTHETICAL: Regex = Regex::new(r"\(([^)]*)\)").unwrap();
}

/// Parse one raw ingredient line with default configuration.
pub fn parse_ingredient_string(raw: &str) -> ParsedIngredientLine {
    parse_ingredient_string_with_config(raw, &ParserConfig::default())
}

/// Parse one raw ingredient line.
pub fn parse_ingredient_string_with_config(
    raw: &str,
    config: &ParserConfig,
) -> ParsedIngredientLine {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedIngredientLine::empty();
    }
    trace!("parsing ingredient line: {:?}", trimmed);

    let lower = trimmed.to_lowercase();
    for phrase in NO_QUANTITY_PHRASES.iter() {
        if lower.contains(phrase) {
            debug!("no-quantity phrase {:?} in {:?}", phrase, trimmed);
            return parse_to_taste_line(&lower, phrase, raw, config);
        }
    }

    // Parenthetical text becomes notes and leaves the working string.
    let mut notes: Vec<String> = Vec::new();
    for caps in PARENTHETICAL.captures_iter(trimmed) {
        let note = caps[1].trim();
        if !note.is_empty() {
            notes.push(note.to_string());
        }
    }
    let mut working = PARENTHETICAL.replace_all(trimmed, " ").into_owned();

    // Everything after the first comma is additional notes.
    if let Some(comma) = working.find(',') {
        let after = working[comma + 1..].trim();
        if !after.is_empty() {
            notes.push(after.to_string());
        }
        working.truncate(comma);
    }

    let mut rest = working.trim();

    // Leading quantity token.
    let mut quantity = None;
    if let Some(m) = LEADING_QUANTITY.find(rest) {
        quantity = parse_quantity(m.as_str());
        rest = rest[m.end()..].trim_start();
        trace!("quantity token {:?} -> {:?}", m.as_str(), quantity);
    }

    // Unit token: try two words before one.
    let (mut unit, rest) = take_unit_token(rest);
    let mut rest = rest.trim();

    if let Some(stripped) = strip_of_prefix(rest) {
        rest = stripped;
    }

    let mut name = rest.trim().to_lowercase();

    // A counted, unitless quantity is always a piece count. The countable
    // noun table cannot change that outcome; it only selects the log line.
    if quantity.is_some() && unit.is_none() && !name.is_empty() {
        let singular = name.strip_suffix('s').unwrap_or(&name);
        if COUNTABLE_NOUNS.contains(name.as_str()) || COUNTABLE_NOUNS.contains(singular) {
            debug!("countable noun {:?}, unit is piece", name);
        } else {
            debug!("bare count before {:?}, defaulting unit to piece", name);
        }
        unit = Some(CanonicalUnit::Piece);
    }

    if name.is_empty() {
        name = fallback_name(raw, config);
    }

    ParsedIngredientLine {
        quantity,
        unit,
        name,
        notes: join_notes(notes),
    }
}

/// Parse a whole ingredient block line by line, skipping blank lines.
pub fn parse_ingredient_list(text: &str) -> Vec<ParsedIngredientLine> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_ingredient_string)
        .collect()
}

// "salt to taste", "1 tsp pepper, as needed": strip the phrase and any
// leading quantity/unit, keep the remainder as the name.
fn parse_to_taste_line(
    lower: &str,
    phrase: &str,
    raw: &str,
    config: &ParserConfig,
) -> ParsedIngredientLine {
    let working = lower.replace(phrase, " ");
    let working = PARENTHETICAL.replace_all(&working, " ").into_owned();

    let mut rest = working.trim();
    if let Some(m) = LEADING_QUANTITY.find(rest) {
        rest = rest[m.end()..].trim_start();
    }
    let (_, rest) = take_unit_token(rest);
    let mut rest = rest.trim();
    if let Some(stripped) = strip_of_prefix(rest) {
        rest = stripped;
    }

    let mut name = rest
        .trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .to_string();
    if name.is_empty() {
        name = fallback_name(raw, config);
    }

    ParsedIngredientLine {
        quantity: None,
        unit: Some(CanonicalUnit::ToTaste),
        name,
        notes: None,
    }
}

// Consume a recognized unit token from the front of `rest`. Two-word tokens
// win over one-word tokens.
fn take_unit_token(rest: &str) -> (Option<CanonicalUnit>, &str) {
    let mut words = rest.split_whitespace();
    let first = match words.next() {
        Some(w) => w,
        None => return (None, rest),
    };

    if let Some(second) = words.next() {
        let two_word = format!("{} {}", first, second);
        if let Some(unit) = lookup_unit_alias(&two_word) {
            let consumed = rest.find(second).map(|i| i + second.len()).unwrap_or(0);
            return (Some(unit), &rest[consumed..]);
        }
    }

    if let Some(unit) = lookup_unit_alias(first) {
        let consumed = rest.find(first).map(|i| i + first.len()).unwrap_or(0);
        return (Some(unit), &rest[consumed..]);
    }

    (None, rest)
}

fn strip_of_prefix(rest: &str) -> Option<&str> {
    let lower = rest.to_lowercase();
    if lower.starts_with("of ") {
        Some(rest[3..].trim_start())
    } else {
        None
    }
}

fn join_notes(notes: Vec<String>) -> Option<String> {
    if notes.is_empty() {
        None
    } else {
        Some(notes.join("; "))
    }
}

// When parsing strips everything away, fall back to the raw input,
// lowercased and truncated.
fn fallback_name(raw: &str, config: &ParserConfig) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .take(config.max_ingredient_length)
        .collect()
}
