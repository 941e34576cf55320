//! # Ingredient Name Normalizer
//!
//! Derives a deduplication key from an ingredient name by stripping leading
//! descriptive modifiers ("fresh", "chopped", "boneless"). Used by catalog
//! ingestion to collapse variants of the same ingredient onto one key.
//!
//! Normalization is idempotent: normalizing an already-normalized name
//! returns the same string.

use crate::ingredient_parser::parse_ingredient_string;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Descriptive modifiers stripped from the front of a name.
    static ref LEADING_MODIFIERS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for modifier in [
            "fresh", "dried", "boneless", "skinless", "large", "small",
            "medium", "ground", "minced", "chopped", "sliced", "diced",
            "crushed", "grated", "shredded", "ripe", "baby", "low-fat",
            "lowfat", "low-sodium", "reduced-fat", "extra", "lean",
        ] {
            set.insert(modifier);
        }
        set
    };
}

/// Parse a raw ingredient line and reduce its name to a deduplication key.
pub fn normalize_ingredient_name(raw: &str) -> String {
    let parsed = parse_ingredient_string(raw);
    strip_leading_modifiers(&parsed.name)
}

/// Remove leading modifier tokens from an already-parsed name, stopping at
/// the first non-modifier token.
pub fn strip_leading_modifiers(name: &str) -> String {
    let mut tokens = name.split_whitespace().peekable();
    while let Some(&token) = tokens.peek() {
        if LEADING_MODIFIERS.contains(token) {
            tokens.next();
        } else {
            break;
        }
    }

    let stripped = tokens.collect::<Vec<_>>().join(" ");
    if stripped.is_empty() {
        // A name made entirely of modifiers keeps itself as the key.
        name.trim().to_string()
    } else {
        stripped
    }
}
