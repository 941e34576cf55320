//! # Quantity Expression Parser
//!
//! Parses a single numeric-quantity token from recipe text into an exact
//! decimal value. Handles plain numbers, simple and mixed fractions, unicode
//! vulgar-fraction glyphs, and numeric ranges.
//!
//! Absence of a parse is a first-class result: anything unrecognized yields
//! `None`, never an error.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_planner::quantity::parse_quantity;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(parse_quantity("1 1/2"), Some(dec!(1.5)));
//! assert_eq!(parse_quantity("1½"), Some(dec!(1.5)));
//! assert_eq!(parse_quantity("2-3"), Some(dec!(3)));
//! assert_eq!(parse_quantity("1/0"), None);
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

lazy_static! {
    /// Unicode vulgar-fraction glyphs and their numerator/denominator pairs.
    static ref VULGAR_FRACTIONS: HashMap<char, (u32, u32)> = {
        let mut map = HashMap::new();
        map.insert('¼', (1, 4));
        map.insert('½', (1, 2));
        map.insert('¾', (3, 4));
        map.insert('⅓', (1, 3));
        map.insert('⅔', (2, 3));
        map.insert('⅕', (1, 5));
        map.insert('⅖', (2, 5));
        map.insert('⅗', (3, 5));
        map.insert('⅘', (4, 5));
        map.insert('⅙', (1, 6));
        map.insert('⅚', (5, 6));
        map.insert('⅐', (1, 7));
        map.insert('⅛', (1, 8));
        map.insert('⅜', (3, 8));
        map.insert('⅝', (5, 8));
        map.insert('⅞', (7, 8));
        map
    };

    /// "1½" — optional whole part directly followed by a single glyph.
    /// Anchored at both ends: trailing content rejects the parse.
    static ref GLYPH: Regex =
        Regex::new(r"^(\d+)?\s*([¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞])$").unwrap();

    /// "2-3", "2 – 3", "2 to 3" — resolved to the higher bound.
    static ref RANGE: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?)$").unwrap();

    /// "1 1/2" — whole part plus simple fraction.
    static ref MIXED: Regex = Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)$").unwrap();

    /// "3/4".
    static ref FRACTION: Regex = Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap();

    /// "2", "1.5", "0.25".
    static ref EXACT: Regex = Regex::new(r"^\d+(?:\.\d+)?$").unwrap();
}

/// Parse a trimmed numeric-quantity token. Returns `None` when no pattern
/// matches or a sub-parse fails (zero denominator, non-numeric text).
pub fn parse_quantity(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = GLYPH.captures(token) {
        let whole = match caps.get(1) {
            Some(m) => Decimal::from_str(m.as_str()).ok()?,
            None => Decimal::ZERO,
        };
        let glyph = caps.get(2)?.as_str().chars().next()?;
        let (num, den) = *VULGAR_FRACTIONS.get(&glyph)?;
        return Some(whole + Decimal::from(num) / Decimal::from(den));
    }

    if let Some(caps) = RANGE.captures(token) {
        let low = Decimal::from_str(&caps[1]).ok()?;
        let high = Decimal::from_str(&caps[2]).ok()?;
        // Always plan for the larger quantity.
        return Some(low.max(high));
    }

    if let Some(caps) = MIXED.captures(token) {
        let whole = Decimal::from_str(&caps[1]).ok()?;
        let num = Decimal::from_str(&caps[2]).ok()?;
        let den = Decimal::from_str(&caps[3]).ok()?;
        if den.is_zero() {
            return None;
        }
        return Some(whole + num / den);
    }

    if let Some(caps) = FRACTION.captures(token) {
        let num = Decimal::from_str(&caps[1]).ok()?;
        let den = Decimal::from_str(&caps[2]).ok()?;
        if den.is_zero() {
            return None;
        }
        return Some(num / den);
    }

    if EXACT.is_match(token) {
        return Decimal::from_str(token).ok();
    }

    None
}
