//! # Unit Table
//!
//! Canonical measurement units, the alias table that maps raw unit text onto
//! them, and exact conversion between compatible units.
//!
//! ## Core Concepts
//!
//! - **Canonical unit**: one member of the closed unit vocabulary; raw text
//!   that matches no alias passes through as [`CanonicalUnit::Other`].
//! - **Base unit**: the per-kind reference unit (`ml` for volume, `g` for
//!   weight, `piece` for dozen) used as common ground for conversion.
//! - **Measurement system**: `us` or `metric`, governing which unit is picked
//!   for human-facing display.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_planner::units::{canonicalize_unit, convert_quantity, CanonicalUnit};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(canonicalize_unit("Cups."), CanonicalUnit::Cup);
//! assert_eq!(
//!     convert_quantity(dec!(1), &CanonicalUnit::L, &CanonicalUnit::Ml),
//!     Some(dec!(1000)),
//! );
//! ```

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed unit vocabulary. Unknown raw tokens are carried verbatim in
/// `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalUnit {
    // Volume
    Cup,
    Tbsp,
    Tsp,
    Ml,
    L,

    // Weight
    G,
    Kg,
    Oz,
    Lb,

    // Count
    Piece,
    Dozen,

    // Other / imprecise
    Pinch,
    Dash,
    Bunch,
    Clove,
    Can,
    Jar,
    Sprig,
    ToTaste,

    /// Unrecognized unit text, passed through unchanged.
    Other(String),
}

/// Classification of a canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Volume,
    Weight,
    Count,
    Other,
}

/// Display preference for human-facing quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementSystem {
    Us,
    Metric,
}

// Conversion factors to the per-kind base unit. Fixed physical constants,
// treated as exact literals.
const TSP_ML: Decimal = dec!(4.929);
const TBSP_ML: Decimal = dec!(14.787);
const CUP_ML: Decimal = dec!(236.588);
const L_ML: Decimal = dec!(1000);
const OZ_G: Decimal = dec!(28.3495);
const LB_G: Decimal = dec!(453.592);
const KG_G: Decimal = dec!(1000);
const DOZEN_PIECES: Decimal = dec!(12);

lazy_static! {
    /// Alias table: every recognized raw token (plurals, abbreviations,
    /// alternate spellings) maps to exactly one canonical unit.
    static ref UNIT_ALIASES: HashMap<&'static str, CanonicalUnit> = {
        let mut map = HashMap::new();

        // Volume
        map.insert("cup", CanonicalUnit::Cup);
        map.insert("cups", CanonicalUnit::Cup);
        map.insert("c", CanonicalUnit::Cup);
        map.insert("tbsp", CanonicalUnit::Tbsp);
        map.insert("tbsps", CanonicalUnit::Tbsp);
        map.insert("tbs", CanonicalUnit::Tbsp);
        map.insert("tablespoon", CanonicalUnit::Tbsp);
        map.insert("tablespoons", CanonicalUnit::Tbsp);
        map.insert("tsp", CanonicalUnit::Tsp);
        map.insert("tsps", CanonicalUnit::Tsp);
        map.insert("teaspoon", CanonicalUnit::Tsp);
        map.insert("teaspoons", CanonicalUnit::Tsp);
        map.insert("ml", CanonicalUnit::Ml);
        map.insert("milliliter", CanonicalUnit::Ml);
        map.insert("milliliters", CanonicalUnit::Ml);
        map.insert("millilitre", CanonicalUnit::Ml);
        map.insert("millilitres", CanonicalUnit::Ml);
        map.insert("l", CanonicalUnit::L);
        map.insert("liter", CanonicalUnit::L);
        map.insert("liters", CanonicalUnit::L);
        map.insert("litre", CanonicalUnit::L);
        map.insert("litres", CanonicalUnit::L);

        // Weight
        map.insert("g", CanonicalUnit::G);
        map.insert("gram", CanonicalUnit::G);
        map.insert("grams", CanonicalUnit::G);
        map.insert("kg", CanonicalUnit::Kg);
        map.insert("kilogram", CanonicalUnit::Kg);
        map.insert("kilograms", CanonicalUnit::Kg);
        map.insert("kilo", CanonicalUnit::Kg);
        map.insert("kilos", CanonicalUnit::Kg);
        map.insert("oz", CanonicalUnit::Oz);
        map.insert("ounce", CanonicalUnit::Oz);
        map.insert("ounces", CanonicalUnit::Oz);
        map.insert("lb", CanonicalUnit::Lb);
        map.insert("lbs", CanonicalUnit::Lb);
        map.insert("pound", CanonicalUnit::Lb);
        map.insert("pounds", CanonicalUnit::Lb);

        // Count
        map.insert("piece", CanonicalUnit::Piece);
        map.insert("pieces", CanonicalUnit::Piece);
        map.insert("pc", CanonicalUnit::Piece);
        map.insert("pcs", CanonicalUnit::Piece);
        map.insert("item", CanonicalUnit::Piece);
        map.insert("items", CanonicalUnit::Piece);
        map.insert("dozen", CanonicalUnit::Dozen);
        map.insert("doz", CanonicalUnit::Dozen);

        // Other / imprecise
        map.insert("pinch", CanonicalUnit::Pinch);
        map.insert("pinches", CanonicalUnit::Pinch);
        map.insert("dash", CanonicalUnit::Dash);
        map.insert("dashes", CanonicalUnit::Dash);
        map.insert("bunch", CanonicalUnit::Bunch);
        map.insert("bunches", CanonicalUnit::Bunch);
        map.insert("clove", CanonicalUnit::Clove);
        map.insert("cloves", CanonicalUnit::Clove);
        map.insert("can", CanonicalUnit::Can);
        map.insert("cans", CanonicalUnit::Can);
        map.insert("jar", CanonicalUnit::Jar);
        map.insert("jars", CanonicalUnit::Jar);
        map.insert("sprig", CanonicalUnit::Sprig);
        map.insert("sprigs", CanonicalUnit::Sprig);
        map.insert("to_taste", CanonicalUnit::ToTaste);

        // Two-word tokens the line parser matches before single words. The
        // closed vocabulary has no fluid-ounce member, so these stay open.
        map.insert("fl oz", CanonicalUnit::Other("fl oz".to_string()));
        map.insert("fluid ounce", CanonicalUnit::Other("fl oz".to_string()));
        map.insert("fluid ounces", CanonicalUnit::Other("fl oz".to_string()));

        map
    };
}

/// Look up a raw token in the alias table without the open-vocabulary
/// fallback. Case-insensitive; one trailing period is stripped.
pub fn lookup_unit_alias(token: &str) -> Option<CanonicalUnit> {
    let token = normalize_token(token);
    UNIT_ALIASES.get(token.as_str()).cloned()
}

/// Map raw unit text onto the closed vocabulary; unrecognized tokens pass
/// through as [`CanonicalUnit::Other`].
pub fn canonicalize_unit(token: &str) -> CanonicalUnit {
    let token = normalize_token(token);
    match UNIT_ALIASES.get(token.as_str()) {
        Some(unit) => unit.clone(),
        None => CanonicalUnit::Other(token),
    }
}

fn normalize_token(token: &str) -> String {
    let token = token.trim().to_lowercase();
    match token.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => token,
    }
}

/// Classify a canonical unit.
pub fn kind_of(unit: &CanonicalUnit) -> UnitKind {
    match unit {
        CanonicalUnit::Cup
        | CanonicalUnit::Tbsp
        | CanonicalUnit::Tsp
        | CanonicalUnit::Ml
        | CanonicalUnit::L => UnitKind::Volume,
        CanonicalUnit::G | CanonicalUnit::Kg | CanonicalUnit::Oz | CanonicalUnit::Lb => {
            UnitKind::Weight
        }
        CanonicalUnit::Piece | CanonicalUnit::Dozen => UnitKind::Count,
        _ => UnitKind::Other,
    }
}

// Factor to the kind's base unit, and the base unit itself. Units outside
// the convertible kinds scale by 1 onto themselves.
fn base_factor(unit: &CanonicalUnit) -> (Decimal, CanonicalUnit) {
    match unit {
        CanonicalUnit::Tsp => (TSP_ML, CanonicalUnit::Ml),
        CanonicalUnit::Tbsp => (TBSP_ML, CanonicalUnit::Ml),
        CanonicalUnit::Cup => (CUP_ML, CanonicalUnit::Ml),
        CanonicalUnit::L => (L_ML, CanonicalUnit::Ml),
        CanonicalUnit::Ml => (Decimal::ONE, CanonicalUnit::Ml),
        CanonicalUnit::Oz => (OZ_G, CanonicalUnit::G),
        CanonicalUnit::Lb => (LB_G, CanonicalUnit::G),
        CanonicalUnit::Kg => (KG_G, CanonicalUnit::G),
        CanonicalUnit::G => (Decimal::ONE, CanonicalUnit::G),
        CanonicalUnit::Dozen => (DOZEN_PIECES, CanonicalUnit::Piece),
        other => (Decimal::ONE, other.clone()),
    }
}

/// Convert a quantity to its kind's base unit: `ml` for volume, `g` for
/// weight, `piece` for dozen, identity for everything else.
pub fn to_base(qty: Decimal, unit: &CanonicalUnit) -> (Decimal, CanonicalUnit) {
    let (factor, base) = base_factor(unit);
    (qty * factor, base)
}

/// Convert a base-unit quantity into `target`. Returns `None` when `target`
/// does not scale onto `base_unit`.
pub fn from_base(qty: Decimal, base_unit: &CanonicalUnit, target: &CanonicalUnit) -> Option<Decimal> {
    let (factor, base) = base_factor(target);
    if base != *base_unit {
        return None;
    }
    Some(qty / factor)
}

/// Convert a quantity between units. Supported pairs: identical units,
/// volume↔volume, weight↔weight, and dozen↔piece. Anything else is a normal
/// `None`, not an error.
pub fn convert_quantity(qty: Decimal, from: &CanonicalUnit, to: &CanonicalUnit) -> Option<Decimal> {
    if from == to {
        return Some(qty);
    }

    let dozen_piece_pair = matches!(
        (from, to),
        (CanonicalUnit::Dozen, CanonicalUnit::Piece) | (CanonicalUnit::Piece, CanonicalUnit::Dozen)
    );
    let same_measured_kind = kind_of(from) == kind_of(to)
        && matches!(kind_of(from), UnitKind::Volume | UnitKind::Weight);

    if !same_measured_kind && !dozen_piece_pair {
        return None;
    }

    let (base_qty, base_unit) = to_base(qty, from);
    from_base(base_qty, &base_unit, to)
}

/// Pick the largest display unit whose lower threshold the base quantity
/// meets, per measurement system. Non-volume/weight kinds display as pieces.
pub fn best_display_unit(
    base_qty: Decimal,
    kind: UnitKind,
    system: MeasurementSystem,
) -> (Decimal, CanonicalUnit) {
    let unit = match (kind, system) {
        (UnitKind::Volume, MeasurementSystem::Us) => {
            if base_qty >= CUP_ML {
                CanonicalUnit::Cup
            } else if base_qty >= TBSP_ML {
                CanonicalUnit::Tbsp
            } else {
                CanonicalUnit::Tsp
            }
        }
        (UnitKind::Volume, MeasurementSystem::Metric) => {
            if base_qty >= L_ML {
                CanonicalUnit::L
            } else {
                CanonicalUnit::Ml
            }
        }
        (UnitKind::Weight, MeasurementSystem::Us) => {
            if base_qty >= LB_G {
                CanonicalUnit::Lb
            } else {
                CanonicalUnit::Oz
            }
        }
        (UnitKind::Weight, MeasurementSystem::Metric) => {
            if base_qty >= KG_G {
                CanonicalUnit::Kg
            } else {
                CanonicalUnit::G
            }
        }
        _ => return (base_qty, CanonicalUnit::Piece),
    };

    let (factor, _) = base_factor(&unit);
    (base_qty / factor, unit)
}

/// Render a quantity in the friendliest unit for the given system, e.g.
/// `500 ml` in `us` becomes `"2.11 cup"`.
pub fn format_quantity(qty: Decimal, unit: &CanonicalUnit, system: MeasurementSystem) -> String {
    let kind = kind_of(unit);
    match kind {
        UnitKind::Volume | UnitKind::Weight => {
            let (base_qty, _) = to_base(qty, unit);
            let (display_qty, display_unit) = best_display_unit(base_qty, kind, system);
            format!("{} {}", display_qty.round_dp(2).normalize(), display_unit)
        }
        _ => format!("{} {}", qty.round_dp(2).normalize(), unit),
    }
}

impl CanonicalUnit {
    /// The canonical token for this unit.
    pub fn token(&self) -> &str {
        match self {
            CanonicalUnit::Cup => "cup",
            CanonicalUnit::Tbsp => "tbsp",
            CanonicalUnit::Tsp => "tsp",
            CanonicalUnit::Ml => "ml",
            CanonicalUnit::L => "l",
            CanonicalUnit::G => "g",
            CanonicalUnit::Kg => "kg",
            CanonicalUnit::Oz => "oz",
            CanonicalUnit::Lb => "lb",
            CanonicalUnit::Piece => "piece",
            CanonicalUnit::Dozen => "dozen",
            CanonicalUnit::Pinch => "pinch",
            CanonicalUnit::Dash => "dash",
            CanonicalUnit::Bunch => "bunch",
            CanonicalUnit::Clove => "clove",
            CanonicalUnit::Can => "can",
            CanonicalUnit::Jar => "jar",
            CanonicalUnit::Sprig => "sprig",
            CanonicalUnit::ToTaste => "to_taste",
            CanonicalUnit::Other(raw) => raw,
        }
    }

    /// Kind of this unit, as a method for call-chain convenience.
    pub fn kind(&self) -> UnitKind {
        kind_of(self)
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_aliases() {
        assert_eq!(canonicalize_unit("cups"), CanonicalUnit::Cup);
        assert_eq!(canonicalize_unit("Tbsp."), CanonicalUnit::Tbsp);
        assert_eq!(canonicalize_unit("TEASPOONS"), CanonicalUnit::Tsp);
        assert_eq!(canonicalize_unit("lbs"), CanonicalUnit::Lb);
        assert_eq!(canonicalize_unit("doz"), CanonicalUnit::Dozen);
        assert_eq!(canonicalize_unit("litres"), CanonicalUnit::L);
    }

    #[test]
    fn test_canonicalize_unknown_passes_through() {
        assert_eq!(
            canonicalize_unit("handful"),
            CanonicalUnit::Other("handful".to_string())
        );
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for token in ["cup", "tbsp", "tsp", "ml", "l", "g", "kg", "oz", "lb", "piece", "dozen"] {
            let once = canonicalize_unit(token);
            let twice = canonicalize_unit(once.token());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(kind_of(&CanonicalUnit::Cup), UnitKind::Volume);
        assert_eq!(kind_of(&CanonicalUnit::Kg), UnitKind::Weight);
        assert_eq!(kind_of(&CanonicalUnit::Dozen), UnitKind::Count);
        assert_eq!(kind_of(&CanonicalUnit::Pinch), UnitKind::Other);
        assert_eq!(kind_of(&CanonicalUnit::Other("handful".into())), UnitKind::Other);
    }

    #[test]
    fn test_identity_conversion() {
        for unit in [
            CanonicalUnit::Cup,
            CanonicalUnit::G,
            CanonicalUnit::Piece,
            CanonicalUnit::Pinch,
            CanonicalUnit::Other("handful".into()),
        ] {
            assert_eq!(convert_quantity(dec!(3), &unit, &unit), Some(dec!(3)));
        }
    }

    #[test]
    fn test_volume_conversion() {
        assert_eq!(
            convert_quantity(dec!(2), &CanonicalUnit::Cup, &CanonicalUnit::Ml),
            Some(dec!(473.176))
        );
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::L, &CanonicalUnit::Ml),
            Some(dec!(1000))
        );
        assert_eq!(
            convert_quantity(dec!(3), &CanonicalUnit::Tsp, &CanonicalUnit::Ml),
            Some(dec!(14.787))
        );
    }

    #[test]
    fn test_weight_conversion() {
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Lb, &CanonicalUnit::G),
            Some(dec!(453.592))
        );
        assert_eq!(
            convert_quantity(dec!(2.5), &CanonicalUnit::Kg, &CanonicalUnit::G),
            Some(dec!(2500))
        );
    }

    #[test]
    fn test_dozen_piece_conversion() {
        assert_eq!(
            convert_quantity(dec!(2), &CanonicalUnit::Dozen, &CanonicalUnit::Piece),
            Some(dec!(24))
        );
        assert_eq!(
            convert_quantity(dec!(18), &CanonicalUnit::Piece, &CanonicalUnit::Dozen),
            Some(dec!(1.5))
        );
    }

    #[test]
    fn test_cross_kind_conversion_is_none() {
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Cup, &CanonicalUnit::G),
            None
        );
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Piece, &CanonicalUnit::Ml),
            None
        );
        assert_eq!(
            convert_quantity(dec!(1), &CanonicalUnit::Pinch, &CanonicalUnit::Dash),
            None
        );
    }

    #[test]
    fn test_conversion_round_trip() {
        let q = dec!(3.25);
        let there = convert_quantity(q, &CanonicalUnit::Cup, &CanonicalUnit::Tbsp).unwrap();
        let back = convert_quantity(there, &CanonicalUnit::Tbsp, &CanonicalUnit::Cup).unwrap();
        assert!((back - q).abs() < dec!(0.000001));
    }

    #[test]
    fn test_best_display_unit_us_volume() {
        let (qty, unit) = best_display_unit(dec!(473.176), UnitKind::Volume, MeasurementSystem::Us);
        assert_eq!(unit, CanonicalUnit::Cup);
        assert_eq!(qty, dec!(2));

        let (_, unit) = best_display_unit(dec!(20), UnitKind::Volume, MeasurementSystem::Us);
        assert_eq!(unit, CanonicalUnit::Tbsp);

        let (_, unit) = best_display_unit(dec!(5), UnitKind::Volume, MeasurementSystem::Us);
        assert_eq!(unit, CanonicalUnit::Tsp);
    }

    #[test]
    fn test_best_display_unit_metric() {
        let (qty, unit) = best_display_unit(dec!(1500), UnitKind::Volume, MeasurementSystem::Metric);
        assert_eq!(unit, CanonicalUnit::L);
        assert_eq!(qty, dec!(1.5));

        let (qty, unit) = best_display_unit(dec!(750), UnitKind::Weight, MeasurementSystem::Metric);
        assert_eq!(unit, CanonicalUnit::G);
        assert_eq!(qty, dec!(750));
    }

    #[test]
    fn test_best_display_unit_non_measured_kind() {
        let (qty, unit) = best_display_unit(dec!(4), UnitKind::Count, MeasurementSystem::Us);
        assert_eq!(unit, CanonicalUnit::Piece);
        assert_eq!(qty, dec!(4));
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(
            format_quantity(dec!(500), &CanonicalUnit::Ml, MeasurementSystem::Metric),
            "500 ml"
        );
        assert_eq!(
            format_quantity(dec!(1500), &CanonicalUnit::G, MeasurementSystem::Metric),
            "1.5 kg"
        );
        assert_eq!(
            format_quantity(dec!(3), &CanonicalUnit::Clove, MeasurementSystem::Us),
            "3 clove"
        );
    }

    #[test]
    fn test_two_word_alias_stays_open() {
        assert_eq!(
            lookup_unit_alias("fl oz"),
            Some(CanonicalUnit::Other("fl oz".to_string()))
        );
    }
}
