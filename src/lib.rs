//! # Pantry Planner Core
//!
//! Parses free-text recipe ingredient lines into structured quantities and
//! canonical units, aggregates ingredient demand across planned meals, and
//! nets that demand against pantry stock into a shopping list.
//!
//! Pipeline: text parsing → unit canonicalization/conversion → cross-recipe
//! aggregation → pantry-aware demand planning.
//!
//! All parsing is pure and synchronous; the two pantry-facing operations
//! return updated copies and leave persistence to the caller. Quantities and
//! costs are exact decimals throughout.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_planner::parse_ingredient_string;
//! use pantry_planner::units::CanonicalUnit;
//! use rust_decimal_macros::dec;
//!
//! let line = parse_ingredient_string("2-3 cloves garlic, minced");
//! assert_eq!(line.quantity, Some(dec!(3)));
//! assert_eq!(line.unit, Some(CanonicalUnit::Clove));
//! assert_eq!(line.name, "garlic");
//! ```

pub mod ingredient_parser;
pub mod model;
pub mod normalizer;
pub mod pantry;
pub mod quantity;
pub mod shopping_list;
pub mod units;

pub use ingredient_parser::{parse_ingredient_list, parse_ingredient_string, ParserConfig};
pub use model::{
    AggregatedNeed, BrandPreference, MealPlanEntry, PantryRecord, PantryStatus,
    ParsedIngredientLine, Recipe, RecipeIngredient, ShoppingListItem,
};
pub use normalizer::normalize_ingredient_name;
pub use pantry::deduct_pantry_for_cooking;
pub use quantity::parse_quantity;
pub use shopping_list::{generate_shopping_list, total_estimated_cost};
pub use units::{
    best_display_unit, canonicalize_unit, convert_quantity, format_quantity, CanonicalUnit,
    MeasurementSystem, UnitKind,
};
