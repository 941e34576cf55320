//! # Shared Data Model
//!
//! Structured types flowing between the parsing, aggregation, and pantry
//! modules, and across the persistence boundary of the consuming system.
//! All types serialize with serde; quantities and costs are exact decimals.

use crate::units::CanonicalUnit;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient line parsed out of free text.
///
/// Produced fresh per input line and immutable afterwards. Absence of a
/// quantity or unit is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredientLine {
    /// Parsed quantity, when the line carried a recognizable numeric token.
    pub quantity: Option<Decimal>,
    /// Canonicalized unit, when one was recognized or implied.
    pub unit: Option<CanonicalUnit>,
    /// Lowercased, trimmed ingredient name.
    pub name: String,
    /// Parenthetical or post-comma free text ("sifted", "room temperature").
    pub notes: Option<String>,
}

/// One ingredient requirement inside a recipe, already canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Stable ingredient identity, owned by the persistence layer.
    pub ingredient_id: String,
    pub quantity: Decimal,
    pub unit: CanonicalUnit,
    /// Category string driving the staple/perishable assumed-have default.
    pub category: Option<String>,
    /// Cost per one `unit`, when known.
    pub estimated_cost_per_unit: Option<Decimal>,
}

/// A recipe reduced to what demand planning needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    /// Servings the ingredient quantities are written for. Must be positive;
    /// the caller validates before invoking this core.
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
}

/// A planned meal: a recipe scaled to the servings actually wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub recipe: Recipe,
    pub servings_planned: u32,
}

/// Stock level classification of a pantry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PantryStatus {
    Stocked,
    RunningLow,
    Depleted,
}

/// A pantry stock record, owned externally. The aggregator reads it; the
/// post-cook deduction returns updated copies for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryRecord {
    pub ingredient_id: String,
    pub quantity: Decimal,
    pub unit: CanonicalUnit,
    pub status: PantryStatus,
    pub updated_at: DateTime<Utc>,
}

/// Optional brand association attached to shopping list items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPreference {
    pub ingredient_id: String,
    pub brand: String,
}

/// Running per-ingredient total while aggregating across planned meals.
///
/// The unit is fixed by the first contributing recipe; later contributions
/// in a different unit are summed as-is, without conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedNeed {
    pub ingredient_id: String,
    pub quantity: Decimal,
    pub unit: CanonicalUnit,
    pub category: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    /// Contributing recipe ids, deduplicated, in first-contribution order.
    pub recipe_ids: Vec<String>,
}

/// One consolidated entry of a generated shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub ingredient_id: String,
    /// Post-pantry-deduction quantity when stock only partly covers the
    /// need; the full aggregated quantity when stock covers it entirely.
    /// Informational, not a purchase gate.
    pub quantity: Decimal,
    pub unit: CanonicalUnit,
    /// Planning hint: the user probably already has this (staples). The
    /// purchase decision also honors a downstream per-item user override.
    pub assumed_have: bool,
    /// `needed × cost_per_unit`, only when something actually needs buying.
    pub estimated_cost: Option<Decimal>,
    pub recipe_ids: Vec<String>,
    pub preferred_brand: Option<String>,
}

impl ParsedIngredientLine {
    /// An empty parse result, used for blank input.
    pub fn empty() -> Self {
        Self {
            quantity: None,
            unit: None,
            name: String::new(),
            notes: None,
        }
    }
}

impl Recipe {
    pub fn new(id: impl Into<String>, servings: u32) -> Self {
        Self {
            id: id.into(),
            servings,
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

impl RecipeIngredient {
    pub fn new(ingredient_id: impl Into<String>, quantity: Decimal, unit: CanonicalUnit) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            quantity,
            unit,
            category: None,
            estimated_cost_per_unit: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_cost_per_unit(mut self, cost: Decimal) -> Self {
        self.estimated_cost_per_unit = Some(cost);
        self
    }
}

impl fmt::Display for ParsedIngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qty) = self.quantity {
            write!(f, "{} ", qty.normalize())?;
        }
        if let Some(unit) = &self.unit {
            write!(f, "{} ", unit)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(notes) = &self.notes {
            write!(f, " ({})", notes)?;
        }
        Ok(())
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.quantity.normalize(),
            self.unit,
            self.ingredient_id
        )?;
        if let Some(brand) = &self.preferred_brand {
            write!(f, " [{}]", brand)?;
        }
        if self.assumed_have {
            write!(f, " (assumed on hand)")?;
        }
        Ok(())
    }
}
