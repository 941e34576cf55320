//! # Demand Aggregator / Shopping List Generator
//!
//! Folds the ingredient demand of a set of planned meals into one
//! consolidated shopping list, scaled by servings and netted against
//! current pantry stock.
//!
//! ## Behavior notes
//!
//! - Contributions to the same ingredient are summed arithmetically in the
//!   unit of the first contributing recipe. A later contribution in a
//!   different unit is added as-is, without conversion. This is a known
//!   limitation of the aggregation contract; see the explicit test.
//! - When pantry stock fully covers a need, the item keeps its full
//!   aggregated quantity instead of dropping to zero. The displayed
//!   quantity is informational; `assumed_have` (plus a downstream per-item
//!   user override) is the actual purchase signal.
//!
//! All arithmetic is exact decimal; nothing here rounds intermediates.

use crate::model::{
    AggregatedNeed, BrandPreference, MealPlanEntry, PantryRecord, PantryStatus, ShoppingListItem,
};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::collections::HashSet;

lazy_static! {
    /// Categories the planner assumes the user keeps on hand.
    static ref STAPLE_CATEGORIES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for category in ["staple", "spice", "baking", "condiment", "grain", "oil", "canned"] {
            set.insert(category);
        }
        set
    };

    /// Categories that always need buying fresh.
    static ref PERISHABLE_CATEGORIES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for category in ["produce", "meat", "dairy", "perishable"] {
            set.insert(category);
        }
        set
    };
}

/// Generate a consolidated shopping list for a set of planned meals.
///
/// `pantry_records` must reflect a single consistent read; the caller
/// serializes concurrent mutations of the same record.
pub fn generate_shopping_list(
    meal_plans: &[MealPlanEntry],
    pantry_records: &[PantryRecord],
    brand_preferences: &[BrandPreference],
) -> Vec<ShoppingListItem> {
    let needs = aggregate_needs(meal_plans);
    info!(
        "aggregated {} ingredient needs from {} planned meals",
        needs.len(),
        meal_plans.len()
    );

    needs
        .into_iter()
        .map(|need| resolve_item(need, pantry_records, brand_preferences))
        .collect()
}

/// Sum scaled ingredient demand across planned meals, keyed by ingredient,
/// preserving first-contribution order.
pub fn aggregate_needs(meal_plans: &[MealPlanEntry]) -> Vec<AggregatedNeed> {
    let mut order: Vec<String> = Vec::new();
    let mut needs: HashMap<String, AggregatedNeed> = HashMap::new();

    for plan in meal_plans {
        let recipe = &plan.recipe;
        if recipe.servings == 0 {
            warn!("recipe {} has zero servings, skipping", recipe.id);
            continue;
        }
        let multiplier =
            Decimal::from(plan.servings_planned) / Decimal::from(recipe.servings);
        debug!(
            "recipe {}: planned {} of {} servings, multiplier {}",
            recipe.id, plan.servings_planned, recipe.servings, multiplier
        );

        for ingredient in &recipe.ingredients {
            let scaled = ingredient.quantity * multiplier;
            match needs.get_mut(&ingredient.ingredient_id) {
                Some(need) => {
                    // Same-unit assumption: a different unit here is summed
                    // as-is under the first unit, not converted.
                    need.quantity += scaled;
                    if need.category.is_none() {
                        need.category = ingredient.category.clone();
                    }
                    if need.cost_per_unit.is_none() {
                        need.cost_per_unit = ingredient.estimated_cost_per_unit;
                    }
                    if !need.recipe_ids.contains(&recipe.id) {
                        need.recipe_ids.push(recipe.id.clone());
                    }
                }
                None => {
                    order.push(ingredient.ingredient_id.clone());
                    needs.insert(
                        ingredient.ingredient_id.clone(),
                        AggregatedNeed {
                            ingredient_id: ingredient.ingredient_id.clone(),
                            quantity: scaled,
                            unit: ingredient.unit.clone(),
                            category: ingredient.category.clone(),
                            cost_per_unit: ingredient.estimated_cost_per_unit,
                            recipe_ids: vec![recipe.id.clone()],
                        },
                    );
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| needs.remove(&id))
        .collect()
}

/// Exact sum of all non-null item costs.
pub fn total_estimated_cost(items: &[ShoppingListItem]) -> Decimal {
    items.iter().filter_map(|item| item.estimated_cost).sum()
}

// Net one aggregated need against pantry stock and category defaults.
fn resolve_item(
    need: AggregatedNeed,
    pantry_records: &[PantryRecord],
    brand_preferences: &[BrandPreference],
) -> ShoppingListItem {
    let latest_any = latest_record(pantry_records, &need.ingredient_id, false);
    let latest_usable = latest_record(pantry_records, &need.ingredient_id, true);

    // Deduction happens in the pantry's stored unit, same-unit assumption.
    let needed = match latest_usable {
        Some(record) => (need.quantity - record.quantity).max(Decimal::ZERO),
        None => need.quantity,
    };

    let mut assumed_have = default_assumed_have(need.category.as_deref());
    if matches!(latest_any, Some(r) if r.status == PantryStatus::Depleted) {
        // An explicitly depleted pantry record outranks any category default.
        assumed_have = false;
    }

    // Fully satisfied needs keep the full aggregated quantity for display.
    let quantity = if needed > Decimal::ZERO {
        needed
    } else {
        need.quantity
    };

    let estimated_cost = if needed > Decimal::ZERO {
        need.cost_per_unit.map(|cost| needed * cost)
    } else {
        None
    };

    let preferred_brand = brand_preferences
        .iter()
        .find(|pref| pref.ingredient_id == need.ingredient_id)
        .map(|pref| pref.brand.clone());

    debug!(
        "{}: aggregated {}, needed {}, assumed_have {}",
        need.ingredient_id, need.quantity, needed, assumed_have
    );

    ShoppingListItem {
        ingredient_id: need.ingredient_id,
        quantity,
        unit: need.unit,
        assumed_have,
        estimated_cost,
        recipe_ids: need.recipe_ids,
        preferred_brand,
    }
}

fn latest_record<'a>(
    records: &'a [PantryRecord],
    ingredient_id: &str,
    exclude_depleted: bool,
) -> Option<&'a PantryRecord> {
    records
        .iter()
        .filter(|r| r.ingredient_id == ingredient_id)
        .filter(|r| !exclude_depleted || r.status != PantryStatus::Depleted)
        .max_by_key(|r| r.updated_at)
}

// Staples default to assumed-on-hand; perishables and everything else need
// buying. Staple wins only by explicit category match.
fn default_assumed_have(category: Option<&str>) -> bool {
    let category = match category {
        Some(c) => c.to_lowercase(),
        None => return false,
    };
    if STAPLE_CATEGORIES.contains(category.as_str()) {
        true
    } else if PERISHABLE_CATEGORIES.contains(category.as_str()) {
        false
    } else {
        false
    }
}
