//! # Post-Cook Pantry Deduction
//!
//! After a recipe is actually cooked, subtracts the consumed ingredient
//! quantities from pantry stock, converting through base units where the
//! units are compatible and falling back to naive subtraction where not.
//!
//! The function is pure: it returns updated copies of the affected records
//! and the caller persists them, ideally inside one all-or-nothing
//! transaction so a partial failure never leaves stock half-updated.

use crate::model::{PantryRecord, PantryStatus, Recipe};
use crate::units::{to_base, CanonicalUnit};
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

// Below this fraction of the pre-deduction quantity, stock is running low.
const RUNNING_LOW_RATIO: Decimal = dec!(0.25);

/// Deduct the quantities consumed by cooking `servings_cooked` servings of
/// `recipe` from pantry stock. Returns updated copies of every record that
/// changed; records without a matching recipe ingredient are untouched.
pub fn deduct_pantry_for_cooking(
    recipe: &Recipe,
    servings_cooked: u32,
    pantry_records: &[PantryRecord],
) -> Vec<PantryRecord> {
    if recipe.servings == 0 {
        warn!("recipe {} has zero servings, nothing deducted", recipe.id);
        return Vec::new();
    }
    let multiplier = Decimal::from(servings_cooked) / Decimal::from(recipe.servings);

    // Working copies keyed by ingredient, so a recipe listing the same
    // ingredient twice deducts twice.
    let mut updated: HashMap<String, PantryRecord> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for ingredient in &recipe.ingredients {
        let scaled = ingredient.quantity * multiplier;

        let current = match updated.get(&ingredient.ingredient_id) {
            Some(record) => record.clone(),
            None => match latest_record(pantry_records, &ingredient.ingredient_id) {
                Some(record) => record.clone(),
                None => {
                    debug!("no pantry record for {}, skipping", ingredient.ingredient_id);
                    continue;
                }
            },
        };

        let new_quantity = subtract(scaled, &ingredient.unit, &current);
        let status = recompute_status(current.quantity, new_quantity);
        debug!(
            "{}: {} {} - {} {} -> {} ({:?})",
            ingredient.ingredient_id,
            current.quantity,
            current.unit,
            scaled,
            ingredient.unit,
            new_quantity,
            status
        );

        if !updated.contains_key(&ingredient.ingredient_id) {
            order.push(ingredient.ingredient_id.clone());
        }
        updated.insert(
            ingredient.ingredient_id.clone(),
            PantryRecord {
                quantity: new_quantity,
                status,
                updated_at: Utc::now(),
                ..current
            },
        );
    }

    order
        .into_iter()
        .filter_map(|id| updated.remove(&id))
        .collect()
}

// Subtract a consumed quantity from a pantry record, in base units when both
// sides reduce to the same base, otherwise naively in raw units. The result
// stays in the pantry record's original unit and never goes below zero.
fn subtract(consumed: Decimal, consumed_unit: &CanonicalUnit, record: &PantryRecord) -> Decimal {
    let (consumed_base, consumed_base_unit) = to_base(consumed, consumed_unit);
    let (pantry_base, pantry_base_unit) = to_base(record.quantity, &record.unit);

    if consumed_base_unit == pantry_base_unit {
        if pantry_base.is_zero() {
            return Decimal::ZERO;
        }
        let new_base = (pantry_base - consumed_base).max(Decimal::ZERO);
        // Back-convert through the record's own quantity ratio rather than
        // re-deriving from the unit table.
        new_base * (record.quantity / pantry_base)
    } else {
        (record.quantity - consumed).max(Decimal::ZERO)
    }
}

fn recompute_status(previous: Decimal, new_quantity: Decimal) -> PantryStatus {
    if new_quantity <= Decimal::ZERO {
        PantryStatus::Depleted
    } else if new_quantity < previous * RUNNING_LOW_RATIO {
        PantryStatus::RunningLow
    } else {
        PantryStatus::Stocked
    }
}

fn latest_record<'a>(records: &'a [PantryRecord], ingredient_id: &str) -> Option<&'a PantryRecord> {
    records
        .iter()
        .filter(|r| r.ingredient_id == ingredient_id)
        .max_by_key(|r| r.updated_at)
}
