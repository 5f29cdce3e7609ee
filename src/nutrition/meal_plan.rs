//! Meal-plan grouping
//!
//! Turns raw recommendation rows into items with a definite meal and macro
//! category, then lays them out as a meal × category grid.

use std::collections::BTreeMap;

use crate::models::{Goal, MacroCategory, Meal, MealItem, Recommendation};

/// Meal → category → items. Every cell is present, possibly empty.
pub type MealPlanGrid = BTreeMap<Meal, BTreeMap<MacroCategory, Vec<MealItem>>>;

/// Normalize the rows that belong to `goal`.
///
/// Rows with an unrecognized category are dropped. Rows without a meal are
/// dealt round-robin over the day's meals, separately per category, so each
/// meal gets a share of every macro group. Output is ordered by category,
/// then by file order.
pub fn normalize_recommendations(rows: &[Recommendation], goal: Goal) -> Vec<MealItem> {
    let mut by_category: BTreeMap<MacroCategory, Vec<&Recommendation>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.goal() == goal) {
        if let Some(category) = MacroCategory::classify(&row.category) {
            by_category.entry(category).or_default().push(row);
        }
    }

    let mut items = Vec::new();
    for (category, rows) in by_category {
        let mut next_meal = 0usize;
        for row in rows {
            let meal = match row.meal {
                Some(meal) => meal,
                None => {
                    let meal = Meal::ALL[next_meal % Meal::ALL.len()];
                    next_meal += 1;
                    meal
                }
            };
            items.push(MealItem {
                goal,
                meal,
                category,
                food: row.food.clone(),
                portion: row.portion.clone(),
                grams: row.grams,
                calories: row.calories,
            });
        }
    }
    items
}

/// Group items into the full meal × category grid
pub fn group_by_meal(items: Vec<MealItem>) -> MealPlanGrid {
    let mut grid: MealPlanGrid = Meal::ALL
        .iter()
        .map(|meal| {
            let cells = MacroCategory::ALL.iter().map(|c| (*c, Vec::new())).collect();
            (*meal, cells)
        })
        .collect();

    for item in items {
        if let Some(cell) = grid.get_mut(&item.meal).and_then(|m| m.get_mut(&item.category)) {
            cell.push(item);
        }
    }
    grid
}
