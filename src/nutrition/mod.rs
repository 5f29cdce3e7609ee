//! Nutrition module
//!
//! Calorie targets, meal-plan grouping and the intake tracker.

pub mod calories;
pub mod defaults;
pub mod meal_plan;
pub mod tracker;

pub use calories::{calorie_target, ActivityLevel, DEFAULT_CALORIE_TARGET};
pub use meal_plan::{group_by_meal, normalize_recommendations, MealPlanGrid};
pub use tracker::{
    calculate_intake, find_food, next_portion, CatalogFood, IntakeEntry, IntakeTotals,
    MacroTotals, CATALOG, PORTIONS, TRACKER_CALORIE_TARGET,
};
