//! Nutrition tools
//!
//! Recommendations from `alimentacion.txt`, the per-user meal plan, and the
//! intake tracker over the built-in food catalog.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::profile::find_profile;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Goal, MealItem, Recommendation};
use crate::nutrition::defaults::default_recommendations;
use crate::nutrition::{
    calculate_intake, calorie_target, group_by_meal, normalize_recommendations, CatalogFood,
    IntakeEntry, IntakeTotals, MealPlanGrid, CATALOG, DEFAULT_CALORIE_TARGET, PORTIONS,
};
use crate::store::DataStore;

#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    #[serde(rename = "objetivo")]
    pub goal: Goal,
    #[serde(rename = "metaCalorias")]
    pub calorie_target: i64,
    #[serde(rename = "comidas")]
    pub meals: MealPlanGrid,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    #[serde(rename = "alimentos")]
    pub foods: &'static [CatalogFood],
    #[serde(rename = "porciones")]
    pub portions: &'static [f64],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeRequest {
    #[serde(alias = "alimentos", default)]
    pub items: Vec<IntakeEntry>,
    #[serde(rename = "metaCalorias")]
    pub calorie_target: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: bool,
    pub rows: usize,
}

fn items_for(store: &DataStore, goal: Goal) -> ServiceResult<Vec<MealItem>> {
    let rows = store.load::<Recommendation>()?;
    Ok(normalize_recommendations(&rows, goal))
}

/// Recommendations for a goal, with meal and category resolved
pub fn recommendations(store: &DataStore, objetivo: &str) -> ServiceResult<Vec<MealItem>> {
    let goal = Goal::from_str(objetivo).unwrap_or_else(|| Goal::canonicalize(objetivo));
    let items = items_for(store, goal)?;
    if items.is_empty() {
        return Err(ServiceError::not_found(
            "No hay recomendaciones para este objetivo",
        ));
    }
    Ok(items)
}

/// The full meal grid for a user's saved goal
pub fn meal_plan(store: &DataStore, key: &str) -> ServiceResult<MealPlanResponse> {
    let profile = store
        .with_files(|files| find_profile(files, key))?
        .ok_or_else(|| ServiceError::not_found("Configuración no encontrada."))?;

    let items = items_for(store, profile.goal)?;
    Ok(MealPlanResponse {
        goal: profile.goal,
        calorie_target: calorie_target(&profile, None).unwrap_or(DEFAULT_CALORIE_TARGET),
        meals: group_by_meal(items),
    })
}

pub fn catalog() -> CatalogResponse {
    CatalogResponse {
        foods: CATALOG,
        portions: &PORTIONS,
    }
}

pub fn calculate(req: IntakeRequest) -> ServiceResult<IntakeTotals> {
    calculate_intake(&req.items, req.calorie_target).map_err(ServiceError::Validation)
}

/// Write the built-in recommendations unless the table already exists
pub fn seed_recommendations(store: &DataStore) -> ServiceResult<SeedResponse> {
    store.with_files(|files| {
        if files.exists::<Recommendation>() {
            let rows = files.load::<Recommendation>()?.len();
            info!(rows, "recommendations already present");
            return Ok(SeedResponse { seeded: false, rows });
        }
        let rows = default_recommendations();
        files.rewrite(&rows)?;
        info!(rows = rows.len(), "seeded recommendations");
        Ok(SeedResponse {
            seeded: true,
            rows: rows.len(),
        })
    })
}
