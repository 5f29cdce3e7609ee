//! Intake tracker
//!
//! A fixed catalog of everyday foods, each counted in units of a known gram
//! weight. Grams per macro group are totalled and converted to calories at
//! 4/4/9 kcal per gram.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::MacroCategory::{Carbs as C, HealthyFats as G, Protein as P};
use crate::models::{MacroCategory, Meal};

/// Target shown by the tracker when the caller has none
pub const TRACKER_CALORIE_TARGET: f64 = 2540.0;

/// Portion multipliers, in the order the tracker cycles through them
pub const PORTIONS: [f64; 5] = [0.25, 0.5, 1.0, 1.5, 2.0];

const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogFood {
    #[serde(rename = "nombre")]
    pub name: &'static str,
    #[serde(rename = "grupo")]
    pub category: MacroCategory,
    /// Macro grams per unit
    #[serde(rename = "gramos")]
    pub grams: f64,
    #[serde(rename = "icono")]
    pub icon: &'static str,
}

const fn food(
    name: &'static str,
    category: MacroCategory,
    grams: f64,
    icon: &'static str,
) -> CatalogFood {
    CatalogFood {
        name,
        category,
        grams,
        icon,
    }
}

pub const CATALOG: &[CatalogFood] = &[
    food("Pan", C, 30.0, "🍞"),
    food("Arroz", C, 50.0, "🍚"),
    food("Papa", C, 40.0, "🥔"),
    food("Fideos", C, 35.0, "🍝"),
    food("Cereal", C, 25.0, "🥣"),
    food("Pan Integral", C, 28.0, "🍞"),
    food("Quinoa", C, 40.0, "🍲"),
    food("Pollo", P, 25.0, "🍗"),
    food("Huevo", P, 10.0, "🥚"),
    food("Tofu", P, 15.0, "🍛"),
    food("Pescado", P, 20.0, "🐟"),
    food("Carne", P, 30.0, "🥩"),
    food("Queso", P, 20.0, "🧀"),
    food("Lentejas", P, 25.0, "🥣"),
    food("Palta", G, 15.0, "🥑"),
    food("Aceite", G, 10.0, "🧴"),
    food("Maní", G, 20.0, "🥜"),
    food("Nueces", G, 15.0, "🌰"),
    food("Mantequilla", G, 12.0, "🧈"),
    food("Semillas de Chía", G, 15.0, "🌱"),
    food("Aceitunas", G, 12.0, "🫒"),
];

/// Look up a catalog food by name, ignoring case
pub fn find_food(name: &str) -> Option<&'static CatalogFood> {
    let needle = name.trim().to_lowercase();
    CATALOG.iter().find(|f| f.name.to_lowercase() == needle)
}

/// The portion after `current`. Unknown portions restart the cycle.
pub fn next_portion(current: f64) -> f64 {
    let next = PORTIONS
        .iter()
        .position(|p| (p - current).abs() < f64::EPSILON)
        .map_or(0, |i| (i + 1) % PORTIONS.len());
    PORTIONS[next]
}

/// One line of the tracker: `cantidad` units of a food at a portion size
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeEntry {
    #[serde(rename = "comida", deserialize_with = "meal_name")]
    pub meal: Meal,
    #[serde(rename = "alimento")]
    pub food: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "porcion", default)]
    pub portion: Option<f64>,
}

// Meal names are matched the same way everywhere: any case, English aliases
fn meal_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Meal, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Meal::from_str(&raw).ok_or_else(|| D::Error::custom(format!("comida desconocida '{}'", raw)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    #[serde(rename = "carbohidratos")]
    pub carbs: f64,
    #[serde(rename = "proteinas")]
    pub protein: f64,
    #[serde(rename = "grasas")]
    pub fat: f64,
    #[serde(rename = "calorias")]
    pub calories: f64,
}

impl MacroTotals {
    fn add_grams(&mut self, category: MacroCategory, grams: f64) {
        match category {
            MacroCategory::Carbs => self.carbs += grams,
            MacroCategory::Protein => self.protein += grams,
            MacroCategory::HealthyFats => self.fat += grams,
        }
        self.calories = self.carbs * KCAL_PER_G_CARBS
            + self.protein * KCAL_PER_G_PROTEIN
            + self.fat * KCAL_PER_G_FAT;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeTotals {
    #[serde(flatten)]
    pub totals: MacroTotals,
    #[serde(rename = "metaCalorias")]
    pub calorie_target: f64,
    /// Share of the target reached, capped at 100
    #[serde(rename = "porcentaje")]
    pub percent: f64,
    #[serde(rename = "porComida")]
    pub by_meal: BTreeMap<Meal, MacroTotals>,
}

/// Total the entries against a calorie target
pub fn calculate_intake(entries: &[IntakeEntry], target: Option<f64>) -> Result<IntakeTotals, String> {
    let calorie_target = target.unwrap_or(TRACKER_CALORIE_TARGET);
    if !(calorie_target.is_finite() && calorie_target > 0.0) {
        return Err("metaCalorias debe ser mayor que 0.".to_string());
    }

    let mut totals = MacroTotals::default();
    let mut by_meal: BTreeMap<Meal, MacroTotals> = BTreeMap::new();

    for entry in entries {
        let food = find_food(&entry.food)
            .ok_or_else(|| format!("Alimento desconocido: {}", entry.food))?;
        let portion = entry.portion.unwrap_or(1.0);
        if !(portion.is_finite() && portion > 0.0) {
            return Err(format!("Porción inválida para {}", food.name));
        }

        let grams = entry.quantity as f64 * portion * food.grams;
        totals.add_grams(food.category, grams);
        by_meal.entry(entry.meal).or_default().add_grams(food.category, grams);
    }

    let percent = (totals.calories / calorie_target * 100.0).min(100.0);
    Ok(IntakeTotals {
        totals,
        calorie_target,
        percent,
        by_meal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(meal: Meal, food: &str, quantity: u32, portion: Option<f64>) -> IntakeEntry {
        IntakeEntry {
            meal,
            food: food.into(),
            quantity,
            portion,
        }
    }

    #[test]
    fn test_catalog_groups() {
        assert_eq!(CATALOG.len(), 21);
        assert_eq!(CATALOG.iter().filter(|f| f.category == MacroCategory::Carbs).count(), 7);
        assert_eq!(find_food("semillas de chía").map(|f| f.grams), Some(15.0));
        assert!(find_food("Pizza").is_none());
    }

    #[test]
    fn test_next_portion_cycles() {
        assert_eq!(next_portion(1.0), 1.5);
        assert_eq!(next_portion(2.0), 0.25);
        assert_eq!(next_portion(0.7), 0.25);
    }

    #[test]
    fn test_calculate_intake() {
        let entries = vec![
            entry(Meal::Desayuno, "Pan", 2, None),        // 60 g carbs
            entry(Meal::Almuerzo, "Pollo", 1, Some(2.0)), // 50 g protein
            entry(Meal::Cena, "Aceite", 1, Some(0.5)),    // 5 g fat
        ];
        let result = calculate_intake(&entries, None).unwrap();
        assert!((result.totals.carbs - 60.0).abs() < 1e-9);
        assert!((result.totals.protein - 50.0).abs() < 1e-9);
        assert!((result.totals.fat - 5.0).abs() < 1e-9);
        // 240 + 200 + 45
        assert!((result.totals.calories - 485.0).abs() < 1e-9);
        assert!((result.by_meal[&Meal::Desayuno].calories - 240.0).abs() < 1e-9);
        assert_eq!(result.calorie_target, TRACKER_CALORIE_TARGET);
    }

    #[test]
    fn test_entry_meal_name_any_case() {
        let entry: IntakeEntry =
            serde_json::from_str(r#"{"comida":"desayuno","alimento":"Pan","cantidad":1}"#).unwrap();
        assert_eq!(entry.meal, Meal::Desayuno);
        let entry: IntakeEntry =
            serde_json::from_str(r#"{"comida":"Cena","alimento":"Pan","cantidad":1}"#).unwrap();
        assert_eq!(entry.meal, Meal::Cena);
        assert!(serde_json::from_str::<IntakeEntry>(
            r#"{"comida":"brunch","alimento":"Pan","cantidad":1}"#
        )
        .is_err());
    }

    #[test]
    fn test_percent_capped() {
        let entries = vec![entry(Meal::Cena, "Aceite", 100, Some(2.0))];
        let result = calculate_intake(&entries, Some(1000.0)).unwrap();
        assert_eq!(result.percent, 100.0);
    }

    #[test]
    fn test_rejects_unknown_food_and_bad_portion() {
        assert!(calculate_intake(&[entry(Meal::Cena, "Pizza", 1, None)], None).is_err());
        assert!(calculate_intake(&[entry(Meal::Cena, "Pan", 1, Some(0.0))], None).is_err());
        assert!(calculate_intake(&[], Some(0.0)).is_err());
    }
}
