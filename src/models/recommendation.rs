//! Nutrition recommendation model
//!
//! Rows of `alimentacion.txt`:
//! `objetivo|comida|categoria|alimento|porcion|gramos|calorias`.
//! `comida` may be empty and `categoria` is free text; both are normalized
//! before they reach the client.

use serde::{Deserialize, Serialize};

use super::profile::Goal;
use crate::store::record::parse_field;
use crate::store::LineRecord;

/// Meal of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Meal {
    Desayuno,
    Almuerzo,
    Merienda,
    Cena,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Desayuno, Meal::Almuerzo, Meal::Merienda, Meal::Cena];

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Desayuno => "Desayuno",
            Meal::Almuerzo => "Almuerzo",
            Meal::Merienda => "Merienda",
            Meal::Cena => "Cena",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desayuno" | "breakfast" => Some(Meal::Desayuno),
            "almuerzo" | "comida" | "lunch" => Some(Meal::Almuerzo),
            "merienda" | "snack" => Some(Meal::Merienda),
            "cena" | "dinner" => Some(Meal::Cena),
            _ => None,
        }
    }
}

/// Macronutrient category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MacroCategory {
    #[serde(rename = "carbohidratos")]
    Carbs,
    #[serde(rename = "proteinas")]
    Protein,
    #[serde(rename = "grasas saludables")]
    HealthyFats,
}

impl MacroCategory {
    pub const ALL: [MacroCategory; 3] = [
        MacroCategory::Carbs,
        MacroCategory::Protein,
        MacroCategory::HealthyFats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MacroCategory::Carbs => "carbohidratos",
            MacroCategory::Protein => "proteinas",
            MacroCategory::HealthyFats => "grasas saludables",
        }
    }

    /// Classify free-form category text
    pub fn classify(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.starts_with("carb") {
            Some(MacroCategory::Carbs)
        } else if s.starts_with("prot") {
            Some(MacroCategory::Protein)
        } else if s.contains("grasa") {
            Some(MacroCategory::HealthyFats)
        } else {
            None
        }
    }
}

/// A stored recommendation row
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub goal: String,
    pub meal: Option<Meal>,
    pub category: String,
    pub food: String,
    pub portion: String,
    pub grams: f64,
    pub calories: f64,
}

impl Recommendation {
    pub fn goal(&self) -> Goal {
        Goal::from_str(&self.goal).unwrap_or_else(|| Goal::canonicalize(&self.goal))
    }
}

/// A recommendation with its meal and category resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealItem {
    #[serde(rename = "objetivo")]
    pub goal: Goal,
    #[serde(rename = "comida")]
    pub meal: Meal,
    #[serde(rename = "categoria")]
    pub category: MacroCategory,
    #[serde(rename = "alimento")]
    pub food: String,
    #[serde(rename = "porcion")]
    pub portion: String,
    #[serde(rename = "gramos")]
    pub grams: f64,
    #[serde(rename = "calorias")]
    pub calories: f64,
}

impl LineRecord for Recommendation {
    const FILE: &'static str = "alimentacion.txt";
    const FIELDS: usize = 7;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.goal.clone(),
            self.meal.map(|m| m.as_str().to_string()).unwrap_or_default(),
            self.category.clone(),
            self.food.clone(),
            self.portion.clone(),
            self.grams.to_string(),
            self.calories.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [goal, meal, category, food, portion, grams, calories] = fields else {
            return Err(format!("expected 7 fields, got {}", fields.len()));
        };
        Ok(Self {
            goal: goal.trim().to_string(),
            meal: Meal::from_str(meal),
            category: category.trim().to_string(),
            food: food.trim().to_string(),
            portion: portion.trim().to_string(),
            grams: parse_field("gramos", grams)?,
            calories: parse_field("calorias", calories)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_category() {
        assert_eq!(MacroCategory::classify("Carbohidratos"), Some(MacroCategory::Carbs));
        assert_eq!(MacroCategory::classify("carbs"), Some(MacroCategory::Carbs));
        assert_eq!(MacroCategory::classify(" Proteínas"), Some(MacroCategory::Protein));
        assert_eq!(MacroCategory::classify("Grasas saludables"), Some(MacroCategory::HealthyFats));
        assert_eq!(MacroCategory::classify("fibra"), None);
    }

    #[test]
    fn test_empty_meal_field() {
        let row = Recommendation::from_fields(&[
            "tonificar", "", "proteinas", "Pollo", "1 filete", "150", "248",
        ])
        .unwrap();
        assert_eq!(row.meal, None);
        assert_eq!(row.goal(), Goal::Tone);
        assert_eq!(row.to_fields()[1], "");
    }

    #[test]
    fn test_meal_item_json() {
        let item = MealItem {
            goal: Goal::LoseWeight,
            meal: Meal::Cena,
            category: MacroCategory::HealthyFats,
            food: "Palta".into(),
            portion: "1/2 unidad".into(),
            grams: 70.0,
            calories: 112.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["comida"], "Cena");
        assert_eq!(json["categoria"], "grasas saludables");
        assert_eq!(json["objetivo"], "bajar de peso");
    }
}
