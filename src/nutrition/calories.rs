//! Daily calorie target
//!
//! Mifflin-St Jeor resting energy, scaled by activity and shifted by goal.

use serde::{Deserialize, Serialize};

use crate::models::{Goal, Profile, Sex};

/// Used when a profile has no usable body measurements
pub const DEFAULT_CALORIE_TARGET: i64 = 2000;

pub const GAIN_SURPLUS_KCAL: f64 = 300.0;
pub const LOSS_DEFICIT_KCAL: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentaria,
    Ligera,
    Moderada,
    Alta,
}

impl ActivityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentaria => 1.2,
            ActivityLevel::Ligera => 1.375,
            ActivityLevel::Moderada => 1.55,
            ActivityLevel::Alta => 1.725,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentaria" | "sedentario" | "sedentary" => Some(ActivityLevel::Sedentaria),
            "ligera" | "light" => Some(ActivityLevel::Ligera),
            "moderada" | "moderate" => Some(ActivityLevel::Moderada),
            "alta" | "high" => Some(ActivityLevel::Alta),
            _ => None,
        }
    }
}

/// Basal metabolic rate in kcal/day
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let s = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + s
}

/// Rounded daily target, or `None` when a measurement is missing
pub fn calorie_target(profile: &Profile, activity: Option<ActivityLevel>) -> Option<i64> {
    if profile.weight_kg <= 0.0 || profile.height_cm <= 0.0 || profile.age == 0 {
        return None;
    }

    let bmr = basal_metabolic_rate(profile.weight_kg, profile.height_cm, profile.age, profile.sex);
    let tdee = bmr * activity.unwrap_or_default().factor();
    let target = match profile.goal {
        Goal::GainMuscle => tdee + GAIN_SURPLUS_KCAL,
        Goal::LoseWeight => tdee - LOSS_DEFICIT_KCAL,
        Goal::Tone => tdee,
    };
    Some((target.round() as i64).max(0))
}
