//! Profile model
//!
//! The questionnaire answers a user gives after registering. One line per
//! username in `configuracion.txt`.

use serde::{Deserialize, Serialize};

use crate::store::record::parse_field;
use crate::store::LineRecord;

/// Fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "ganar masa muscular")]
    GainMuscle,
    #[serde(rename = "tonificar")]
    Tone,
    #[serde(rename = "bajar de peso")]
    LoseWeight,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::GainMuscle, Goal::Tone, Goal::LoseWeight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::GainMuscle => "ganar masa muscular",
            Goal::Tone => "tonificar",
            Goal::LoseWeight => "bajar de peso",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ganar masa muscular" | "ganar musculo" | "ganar músculo" | "gain_muscle" => {
                Some(Goal::GainMuscle)
            }
            "tonificar" | "tone" => Some(Goal::Tone),
            "bajar de peso" | "perder peso" | "lose_weight" => Some(Goal::LoseWeight),
            _ => None,
        }
    }

    /// Map free text onto a goal. Anything that is neither losing nor
    /// gaining is toning.
    pub fn canonicalize(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("bajar") || lower.contains("perder") {
            Goal::LoseWeight
        } else if lower.contains("ganar") {
            Goal::GainMuscle
        } else {
            Goal::Tone
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "masculino")]
    Male,
    #[serde(rename = "femenino")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "masculino",
            Sex::Female => "femenino",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "masculino" | "m" | "hombre" | "male" => Some(Sex::Male),
            "femenino" | "f" | "mujer" | "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Training experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[serde(rename = "principiante")]
    Beginner,
    #[serde(rename = "intermedio")]
    Intermediate,
    #[serde(rename = "avanzado")]
    Advanced,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "principiante",
            Experience::Intermediate => "intermedio",
            Experience::Advanced => "avanzado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "principiante" | "beginner" => Some(Experience::Beginner),
            "intermedio" | "intermediate" => Some(Experience::Intermediate),
            "avanzado" | "advanced" => Some(Experience::Advanced),
            _ => None,
        }
    }
}

/// A user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(rename = "objetivo")]
    pub goal: Goal,
    #[serde(rename = "edad")]
    pub age: u32,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    /// Centimetres
    #[serde(rename = "altura")]
    pub height_cm: f64,
    /// Kilograms
    #[serde(rename = "peso")]
    pub weight_kg: f64,
    #[serde(rename = "experiencia")]
    pub experience: Experience,
}

impl LineRecord for Profile {
    const FILE: &'static str = "configuracion.txt";
    const FIELDS: usize = 7;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.goal.as_str().to_string(),
            self.age.to_string(),
            self.sex.as_str().to_string(),
            self.height_cm.to_string(),
            self.weight_kg.to_string(),
            self.experience.as_str().to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [username, goal, age, sex, height, weight, experience] = fields else {
            return Err(format!("expected 7 fields, got {}", fields.len()));
        };
        Ok(Self {
            username: username.to_string(),
            goal: Goal::from_str(goal).unwrap_or_else(|| Goal::canonicalize(goal)),
            age: parse_field("edad", age)?,
            sex: Sex::from_str(sex).ok_or_else(|| format!("invalid sexo '{}'", sex))?,
            height_cm: parse_field("altura", height)?,
            weight_kg: parse_field("peso", weight)?,
            experience: Experience::from_str(experience)
                .ok_or_else(|| format!("invalid experiencia '{}'", experience))?,
        })
    }
}
