//! Routine model
//!
//! A routine belongs to a user and lists its exercises. The exercises are
//! kept as a JSON array in the last field of the line. Line breaks in the
//! description are stored escaped.

use serde::{Deserialize, Serialize};

use crate::store::record::{escape_breaks, unescape_breaks};
use crate::store::LineRecord;

/// One exercise inside a routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Kilograms
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "repeticiones")]
    pub reps: u32,
    #[serde(rename = "series")]
    pub sets: u32,
}

/// A workout routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "ID")]
    pub id: String,
    pub username: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "ejercicios")]
    pub exercises: Vec<Exercise>,
}

impl Routine {
    /// Total sets across all exercises
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }
}

impl LineRecord for Routine {
    const FILE: &'static str = "rutinas.txt";
    const FIELDS: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        // Vec<Exercise> has no map keys or non-finite floats, so this cannot fail
        let exercises = serde_json::to_string(&self.exercises).unwrap_or_else(|_| "[]".into());
        vec![
            self.id.clone(),
            self.username.clone(),
            self.name.clone(),
            escape_breaks(&self.description),
            exercises,
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [id, username, name, description, exercises] = fields else {
            return Err(format!("expected 5 fields, got {}", fields.len()));
        };
        let exercises: Vec<Exercise> = serde_json::from_str(exercises)
            .map_err(|e| format!("invalid ejercicios: {}", e))?;
        Ok(Self {
            id: id.to_string(),
            username: username.to_string(),
            name: name.to_string(),
            description: unescape_breaks(description),
            exercises,
        })
    }
}
