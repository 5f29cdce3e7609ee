//! Routine progress
//!
//! Completed-set counters for each exercise of a routine, stored in
//! `progreso.txt` as `routine_id|c0,c1,...`.

use serde::Serialize;

use super::routine::Routine;
use crate::store::record::parse_field;
use crate::store::LineRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct RoutineProgress {
    pub routine_id: String,
    pub completed: Vec<u32>,
}

/// Progress of one exercise
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseProgress {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "completadas")]
    pub completed: u32,
    #[serde(rename = "series")]
    pub sets: u32,
    #[serde(rename = "fraccion")]
    pub fraction: f64,
}

/// Progress of a whole routine
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    #[serde(rename = "ID")]
    pub routine_id: String,
    #[serde(rename = "ejercicios")]
    pub exercises: Vec<ExerciseProgress>,
    #[serde(rename = "completadas")]
    pub completed: u32,
    pub total: u32,
    #[serde(rename = "fraccion")]
    pub fraction: f64,
}

fn fraction(done: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    }
}

impl RoutineProgress {
    pub fn new(routine_id: &str) -> Self {
        Self {
            routine_id: routine_id.to_string(),
            completed: Vec::new(),
        }
    }

    /// Completed sets for an exercise, clamped to what the routine allows
    pub fn completed_for(&self, routine: &Routine, index: usize) -> u32 {
        let sets = routine.exercises.get(index).map_or(0, |e| e.sets);
        self.completed.get(index).copied().unwrap_or(0).min(sets)
    }

    /// Align the counters with the routine's exercise list
    fn fit(&mut self, routine: &Routine) {
        self.completed.resize(routine.exercises.len(), 0);
        for (count, exercise) in self.completed.iter_mut().zip(&routine.exercises) {
            *count = (*count).min(exercise.sets);
        }
    }

    /// Add one completed set. Returns false when the exercise is already done.
    /// `index` must be a valid exercise index.
    pub fn increment(&mut self, routine: &Routine, index: usize) -> bool {
        self.fit(routine);
        let sets = routine.exercises[index].sets;
        let count = &mut self.completed[index];
        if *count >= sets {
            return false;
        }
        *count += 1;
        true
    }

    /// Remove one completed set. Returns false when nothing was completed.
    /// `index` must be a valid exercise index.
    pub fn decrement(&mut self, routine: &Routine, index: usize) -> bool {
        self.fit(routine);
        let count = &mut self.completed[index];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn summary(&self, routine: &Routine) -> ProgressSummary {
        let exercises: Vec<ExerciseProgress> = routine
            .exercises
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let completed = self.completed_for(routine, i);
                ExerciseProgress {
                    name: e.name.clone(),
                    completed,
                    sets: e.sets,
                    fraction: fraction(completed, e.sets),
                }
            })
            .collect();

        let completed = exercises.iter().map(|e| e.completed).sum();
        let total = routine.total_sets();

        ProgressSummary {
            routine_id: routine.id.clone(),
            exercises,
            completed,
            total,
            fraction: fraction(completed, total),
        }
    }
}

impl LineRecord for RoutineProgress {
    const FILE: &'static str = "progreso.txt";
    const FIELDS: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        let counts: Vec<String> = self.completed.iter().map(u32::to_string).collect();
        vec![self.routine_id.clone(), counts.join(",")]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [routine_id, counts] = fields else {
            return Err(format!("expected 2 fields, got {}", fields.len()));
        };
        let completed = counts
            .split(',')
            .filter(|c| !c.trim().is_empty())
            .map(|c| parse_field("completadas", c))
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(Self {
            routine_id: routine_id.to_string(),
            completed,
        })
    }
}
