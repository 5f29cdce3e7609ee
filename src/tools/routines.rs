//! Routine tools
//!
//! Routine CRUD over `rutinas.txt` and the per-exercise set counters in
//! `progreso.txt`.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{required, MessageResponse};
use crate::error::{ensure_single_field, ensure_storable, ServiceError, ServiceResult};
use crate::models::{Exercise, Numeric, ProgressSummary, Routine, RoutineProgress};
use crate::store::{DataStore, Files};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseInput {
    pub nombre: Option<String>,
    pub peso: Option<Numeric>,
    pub repeticiones: Option<Numeric>,
    pub series: Option<Numeric>,
}

/// Routine body for create and update. `ID` and `username` are only read on
/// create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutineInput {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    pub username: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub ejercicios: Option<Vec<ExerciseInput>>,
}

#[derive(Debug, Serialize)]
pub struct CreateRoutineResponse {
    pub message: String,
    #[serde(rename = "ID")]
    pub id: String,
}

fn routine_not_found() -> ServiceError {
    ServiceError::not_found("Rutina no encontrada.")
}

/// Validate exercises. Missing numbers count as zero; present ones must be
/// valid and non-negative.
fn parse_exercises(inputs: Option<Vec<ExerciseInput>>) -> ServiceResult<Vec<Exercise>> {
    let inputs = inputs.unwrap_or_default();
    if inputs.is_empty() {
        return Err(ServiceError::validation("Debe haber al menos un ejercicio."));
    }

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            let n = i + 1;
            let name = required(&input.nombre).ok_or_else(|| {
                ServiceError::validation(format!("El ejercicio {} debe tener un nombre.", n))
            })?;
            ensure_storable("nombre", name)?;

            let weight = match &input.peso {
                None => 0.0,
                Some(v) => v.as_f64().filter(|w| *w >= 0.0).ok_or_else(|| {
                    ServiceError::validation(format!("El peso del ejercicio {} no es válido.", n))
                })?,
            };
            let reps = match &input.repeticiones {
                None => 0,
                Some(v) => v.as_u32().ok_or_else(|| {
                    ServiceError::validation(format!(
                        "Las repeticiones del ejercicio {} no son válidas.",
                        n
                    ))
                })?,
            };
            let sets = match &input.series {
                None => 0,
                Some(v) => v.as_u32().ok_or_else(|| {
                    ServiceError::validation(format!(
                        "Las series del ejercicio {} no son válidas.",
                        n
                    ))
                })?,
            };

            Ok(Exercise {
                name: name.to_string(),
                weight,
                reps,
                sets,
            })
        })
        .collect()
}

fn parse_header(input: &RoutineInput) -> ServiceResult<(String, String)> {
    let name = required(&input.nombre)
        .ok_or_else(|| ServiceError::validation("El nombre es obligatorio."))?;
    let description = input.descripcion.as_deref().map(str::trim).unwrap_or("");
    ensure_storable("nombre", name)?;
    ensure_single_field("descripcion", description)?;
    Ok((name.to_string(), description.to_string()))
}

pub fn create_routine(store: &DataStore, input: RoutineInput) -> ServiceResult<CreateRoutineResponse> {
    let username = required(&input.username)
        .ok_or_else(|| ServiceError::validation("Falta el nombre de usuario."))?
        .to_string();
    ensure_storable("username", &username)?;
    let (name, description) = parse_header(&input)?;

    let id = match required(&input.id) {
        Some(id) => {
            ensure_storable("ID", id)?;
            id.to_string()
        }
        None => Uuid::new_v4().simple().to_string(),
    };
    let exercises = parse_exercises(input.ejercicios)?;

    store.with_files(|files| {
        if files.load::<Routine>()?.iter().any(|r| r.id == id) {
            return Err(ServiceError::conflict("Ya existe una rutina con ese ID."));
        }
        let routine = Routine {
            id: id.clone(),
            username,
            name,
            description,
            exercises,
        };
        files.append(&routine)?;
        info!(routine_id = %routine.id, username = %routine.username, "routine created");
        Ok(CreateRoutineResponse {
            message: "Rutina creada correctamente".to_string(),
            id,
        })
    })
}

pub fn list_routines(store: &DataStore, username: &str) -> ServiceResult<Vec<Routine>> {
    Ok(store
        .load::<Routine>()?
        .into_iter()
        .filter(|r| r.username == username)
        .collect())
}

fn find_routine(files: &Files<'_>, id: &str) -> ServiceResult<Routine> {
    files
        .load::<Routine>()?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(routine_not_found)
}

pub fn get_routine(store: &DataStore, id: &str) -> ServiceResult<Routine> {
    store.with_files(|files| find_routine(files, id))
}

/// Replace name, description and exercises. Progress starts over.
pub fn update_routine(store: &DataStore, id: &str, input: RoutineInput) -> ServiceResult<Routine> {
    let (name, description) = parse_header(&input)?;
    let exercises = parse_exercises(input.ejercicios)?;

    store.with_files(|files| {
        let mut routines = files.load::<Routine>()?;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(routine_not_found)?;
        routine.name = name;
        routine.description = description;
        routine.exercises = exercises;
        let updated = routine.clone();

        files.rewrite(&routines)?;
        drop_progress(files, id)?;
        info!(routine_id = %id, "routine updated");
        Ok(updated)
    })
}

pub fn delete_routine(store: &DataStore, id: &str) -> ServiceResult<MessageResponse> {
    store.with_files(|files| {
        let mut routines = files.load::<Routine>()?;
        let before = routines.len();
        routines.retain(|r| r.id != id);
        if routines.len() == before {
            return Err(routine_not_found());
        }
        files.rewrite(&routines)?;
        drop_progress(files, id)?;
        info!(routine_id = %id, "routine deleted");
        Ok(MessageResponse::new("Rutina eliminada"))
    })
}

fn drop_progress(files: &Files<'_>, id: &str) -> ServiceResult<()> {
    let mut all = files.load::<RoutineProgress>()?;
    let before = all.len();
    all.retain(|p| p.routine_id != id);
    if all.len() != before {
        files.rewrite(&all)?;
    }
    Ok(())
}

pub fn get_progress(store: &DataStore, id: &str) -> ServiceResult<ProgressSummary> {
    store.with_files(|files| {
        let routine = find_routine(files, id)?;
        let progress = files
            .load::<RoutineProgress>()?
            .into_iter()
            .find(|p| p.routine_id == id)
            .unwrap_or_else(|| RoutineProgress::new(id));
        Ok(progress.summary(&routine))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetChange {
    Increment,
    Decrement,
}

/// Move one exercise's completed-set counter, clamped to `[0, series]`
pub fn change_set(
    store: &DataStore,
    id: &str,
    index: usize,
    change: SetChange,
) -> ServiceResult<ProgressSummary> {
    store.with_files(|files| {
        let routine = find_routine(files, id)?;
        if index >= routine.exercises.len() {
            return Err(ServiceError::validation("Índice de ejercicio inválido."));
        }

        let mut all = files.load::<RoutineProgress>()?;
        let pos = match all.iter().position(|p| p.routine_id == id) {
            Some(pos) => pos,
            None => {
                all.push(RoutineProgress::new(id));
                all.len() - 1
            }
        };

        let progress = &mut all[pos];
        let changed = match change {
            SetChange::Increment => progress.increment(&routine, index),
            SetChange::Decrement => progress.decrement(&routine, index),
        };
        let summary = progress.summary(&routine);
        if changed {
            files.rewrite(&all)?;
        }
        Ok(summary)
    })
}

pub fn reset_progress(store: &DataStore, id: &str) -> ServiceResult<ProgressSummary> {
    store.with_files(|files| {
        let routine = find_routine(files, id)?;
        drop_progress(files, id)?;
        Ok(RoutineProgress::new(id).summary(&routine))
    })
}
