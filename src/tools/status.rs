//! GymPal Status Tool
//!
//! Runtime status of the service plus the usage guide handed to assistants.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::{Profile, Recommendation, Routine, RoutineProgress, User};
use crate::store::{DataStore, LineRecord};

/// Usage guide for AI assistants
pub const GYMPAL_INSTRUCTIONS: &str = r#"
# GymPal Instructions

GymPal keeps users, a questionnaire profile per user, workout routines with
set progress, and nutrition recommendations.

## Users

- `register_user` needs username, email and password. Emails are unique
  (case-insensitive) and so are usernames.
- `login_user` checks email and password and returns `{ id, name, email }`.
- Most other tools accept either the user id or the username.

## Profile (configuración)

`save_profile` takes objetivo, edad, sexo, altura (cm), peso (kg) and
experiencia. Valid values:

- objetivo: "ganar masa muscular", "tonificar", "bajar de peso"
- sexo: "masculino", "femenino"
- experiencia: "principiante", "intermedio", "avanzado"

Saving again replaces the previous answers. `get_profile` also returns the
daily calorie target (`metaCalorias`).

## Routines

- `create_routine` needs username, nombre and at least one exercise with
  nombre, peso, repeticiones and series.
- `update_routine` replaces name, description and exercises and resets
  progress.
- Progress counts completed sets per exercise. Use `change_set` with the
  zero-based exercise index; counters never go below 0 or above `series`.

## Nutrition

- `get_recommendations` lists foods for a goal grouped by meal and macro
  category.
- `get_meal_plan` does the same for a user's saved goal.
- `calculate_intake` sums carbs, protein and fat of catalog foods. Portions
  are 0.25, 0.5, 1, 1.5 or 2. Calories use 4/4/9 kcal per gram.
"#;

/// Runtime status of the GymPal service
#[derive(Debug, Clone, Serialize)]
pub struct GympalStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Data directory and table sizes; `None` when a file does not exist yet
    pub data_dir: String,
    pub files: Vec<FileStatus>,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileStatus {
    pub name: &'static str,
    pub size_bytes: Option<u64>,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    store: DataStore,
}

impl StatusTracker {
    pub fn new(store: DataStore) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            store,
        }
    }

    pub fn get_status(&self) -> GympalStatus {
        let build_info = BuildInfo::current();

        let files = [
            User::FILE,
            Profile::FILE,
            Routine::FILE,
            RoutineProgress::FILE,
            Recommendation::FILE,
        ]
        .into_iter()
        .map(|name| FileStatus {
            name,
            size_bytes: self.store.file_size(name),
        })
        .collect();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        GympalStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            data_dir: self.store.root().display().to_string(),
            files,
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
