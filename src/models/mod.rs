//! Data models
//!
//! Rust structs for the records kept in the flat files, plus the JSON shapes
//! the mobile client exchanges.

mod lenient;
mod profile;
mod progress;
mod recommendation;
mod routine;
mod user;

pub use lenient::Numeric;
pub use profile::{Experience, Goal, Profile, Sex};
pub use progress::{ExerciseProgress, ProgressSummary, RoutineProgress};
pub use recommendation::{MacroCategory, Meal, MealItem, Recommendation};
pub use routine::{Exercise, Routine};
pub use user::{hash_password, verify_password, User, UserSummary};
