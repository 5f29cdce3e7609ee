//! Profile tools
//!
//! Save and read the questionnaire profile kept in `configuracion.txt`.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::users::resolve_username;
use super::{required, MessageResponse};
use crate::error::{ensure_storable, ServiceError, ServiceResult};
use crate::models::{Experience, Goal, Numeric, Profile, Sex};
use crate::nutrition::{calorie_target, ActivityLevel, DEFAULT_CALORIE_TARGET};
use crate::store::{DataStore, Files, Outcome};

const NUMERIC_FIELDS_MSG: &str = "Por favor completa todos los campos numéricos.";

/// Questionnaire answers as the client posts them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    pub username: Option<String>,
    pub objetivo: Option<String>,
    pub edad: Option<Numeric>,
    pub sexo: Option<String>,
    pub altura: Option<Numeric>,
    pub peso: Option<Numeric>,
    pub experiencia: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "metaCalorias")]
    pub calorie_target: i64,
}

fn positive(value: &Option<Numeric>) -> ServiceResult<f64> {
    value
        .as_ref()
        .and_then(Numeric::as_f64)
        .filter(|n| *n > 0.0)
        .ok_or_else(|| ServiceError::validation(NUMERIC_FIELDS_MSG))
}

impl ProfileRequest {
    fn into_profile(self) -> ServiceResult<Profile> {
        let username = required(&self.username)
            .ok_or_else(|| ServiceError::validation("Falta el nombre de usuario."))?
            .to_string();
        ensure_storable("username", &username)?;

        let age = positive(&self.edad)?.round();
        if !(1.0..=150.0).contains(&age) {
            return Err(ServiceError::validation("La edad no es válida."));
        }
        let height_cm = positive(&self.altura)?;
        let weight_kg = positive(&self.peso)?;

        let goal = required(&self.objetivo)
            .map(|s| Goal::from_str(s).unwrap_or_else(|| Goal::canonicalize(s)))
            .ok_or_else(|| ServiceError::validation("Falta el objetivo."))?;
        let sex = required(&self.sexo)
            .and_then(Sex::from_str)
            .ok_or_else(|| ServiceError::validation("Sexo no válido."))?;
        let experience = required(&self.experiencia)
            .and_then(Experience::from_str)
            .ok_or_else(|| ServiceError::validation("Nivel de experiencia no válido."))?;

        Ok(Profile {
            username,
            goal,
            age: age as u32,
            sex,
            height_cm,
            weight_kg,
            experience,
        })
    }
}

/// Create or replace a user's profile
pub fn save_profile(store: &DataStore, req: ProfileRequest) -> ServiceResult<MessageResponse> {
    let profile = req.into_profile()?;

    store.update::<Profile, _, _, ServiceError>(|profiles| {
        info!(username = %profile.username, goal = profile.goal.as_str(), "profile saved");
        match profiles.iter_mut().find(|p| p.username == profile.username) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        Ok(Outcome::Changed(MessageResponse::new(
            "Configuración guardada correctamente.",
        )))
    })
}

/// Profile for a user id or username, if one was saved
pub fn find_profile(files: &Files<'_>, key: &str) -> ServiceResult<Option<Profile>> {
    let username = resolve_username(files, key)?;
    Ok(files
        .load::<Profile>()?
        .into_iter()
        .find(|p| p.username == username))
}

/// Profile plus calorie target. The activity level defaults to sedentary.
pub fn get_profile(
    store: &DataStore,
    key: &str,
    activity: Option<ActivityLevel>,
) -> ServiceResult<ProfileResponse> {
    store.with_files(|files| {
        let profile = find_profile(files, key)?
            .ok_or_else(|| ServiceError::not_found("Configuración no encontrada."))?;
        let user_id = (key != profile.username).then(|| key.to_string());
        let calorie_target =
            calorie_target(&profile, activity).unwrap_or(DEFAULT_CALORIE_TARGET);
        Ok(ProfileResponse {
            user_id,
            profile,
            calorie_target,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::users::{register, RegisterRequest};

    fn store() -> (tempfile::TempDir, DataStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn request(username: &str) -> ProfileRequest {
        ProfileRequest {
            username: Some(username.into()),
            objetivo: Some("ganar masa muscular".into()),
            edad: Some(Numeric::Text("30".into())),
            sexo: Some("masculino".into()),
            altura: Some(Numeric::Text("180".into())),
            peso: Some(Numeric::Number(80.0)),
            experiencia: Some("principiante".into()),
        }
    }

    #[test]
    fn test_save_and_get() {
        let (_dir, store) = store();
        save_profile(&store, request("ana")).unwrap();
        let res = get_profile(&store, "ana", None).unwrap();
        assert_eq!(res.profile.age, 30);
        assert_eq!(res.profile.goal, Goal::GainMuscle);
        assert_eq!(res.calorie_target, 2436);
        assert!(res.user_id.is_none());

        let active = get_profile(&store, "ana", Some(ActivityLevel::Moderada)).unwrap();
        assert!(active.calorie_target > res.calorie_target);
    }

    #[test]
    fn test_save_replaces_existing() {
        let (_dir, store) = store();
        save_profile(&store, request("ana")).unwrap();
        let mut req = request("ana");
        req.objetivo = Some("tonificar".into());
        save_profile(&store, req).unwrap();

        assert_eq!(store.load::<Profile>().unwrap().len(), 1);
        assert_eq!(get_profile(&store, "ana", None).unwrap().profile.goal, Goal::Tone);
    }

    #[test]
    fn test_lookup_by_user_id() {
        let (_dir, store) = store();
        let id = register(
            &store,
            RegisterRequest {
                username: Some("ana".into()),
                email: Some("ana@mail.com".into()),
                password: Some("pw".into()),
            },
        )
        .unwrap()
        .id;
        save_profile(&store, request("ana")).unwrap();

        let res = get_profile(&store, &id, None).unwrap();
        assert_eq!(res.profile.username, "ana");
        assert_eq!(res.user_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_missing_numeric_field() {
        let (_dir, store) = store();
        let mut req = request("ana");
        req.peso = Some(Numeric::Text("".into()));
        let err = save_profile(&store, req).unwrap_err();
        assert_eq!(err.to_string(), NUMERIC_FIELDS_MSG);
    }

    #[test]
    fn test_age_must_round_to_a_positive_year() {
        let (_dir, store) = store();

        let mut req = request("ana");
        req.edad = Some(Numeric::Text("0.4".into()));
        let err = save_profile(&store, req).unwrap_err();
        assert_eq!(err.to_string(), "La edad no es válida.");

        let mut req = request("ana");
        req.edad = Some(Numeric::Number(0.0));
        let err = save_profile(&store, req).unwrap_err();
        assert_eq!(err.to_string(), NUMERIC_FIELDS_MSG);

        assert!(store.load::<Profile>().unwrap().is_empty());

        let mut req = request("ana");
        req.edad = Some(Numeric::Text("0.6".into()));
        save_profile(&store, req).unwrap();
        assert_eq!(store.load::<Profile>().unwrap()[0].age, 1);
    }

    #[test]
    fn test_invalid_sex() {
        let (_dir, store) = store();
        let mut req = request("ana");
        req.sexo = Some("otro".into());
        assert!(matches!(save_profile(&store, req), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn test_profile_not_found() {
        let (_dir, store) = store();
        assert!(matches!(get_profile(&store, "nadie", None), Err(ServiceError::NotFound(_))));
    }
}
