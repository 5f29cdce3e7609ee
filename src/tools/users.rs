//! User tools
//!
//! Registration, login and account edits over `usuarios.txt`.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{required, MessageResponse};
use crate::error::{ensure_storable, ServiceError, ServiceResult};
use crate::models::{hash_password, Profile, Routine, User, UserSummary};
use crate::store::{DataStore, Files};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "newUsername")]
    pub new_username: Option<String>,
    pub email: Option<String>,
    /// Empty or absent keeps the current password
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: String,
}

/// What the client keeps as its session user
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: SessionUser,
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Username for a key that is either a user id or already a username
pub fn resolve_username(files: &Files<'_>, key: &str) -> ServiceResult<String> {
    let users = files.load::<User>()?;
    Ok(users
        .into_iter()
        .find(|u| u.id == key)
        .map(|u| u.username)
        .unwrap_or_else(|| key.to_string()))
}

/// Register a new user
pub fn register(store: &DataStore, req: RegisterRequest) -> ServiceResult<RegisterResponse> {
    let (Some(username), Some(email), Some(password)) = (
        required(&req.username),
        required(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ServiceError::validation("Faltan datos requeridos."));
    };
    ensure_storable("username", username)?;
    ensure_storable("email", email)?;

    store.with_files(|files| {
        let users = files.load::<User>()?;
        if users.iter().any(|u| same_email(&u.email, email)) {
            return Err(ServiceError::conflict("El correo ya está registrado."));
        }
        if users.iter().any(|u| u.username == username) {
            return Err(ServiceError::conflict("El nombre de usuario ya está en uso."));
        }

        let user = User::new(username, email, password);
        files.append(&user)?;
        info!(user_id = %user.id, username = %user.username, "user registered");

        Ok(RegisterResponse {
            message: "Usuario registrado correctamente.".to_string(),
            id: user.id,
        })
    })
}

/// Check credentials
pub fn login(store: &DataStore, req: LoginRequest) -> ServiceResult<LoginResponse> {
    let (Some(email), Some(password)) = (
        required(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ServiceError::validation("Faltan email o password."));
    };

    let users = store.load::<User>()?;
    let user = users
        .into_iter()
        .find(|u| same_email(&u.email, email) && u.check_password(password));

    match user {
        Some(user) => {
            info!(user_id = %user.id, "login");
            Ok(LoginResponse {
                user: SessionUser {
                    id: user.id,
                    name: user.username,
                    email: user.email,
                },
            })
        }
        None => {
            warn!(email = %email, "login failed");
            Err(ServiceError::unauthorized("Usuario o contraseña incorrectos."))
        }
    }
}

pub fn list_users(store: &DataStore) -> ServiceResult<Vec<UserSummary>> {
    Ok(store.load::<User>()?.iter().map(UserSummary::from).collect())
}

pub fn get_user(store: &DataStore, id: &str) -> ServiceResult<UserSummary> {
    store
        .load::<User>()?
        .iter()
        .find(|u| u.id == id)
        .map(UserSummary::from)
        .ok_or_else(|| ServiceError::not_found("Usuario no encontrado."))
}

/// Edit username, email and optionally password. A new username carries the
/// user's profile and routines along with it.
pub fn update_user(store: &DataStore, req: UpdateUserRequest) -> ServiceResult<MessageResponse> {
    let Some(user_id) = required(&req.user_id) else {
        return Err(ServiceError::validation("Falta el ID del usuario."));
    };
    let (Some(new_username), Some(email)) = (required(&req.new_username), required(&req.email))
    else {
        return Err(ServiceError::validation(
            "Nombre de usuario y correo son obligatorios.",
        ));
    };
    ensure_storable("username", new_username)?;
    ensure_storable("email", email)?;

    store.with_files(|files| {
        let mut users = files.load::<User>()?;
        let Some(index) = users.iter().position(|u| u.id == user_id) else {
            return Err(ServiceError::not_found("Usuario no encontrado."));
        };
        if users
            .iter()
            .any(|u| u.id != user_id && same_email(&u.email, email))
        {
            return Err(ServiceError::conflict("El correo ya está registrado."));
        }
        if users
            .iter()
            .any(|u| u.id != user_id && u.username == new_username)
        {
            return Err(ServiceError::conflict("El nombre de usuario ya está en uso."));
        }

        let old_username = users[index].username.clone();
        {
            let user = &mut users[index];
            user.username = new_username.to_string();
            user.email = email.to_string();
            if let Some(password) = req.password.as_deref().filter(|p| !p.is_empty()) {
                user.password = hash_password(password);
            }
        }

        // Owned records move first; a failed user write moves them back
        let renamed = old_username != new_username;
        if renamed {
            rename_owner(files, &old_username, new_username)?;
        }
        if let Err(err) = files.rewrite(&users) {
            if renamed {
                if let Err(undo) = rename_owner(files, new_username, &old_username) {
                    error!(user_id, error = %undo, "could not restore owned records");
                }
            }
            return Err(err.into());
        }
        if renamed {
            info!(user_id, from = %old_username, to = %new_username, "username changed");
        }

        Ok(MessageResponse::new("Información actualizada correctamente."))
    })
}

/// Re-key profile and routines from one username to another
fn rename_owner(files: &Files<'_>, from: &str, to: &str) -> ServiceResult<()> {
    let mut profiles = files.load::<Profile>()?;
    let mut changed = false;
    for profile in profiles.iter_mut().filter(|p| p.username == from) {
        profile.username = to.to_string();
        changed = true;
    }
    if changed {
        files.rewrite(&profiles)?;
    }

    let mut routines = files.load::<Routine>()?;
    let mut changed = false;
    for routine in routines.iter_mut().filter(|r| r.username == from) {
        routine.username = to.to_string();
        changed = true;
    }
    if changed {
        files.rewrite(&routines)?;
    }
    Ok(())
}
