//! User model
//!
//! `usuarios.txt` holds `id|username|email|password`. Older files carry
//! `username|email|password`; those users get their username as id.

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::store::LineRecord;

const HASH_SCHEME: &str = "sha256";

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Salted hash, or plaintext for users written by older servers
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl User {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: hash_password(password),
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        verify_password(&self.password, candidate)
    }
}

impl LineRecord for User {
    const FILE: &'static str = "usuarios.txt";
    const FIELDS: usize = 4;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.username.clone(),
            self.email.clone(),
            self.password.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        match fields {
            [id, username, email, password] => Ok(Self {
                id: id.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
            [username, email, password] => Ok(Self {
                id: username.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err(format!("expected 3 or 4 fields, got {}", fields.len())),
        }
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Hash a password as `sha256$<salt>$<hex digest>`
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}${}", HASH_SCHEME, salt, digest(&salt, password))
}

/// Check a candidate against a stored hash. Values without the hash prefix
/// are legacy plaintext.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    match stored.split('$').collect::<Vec<_>>().as_slice() {
        [HASH_SCHEME, salt, hex] => {
            constant_time_eq(hex.as_bytes(), digest(salt, candidate).as_bytes())
        }
        _ => constant_time_eq(stored.as_bytes(), candidate.as_bytes()),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
