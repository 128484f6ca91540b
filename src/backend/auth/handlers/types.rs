/**
 * Authentication Handler Types
 *
 * Request and response bodies for the student and admin auth endpoints.
 * Request fields default to empty so a missing field is reported as a
 * validation error rather than a JSON parse failure.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::admins::Admin;
use crate::backend::auth::users::Student;
use crate::shared::error::{is_valid_email, FieldError, SharedError, Validator};
use crate::shared::types::Track;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Student registration request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    /// Plaintext; hashed before storage
    pub password: String,
    pub track: String,
}

impl RegisterRequest {
    /// Check every field, returning the parsed track on success.
    pub fn validate(&self) -> Result<Track, Vec<FieldError>> {
        let mut validator = Validator::new();
        validator
            .check(!self.full_name.trim().is_empty(), "fullName", "Full name is required")
            .check(is_valid_email(&self.email), "email", "Please provide a valid email")
            .check(
                !self.whatsapp_number.trim().is_empty(),
                "whatsappNumber",
                "WhatsApp number is required",
            )
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "Password must be at least 6 characters",
            );

        let track = self.track.parse::<Track>();
        if track.is_err() {
            validator.push(SharedError::validation("track", "Invalid track selected"));
        }

        validator.finish()?;
        // Only reachable when the track parsed.
        track.map_err(|e| vec![e.into()])
    }
}

/// Login request, shared by students and admins
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut validator = Validator::new();
        validator
            .check(is_valid_email(&self.email), "email", "Please provide a valid email")
            .check(!self.password.is_empty(), "password", "Password is required");
        validator.finish()
    }
}

/// Token plus the public view of whoever it was issued to
#[derive(Serialize, Debug)]
pub struct AuthPayload<U> {
    pub token: String,
    pub user: U,
}

/// Student fields returned by register and login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub track: Track,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            email: student.email.clone(),
            track: student.track,
        }
    }
}

/// The caller's own profile (`GET /api/auth/me`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub track: Track,
    pub registration_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Student> for StudentProfile {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name,
            email: student.email,
            whatsapp_number: student.whatsapp_number,
            track: student.track,
            registration_date: student.registration_date,
            last_login: student.last_login,
        }
    }
}

/// Admin fields returned by admin login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&Admin> for AdminSummary {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role.clone(),
        }
    }
}
