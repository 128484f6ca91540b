//! Portal enumerations
//!
//! Fixed vocabularies used by both the persistence layer and the HTTP
//! payloads. Each one serializes to the exact strings clients send and the
//! database stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Program category that scopes which handbooks a student may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
pub enum Track {
    #[serde(rename = "Financial Markets")]
    #[sqlx(rename = "Financial Markets")]
    FinancialMarkets,
    #[serde(rename = "Web Development")]
    #[sqlx(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Photography")]
    #[sqlx(rename = "Photography")]
    Photography,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::FinancialMarkets, Track::WebDevelopment, Track::Photography];

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::FinancialMarkets => "Financial Markets",
            Track::WebDevelopment => "Web Development",
            Track::Photography => "Photography",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Track::ALL
            .into_iter()
            .find(|track| track.as_str() == s)
            .ok_or_else(|| SharedError::unknown_variant("track", s))
    }
}

/// Whether a student may use the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Suspended,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(StudentStatus::Active),
            "suspended" => Ok(StudentStatus::Suspended),
            other => Err(SharedError::unknown_variant("status", other)),
        }
    }
}

/// Role tag carried in session tokens (the JWT `type` claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Admin => f.write_str("admin"),
        }
    }
}
