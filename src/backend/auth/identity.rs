//! Authenticated identities
//!
//! A verified token resolves to exactly one of these. The guard attaches it
//! to the request and handlers pull out the variant they were mounted for.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::admins::{find_admin_by_id, Admin};
use crate::backend::auth::users::{find_student_by_id, Student};
use crate::shared::types::Role;

#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Student(Student),
    Admin(Admin),
}

impl Identity {
    pub fn id(&self) -> Uuid {
        match self {
            Identity::Student(student) => student.id,
            Identity::Admin(admin) => admin.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Student(_) => Role::Student,
            Identity::Admin(_) => Role::Admin,
        }
    }
}

/// Load the identity `id` from the table that backs `role`.
pub async fn load_identity(
    pool: &SqlitePool,
    role: Role,
    id: Uuid,
) -> Result<Option<Identity>, sqlx::Error> {
    let identity = match role {
        Role::Student => find_student_by_id(pool, id).await?.map(Identity::Student),
        Role::Admin => find_admin_by_id(pool, id).await?.map(Identity::Admin),
    };
    Ok(identity)
}
