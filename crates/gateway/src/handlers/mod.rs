//! Request handlers

pub mod awards;
pub mod courses;
pub mod files;
pub mod health;
pub mod profile;
pub mod projects;
pub mod publications;
pub mod students;

use serde::Serialize;

/// Acknowledgment body for delete operations
#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
