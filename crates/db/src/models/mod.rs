//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! plus any joined read-side views the handlers serve.

pub mod attendance;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod report;
pub mod session;
pub mod student;
pub mod teacher;
pub mod user;
