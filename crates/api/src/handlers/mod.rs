pub mod attendance;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enrollment;
pub mod profile;
pub mod reports;
pub mod sessions;
pub mod students;
pub mod teachers;
