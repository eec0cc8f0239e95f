//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here touches the database or HTTP; everything is plain data
//! and pure functions so it can be unit tested in isolation.

pub mod attendance;
pub mod enrollment;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod session;
pub mod types;
