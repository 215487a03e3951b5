//! Silt: a typed data layer for embedded SQLite.
//!
//! Structs annotated with [`Entity`] declare how they persist, the
//! [`Registry`] reflects and validates their schema once, and the generic
//! [`Dao`] runs every CRUD operation through parameterized statements.
//! Drivers live in their own crates, `silt-sqlite` provides the embedded
//! engine.

pub use silt_core::*;
pub use silt_macros::Entity;
