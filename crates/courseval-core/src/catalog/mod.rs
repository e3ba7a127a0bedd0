//! Catalog domain module.
//!
//! This module contains the searchable subject entities (schools and
//! courses), the school-request model, and the boundary traits for loading
//! entity sets and recording school requests.
//!
//! # Module Structure
//!
//! - `model`: Core catalog domain models (`Entity`, `EntityKind`,
//!   `SchoolRequest`)
//! - `repository`: Boundary traits (`EntitySource`, `SchoolRequestRepository`)

mod model;
mod repository;

// Re-export public API
pub use model::{Entity, EntityKind, SchoolRequest};
pub use repository::{EntitySource, SchoolRequestRepository};
