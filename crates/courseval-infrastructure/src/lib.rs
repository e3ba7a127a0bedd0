//! Infrastructure layer for courseval.
//!
//! File-backed implementations of the core's boundary traits: the catalog
//! entity source, the review persistence sink, the preference store, and
//! the school-request store, plus unified path management.

pub mod async_dir_review_repository;
pub mod json_school_request_repository;
pub mod paths;
pub mod toml_catalog_source;
pub mod toml_preference_store;

pub use async_dir_review_repository::AsyncDirReviewRepository;
pub use json_school_request_repository::JsonSchoolRequestRepository;
pub use paths::{CoursevalPaths, PathError};
pub use toml_catalog_source::TomlCatalogSource;
pub use toml_preference_store::TomlPreferenceStore;
