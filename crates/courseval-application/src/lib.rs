//! Application layer for courseval.
//!
//! Use-case implementations that coordinate the domain core for the
//! presentation layer: search dispatch with stale-response suppression,
//! and the single-active review session.

pub mod review_usecase;
pub mod search_coordinator;

pub use review_usecase::ReviewUseCase;
pub use search_coordinator::{QueryTicket, SearchCoordinator};
