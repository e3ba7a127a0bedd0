//! Review domain module.
//!
//! The review-composition workflow: a short-lived session state machine
//! tracking the user's in-progress review against a resolved subject, and
//! the persistence boundary its submissions flow through.
//!
//! # Module Structure
//!
//! - `model`: Draft/record models and questionnaire value types
//! - `repository`: Persistence sink trait (`ReviewSink`)
//! - `session`: The `ReviewSession` state machine

mod model;
mod repository;
mod session;

// Re-export public API
pub use model::{
    DeliveryMethod, Grade, MAX_CONTENT_LEN, ReviewDetails, ReviewDraft, ReviewRecord, ReviewState,
    Term,
};
pub use repository::ReviewSink;
pub use session::ReviewSession;
