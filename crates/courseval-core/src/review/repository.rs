//! Review persistence sink trait.

use super::model::ReviewRecord;
use crate::error::Result;
use async_trait::async_trait;

/// The persistence boundary a submitted review flows through.
///
/// Implementations report failures as
/// [`CoursevalError::Persistence`](crate::CoursevalError::Persistence),
/// using `retryable` to distinguish transient failures (a later re-submit
/// may succeed) from permanent rejections. The reason is otherwise opaque
/// to the core.
#[async_trait]
pub trait ReviewSink: Send + Sync {
    /// Persists a finalized review record.
    async fn save(&self, record: &ReviewRecord) -> Result<()>;
}
