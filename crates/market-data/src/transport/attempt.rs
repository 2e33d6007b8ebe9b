use async_trait::async_trait;

use crate::errors::TransportError;
use crate::models::RawPayload;

/// One outbound request, repeatable.
///
/// Implementations must be safe to call again after a failure; the retry
/// loop owns the decision of whether and when to do so.
#[async_trait]
pub trait Attempt: Send + Sync {
    async fn attempt(&self) -> Result<RawPayload, TransportError>;
}
