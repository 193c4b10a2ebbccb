use crate::errors::QuillResult;
use crate::models::RawDataBundle;

/// Read-only view of the subject/endpoint raw data cache.
#[allow(async_fn_in_trait)]
pub trait IRawDataCache: Send + Sync {
    /// Every cached endpoint for `subject`. An unknown subject yields an
    /// empty bundle, not an error.
    async fn get(&self, subject: &str) -> QuillResult<RawDataBundle>;
}
