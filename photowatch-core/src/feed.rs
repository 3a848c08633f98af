use crate::error::CoreError;
use crate::types::{GalleryItem, Query};
use async_trait::async_trait;

/// Source of photo feeds, ordered by the provider's own ranking with the
/// newest or most relevant item first.
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    async fn fetch_feed(&self, query: &Query) -> Result<Vec<GalleryItem>, CoreError>;
}
