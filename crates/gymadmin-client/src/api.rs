//! The backend trait

use crate::resource::Resource;
use async_trait::async_trait;
use gymadmin_core::Result;

/// CRUD over every [`Resource`] collection
///
/// Implementations must report a missing id as
/// [`gymadmin_core::Error::NotFound`].
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Every item in the collection
    async fn list<R: Resource>(&self) -> Result<Vec<R>>;

    /// One item by id
    async fn get<R: Resource>(&self, id: &str) -> Result<R>;

    /// Create an item and return it as stored, id included
    async fn create<R: Resource>(&self, item: R) -> Result<R>;

    /// Replace the item with `id`
    async fn update<R: Resource>(&self, id: &str, item: R) -> Result<R>;

    /// Delete the item with `id`
    async fn delete<R: Resource>(&self, id: &str) -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
