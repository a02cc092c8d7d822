//! In-memory backend

use crate::api::AdminApi;
use crate::resource::{ALL_PATHS, Resource};
use async_trait::async_trait;
use gymadmin_core::config::ApiConfig;
use gymadmin_core::utils::new_id;
use gymadmin_core::{Error, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::time::{Duration, sleep};
use tracing::{debug, info};

/// Default simulated latency
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Backend that keeps every collection in memory
///
/// Items are stored as JSON so one map serves every resource type. Each
/// call waits for the configured delay before touching the data; writes
/// then check and change a collection under a single write lock.
#[derive(Debug)]
pub struct MockAdminClient {
    collections: RwLock<HashMap<&'static str, Vec<Value>>>,
    delay_ms: u64,
    failure: Option<String>,
}

impl MockAdminClient {
    /// Empty backend with the default delay
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            delay_ms: DEFAULT_DELAY_MS,
            failure: None,
        }
    }

    /// Backend configured from the `[api]` section, seeded from
    /// `mock_data_dir` when set
    ///
    /// # Errors
    ///
    /// Fails if a data file exists but cannot be parsed.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mock = Self::new().with_delay(config.mock_delay_ms);
        match &config.mock_data_dir {
            Some(dir) => mock.load_dir(dir),
            None => Ok(mock),
        }
    }

    /// Set the simulated latency
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Fail every call with `message`
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Replace a collection with `items`
    ///
    /// # Errors
    ///
    /// Fails if an item cannot be serialized.
    pub fn seed<R: Resource>(self, items: Vec<R>) -> Result<Self> {
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.collections.write().insert(R::PATH, values);
        Ok(self)
    }

    /// Load `<path>.json` for every collection found in `dir`
    ///
    /// Missing files leave the collection empty.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be read or is not a JSON array.
    pub fn load_dir(self, dir: &Path) -> Result<Self> {
        {
            let mut collections = self.collections.write();
            for path in ALL_PATHS {
                let file = dir.join(format!("{path}.json"));
                if !file.exists() {
                    continue;
                }
                let values: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
                debug!(collection = path, count = values.len(), "Seeded mock collection");
                collections.insert(path, values);
            }
        }
        info!(dir = %dir.display(), "Mock backend loaded");
        Ok(self)
    }

    async fn simulate(&self) -> Result<()> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.failure {
            Some(message) => Err(Error::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn items<R: Resource>(&self) -> Result<Vec<R>> {
        self.collections
            .read()
            .get(R::PATH)
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()))
                    .collect::<std::result::Result<Vec<R>, _>>()
            })
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(Error::from)
    }

    fn missing<R: Resource>(id: &str) -> Error {
        Error::not_found(format!("{} {id}", R::NAME))
    }
}

/// Stored id, under either key the entities accept
fn value_id(value: &Value) -> Option<&str> {
    value
        .get("id")
        .or_else(|| value.get("_id"))
        .and_then(Value::as_str)
}

impl Default for MockAdminClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminApi for MockAdminClient {
    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        self.simulate().await?;
        self.items()
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        self.simulate().await?;
        self.items::<R>()?
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| Self::missing::<R>(id))
    }

    async fn create<R: Resource>(&self, mut item: R) -> Result<R> {
        self.simulate().await?;
        if item.id().is_empty() {
            item.set_id(new_id());
        }
        let value = serde_json::to_value(&item)?;

        {
            let mut collections = self.collections.write();
            let values = collections.entry(R::PATH).or_default();
            if values.iter().any(|v| value_id(v) == Some(item.id())) {
                return Err(Error::Api {
                    status: 409,
                    message: format!("{} {} already exists", R::NAME, item.id()),
                });
            }
            values.push(value);
        }

        debug!(resource = R::PATH, id = item.id(), "Mock create");
        Ok(item)
    }

    async fn update<R: Resource>(&self, id: &str, mut item: R) -> Result<R> {
        self.simulate().await?;
        item.set_id(id.to_string());
        let value = serde_json::to_value(&item)?;

        {
            let mut collections = self.collections.write();
            let slot = collections
                .get_mut(R::PATH)
                .and_then(|values| values.iter_mut().find(|v| value_id(v) == Some(id)))
                .ok_or_else(|| Self::missing::<R>(id))?;
            *slot = value;
        }

        debug!(resource = R::PATH, id, "Mock update");
        Ok(item)
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        self.simulate().await?;

        {
            let mut collections = self.collections.write();
            let values = collections
                .get_mut(R::PATH)
                .ok_or_else(|| Self::missing::<R>(id))?;
            let before = values.len();
            values.retain(|v| value_id(v) != Some(id));
            if values.len() == before {
                return Err(Self::missing::<R>(id));
            }
        }

        debug!(resource = R::PATH, id, "Mock delete");
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gymadmin_core::{Category, Product};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: String::new(),
        }
    }

    fn mock() -> MockAdminClient {
        MockAdminClient::new()
            .with_delay(0)
            .seed(vec![category("c1", "Apparel"), category("c2", "Equipment")])
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let api = mock();
        let all: Vec<Category> = api.list().await.unwrap();
        assert_eq!(all.len(), 2);

        let one: Category = api.get("c2").await.unwrap();
        assert_eq!(one.name, "Equipment");

        let products: Vec<Product> = api.list().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let api = mock();
        let created = api.create(category("", "Supplements")).await.unwrap();
        assert_eq!(created.id.len(), 32);

        let fetched: Category = api.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let api = mock();
        let err = api.create(category("c1", "Again")).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let api = mock();
        let updated = api
            .update("c1", category("ignored", "Training Wear"))
            .await
            .unwrap();
        assert_eq!(updated.id, "c1");
        assert_eq!(api.get::<Category>("c1").await.unwrap().name, "Training Wear");

        api.delete::<Category>("c1").await.unwrap();
        let err = api.get::<Category>("c1").await.unwrap_err();
        assert_eq!(err.to_string(), "Resource not found: Category c1");
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let api = mock();
        assert!(matches!(
            api.update("zzz", category("zzz", "X")).await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            api.delete::<Category>("zzz").await,
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let api = mock().with_failure("Database unavailable");
        let err = api.list::<Category>().await.unwrap_err();
        assert_eq!(err.to_string(), "API returned 500: Database unavailable");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_delay_applies() {
        let api = MockAdminClient::new();
        let started = tokio::time::Instant::now();
        api.list::<Category>().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(DEFAULT_DELAY_MS));
    }

    #[tokio::test]
    async fn test_seed_typed_values() {
        let product = Product {
            id: "p1".to_string(),
            name: "Tee".to_string(),
            description: String::new(),
            price: dec!(24.99),
            category: "apparel".to_string(),
            stock_quantity: 3,
            sizes: Vec::new(),
            colors: Vec::new(),
            images: Vec::new(),
            rating: 4.0,
            featured: false,
        };
        let api = MockAdminClient::new()
            .with_delay(0)
            .seed(vec![product.clone()])
            .unwrap();
        assert_eq!(api.get::<Product>("p1").await.unwrap(), product);
    }
}
