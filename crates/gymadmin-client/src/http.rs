//! REST backend over reqwest

use crate::api::AdminApi;
use crate::resource::Resource;
use async_trait::async_trait;
use gymadmin_core::config::ApiConfig;
use gymadmin_core::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Collections come back bare or wrapped in `{"data": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<R> {
    Bare(Vec<R>),
    Wrapped { data: Vec<R> },
}

/// Single items come back bare or wrapped in `{"data": {...}}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemBody<R> {
    Wrapped { data: R },
    Bare(R),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the admin REST backend
#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAdminClient {
    /// Client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Client configured from the `[api]` section
    ///
    /// # Errors
    ///
    /// See [`HttpAdminClient::new`].
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Send `Authorization: Bearer <token>` with every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url<R: Resource>(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/{}/{id}", self.base_url, R::PATH),
            None => format!("{}/{}", self.base_url, R::PATH),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to reach backend for {what}: {e}")))?;

        let status = response.status();
        debug!(%status, what, "Backend responded");

        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(what));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.message)
                .ok()
                .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            warn!(%status, what, %message, "Backend returned an error");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse {what}: {e}")))
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let request = self.client.get(self.url::<R>(None));
        let response = self.send(request, R::PATH).await?;

        match Self::decode::<ListBody<R>>(response, R::PATH).await? {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => Ok(items),
        }
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        let what = format!("{} {id}", R::NAME);
        let response = self.send(self.client.get(self.url::<R>(Some(id))), &what).await?;

        match Self::decode::<ItemBody<R>>(response, &what).await? {
            ItemBody::Bare(item) | ItemBody::Wrapped { data: item } => Ok(item),
        }
    }

    async fn create<R: Resource>(&self, item: R) -> Result<R> {
        let request = self.client.post(self.url::<R>(None)).json(&item);
        let response = self.send(request, R::NAME).await?;

        match Self::decode::<ItemBody<R>>(response, R::NAME).await? {
            ItemBody::Bare(item) | ItemBody::Wrapped { data: item } => Ok(item),
        }
    }

    async fn update<R: Resource>(&self, id: &str, item: R) -> Result<R> {
        let what = format!("{} {id}", R::NAME);
        let request = self.client.put(self.url::<R>(Some(id))).json(&item);
        let response = self.send(request, &what).await?;

        match Self::decode::<ItemBody<R>>(response, &what).await? {
            ItemBody::Bare(item) | ItemBody::Wrapped { data: item } => Ok(item),
        }
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let what = format!("{} {id}", R::NAME);
        self.send(self.client.delete(self.url::<R>(Some(id))), &what)
            .await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
