use std::time::Duration;

use catalog_core::{CatalogError, Product, ProductDraft, ProductFields, ProductId, ProductPatch};
use catalog_logging::{catalog_debug, catalog_info, catalog_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The three remote operations of the product catalog service.
///
/// Every call is single-shot: failures are returned as-is, never retried.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// `GET /products`. An empty array is a valid result.
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError>;

    /// `POST /products`.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, CatalogError>;

    /// `PUT /products/{id}`. The response may be partial; callers merge it.
    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductFields, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: ClientSettings) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CatalogError::transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Value, CatalogError> {
        catalog_info!("{method} {url}");
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, JSON);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| CatalogError::protocol(format!("cannot encode request: {err}")))?;
            request = request.header(CONTENT_TYPE, JSON).body(payload);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        catalog_info!("{method} {url} -> {status}");

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        if !status.is_success() {
            let message = service_message(&bytes);
            catalog_warn!("{method} {url} rejected: {status} {message:?}");
            return Err(CatalogError::Service {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            catalog_warn!("{method} {url} returned invalid JSON: {err}");
            CatalogError::protocol(format!("response is not valid JSON: {err}"))
        })
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("products");
        let value = self
            .send_json::<()>(reqwest::Method::GET, &url, None)
            .await?;
        if !value.is_array() {
            return Err(CatalogError::protocol("expected a JSON array of products"));
        }
        let products: Vec<Product> = decode(value)?;
        catalog_debug!("decoded {} products", products.len());
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, CatalogError> {
        let url = self.endpoint("products");
        let value = self
            .send_json(reqwest::Method::POST, &url, Some(draft))
            .await?;
        decode(value)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductFields, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"));
        let value = self
            .send_json(reqwest::Method::PUT, &url, Some(patch))
            .await?;
        if !value.is_object() {
            return Err(CatalogError::protocol("expected a JSON product object"));
        }
        decode(value)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, CatalogError> {
    serde_json::from_value(value)
        .map_err(|err| CatalogError::protocol(format!("unexpected product shape: {err}")))
}

/// Pull `message` out of an error body. The service sends either a string or
/// a list of strings.
fn service_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn too_large(max_bytes: u64, actual: u64) -> CatalogError {
    CatalogError::protocol(format!("response too large (max {max_bytes}, actual {actual})"))
}

fn map_reqwest_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        return CatalogError::transport(format!("timed out: {err}"));
    }
    CatalogError::transport(err.to_string())
}
