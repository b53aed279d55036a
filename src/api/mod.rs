//! Client for the classified-ads API.

mod endpoints;
mod models;

pub use endpoints::{ApiVersion, Endpoints};
pub use models::{NewItem, Statistics};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::http::{ApiRequest, ApiResponse, HttpClient};

/// Operations exposed by the service under test. Identifiers are plain
/// strings because scenarios deliberately send malformed ones.
#[async_trait]
pub trait AdsApi: Send + Sync {
    async fn create_item(&self, item: &NewItem) -> Result<ApiResponse, ClientError>;

    /// Posts `body` unchanged with a JSON content type.
    async fn create_item_raw(&self, body: &str) -> Result<ApiResponse, ClientError>;

    async fn get_item(&self, id: &str) -> Result<ApiResponse, ClientError>;

    async fn seller_items(&self, seller: &str) -> Result<ApiResponse, ClientError>;

    async fn statistic(&self, version: ApiVersion, id: &str) -> Result<ApiResponse, ClientError>;

    /// Deletes through the v2 API, the only version that supports it.
    async fn delete_item(&self, id: &str) -> Result<ApiResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct AdsClient {
    http: HttpClient,
    endpoints: Endpoints,
}

impl AdsClient {
    pub fn new(http: HttpClient, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }
}

#[async_trait]
impl AdsApi for AdsClient {
    async fn create_item(&self, item: &NewItem) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_value(item)?;
        self.http
            .send(ApiRequest::post_json(self.endpoints.create_item(), body))
            .await
    }

    async fn create_item_raw(&self, body: &str) -> Result<ApiResponse, ClientError> {
        self.http
            .send(ApiRequest::post_raw(self.endpoints.create_item(), body))
            .await
    }

    async fn get_item(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.http
            .send(ApiRequest::get(self.endpoints.item(ApiVersion::V1, id)))
            .await
    }

    async fn seller_items(&self, seller: &str) -> Result<ApiResponse, ClientError> {
        self.http
            .send(ApiRequest::get(self.endpoints.seller_items(seller)))
            .await
    }

    async fn statistic(&self, version: ApiVersion, id: &str) -> Result<ApiResponse, ClientError> {
        self.http
            .send(ApiRequest::get(self.endpoints.statistic(version, id)))
            .await
    }

    async fn delete_item(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.http
            .send(ApiRequest::delete(self.endpoints.item(ApiVersion::V2, id)))
            .await
    }
}
