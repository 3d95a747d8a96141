pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::endpoints::{
    Endpoint, RequestData,
    deals::{Deal, DealFilter, SortKey},
    games::GameDetail,
    redirect_url, store_icon_url,
    stores::Store,
};
pub use crate::error::{ErrorKind, GatewayError};
use repositories::*;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.cheapshark.com/api/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Honor `HTTP(S)_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_system_proxy: true,
        }
    }
}

/// Read-only client for the CheapShark deals API.
///
/// Every call is exactly one GET with the configured timeout. Nothing is
/// retried or cached.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(APP_USER_AGENT);
        if !options.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(GatewayError::Build)?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send<E>(&self, request: E) -> Result<E::Response, GatewayError>
    where
        E: Endpoint,
    {
        let url = format!("{}{}", self.base_url, request.endpoint());
        let mut builder = self.http.get(&url);
        if let RequestData::Query(query) = request.data() {
            builder = builder.query(query);
        }

        tracing::debug!(url = %url, "Sending request");
        let response = builder.send().await.map_err(GatewayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Request returned error status");
            return Err(GatewayError::Status(status));
        }

        let text = response.text().await.map_err(GatewayError::Network)?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        E::decode(body)
    }

    pub async fn fetch_deals(&self, filter: &DealFilter) -> Result<Vec<Deal>, GatewayError> {
        self.send(Request::deals().list(filter.clone())).await
    }

    pub async fn fetch_stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.send(Request::stores().list()).await
    }

    pub async fn fetch_game_detail(&self, game_id: &str) -> Result<GameDetail, GatewayError> {
        self.send(Request::games().get(game_id)).await
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn deals() -> DealRepository {
        DealRepository::new()
    }

    pub fn stores() -> StoreRepository {
        StoreRepository::new()
    }

    pub fn games() -> GameRepository {
        GameRepository::new()
    }
}
