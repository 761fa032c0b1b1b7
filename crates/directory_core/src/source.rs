use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::UserRecord,
    protocol::{decode_user_data, USER_DATA_ROUTE},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("user data request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("user data request returned status {0}")]
    Status(u16),
    #[error("user data body is not a list of users: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the directory's initial user records come from.
#[async_trait]
pub trait UserDataSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError>;
}

/// Fetches `GET /userData` from the companion server. No timeout, no retry.
#[derive(Debug, Clone)]
pub struct HttpUserDataSource {
    http: Client,
    endpoint: Url,
}

impl HttpUserDataSource {
    pub fn new(server_url: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(server_url)?.join(USER_DATA_ROUTE)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserDataSource for HttpUserDataSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        let users = decode_user_data(&body)?;
        debug!(endpoint = %self.endpoint, users = users.len(), "user data fetched");
        Ok(users)
    }
}

/// Serves a fixed list; used where the records are already at hand.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDataSource {
    users: Vec<UserRecord>,
}

impl StaticUserDataSource {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDataSource for StaticUserDataSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
