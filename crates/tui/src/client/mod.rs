use std::time::Duration;

use api_types::asset::{Asset, AssetAdd, AssetListResponse, AssetReplace};
use machine::{Invocation, OperationError, OperationOutcome, OperationRequest, Settlement};
use reqwest::Url;

use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { base_url, http })
    }

    /// Runs one invocation against the server and wraps the result as the
    /// settlement the machine expects, echoing the sequence number back.
    pub async fn execute(&self, invocation: Invocation) -> Settlement {
        let Invocation { seq, request } = invocation;
        let outcome = match request {
            OperationRequest::FetchAll => {
                OperationOutcome::Fetched(self.fetch_all().await.map_err(operation_error))
            }
            OperationRequest::Delete { asset_id } => {
                OperationOutcome::Deleted(self.delete(&asset_id).await.map_err(operation_error))
            }
            OperationRequest::Add { fund } => {
                OperationOutcome::Added(self.add(&fund).await.map_err(operation_error))
            }
            OperationRequest::Replace { old_asset_id, fund } => OperationOutcome::Replaced(
                self.replace(&old_asset_id, &fund)
                    .await
                    .map_err(operation_error),
            ),
            OperationRequest::Import => {
                OperationOutcome::Imported(self.import().await.map_err(operation_error))
            }
        };
        Settlement { seq, outcome }
    }

    pub async fn fetch_all(&self) -> std::result::Result<Vec<Asset>, ClientError> {
        let endpoint = self
            .base_url
            .join("assets")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<AssetListResponse>()
                .await
                .map(|list| list.assets)
                .map_err(ClientError::Transport);
        }
        Err(error_from(res).await)
    }

    pub async fn delete(&self, asset_id: &str) -> std::result::Result<(), ClientError> {
        let endpoint = self
            .base_url
            .join(&format!("assets/{asset_id}"))
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from(res).await)
    }

    pub async fn add(&self, fund: &str) -> std::result::Result<Asset, ClientError> {
        let endpoint = self
            .base_url
            .join("assets")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let payload = AssetAdd {
            fund: fund.to_string(),
        };

        let res = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Asset>().await.map_err(ClientError::Transport);
        }
        Err(error_from(res).await)
    }

    pub async fn replace(
        &self,
        old_asset_id: &str,
        fund: &str,
    ) -> std::result::Result<Asset, ClientError> {
        let endpoint = self
            .base_url
            .join(&format!("assets/{old_asset_id}"))
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let payload = AssetReplace {
            fund: fund.to_string(),
        };

        let res = self
            .http
            .put(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Asset>().await.map_err(ClientError::Transport);
        }
        Err(error_from(res).await)
    }

    pub async fn import(&self) -> std::result::Result<Vec<Asset>, ClientError> {
        let endpoint = self
            .base_url
            .join("assets/import")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<AssetListResponse>()
                .await
                .map(|list| list.assets)
                .map_err(ClientError::Transport);
        }
        Err(error_from(res).await)
    }
}

async fn error_from(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        404 => ClientError::NotFound,
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

/// Collapses the client failure into the single kind the machine models.
fn operation_error(err: ClientError) -> OperationError {
    match err {
        ClientError::NotFound => OperationError::new("asset not found"),
        ClientError::Validation(body) | ClientError::Server(body) => OperationError::new(body),
        ClientError::Transport(err) => OperationError::new(err.to_string()),
    }
}
