use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::StreamAuth;
use crate::config::StreamConfig;
use crate::error::VideoError;
use crate::models::meeting::{CallData, CallRef};

/// External video service able to create calls
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoClient: Send + Sync {
    /// Fetch the call `call_type:id`, creating it with `data` if it does not exist yet
    async fn get_or_create_call(
        &self,
        call_type: &str,
        id: &str,
        data: &CallData,
    ) -> Result<CallRef, VideoError>;
}

#[derive(Debug, Serialize)]
struct GetOrCreateCallRequest<'a> {
    data: &'a CallData,
}

#[derive(Debug, Deserialize)]
pub struct GetOrCreateCallResponse {
    pub call: CallRef,
    #[serde(default)]
    pub created: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for the Stream video REST API
pub struct StreamVideoClient {
    client: Client,
    api_key: String,
    api_secret: String,
    endpoint: String,
}

impl StreamVideoClient {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VideoClient for StreamVideoClient {
    async fn get_or_create_call(
        &self,
        call_type: &str,
        id: &str,
        data: &CallData,
    ) -> Result<CallRef, VideoError> {
        let url = format!("{}/video/call/{}/{}", self.endpoint, call_type, id);
        let token =
            StreamAuth::generate_server_token(&self.api_secret, StreamAuth::get_timestamp())?;

        info!("Making request to get or create call {}:{}", call_type, id);
        debug!("API URL: {}", url);

        let res = self
            .client
            .post(&url)
            .query(&[("api_key", &self.api_key)])
            .header("Content-Type", "application/json")
            .header("Authorization", token)
            .header("stream-auth-type", "jwt")
            .json(&GetOrCreateCallRequest { data })
            .send()
            .await?;

        let status = res.status();
        info!("Response received with status: {}", status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            warn!("Video service rejected call {}: {}", id, message);
            return Err(VideoError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let response = res
            .json::<GetOrCreateCallResponse>()
            .await
            .map_err(|e| VideoError::InvalidResponse(e.to_string()))?;

        debug!("Call {} created: {}", response.call.cid, response.created);
        Ok(response.call)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
