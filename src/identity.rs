use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ClerkConfig;
use crate::error::IdentityError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: Option<String>,
}

/// Resolves the user behind a browser session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the session is unknown or no longer active
    async fn current_user(
        &self,
        session_id: &str,
    ) -> Result<Option<AuthenticatedUser>, IdentityError>;
}

/// Session ids issued by the provider are plain `sess_...` tokens
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id.len() <= 128
        && session_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[derive(Debug, Deserialize)]
struct ClerkSession {
    user_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ClerkUser {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    username: Option<String>,
}

impl ClerkUser {
    fn display_name(&self) -> Option<String> {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if full.is_empty() {
            self.username.clone()
        } else {
            Some(full)
        }
    }
}

/// Identity provider backed by the Clerk backend API
pub struct ClerkIdentityProvider {
    client: Client,
    secret_key: String,
    endpoint: String,
}

impl ClerkIdentityProvider {
    pub fn new(config: &ClerkConfig) -> Self {
        Self {
            client: Client::new(),
            secret_key: config.secret_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    // Build `{endpoint}/v1/{segments...}` with every segment percent-encoded
    fn url_for(&self, segments: &[&str]) -> Result<Url, IdentityError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| IdentityError::InvalidEndpoint(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| IdentityError::InvalidEndpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, IdentityError> {
        let url = self.url_for(segments)?;
        debug!("Identity API URL: {}", url);

        let res = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => res
                .json::<T>()
                .await
                .map(Some)
                .map_err(|e| IdentityError::InvalidResponse(e.to_string())),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(IdentityError::Unexpected {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentityProvider {
    async fn current_user(
        &self,
        session_id: &str,
    ) -> Result<Option<AuthenticatedUser>, IdentityError> {
        if !is_valid_session_id(session_id) {
            warn!("Rejecting malformed session id {:?}", session_id);
            return Ok(None);
        }

        let session = match self.get::<ClerkSession>(&["sessions", session_id]).await? {
            Some(session) => session,
            None => {
                info!("Session {} not found", session_id);
                return Ok(None);
            }
        };

        if session.status != "active" {
            warn!(
                "Session {} is {}, treating as signed out",
                session_id, session.status
            );
            return Ok(None);
        }

        let user = self
            .get::<ClerkUser>(&["users", session.user_id.as_str()])
            .await?;

        Ok(user.map(|user| AuthenticatedUser {
            name: user.display_name(),
            id: user.id,
        }))
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;
