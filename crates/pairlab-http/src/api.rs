//! HTTP-backed API implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use pairlab_core::error::{AuthError, Error};
use pairlab_core::traits::Api;
use pairlab_core::types::ApiUrl;
use pairlab_core::{AuthToken, Credentials, Result};

use crate::client::HttpClient;
use crate::endpoints::{LOGIN, LoginRequest, LoginResponse};
use crate::session::HttpSession;

/// A network-backed annotation API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    api: ApiUrl,
    client: HttpClient,
}

impl HttpApi {
    /// Create a new HTTP API for the given base URL.
    pub fn new(api: ApiUrl) -> Self {
        let client = HttpClient::new(api.clone());
        Self { api, client }
    }

    pub(crate) fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl Api for HttpApi {
    type Session = HttpSession;

    fn url(&self) -> &ApiUrl {
        &self.api
    }

    #[instrument(skip(self, credentials), fields(api = %self.api, login = %credentials.login()))]
    async fn login(&self, credentials: Credentials) -> Result<HttpSession> {
        debug!("Logging in");

        let request = LoginRequest {
            login: credentials.login(),
            password: credentials.password(),
        };

        let response: LoginResponse = match self.client.post_json(LOGIN, &request).await {
            Ok(response) => response,
            Err(Error::Protocol(err)) if err.is_auth_error() => {
                return Err(AuthError::InvalidCredentials(err.to_string()).into());
            }
            Err(err) => return Err(err),
        };

        let token = AuthToken::new(response.token);
        let role = token.role()?;
        debug!(%role, "Login succeeded");

        Ok(HttpSession::new(
            self.clone(),
            credentials.login().to_string(),
            role,
            token,
        ))
    }
}
