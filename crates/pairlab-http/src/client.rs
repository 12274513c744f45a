//! HTTP client for the annotation REST API.

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::Form;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use pairlab_core::error::{Error, ProtocolError, TransportError};
use pairlab_core::{ApiUrl, AuthToken};

use crate::endpoints::ErrorResponse;

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given API.
    pub fn new(api: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pairlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, api }
    }

    /// Returns the API URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Unauthenticated JSON POST.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "POST");
        self.send(self.client.post(&url).json(body)).await
    }

    /// Authenticated GET.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        token: &AuthToken,
    ) -> Result<R, Error> {
        let url = self.api.endpoint(path);
        debug!(%url, "GET");
        self.send(self.authed(self.client.get(&url), token)).await
    }

    /// Authenticated GET with query parameters.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get_query<Q, R>(
        &self,
        path: &str,
        query: &Q,
        token: &AuthToken,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "GET");
        trace!(?query, "query parameters");
        self.send(self.authed(self.client.get(&url), token).query(query))
            .await
    }

    /// Authenticated JSON POST.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post_authed<B, R>(
        &self,
        path: &str,
        body: &B,
        token: &AuthToken,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "POST");
        self.send(self.authed(self.client.post(&url), token).json(body))
            .await
    }

    /// Authenticated JSON POST whose response body is ignored.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post_authed_no_response<B>(
        &self,
        path: &str,
        body: &B,
        token: &AuthToken,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "POST (no response)");
        self.send_no_response(self.authed(self.client.post(&url), token).json(body))
            .await
    }

    /// Authenticated JSON PUT whose response body is ignored.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn put_authed_no_response<B>(
        &self,
        path: &str,
        body: &B,
        token: &AuthToken,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "PUT (no response)");
        self.send_no_response(self.authed(self.client.put(&url), token).json(body))
            .await
    }

    /// Authenticated DELETE.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn delete_authed(&self, path: &str, token: &AuthToken) -> Result<(), Error> {
        let url = self.api.endpoint(path);
        debug!(%url, "DELETE");
        self.send_no_response(self.authed(self.client.delete(&url), token))
            .await
    }

    /// Authenticated multipart POST whose response body is ignored.
    #[instrument(skip(self, form, token), fields(api = %self.api))]
    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
        token: &AuthToken,
    ) -> Result<(), Error> {
        let url = self.api.endpoint(path);
        debug!(%url, "POST multipart");
        self.send_no_response(self.authed(self.client.post(&url), token).multipart(form))
            .await
    }

    fn authed(&self, request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(ACCEPT, "application/json")
    }

    /// Send a request and parse the JSON body or the error.
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, Error> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(status = %status, "HTTP response");

        if !status.is_success() {
            return Err(Error::Protocol(Self::parse_error_response(response).await));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::Protocol(ProtocolError::new(
                status.as_u16(),
                Some("InvalidResponse".to_string()),
                Some(e.to_string()),
            ))
        })
    }

    async fn send_no_response(&self, request: RequestBuilder) -> Result<(), Error> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(status = %status, "HTTP response");

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(Self::parse_error_response(response).await))
        }
    }

    /// Parse an error response.
    async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}
