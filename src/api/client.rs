//! HTTP plumbing shared by all service clients.
//!
//! Every request goes through [`ApiClient`], which attaches the bearer
//! token from the shared session and turns non-success responses into
//! [`GSpotifyError`]s. A 401 drops the session, which sends the user back
//! to the login page.

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{GSpotifyError, Result};
use crate::session::SharedSession;

/// Low-level REST client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SharedSession,
}

impl ApiClient {
    /// Create a client for `config.api_url` using `session` for credentials.
    pub fn new(config: &Config, session: SharedSession) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("GSpotify/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: crate::config::normalize_url(&config.api_url)?,
            session,
        })
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared session used for the bearer token.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Start a request with the bearer token attached, if any.
    async fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.url(endpoint);
        debug!("{} {}", method, url);

        let builder = self.client.request(method, &url);
        match self.session.read().await.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and map error statuses.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = GSpotifyError::from_status(status, &body);

        if matches!(err, GSpotifyError::Unauthorized(_)) {
            warn!("Session expired or invalid, clearing stored credentials");
            if let Err(e) = self.session.write().await.clear() {
                warn!("Could not clear session: {}", e);
            }
        } else {
            error!("GSpotify API error ({}): {}", status, err);
        }

        Err(err)
    }

    /// Decode a JSON body. Empty bodies decode as `null`.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    /// GET and decode.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let builder = self.request(Method::GET, endpoint).await;
        Self::read_json(self.send(builder).await?).await
    }

    /// GET with query parameters and decode.
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, endpoint).await.query(query);
        Self::read_json(self.send(builder).await?).await
    }

    /// GET raw JSON, for responses whose shape varies.
    pub async fn get_value<Q: Serialize + ?Sized>(&self, endpoint: &str, query: &Q) -> Result<Value> {
        self.get_with_query(endpoint, query).await
    }

    /// POST a JSON body.
    pub async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, endpoint).await.json(body);
        Self::read_json(self.send(builder).await?).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let builder = self.request(Method::POST, endpoint).await;
        Self::read_json(self.send(builder).await?).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T, F>(&self, endpoint: &str, form: &F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, endpoint).await.form(form);
        Self::read_json(self.send(builder).await?).await
    }

    /// POST a multipart form.
    pub async fn post_multipart<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> Result<T> {
        let builder = self.request(Method::POST, endpoint).await.multipart(form);
        Self::read_json(self.send(builder).await?).await
    }

    /// PUT a JSON body.
    pub async fn put_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, endpoint).await.json(body);
        Self::read_json(self.send(builder).await?).await
    }

    /// PUT without a body.
    pub async fn put_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let builder = self.request(Method::PUT, endpoint).await;
        Self::read_json(self.send(builder).await?).await
    }

    /// DELETE and decode.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let builder = self.request(Method::DELETE, endpoint).await;
        Self::read_json(self.send(builder).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_url_join() {
        let config = Config::new("http://localhost:8000/").unwrap();
        let client = ApiClient::new(&config, Session::in_memory().shared()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/songs/"), "http://localhost:8000/songs/");
        assert_eq!(client.url("genres"), "http://localhost:8000/genres");
    }
}
