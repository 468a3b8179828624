//! Dome9 API client.
//!
//! Low-level HTTP client that handles authentication, request construction
//! and response classification. Resource operations live on the service
//! handles returned by [`Client::account_trusts`] and friends.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use crate::error::{Dome9Error, Result};
use crate::models::{AccountTrusts, AssessmentHistories, Assessments, AzureCloudAccounts};

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.dome9.com/";

/// Identifier sent in every `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("dome9-rs/", env!("CARGO_PKG_VERSION"));

/// Pass as the body of [`Client::new_request`] for requests without one.
pub const NO_BODY: Option<&()> = None;

const MEDIA_TYPE: &str = "application/json";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// API key pair used for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    key_secret: String,
}

impl Credentials {
    /// Create credentials from an API key id and secret.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// The API key id.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

/// A configuration step applied to a [`Client`] after its defaults are set.
///
/// Options run in order and each may fail; the first failure aborts
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOption {
    /// Replace the base URL. Must parse as an absolute URL.
    BaseUrl(String),
    /// Prefix the current User-Agent: the result is `"<prefix> <current>"`.
    UserAgent(String),
    /// Deadline applied to every request.
    Timeout(Duration),
}

impl ClientOption {
    fn apply(self, client: &mut Client) -> Result<()> {
        match self {
            Self::BaseUrl(raw) => {
                let url = Url::parse(&raw).map_err(|e| {
                    Dome9Error::Configuration(format!("invalid base URL '{raw}': {e}"))
                })?;
                if url.cannot_be_a_base() {
                    return Err(Dome9Error::Configuration(format!(
                        "invalid base URL '{raw}': cannot be used as a base"
                    )));
                }
                client.base_url = Arc::new(url);
            }
            Self::UserAgent(prefix) => {
                let agent = format!("{prefix} {}", client.user_agent);
                HeaderValue::from_str(&agent).map_err(|_| {
                    Dome9Error::Configuration(format!("invalid User-Agent '{agent}'"))
                })?;
                client.user_agent = Arc::from(agent);
            }
            Self::Timeout(timeout) => client.timeout = Some(timeout),
        }
        Ok(())
    }
}

/// Status, headers and final URL of an HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// URL the response came from, after redirects.
    pub url: Url,
}

impl ResponseMeta {
    fn from_response(response: &Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            url: Url::parse(DEFAULT_BASE_URL).unwrap(),
        }
    }
}

/// A decoded response body together with its response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded body.
    pub data: T,
    /// Status, headers and URL of the response.
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Discard the metadata and return the decoded body.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Low-level Dome9 API client.
///
/// Handles authentication and HTTP requests. Immutable once built and
/// cheaply cloneable; clones share the same connection pool, so one client
/// can serve concurrent calls.
///
/// # Example
///
/// ```no_run
/// use dome9::{Client, ClientOption, Credentials};
///
/// # fn example() -> dome9::Result<()> {
/// // Create from environment variables
/// let client = Client::from_env()?;
///
/// // Or configure manually
/// let client = Client::with_options(
///     None,
///     Some(Credentials::new("key-id", "key-secret")),
///     [ClientOption::UserAgent("my-tool/1.0".to_string())],
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    base_url: Arc<Url>,
    user_agent: Arc<str>,
    timeout: Option<Duration>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with the default transport, base URL and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_options(None, Some(credentials), [])
    }

    /// Create a client, then apply `options` in order.
    ///
    /// When `http` is `None` a default transport is used.
    ///
    /// # Errors
    ///
    /// Returns [`Dome9Error::Configuration`] if `credentials` is `None` or
    /// any option fails.
    pub fn with_options(
        http: Option<reqwest::Client>,
        credentials: Option<Credentials>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self> {
        let credentials = credentials.ok_or_else(|| {
            Dome9Error::Configuration("Credentials must be provided".to_string())
        })?;

        let http = match http {
            Some(http) => http,
            None => default_transport()?,
        };

        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| Dome9Error::Configuration(format!("invalid default base URL: {e}")))?;

        let mut client = Self {
            http,
            credentials: Arc::new(credentials),
            base_url: Arc::new(base_url),
            user_agent: Arc::from(DEFAULT_USER_AGENT),
            timeout: None,
        };

        for option in options {
            option.apply(&mut client)?;
        }

        Ok(client)
    }

    /// Start a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from environment variables.
    ///
    /// Uses `DOME9_ACCESS_ID` and `DOME9_SECRET_KEY` for authentication and
    /// optionally `DOME9_BASE_URL` for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if either key variable is not set or the base URL
    /// is invalid.
    pub fn from_env() -> Result<Self> {
        let key_id = env::var("DOME9_ACCESS_ID").map_err(|_| {
            Dome9Error::Configuration("DOME9_ACCESS_ID environment variable not set".to_string())
        })?;
        let key_secret = env::var("DOME9_SECRET_KEY").map_err(|_| {
            Dome9Error::Configuration("DOME9_SECRET_KEY environment variable not set".to_string())
        })?;

        let options = env::var("DOME9_BASE_URL").ok().map(ClientOption::BaseUrl);

        Self::with_options(None, Some(Credentials::new(key_id, key_secret)), options)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the User-Agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Account trust operations.
    pub fn account_trusts(&self) -> AccountTrusts<'_> {
        AccountTrusts::new(self)
    }

    /// Assessment history operations.
    pub fn assessment_histories(&self) -> AssessmentHistories<'_> {
        AssessmentHistories::new(self)
    }

    /// Compliance assessment operations.
    pub fn assessments(&self) -> Assessments<'_> {
        Assessments::new(self)
    }

    /// Azure cloud account operations.
    pub fn azure_cloud_accounts(&self) -> AzureCloudAccounts<'_> {
        AzureCloudAccounts::new(self)
    }

    /// Build an authenticated API request.
    ///
    /// `path` is resolved against the base URL like a link reference, so it
    /// should not start with a slash. If `body` is given it is JSON encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Dome9Error::Url`] if `path` is not a valid reference and
    /// [`Dome9Error::Encoding`] if the body cannot be serialized.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let url = self.resolve(path)?;

        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(&self.credentials.key_id, Some(&self.credentials.key_secret))
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(ACCEPT, MEDIA_TYPE)
            .header(USER_AGENT, self.user_agent.as_ref());

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(Dome9Error::Encoding)?;
            builder = builder.body(payload);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }

    /// Send a request and check for a 2xx status, discarding the body.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: Request) -> Result<ResponseMeta> {
        let response = self.send(request).await?;
        let (meta, _) = Self::check_response(response, |s| s.is_success()).await?;
        Ok(meta)
    }

    /// Send a request, check for a 2xx status and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Dome9Error::Status`] on a non-2xx status and
    /// [`Dome9Error::Decoding`] if the body does not match `T`.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute_json<T: DeserializeOwned>(&self, request: Request) -> Result<ApiResponse<T>> {
        let response = self.send(request).await?;
        let (meta, response) = Self::check_response(response, |s| s.is_success()).await?;
        Self::decode(meta, response).await
    }

    /// Send a request, check for a 2xx status and copy the body verbatim
    /// into `sink`.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute_raw<W>(&self, request: Request, sink: &mut W) -> Result<ResponseMeta>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self.send(request).await?;
        let (meta, mut response) = Self::check_response(response, |s| s.is_success()).await?;

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(source) => {
                    return Err(Dome9Error::Body {
                        source,
                        response: Box::new(meta),
                    })
                }
            };
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;

        Ok(meta)
    }

    /// Send a request that must answer with exactly `expected`, discarding
    /// the body.
    pub(crate) async fn execute_expecting(
        &self,
        request: Request,
        expected: StatusCode,
    ) -> Result<ResponseMeta> {
        let response = self.send(request).await?;
        let (meta, _) = Self::check_response(response, |s| s == expected).await?;
        Ok(meta)
    }

    /// Send a request that must answer with exactly `expected` and decode
    /// the JSON body.
    pub(crate) async fn execute_json_expecting<T: DeserializeOwned>(
        &self,
        request: Request,
        expected: StatusCode,
    ) -> Result<ApiResponse<T>> {
        let response = self.send(request).await?;
        let (meta, response) = Self::check_response(response, |s| s == expected).await?;
        Self::decode(meta, response).await
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        check_reference(path)?;
        self.base_url.join(path).map_err(|e| Dome9Error::Url {
            input: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "request failed");
            Dome9Error::Transport(e)
        })?;

        tracing::debug!(%method, %url, status = response.status().as_u16(), "received response");
        Ok(response)
    }

    /// Check response status and convert errors.
    async fn check_response(
        response: Response,
        accept: impl Fn(StatusCode) -> bool,
    ) -> Result<(ResponseMeta, Response)> {
        let meta = ResponseMeta::from_response(&response);

        if accept(meta.status) {
            return Ok((meta, response));
        }

        let status = meta.status.as_u16();
        tracing::warn!(status, url = %meta.url, "unexpected response status");

        let body = match response.bytes().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::debug!(status, error = %e, "failed to read error response body");
                String::new()
            }
        };

        Err(Dome9Error::Status {
            status,
            response: Box::new(meta),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(meta: ResponseMeta, response: Response) -> Result<ApiResponse<T>> {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => {
                return Err(Dome9Error::Body {
                    source,
                    response: Box::new(meta),
                })
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(data) => Ok(ApiResponse { data, meta }),
            Err(source) => Err(Dome9Error::Decoding {
                source,
                response: Box::new(meta),
            }),
        }
    }
}

/// Fluent construction of a [`Client`].
///
/// Options accumulate in call order and are applied by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ClientBuilder {
    http: Option<reqwest::Client>,
    credentials: Option<Credentials>,
    options: Vec<ClientOption>,
}

impl ClientBuilder {
    /// Use a pre-configured transport.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the API credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.push(ClientOption::BaseUrl(url.into()));
        self
    }

    /// Prefix the User-Agent.
    pub fn user_agent(mut self, prefix: impl Into<String>) -> Self {
        self.options.push(ClientOption::UserAgent(prefix.into()));
        self
    }

    /// Set a per-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.push(ClientOption::Timeout(timeout));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Same as [`Client::with_options`].
    pub fn build(self) -> Result<Client> {
        Client::with_options(self.http, self.credentials, self.options)
    }
}

fn default_transport() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .brotli(true)
        .gzip(true)
        .deflate(true)
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|e| Dome9Error::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Reject references whose first segment holds a colon but no valid scheme.
///
/// `Url::join` would otherwise treat `":"` or `"a b:c"` as a relative path.
fn check_reference(input: &str) -> Result<()> {
    let end = input.find(['/', '?', '#']).unwrap_or(input.len());
    let Some(colon) = input[..end].find(':') else {
        return Ok(());
    };

    let scheme = &input[..colon];
    let reason = if scheme.is_empty() {
        "missing protocol scheme"
    } else if scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Ok(());
    } else {
        "first path segment in URL cannot contain colon"
    };

    Err(Dome9Error::Url {
        input: input.to_string(),
        reason: reason.to_string(),
    })
}
