//! Main REST client implementation

use crate::endpoints::EntityEndpoints;
use crate::error::{RestError, RestResult};
use crate::request::RequestBuilder;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use espocrm_auth::{AuthKind, AuthScheme, Authorizer};
use espocrm_types::{Method, Params};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("espocrm-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the EspoCRM base URL
pub const ENV_URL: &str = "ESPOCRM_URL";

/// EspoCRM REST API client
///
/// Every call returns the raw response body on HTTP 200 and
/// [`RestError::Request`] on any other status. Decoding the body is left
/// to the caller.
///
/// # Example
///
/// ```no_run
/// use espocrm_rest::{ClientConfig, EspoClient};
/// use espocrm_types::{Method, Params};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::new("https://crm.example.com")
///         .with_hmac("api-key", "secret-key");
///     let client = EspoClient::new(config)?;
///
///     let params = Params::new().max_size(10);
///     let accounts = client.get("Account", Some(&params)).await?;
///     println!("{}", accounts);
///
///     let lead = json!({"firstName": "Ada", "lastName": "Lovelace"});
///     client.request(Method::Post, "Lead", Some(&lead)).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct EspoClient<T = ReqwestTransport> {
    base_url: String,
    authorizer: Authorizer,
    transport: T,
}

impl EspoClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;

        Self::with_transport(config, transport)
    }

    /// Create a client from environment variables
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> RestResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: HttpTransport> EspoClient<T> {
    /// Create a client that sends requests through `transport`
    ///
    /// Fails if the configured HMAC secret key cannot be used.
    pub fn with_transport(config: ClientConfig, transport: T) -> RestResult<Self> {
        let authorizer = Authorizer::new(&config.auth)?;
        let base_url = config.normalized_base_url().to_string();

        info!(base_url = %base_url, auth = authorizer.kind().as_str(), "Created EspoCRM REST client");

        Ok(Self {
            base_url,
            authorizer,
            transport,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authorization scheme in use
    pub fn auth_kind(&self) -> AuthKind {
        self.authorizer.kind()
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// CRUD helpers for entity records
    pub fn entities(&self) -> EntityEndpoints<'_, T> {
        EntityEndpoints::new(self)
    }

    /// Send a GET request
    ///
    /// # Arguments
    /// * `action` - Path after `/api/v1/` (e.g. "Account", "Contact/5f1a")
    /// * `params` - Query parameters, serialized in insertion order
    #[instrument(skip(self, params))]
    pub async fn get(&self, action: &str, params: Option<&Params>) -> RestResult<String> {
        self.perform_request::<()>(Method::Get, action, params, None)
            .await
    }

    /// Send a request with an optional JSON payload
    ///
    /// The payload is ignored for GET.
    #[instrument(skip(self, payload))]
    pub async fn request<P>(&self, method: Method, action: &str, payload: Option<&P>) -> RestResult<String>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.perform_request(method, action, None, payload).await
    }

    /// Send a request without a payload
    #[instrument(skip(self))]
    pub async fn send(&self, method: Method, action: &str) -> RestResult<String> {
        self.perform_request::<()>(method, action, None, None)
            .await
    }

    async fn perform_request<P>(
        &self,
        method: Method,
        action: &str,
        params: Option<&Params>,
        payload: Option<&P>,
    ) -> RestResult<String>
    where
        P: Serialize + ?Sized + Sync,
    {
        let request = RequestBuilder::new(&self.base_url, &self.authorizer)
            .build(method, action, params, payload)?;

        debug!(
            url = %request.url,
            auth = self.authorizer.kind().as_str(),
            has_body = request.body.is_some(),
            "Sending request"
        );

        let response = self.transport.send(&request).await?;
        into_body(response)
    }
}

impl<T> std::fmt::Debug for EspoClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EspoClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.authorizer.kind())
            .finish()
    }
}

/// Map a transport response: 200 yields the body, anything else an error
fn into_body(response: HttpResponse) -> RestResult<String> {
    if response.status != 200 {
        debug!(status = response.status, "Request rejected");
        return Err(RestError::Request {
            code: response.status,
            message: response.status_message,
        });
    }

    Ok(response.body)
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// EspoCRM base URL, e.g. `https://crm.example.com`
    pub base_url: String,
    /// Authorization scheme
    pub auth: AuthScheme,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for a base URL, without authorization
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: AuthScheme::None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the base URL from `ESPOCRM_URL` and credentials as described in
    /// [`AuthScheme::from_env`]. An empty `ESPOCRM_URL` counts as unset.
    pub fn from_env() -> RestResult<Self> {
        let base_url = required_url(std::env::var(ENV_URL).ok())?;

        Ok(Self::new(base_url).with_auth(AuthScheme::from_env()))
    }

    /// Set the authorization scheme
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Use HTTP Basic authorization
    pub fn with_basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_auth(AuthScheme::basic(username, password))
    }

    /// Use HMAC-signed requests
    pub fn with_hmac(self, api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.with_auth(AuthScheme::hmac(api_key, secret_key))
    }

    /// Use a static API key
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        self.with_auth(AuthScheme::api_key(api_key))
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL with trailing slashes removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn required_url(value: Option<String>) -> RestResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RestError::EnvVarNotSet(ENV_URL.to_string()))
}
