//! Request authorization headers
//!
//! HMAC signature algorithm:
//! 1. message = `METHOD + " /" + action` (e.g. `GET /Account`)
//! 2. digest = HMAC-SHA256(secret_key, message)
//! 3. value = base64(api_key + ":" + digest), over raw bytes

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use espocrm_types::Method;
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;
use tracing::debug;

use crate::credentials::{redact_key, AuthKind, AuthScheme};
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying Basic credentials
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header carrying the HMAC signature
pub const HMAC_HEADER: &str = "X-Hmac-Authorization";
/// Header carrying a bare API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// A single authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    /// Header name
    pub name: &'static str,
    /// Header value
    pub value: String,
}

impl AuthHeader {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// HMAC-SHA256 request signer
///
/// The secret key is loaded into the MAC once; each signature works on a
/// clone of the keyed state.
#[derive(Clone)]
pub struct HmacSigner {
    api_key: String,
    mac: HmacSha256,
}

impl HmacSigner {
    /// Create a signer, failing if the secret key is rejected
    pub fn new(api_key: impl Into<String>, secret_key: &[u8]) -> AuthResult<Self> {
        let mac = HmacSha256::new_from_slice(secret_key)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            mac,
        })
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The string that gets signed for a request
    pub fn signing_string(method: Method, action: &str) -> String {
        format!("{} /{}", method.as_str(), action)
    }

    /// Raw HMAC-SHA256 digest of the signing string
    pub fn digest(&self, method: Method, action: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(Self::signing_string(method, action).as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Header value for `X-Hmac-Authorization`
    pub fn sign(&self, method: Method, action: &str) -> String {
        let digest = self.digest(method, action);

        let mut bytes = Vec::with_capacity(self.api_key.len() + 1 + digest.len());
        bytes.extend_from_slice(self.api_key.as_bytes());
        bytes.push(b':');
        bytes.extend_from_slice(&digest);

        BASE64.encode(bytes)
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_key", &redact_key(&self.api_key))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
enum Strategy {
    Basic(String),
    Hmac(HmacSigner),
    ApiKey(String),
    None,
}

/// Produces the authorization header for each request
///
/// Built once from an [`AuthScheme`]. The Basic header value is computed
/// up front and the HMAC key is validated here, so producing a header
/// never fails.
#[derive(Clone)]
pub struct Authorizer {
    strategy: Strategy,
}

impl Authorizer {
    /// Prepare the authorizer for a scheme
    pub fn new(scheme: &AuthScheme) -> AuthResult<Self> {
        let strategy = match scheme {
            AuthScheme::Basic { username, password } => {
                Strategy::Basic(basic_value(username, password.expose_secret()))
            }
            AuthScheme::Hmac {
                api_key,
                secret_key,
            } => Strategy::Hmac(HmacSigner::new(
                api_key.as_str(),
                secret_key.expose_secret().as_bytes(),
            )?),
            AuthScheme::ApiKey { api_key } => Strategy::ApiKey(api_key.clone()),
            AuthScheme::None => Strategy::None,
        };

        debug!(scheme = scheme.kind().as_str(), "Prepared request authorizer");

        Ok(Self { strategy })
    }

    /// Which scheme this authorizer applies
    pub fn kind(&self) -> AuthKind {
        match self.strategy {
            Strategy::Basic(_) => AuthKind::Basic,
            Strategy::Hmac(_) => AuthKind::Hmac,
            Strategy::ApiKey(_) => AuthKind::ApiKey,
            Strategy::None => AuthKind::None,
        }
    }

    /// Header to attach to a request, if any
    pub fn header(&self, method: Method, action: &str) -> Option<AuthHeader> {
        match &self.strategy {
            Strategy::Basic(value) => Some(AuthHeader::new(AUTHORIZATION_HEADER, value.as_str())),
            Strategy::Hmac(signer) => Some(AuthHeader::new(HMAC_HEADER, signer.sign(method, action))),
            Strategy::ApiKey(api_key) => Some(AuthHeader::new(API_KEY_HEADER, api_key.as_str())),
            Strategy::None => None,
        }
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("kind", &self.kind())
            .finish()
    }
}

/// `Basic base64(urlencode("username:password"))`
///
/// The credential pair is form-urlencoded before base64, so `:` becomes
/// `%3A` and spaces become `+`.
fn basic_value(username: &str, password: &str) -> String {
    let pair = format!("{}:{}", username, password);
    let encoded: String = url::form_urlencoded::byte_serialize(pair.as_bytes()).collect();
    format!("Basic {}", BASE64.encode(encoded.as_bytes()))
}
