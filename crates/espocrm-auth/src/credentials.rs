//! Credentials for the supported authorization schemes
//!
//! # Security
//!
//! Passwords and secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::SecretString;

/// Environment variable holding the Basic auth username
pub const ENV_USERNAME: &str = "ESPOCRM_USERNAME";
/// Environment variable holding the Basic auth password
pub const ENV_PASSWORD: &str = "ESPOCRM_PASSWORD";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ESPOCRM_API_KEY";
/// Environment variable holding the HMAC secret key
pub const ENV_SECRET_KEY: &str = "ESPOCRM_SECRET_KEY";

/// Discriminant of an [`AuthScheme`], safe to log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthKind {
    /// HTTP Basic
    Basic,
    /// HMAC-SHA256 signed request
    Hmac,
    /// Static API key
    ApiKey,
    /// No authorization header
    None,
}

impl AuthKind {
    /// Returns a short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Hmac => "hmac",
            Self::ApiKey => "api_key",
            Self::None => "none",
        }
    }
}

/// Credentials of exactly one authorization scheme
#[derive(Clone, Default)]
pub enum AuthScheme {
    /// HTTP Basic with username and password
    Basic {
        username: String,
        password: SecretString,
    },
    /// API key plus secret key, requests are HMAC-signed
    Hmac {
        api_key: String,
        secret_key: SecretString,
    },
    /// API key sent as-is
    ApiKey { api_key: String },
    /// Unauthenticated requests
    #[default]
    None,
}

impl AuthScheme {
    /// HTTP Basic credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// HMAC credentials
    pub fn hmac(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::Hmac {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Static API key
    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            api_key: api_key.into(),
        }
    }

    /// Pick a scheme from whichever credential fields are present
    ///
    /// First match wins: username and password → Basic, api key and secret
    /// key → HMAC, api key alone → API key, otherwise no authorization.
    pub fn from_credentials(
        username: Option<String>,
        password: Option<String>,
        api_key: Option<String>,
        secret_key: Option<String>,
    ) -> Self {
        match (username, password, api_key, secret_key) {
            (Some(username), Some(password), _, _) => Self::basic(username, password),
            (_, _, Some(api_key), Some(secret_key)) => Self::hmac(api_key, secret_key),
            (_, _, Some(api_key), None) => Self::api_key(api_key),
            _ => Self::None,
        }
    }

    /// Read credentials from the environment
    ///
    /// Reads `ESPOCRM_USERNAME`, `ESPOCRM_PASSWORD`, `ESPOCRM_API_KEY` and
    /// `ESPOCRM_SECRET_KEY`; unset variables are treated as absent and the
    /// scheme is chosen as in [`AuthScheme::from_credentials`].
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self::from_credentials(
            var(ENV_USERNAME),
            var(ENV_PASSWORD),
            var(ENV_API_KEY),
            var(ENV_SECRET_KEY),
        )
    }

    /// Which scheme this is
    pub fn kind(&self) -> AuthKind {
        match self {
            Self::Basic { .. } => AuthKind::Basic,
            Self::Hmac { .. } => AuthKind::Hmac,
            Self::ApiKey { .. } => AuthKind::ApiKey,
            Self::None => AuthKind::None,
        }
    }

    /// The API key, for the HMAC and API key schemes
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Hmac { api_key, .. } | Self::ApiKey { api_key } => Some(api_key.as_str()),
            Self::Basic { .. } | Self::None => None,
        }
    }
}

impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Hmac { api_key, .. } => f
                .debug_struct("Hmac")
                .field("api_key", &redact_key(api_key))
                .field("secret_key", &"[REDACTED]")
                .finish(),
            Self::ApiKey { api_key } => f
                .debug_struct("ApiKey")
                .field("api_key", &redact_key(api_key))
                .finish(),
            Self::None => f.write_str("None"),
        }
    }
}

pub(crate) fn redact_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}...", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_basic_takes_priority() {
        let scheme = AuthScheme::from_credentials(some("admin"), some("pass"), some("key"), some("secret"));
        match scheme {
            AuthScheme::Basic { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password.expose_secret(), "pass");
            }
            other => panic!("expected Basic, got {:?}", other),
        }
    }

    #[test]
    fn test_hmac_when_no_basic_pair() {
        // A username without a password does not select Basic
        let scheme = AuthScheme::from_credentials(some("admin"), None, some("key"), some("secret"));
        assert_eq!(scheme.kind(), AuthKind::Hmac);
        assert_eq!(scheme.key(), Some("key"));
    }

    #[test]
    fn test_api_key_without_secret() {
        let scheme = AuthScheme::from_credentials(None, None, some("key"), None);
        assert_eq!(scheme.kind(), AuthKind::ApiKey);
        assert_eq!(scheme.key(), Some("key"));
    }

    #[test]
    fn test_nothing_set() {
        let scheme = AuthScheme::from_credentials(None, some("pass"), None, some("secret"));
        assert_eq!(scheme.kind(), AuthKind::None);
        assert_eq!(AuthScheme::default().kind(), AuthKind::None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", AuthScheme::basic("admin", "hunter2"));
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));

        let debug = format!("{:?}", AuthScheme::hmac("abcdefgh12345", "topsecret"));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("abcdefgh12345"));
        assert!(debug.contains("abcd..."));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AuthKind::Hmac.as_str(), "hmac");
        assert_eq!(AuthKind::ApiKey.as_str(), "api_key");
    }
}
