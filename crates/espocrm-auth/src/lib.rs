//! Authorization for the EspoCRM API
//!
//! EspoCRM accepts three ways of authorizing a request:
//!
//! | Scheme | Header | Value |
//! |--------|--------|-------|
//! | Basic | `Authorization` | `Basic base64(urlencode(user:pass))` |
//! | HMAC | `X-Hmac-Authorization` | `base64(api_key ":" hmac_sha256(secret, "METHOD /action"))` |
//! | API key | `X-Api-Key` | the key itself |
//!
//! An [`AuthScheme`] holds the credentials. An [`Authorizer`] is built from
//! it once, validating the HMAC key up front, and then produces the header
//! for each request.
//!
//! # Example
//!
//! ```
//! use espocrm_auth::{AuthScheme, Authorizer};
//! use espocrm_types::Method;
//!
//! let scheme = AuthScheme::hmac("my-api-key", "my-secret-key");
//! let authorizer = Authorizer::new(&scheme).unwrap();
//!
//! let header = authorizer.header(Method::Get, "Account").unwrap();
//! assert_eq!(header.name, "X-Hmac-Authorization");
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{
    AuthKind, AuthScheme, ENV_API_KEY, ENV_PASSWORD, ENV_SECRET_KEY, ENV_USERNAME,
};
pub use error::{AuthError, AuthResult};
pub use signer::{
    AuthHeader, Authorizer, HmacSigner, API_KEY_HEADER, AUTHORIZATION_HEADER, HMAC_HEADER,
};
