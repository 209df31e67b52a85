//! REST API client for EspoCRM
//!
//! This crate builds, authorizes and sends requests to the EspoCRM REST
//! API (`{base_url}/api/v1/{action}`) and hands back the raw response body.
//!
//! # Features
//!
//! - **Requests**: `get` with ordered query parameters, `request` with a JSON
//!   payload, `send` without one
//! - **Records**: list, read, create, update, delete via [`EntityEndpoints`]
//! - **Transport**: reqwest by default, any [`HttpTransport`] for tests
//!
//! # Authentication
//!
//! One of HTTP Basic, static API key (`X-Api-Key`) or HMAC-SHA256 signed
//! requests (`X-Hmac-Authorization`). The scheme is fixed when the client
//! is built; see [`espocrm_auth`].
//!
//! # Example
//!
//! ```no_run
//! use espocrm_rest::{ClientConfig, EspoClient, RestError};
//! use espocrm_types::{ListResult, Params, WhereClause};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EspoClient::new(
//!         ClientConfig::new("https://crm.example.com").with_api_key("my-api-key"),
//!     )?;
//!
//!     let params = Params::new()
//!         .max_size(20)
//!         .filter(WhereClause::equals("type", "Customer"));
//!
//!     match client.entities().list("Account", Some(&params)).await {
//!         Ok(body) => {
//!             let accounts: ListResult<serde_json::Value> = serde_json::from_str(&body)?;
//!             println!("{} accounts", accounts.total);
//!         }
//!         Err(RestError::Request { code, message }) => eprintln!("{}: {}", code, message),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Any status other than 200 is reported as [`RestError::Request`]. The
//! client does not retry.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;

// Re-export main types
pub use client::{ClientConfig, EspoClient, ENV_URL};
pub use endpoints::EntityEndpoints;
pub use error::{RestError, RestResult};
pub use request::{PreparedRequest, RequestBody, RequestBuilder, API_PATH};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

// Re-export the types callers need to build requests
pub use espocrm_auth::{AuthKind, AuthScheme};
pub use espocrm_types::{Method, Params};
