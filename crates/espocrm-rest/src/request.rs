//! Request construction
//!
//! Turns `(method, action, params, payload)` into a fully addressed and
//! authorized [`PreparedRequest`]:
//!
//! 1. URL = base URL + `/api/v1/` + action, plus `?query` when params are
//!    given and the method is not POST
//! 2. Authorization header from the configured scheme
//! 3. JSON body when a payload is given and the method is not GET

use crate::error::RestResult;
use espocrm_auth::Authorizer;
use espocrm_types::{Method, Params};
use serde::Serialize;

/// Path prefix of every API action
pub const API_PATH: &str = "/api/v1/";

/// Media type of request bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialized request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    /// Value of the `Content-Type` header
    pub content_type: &'static str,
    /// Body text
    pub content: String,
}

/// A request ready to be handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    /// Create a request without headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Look up a header value, ignoring case of the name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds requests against one base URL with one authorizer
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base_url: &'a str,
    authorizer: &'a Authorizer,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(base_url: &'a str, authorizer: &'a Authorizer) -> Self {
        Self {
            base_url,
            authorizer,
        }
    }

    /// Full URL for an action
    ///
    /// POST requests never carry a query string, even when params are
    /// given. Supplied params always add `?`, even when empty.
    pub fn url(&self, method: Method, action: &str, params: Option<&Params>) -> RestResult<String> {
        let mut url = format!("{}{}{}", self.base_url, API_PATH, action);

        if let Some(params) = params {
            if method.allows_query() {
                url.push('?');
                url.push_str(&params.to_query_string()?);
            }
        }

        Ok(url)
    }

    /// Compose URL, authorization header and body
    pub fn build<P>(
        &self,
        method: Method,
        action: &str,
        params: Option<&Params>,
        payload: Option<&P>,
    ) -> RestResult<PreparedRequest>
    where
        P: Serialize + ?Sized,
    {
        let mut request = PreparedRequest::new(method, self.url(method, action, params)?);

        if let Some(header) = self.authorizer.header(method, action) {
            request.headers.push((header.name, header.value));
        }

        if let Some(payload) = payload {
            if method.allows_body() {
                request.body = Some(RequestBody {
                    content_type: JSON_CONTENT_TYPE,
                    content: serde_json::to_string(payload)?,
                });
            }
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use espocrm_auth::AuthScheme;
    use serde_json::json;

    const BASE: &str = "https://crm.example.com";

    fn authorizer(scheme: AuthScheme) -> Authorizer {
        Authorizer::new(&scheme).unwrap()
    }

    #[test]
    fn test_url_without_params() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        assert_eq!(
            builder.url(Method::Get, "Account", None).unwrap(),
            "https://crm.example.com/api/v1/Account"
        );
    }

    #[test]
    fn test_get_appends_query_string() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        let params = Params::new().with("maxSize", "5").with("select", "name,id");

        assert_eq!(
            builder.url(Method::Get, "Account", Some(&params)).unwrap(),
            "https://crm.example.com/api/v1/Account?maxSize=5&select=name%2Cid"
        );
    }

    #[test]
    fn test_post_drops_query_string() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        let params = Params::new().with("maxSize", "5");

        assert_eq!(
            builder.url(Method::Post, "Account", Some(&params)).unwrap(),
            "https://crm.example.com/api/v1/Account"
        );
        // PUT and DELETE keep it
        assert!(builder
            .url(Method::Delete, "Account/1", Some(&params))
            .unwrap()
            .ends_with("?maxSize=5"));
    }

    #[test]
    fn test_empty_params_keep_separator() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        assert_eq!(
            builder.url(Method::Get, "Account", Some(&Params::new())).unwrap(),
            "https://crm.example.com/api/v1/Account?"
        );
        // No params at all, no separator
        assert_eq!(
            builder.url(Method::Get, "Account", None).unwrap(),
            "https://crm.example.com/api/v1/Account"
        );
        assert_eq!(
            builder.url(Method::Post, "Account", Some(&Params::new())).unwrap(),
            "https://crm.example.com/api/v1/Account"
        );
    }

    #[test]
    fn test_get_never_has_body() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        let payload = json!({"name": "Acme"});

        let request = builder.build(Method::Get, "Account", None, Some(&payload)).unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_payload_becomes_json_body() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        let payload = json!({"name": "Acme"});

        for method in [Method::Post, Method::Put, Method::Delete] {
            let request = builder.build(method, "Account", None, Some(&payload)).unwrap();
            let body = request.body.expect("body should be attached");
            assert_eq!(body.content_type, "application/json");
            assert_eq!(body.content, r#"{"name":"Acme"}"#);
        }
    }

    #[test]
    fn test_no_payload_no_body() {
        let auth = authorizer(AuthScheme::None);
        let builder = RequestBuilder::new(BASE, &auth);
        let request = builder
            .build::<()>(Method::Delete, "Account/1", None, None)
            .unwrap();
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_basic_header_attached() {
        let auth = authorizer(AuthScheme::basic("admin", "password"));
        let builder = RequestBuilder::new(BASE, &auth);
        let request = builder.build::<()>(Method::Get, "Account", None, None).unwrap();

        assert_eq!(request.header("authorization"), Some("Basic YWRtaW4lM0FwYXNzd29yZA=="));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_api_key_header_only() {
        let auth = authorizer(AuthScheme::api_key("abc123"));
        let builder = RequestBuilder::new(BASE, &auth);
        let request = builder.build::<()>(Method::Get, "Account", None, None).unwrap();

        assert_eq!(request.header("X-Api-Key"), Some("abc123"));
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.header("X-Hmac-Authorization"), None);
    }

    #[test]
    fn test_hmac_signs_action_not_url() {
        let auth = authorizer(AuthScheme::hmac("K", "S"));
        let builder = RequestBuilder::new(BASE, &auth);
        let params = Params::new().with("maxSize", "1");
        let request = builder
            .build::<()>(Method::Get, "Account", Some(&params), None)
            .unwrap();

        // Query string does not take part in the signature
        assert_eq!(
            request.header("X-Hmac-Authorization"),
            Some("Szr043PSj0aCs4KkK4h6Nrg7dBEslsY9FdzxmZfGkQmuZA==")
        );
    }
}
