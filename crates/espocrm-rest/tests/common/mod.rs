//! Common test utilities for espocrm-rest integration tests

use espocrm_rest::{AuthScheme, ClientConfig, EspoClient};
use wiremock::MockServer;

/// Sample list response for `GET Account`
pub const ACCOUNT_LIST: &str = r#"{"total":2,"list":[{"id":"5f1a","name":"Acme"},{"id":"5f1b","name":"Globex"}]}"#;

/// Sample single record response
pub const ACCOUNT_RECORD: &str = r#"{"id":"5f1a","name":"Acme","type":"Customer"}"#;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer, auth: AuthScheme) -> EspoClient {
    let config = ClientConfig::new(server.uri())
        .with_auth(auth)
        .with_timeout(5);
    EspoClient::new(config).expect("client should build")
}
