//! Record CRUD endpoints
//!
//! EspoCRM exposes every entity type (`Account`, `Contact`, `Lead`, ...)
//! under the same routes:
//!
//! | Operation | Route |
//! |-----------|-------|
//! | list | `GET {Entity}` |
//! | read | `GET {Entity}/{id}` |
//! | create | `POST {Entity}` |
//! | update | `PUT {Entity}/{id}` |
//! | delete | `DELETE {Entity}/{id}` |
//! | list related | `GET {Entity}/{id}/{link}` |

use crate::client::EspoClient;
use crate::error::RestResult;
use crate::transport::HttpTransport;
use espocrm_types::{Method, Params};
use serde::Serialize;
use tracing::instrument;

/// Record CRUD endpoints
pub struct EntityEndpoints<'a, T> {
    client: &'a EspoClient<T>,
}

impl<'a, T: HttpTransport> EntityEndpoints<'a, T> {
    pub fn new(client: &'a EspoClient<T>) -> Self {
        Self { client }
    }

    /// List records
    ///
    /// # Arguments
    /// * `entity` - Entity type (e.g., "Account")
    /// * `params` - Paging, sorting and `where` filters
    #[instrument(skip(self, params))]
    pub async fn list(&self, entity: &str, params: Option<&Params>) -> RestResult<String> {
        self.client.get(entity, params).await
    }

    /// Read a single record
    #[instrument(skip(self))]
    pub async fn read(&self, entity: &str, id: &str) -> RestResult<String> {
        self.client.get(&record_path(entity, id), None).await
    }

    /// Create a record
    #[instrument(skip(self, payload))]
    pub async fn create<P>(&self, entity: &str, payload: &P) -> RestResult<String>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.client.request(Method::Post, entity, Some(payload)).await
    }

    /// Update a record
    #[instrument(skip(self, payload))]
    pub async fn update<P>(&self, entity: &str, id: &str, payload: &P) -> RestResult<String>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.client
            .request(Method::Put, &record_path(entity, id), Some(payload))
            .await
    }

    /// Delete a record
    #[instrument(skip(self))]
    pub async fn delete(&self, entity: &str, id: &str) -> RestResult<String> {
        self.client.send(Method::Delete, &record_path(entity, id)).await
    }

    /// List records linked to a record through `link`
    ///
    /// # Arguments
    /// * `entity` - Entity type of the parent record
    /// * `id` - Parent record id
    /// * `link` - Relationship name (e.g., "contacts")
    /// * `params` - Paging, sorting and `where` filters
    #[instrument(skip(self, params))]
    pub async fn list_related(
        &self,
        entity: &str,
        id: &str,
        link: &str,
        params: Option<&Params>,
    ) -> RestResult<String> {
        let action = format!("{}/{}", record_path(entity, id), link);
        self.client.get(&action, params).await
    }
}

fn record_path(entity: &str, id: &str) -> String {
    format!("{}/{}", entity, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path() {
        assert_eq!(record_path("Account", "5f1a"), "Account/5f1a");
    }
}
