//! HTTP request methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a record or a list of records
    Get,
    /// Create a record
    Post,
    /// Update a record
    Put,
    /// Remove a record
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if a payload is attached to requests with this method
    pub fn allows_body(&self) -> bool {
        !matches!(self, Self::Get)
    }

    /// Returns true if query parameters are appended to the URL for this method
    pub fn allows_query(&self) -> bool {
        !matches!(self, Self::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unsupported method name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct ParseMethodError(pub String);
